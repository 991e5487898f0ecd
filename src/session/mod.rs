//! Practice session: word pool, judgment, narration and tally
//!
//! # Components
//! - `queue.rs`: shuffled word pool consumed from the end
//! - `judgment.rs`: PracticeSession state machine
//! - `narration.rs`: say / spell / repeat sequencing on the speaker
//! - `tally.rs`: outcome buckets and the end-of-session summary
//! - `collaborators.rs`: stage, speaker and scoreboard traits

pub mod collaborators;
pub mod judgment;
pub mod narration;
pub mod queue;
pub mod tally;

pub use collaborators::{
    Bounds, Collaborators, Scoreboard, Speaker, Stage, Utterance, UtteranceId, Voice,
};
pub use judgment::{Decision, Phase, PracticeSession, Transition};
pub use narration::{Narration, NarrationPhase, NarrationStatus, Narrator};
pub use queue::{Word, WordQueue};
pub use tally::{OutcomeKind, SessionSummary, SessionTally};
