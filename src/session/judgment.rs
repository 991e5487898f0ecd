//! Judgment engine: the practice session state machine
//!
//! AwaitingDecision --correct--> next word | Exhausted
//! AwaitingDecision --incorrect / collision--> Narrating
//! Narrating --repeat utterance ended--> AwaitingDecision | Exhausted
//!
//! Input is honoured only while `accepting` is set. It drops on the first
//! qualifying signal and comes back when the next word is presented.

use tracing::{debug, info};

use super::collaborators::{Collaborators, UtteranceId};
use super::narration::{Narration, NarrationPhase, NarrationStatus, Narrator};
use super::queue::{Word, WordQueue};
use super::tally::{OutcomeKind, SessionTally};
use crate::config::{MissPolicy, SessionConfig};
use crate::Result;

/// Learner decision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Correct,
    Incorrect,
}

/// Engine state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingDecision,
    Processing,
    Narrating,
    Exhausted,
}

/// What a signal did to the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Signal arrived while input was closed
    Ignored,
    /// Judged; a word is now awaiting a decision
    Judged(OutcomeKind),
    /// Judged as a miss; narration is playing
    Narrating(OutcomeKind),
    /// Judged; nothing left to present
    Finished(OutcomeKind),
    /// Narration ended and a word is awaiting a decision
    Presented,
    /// Narration ended and nothing is left to present
    Exhausted,
}

/// One practice session, owned by the driver
pub struct PracticeSession {
    config: SessionConfig,
    queue: WordQueue,
    tally: SessionTally,
    narrator: Narrator,
    phase: Phase,
    current: Option<Word>,
    accepting: bool,
    narration: Option<Narration>,
}

impl PracticeSession {
    /// Take the first word from `queue` and present it
    pub fn start(
        mut queue: WordQueue,
        config: SessionConfig,
        host: &mut Collaborators<'_>,
    ) -> Result<Self> {
        let first = queue.take_next()?;
        info!(words = queue.remaining() + 1, "session started");

        let mut session = PracticeSession {
            narrator: Narrator::new(&config),
            config,
            queue,
            tally: SessionTally::new(),
            phase: Phase::Processing,
            current: None,
            accepting: false,
            narration: None,
        };
        host.scoreboard.set_correct_count(0);
        session.present(first, host);
        Ok(session)
    }

    /// Apply a learner decision
    pub fn decide(
        &mut self,
        decision: Decision,
        host: &mut Collaborators<'_>,
    ) -> Result<Transition> {
        match decision {
            Decision::Correct => self.judge(OutcomeKind::Correct, host),
            Decision::Incorrect => self.judge(OutcomeKind::Incorrect, host),
        }
    }

    /// The falling word reached a play-area edge without a decision
    pub fn boundary_collision(&mut self, host: &mut Collaborators<'_>) -> Result<Transition> {
        let kind = if self.config.separate_timeouts {
            OutcomeKind::Timeout
        } else {
            OutcomeKind::Incorrect
        };
        self.judge(kind, host)
    }

    /// Forward a finished utterance from the speaker
    pub fn on_utterance_end(
        &mut self,
        id: UtteranceId,
        host: &mut Collaborators<'_>,
    ) -> Result<Transition> {
        let done = match (self.phase, self.narration.as_mut()) {
            (Phase::Narrating, Some(narration)) => narration.on_utterance_end(id),
            _ => return Ok(Transition::Ignored),
        };
        if !done {
            return Ok(Transition::Ignored);
        }
        self.narration = None;
        self.finish_narration(host)
    }

    fn judge(&mut self, kind: OutcomeKind, host: &mut Collaborators<'_>) -> Result<Transition> {
        if !self.accepting || self.phase != Phase::AwaitingDecision {
            return Ok(Transition::Ignored);
        }
        let word = match self.current.clone() {
            Some(word) => word,
            None => return Ok(Transition::Ignored),
        };

        self.accepting = false;
        self.phase = Phase::Processing;
        self.tally.record(kind, word.clone());
        debug!(word = %word, outcome = kind.as_str(), "judged");

        match kind {
            OutcomeKind::Correct => {
                host.scoreboard
                    .set_correct_count(self.tally.count_of(OutcomeKind::Correct));
                if self.queue.has_more() {
                    let next = self.queue.take_next()?;
                    self.present(next, host);
                    Ok(Transition::Judged(kind))
                } else {
                    self.exhaust();
                    Ok(Transition::Finished(kind))
                }
            }
            OutcomeKind::Incorrect | OutcomeKind::Timeout => {
                let (x, y) = self.config.spawn.position;
                host.stage.set_velocity(0.0, 0.0);
                host.stage.set_position(x, y);
                host.stage.set_tint(self.config.missed_tint);

                self.phase = Phase::Narrating;
                match self.narrator.narrate(&word, &mut *host.speaker) {
                    NarrationStatus::Pending(narration) => {
                        self.narration = Some(narration);
                        Ok(Transition::Narrating(kind))
                    }
                    NarrationStatus::Completed => match self.finish_narration(host)? {
                        Transition::Exhausted => Ok(Transition::Finished(kind)),
                        _ => Ok(Transition::Judged(kind)),
                    },
                }
            }
        }
    }

    fn finish_narration(&mut self, host: &mut Collaborators<'_>) -> Result<Transition> {
        self.phase = Phase::Processing;
        let next = match self.config.miss_policy {
            MissPolicy::Retry => self.current.clone(),
            MissPolicy::Advance if self.queue.has_more() => Some(self.queue.take_next()?),
            MissPolicy::Advance => None,
        };

        match next {
            Some(word) => {
                self.present(word, host);
                Ok(Transition::Presented)
            }
            None => {
                self.exhaust();
                Ok(Transition::Exhausted)
            }
        }
    }

    fn present(&mut self, word: Word, host: &mut Collaborators<'_>) {
        let spawn = self.config.spawn;

        host.stage.set_word_text(word.as_str());
        let bounds = host.stage.word_display_bounds();
        host.stage.set_body_size(bounds);
        host.stage.set_tint(self.config.default_tint);
        host.stage.set_position(spawn.position.0, spawn.position.1);
        host.stage.set_velocity(spawn.velocity.0, spawn.velocity.1);

        debug!(word = %word, remaining = self.queue.remaining(), "presenting");
        self.current = Some(word);
        self.phase = Phase::AwaitingDecision;
        self.accepting = true;
    }

    fn exhaust(&mut self) {
        self.current = None;
        self.accepting = false;
        self.phase = Phase::Exhausted;
        info!(
            correct = self.tally.count_of(OutcomeKind::Correct),
            incorrect = self.tally.count_of(OutcomeKind::Incorrect),
            timeout = self.tally.count_of(OutcomeKind::Timeout),
            "session exhausted"
        );
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == Phase::Exhausted
    }

    pub fn accepting_input(&self) -> bool {
        self.accepting
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.current.as_ref()
    }

    /// Phase of the narration in flight, if any
    pub fn narration_phase(&self) -> Option<NarrationPhase> {
        self.narration.as_ref().map(Narration::phase)
    }

    pub fn tally(&self) -> &SessionTally {
        &self.tally
    }

    pub fn remaining(&self) -> usize {
        self.queue.remaining()
    }
}
