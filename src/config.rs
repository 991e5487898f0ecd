//! Session settings
//!
//! Everything the core needs to know about how a word is spawned, how it is
//! tinted, and how narration is paced. The binary builds this from CLI
//! arguments; tests use `SessionConfig::default()`.

/// RGB tint applied to the falling word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tint(pub u32);

impl Tint {
    /// Untinted (white).
    pub const DEFAULT: Tint = Tint(0xffffff);
    /// Tint for a missed word while it is being spelled out.
    pub const MISSED: Tint = Tint(0xff0000);

    /// Split into (r, g, b) components.
    pub fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

/// Position and velocity a word starts from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnState {
    /// (x, y) of the word's top-left corner
    pub position: (f32, f32),
    /// (x, y) velocity in play-area units per second
    pub velocity: (f32, f32),
}

impl Default for SpawnState {
    fn default() -> Self {
        SpawnState {
            position: (400.0, 100.0),
            velocity: (-25.0, 100.0),
        }
    }
}

/// What happens after a missed word has been spelled out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Show the missed word again until it is answered correctly
    #[default]
    Retry,
    /// Move on to the next word from the pool
    Advance,
}

/// Complete session configuration
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Where and how fast each word starts
    pub spawn: SpawnState,
    /// Tint for a word awaiting a decision
    pub default_tint: Tint,
    /// Tint for a word being narrated
    pub missed_tint: Tint,
    /// Rate for the whole-word utterances (1.0 = speaker default)
    pub word_rate: f32,
    /// Rate for each spelled letter
    pub spell_rate: f32,
    /// Preferred voice (matched against voice name or language)
    pub preferred_voice: Option<String>,
    /// Behaviour after narration
    pub miss_policy: MissPolicy,
    /// Record boundary collisions as `timeout` instead of `incorrect`
    pub separate_timeouts: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            spawn: SpawnState::default(),
            default_tint: Tint::DEFAULT,
            missed_tint: Tint::MISSED,
            word_rate: 1.0,
            spell_rate: 0.8,
            preferred_voice: None,
            miss_policy: MissPolicy::Retry,
            separate_timeouts: false,
        }
    }
}
