//! Boundary traits the session drives
//!
//! The session owns no rendering, audio or input. Hosts implement these and
//! pass them in on every call via [`Collaborators`].

use crate::config::Tint;
use crate::Result;

/// Size of the rendered word
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// Rendering / physics side of the falling word
pub trait Stage {
    fn set_word_text(&mut self, text: &str);
    fn word_display_bounds(&self) -> Bounds;
    /// Resize the physics body to the rendered text
    fn set_body_size(&mut self, bounds: Bounds);
    fn set_velocity(&mut self, x: f32, y: f32);
    fn set_position(&mut self, x: f32, y: f32);
    fn set_tint(&mut self, tint: Tint);
}

/// Identifier the speaker hands back for each queued utterance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UtteranceId(pub u64);

/// A voice the speaker can use
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub language: String,
}

/// One queued piece of speech
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<Voice>,
    /// Multiplier on the speaker's default rate
    pub rate: f32,
}

/// Text-to-speech with serial FIFO playback
///
/// Utterances play in submission order. The host reports each finished
/// utterance back to the session with `PracticeSession::on_utterance_end`.
pub trait Speaker {
    /// Voices known so far; may be empty until the backend reports them
    fn voices(&mut self) -> Vec<Voice>;
    /// Queue an utterance. Fails with `SpeechUnavailable` if nothing can be spoken.
    fn speak(&mut self, utterance: Utterance) -> Result<UtteranceId>;
    /// Utterances that finished playing since the last call, in order
    fn finished(&mut self) -> Vec<UtteranceId> {
        Vec::new()
    }
}

/// Score readout
pub trait Scoreboard {
    fn set_correct_count(&mut self, count: usize);
}

/// Everything the session talks to, borrowed for one call
pub struct Collaborators<'a> {
    pub stage: &'a mut dyn Stage,
    pub speaker: &'a mut dyn Speaker,
    pub scoreboard: &'a mut dyn Scoreboard,
}
