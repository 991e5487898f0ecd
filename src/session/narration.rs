//! Spoken feedback for a missed word
//!
//! Three phases, queued back to back on the speaker:
//! 1. the whole word at the word rate
//! 2. every character, left to right, at the spelling rate
//! 3. the whole word again; its end completes the narration

use tracing::{debug, warn};

use super::collaborators::{Speaker, Utterance, UtteranceId, Voice};
use super::queue::Word;
use crate::config::SessionConfig;
use crate::Result;

/// Which part of the narration is playing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NarrationPhase {
    SayWord,
    /// Index of the letter currently being spelled
    SpellLetters(usize),
    RepeatWord,
}

/// In-flight narration for one word
#[derive(Clone, Debug)]
pub struct Narration {
    say: UtteranceId,
    letters: Vec<UtteranceId>,
    repeat: UtteranceId,
    phase: NarrationPhase,
}

impl Narration {
    pub fn phase(&self) -> NarrationPhase {
        self.phase
    }

    /// Advance on a finished utterance. Returns true once the repeat has ended.
    pub fn on_utterance_end(&mut self, id: UtteranceId) -> bool {
        if id == self.repeat {
            return true;
        }

        if id == self.say {
            self.phase = if self.letters.is_empty() {
                NarrationPhase::RepeatWord
            } else {
                NarrationPhase::SpellLetters(0)
            };
        } else if let Some(idx) = self.letters.iter().position(|&l| l == id) {
            self.phase = if idx + 1 < self.letters.len() {
                NarrationPhase::SpellLetters(idx + 1)
            } else {
                NarrationPhase::RepeatWord
            };
        }
        false
    }
}

/// Result of starting a narration
#[derive(Debug)]
pub enum NarrationStatus {
    /// Waiting for the repeat utterance to end
    Pending(Narration),
    /// Nothing could be spoken; treat as already finished
    Completed,
}

/// Builds and submits narration utterances
#[derive(Clone, Debug)]
pub struct Narrator {
    word_rate: f32,
    spell_rate: f32,
    preferred_voice: Option<String>,
}

impl Narrator {
    pub fn new(config: &SessionConfig) -> Self {
        Narrator {
            word_rate: config.word_rate,
            spell_rate: config.spell_rate,
            preferred_voice: config.preferred_voice.clone(),
        }
    }

    /// Queue the three phases for `word`
    ///
    /// Voice is picked from whatever the speaker knows right now. If the
    /// speaker refuses an utterance, the narration counts as complete so
    /// the session never stalls.
    pub fn narrate(&self, word: &Word, speaker: &mut dyn Speaker) -> NarrationStatus {
        let voice = self.select_voice(&speaker.voices());
        if voice.is_none() {
            debug!(word = %word, "no voice available, speaking with default");
        }

        match self.submit(word, voice, speaker) {
            Ok(narration) => NarrationStatus::Pending(narration),
            Err(e) => {
                warn!(word = %word, error = %e, "narration skipped");
                NarrationStatus::Completed
            }
        }
    }

    /// Preferred voice by name or language, else the first one listed
    pub fn select_voice(&self, voices: &[Voice]) -> Option<Voice> {
        self.preferred_voice
            .as_deref()
            .and_then(|wanted| {
                voices.iter().find(|v| {
                    v.name.eq_ignore_ascii_case(wanted) || v.language.eq_ignore_ascii_case(wanted)
                })
            })
            .or_else(|| voices.first())
            .cloned()
    }

    fn submit(
        &self,
        word: &Word,
        voice: Option<Voice>,
        speaker: &mut dyn Speaker,
    ) -> Result<Narration> {
        let utterance = |text: String, rate: f32| Utterance {
            text,
            voice: voice.clone(),
            rate,
        };

        let say = speaker.speak(utterance(word.to_string(), self.word_rate))?;
        let letters = word
            .as_str()
            .chars()
            .map(|c| speaker.speak(utterance(c.to_string(), self.spell_rate)))
            .collect::<Result<Vec<_>>>()?;
        let repeat = speaker.speak(utterance(word.to_string(), self.word_rate))?;

        Ok(Narration {
            say,
            letters,
            repeat,
            phase: NarrationPhase::SayWord,
        })
    }
}
