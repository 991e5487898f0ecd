//! Recording collaborators shared by the integration tests

#![allow(dead_code)]

use spell_drop::config::Tint;
use spell_drop::session::{
    Bounds, Collaborators, Scoreboard, Speaker, Stage, Utterance, UtteranceId, Voice,
};
use spell_drop::{Error, Result};

#[derive(Debug, Default)]
pub struct RecordingStage {
    pub text: String,
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub size: Option<Bounds>,
    pub tint: Option<Tint>,
}

impl Stage for RecordingStage {
    fn set_word_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
    fn word_display_bounds(&self) -> Bounds {
        Bounds {
            width: self.text.chars().count() as f32 * 10.0,
            height: 12.0,
        }
    }
    fn set_body_size(&mut self, bounds: Bounds) {
        self.size = Some(bounds);
    }
    fn set_velocity(&mut self, x: f32, y: f32) {
        self.velocity = (x, y);
    }
    fn set_position(&mut self, x: f32, y: f32) {
        self.position = (x, y);
    }
    fn set_tint(&mut self, tint: Tint) {
        self.tint = Some(tint);
    }
}

/// Queues utterances without playing them; tests decide when each one ends
#[derive(Debug, Default)]
pub struct QueuedSpeaker {
    pub voices: Vec<Voice>,
    pub spoken: Vec<(UtteranceId, Utterance)>,
    pub unavailable: bool,
    played: usize,
}

impl QueuedSpeaker {
    pub fn texts(&self) -> Vec<&str> {
        self.spoken.iter().map(|(_, u)| u.text.as_str()).collect()
    }

    /// Ids not yet reported as finished, oldest first
    pub fn pending(&self) -> Vec<UtteranceId> {
        self.spoken[self.played..].iter().map(|(id, _)| *id).collect()
    }

    /// Mark the next `n` utterances as played
    pub fn play(&mut self, n: usize) -> Vec<UtteranceId> {
        let end = self.played.saturating_add(n).min(self.spoken.len());
        let ids = self.spoken[self.played..end].iter().map(|(id, _)| *id).collect();
        self.played = end;
        ids
    }
}

impl Speaker for QueuedSpeaker {
    fn voices(&mut self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<UtteranceId> {
        if self.unavailable {
            return Err(Error::SpeechUnavailable {
                message: "no speech in tests".into(),
            });
        }
        let id = UtteranceId(self.spoken.len() as u64 + 100);
        self.spoken.push((id, utterance));
        Ok(id)
    }
}

#[derive(Debug, Default)]
pub struct CountingScore {
    pub shown: Vec<usize>,
}

impl Scoreboard for CountingScore {
    fn set_correct_count(&mut self, count: usize) {
        self.shown.push(count);
    }
}

#[derive(Debug, Default)]
pub struct Host {
    pub stage: RecordingStage,
    pub speaker: QueuedSpeaker,
    pub score: CountingScore,
}

impl Host {
    pub fn collaborators(&mut self) -> Collaborators<'_> {
        Collaborators {
            stage: &mut self.stage,
            speaker: &mut self.speaker,
            scoreboard: &mut self.score,
        }
    }
}
