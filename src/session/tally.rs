//! Session tally: every judged attempt, bucketed by outcome
//!
//! Maintains:
//! - Append-only `correct` / `incorrect` / `timeout` sequences
//! - Session duration
//! - Per-word miss counts for the end-of-session summary

use rustc_hash::{FxHashMap, FxHashSet};
use std::time::Instant;

use super::queue::Word;

/// Outcome of one judged attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Correct,
    Incorrect,
    Timeout,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Correct => "correct",
            OutcomeKind::Incorrect => "incorrect",
            OutcomeKind::Timeout => "timeout",
        }
    }
}

/// Outcome buckets for one session
#[derive(Clone, Debug)]
pub struct SessionTally {
    correct: Vec<Word>,
    incorrect: Vec<Word>,
    timeout: Vec<Word>,
    /// Session start time
    started_at: Instant,
}

impl SessionTally {
    pub fn new() -> Self {
        SessionTally {
            correct: Vec::new(),
            incorrect: Vec::new(),
            timeout: Vec::new(),
            started_at: Instant::now(),
        }
    }

    /// Append `word` to the bucket for `kind`
    pub fn record(&mut self, kind: OutcomeKind, word: Word) {
        match kind {
            OutcomeKind::Correct => self.correct.push(word),
            OutcomeKind::Incorrect => self.incorrect.push(word),
            OutcomeKind::Timeout => self.timeout.push(word),
        }
    }

    pub fn count_of(&self, kind: OutcomeKind) -> usize {
        self.bucket(kind).len()
    }

    /// Words recorded for `kind`, in judgment order
    pub fn bucket(&self, kind: OutcomeKind) -> &[Word] {
        match kind {
            OutcomeKind::Correct => &self.correct,
            OutcomeKind::Incorrect => &self.incorrect,
            OutcomeKind::Timeout => &self.timeout,
        }
    }

    /// Total judged attempts across all buckets
    pub fn total(&self) -> usize {
        self.correct.len() + self.incorrect.len() + self.timeout.len()
    }

    pub fn duration_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    /// Words missed at least once, most missed first (ties by word)
    pub fn most_missed(&self, count: usize) -> Vec<(Word, usize)> {
        let mut misses: FxHashMap<&Word, usize> = FxHashMap::default();
        for word in self.incorrect.iter().chain(self.timeout.iter()) {
            *misses.entry(word).or_insert(0) += 1;
        }

        let mut ranked: Vec<(Word, usize)> = misses
            .into_iter()
            .map(|(word, n)| (word.clone(), n))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        ranked.into_iter().take(count).collect()
    }

    /// Fraction of correct answers given without any prior miss of that word
    pub fn first_try_accuracy(&self) -> f32 {
        if self.correct.is_empty() {
            return 0.0;
        }
        let missed: FxHashSet<&Word> = self.incorrect.iter().chain(self.timeout.iter()).collect();
        let clean = self.correct.iter().filter(|w| !missed.contains(w)).count();
        clean as f32 / self.correct.len() as f32
    }

    /// Snapshot for the end-of-session report
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct: self.count_of(OutcomeKind::Correct),
            incorrect: self.count_of(OutcomeKind::Incorrect),
            timeout: self.count_of(OutcomeKind::Timeout),
            first_try_accuracy: self.first_try_accuracy(),
            duration_secs: self.duration_secs(),
            most_missed: self.most_missed(5),
        }
    }
}

impl Default for SessionTally {
    fn default() -> Self {
        Self::new()
    }
}

/// End-of-session numbers
#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub correct: usize,
    pub incorrect: usize,
    pub timeout: usize,
    pub first_try_accuracy: f32,
    pub duration_secs: f64,
    pub most_missed: Vec<(Word, usize)>,
}
