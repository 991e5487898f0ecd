//! Word pool: shuffled once, consumed from the end

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use crate::{Error, Result};

/// An immutable practice word
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Word(String);

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Word(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Word {
    fn from(text: &str) -> Self {
        Word::new(text)
    }
}

/// The pool of words not yet presented
#[derive(Clone, Debug)]
pub struct WordQueue {
    pool: Vec<Word>,
}

impl WordQueue {
    /// Shuffle a copy of `words` (Fisher–Yates) and keep it as the pool
    pub fn build<S, R>(words: &[S], rng: &mut R) -> Result<Self>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut queue = Self::in_order(words)?;
        queue.pool.shuffle(rng);
        Ok(queue)
    }

    /// Keep `words` in the given order; the last word is served first
    pub fn in_order<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        if words.is_empty() {
            return Err(Error::EmptyWordList);
        }
        Ok(WordQueue {
            pool: words.iter().map(|w| Word::new(w.as_ref())).collect(),
        })
    }

    /// Remove and return the word at the end of the pool
    pub fn take_next(&mut self) -> Result<Word> {
        self.pool.pop().ok_or(Error::QueueExhausted)
    }

    pub fn has_more(&self) -> bool {
        !self.pool.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }
}
