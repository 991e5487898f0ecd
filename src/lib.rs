//! Spell Drop - falling-word spelling practice
//!
//! A word falls down the play area. The learner judges it correct or
//! incorrect before it lands; misses are spelled out loud and shown again.
//! The session state machine lives in `session`; `cli` and `speech` are the
//! terminal host's collaborators.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod speech;
pub mod words;

pub use error::{Error, Result};
