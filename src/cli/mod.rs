//! CLI Interface: user input and terminal rendering
//!
//! # Components
//! - `input.rs`: key polling mapped to decisions
//! - `display.rs`: play area, score line and rendering

pub mod display;
pub mod input;

pub use display::{Display, Playfield, ScoreLine};
pub use input::{Command, InputHandler};
