//! Keystroke input handling using crossterm
//!
//! Features:
//! - Arrow keys mapped to decisions (up/right correct, down/left incorrect)
//! - At most one command per tick
//! - Ctrl+C / Escape exit

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

use crate::session::Decision;
use crate::Result;

/// What a key press asks the driver to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Decide(Decision),
    Quit,
}

/// Handles user input from terminal
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        InputHandler
    }

    /// Drain key events until `deadline`, returning the first command seen
    ///
    /// Later presses in the same tick are discarded so one physical burst
    /// never produces two judgments.
    pub fn poll_until(&self, deadline: Instant) -> Result<Option<Command>> {
        let mut command = None;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if !event::poll(deadline - now)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if command.is_none() {
                    command = Self::command_for(&key);
                }
            }
        }
        Ok(command)
    }

    /// Map a key event to a command
    pub fn command_for(key: &KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if Self::is_exit(key) {
            return Some(Command::Quit);
        }
        match key.code {
            KeyCode::Up | KeyCode::Right => Some(Command::Decide(Decision::Correct)),
            KeyCode::Down | KeyCode::Left => Some(Command::Decide(Decision::Incorrect)),
            _ => None,
        }
    }

    /// Check if key event is an exit signal (Ctrl+C or Escape)
    pub fn is_exit(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Esc => true,
            _ => false,
        }
    }
}
