//! Terminal play area and rendering
//!
//! Features:
//! - `Playfield`: the falling word's body (position, velocity, size, tint)
//!   with edge collision against the play-area bounds
//! - `ScoreLine`: the running correct count
//! - `Display`: alternate-screen rendering of both plus status and help

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{stdout, Write};

use crate::config::{SpawnState, Tint};
use crate::logging;
use crate::session::{Bounds, Scoreboard, Stage};
use crate::Result;

/// Rows above the play area (score line + rule)
pub const HUD_ROWS: u16 = 2;
/// Rows below the play area (status + help)
pub const FOOTER_ROWS: u16 = 2;

/// The falling word, in play-area cells
#[derive(Clone, Debug)]
pub struct Playfield {
    width: f32,
    height: f32,
    text: String,
    position: (f32, f32),
    velocity: (f32, f32),
    size: Bounds,
    tint: Tint,
}

impl Playfield {
    pub fn new(width: u16, height: u16) -> Self {
        Playfield {
            width: width as f32,
            height: height as f32,
            text: String::new(),
            position: (0.0, 0.0),
            velocity: (0.0, 0.0),
            size: Bounds {
                width: 0.0,
                height: 0.0,
            },
            tint: Tint::DEFAULT,
        }
    }

    /// Play area sized to the terminal, minus HUD and footer
    pub fn for_terminal() -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(cols, rows.saturating_sub(HUD_ROWS + FOOTER_ROWS).max(1)))
    }

    /// Spawn near the top centre, falling at `fall_speed` and drifting left
    pub fn spawn_state(&self, fall_speed: f32, drift: f32) -> SpawnState {
        SpawnState {
            position: ((self.width / 2.0).floor(), 0.0),
            velocity: (-drift, fall_speed),
        }
    }

    /// Advance by `dt` seconds. Returns true when the moving word hits an edge.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.velocity == (0.0, 0.0) {
            return false;
        }

        let mut x = self.position.0 + self.velocity.0 * dt;
        let mut y = self.position.1 + self.velocity.1 * dt;
        let (max_x, max_y) = self.max_position();
        // A word wider than the play area cannot collide sideways
        let fits = self.size.width < self.width;
        let hit_x = fits
            && ((x <= 0.0 && self.velocity.0 < 0.0) || (x >= max_x && self.velocity.0 > 0.0));
        let hit_y = (y <= 0.0 && self.velocity.1 < 0.0) || (y >= max_y && self.velocity.1 > 0.0);

        x = x.clamp(0.0, max_x);
        y = y.clamp(0.0, max_y);
        self.position = (x, y);
        hit_x || hit_y
    }

    /// Largest top-left position that keeps the body inside the play area
    fn max_position(&self) -> (f32, f32) {
        (
            (self.width - self.size.width).max(0.0),
            (self.height - self.size.height).max(0.0),
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }
}

impl Stage for Playfield {
    fn set_word_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn word_display_bounds(&self) -> Bounds {
        Bounds {
            width: self.text.chars().count() as f32,
            height: 1.0,
        }
    }

    fn set_body_size(&mut self, bounds: Bounds) {
        self.size = bounds;
    }

    fn set_velocity(&mut self, x: f32, y: f32) {
        self.velocity = (x, y);
    }

    /// Clamped so the current body stays inside the play area
    fn set_position(&mut self, x: f32, y: f32) {
        let (max_x, max_y) = self.max_position();
        self.position = (x.clamp(0.0, max_x), y.clamp(0.0, max_y));
    }

    fn set_tint(&mut self, tint: Tint) {
        self.tint = tint;
    }
}

/// Running correct count
#[derive(Clone, Debug, Default)]
pub struct ScoreLine {
    pub correct: usize,
}

impl Scoreboard for ScoreLine {
    fn set_correct_count(&mut self, count: usize) {
        self.correct = count;
    }
}

/// Terminal display manager
#[derive(Debug, Default)]
pub struct Display {
    /// Whether we're using alternate screen
    use_alternate_screen: bool,
    raw_mode: bool,
    stderr_held: bool,
}

impl Display {
    /// Enter the alternate screen, hide the cursor, then switch to raw mode
    ///
    /// Stderr logging is held back until the display shuts down.
    pub fn alternate() -> Result<Self> {
        let mut display = Display::default();
        logging::suspend_stderr(true);
        display.stderr_held = true;

        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        display.use_alternate_screen = true;

        terminal::enable_raw_mode()?;
        display.raw_mode = true;
        Ok(display)
    }

    /// Draw one frame
    pub fn render(
        &self,
        field: &Playfield,
        score: &ScoreLine,
        remaining: usize,
        status: Option<&str>,
    ) -> Result<()> {
        let mut stdout = stdout();
        let (cols, rows) = terminal::size()?;

        queue!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Magenta),
            Print("Correct: "),
            ResetColor,
            Print(score.correct),
            Print(format!("  |  Remaining: {}", remaining)),
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::Blue),
            Print("─".repeat(cols as usize)),
            ResetColor,
        )?;

        let (x, y) = field.position();
        let (r, g, b) = field.tint().rgb();
        queue!(
            stdout,
            cursor::MoveTo(x.round() as u16, y.round() as u16 + HUD_ROWS),
            SetForegroundColor(Color::Rgb { r, g, b }),
            Print(field.text()),
            ResetColor,
        )?;

        if let Some(status) = status {
            queue!(
                stdout,
                cursor::MoveTo(0, rows.saturating_sub(2)),
                SetForegroundColor(Color::Yellow),
                Print(status),
                ResetColor,
            )?;
        }

        queue!(
            stdout,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            SetForegroundColor(Color::DarkGrey),
            Print("↑/→ correct  |  ↓/← incorrect  |  Esc to exit"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Undo whatever `alternate` managed to set up
    pub fn shutdown(&mut self) -> Result<()> {
        if self.stderr_held {
            logging::suspend_stderr(false);
            self.stderr_held = false;
        }

        if self.raw_mode {
            terminal::disable_raw_mode()?;
            self.raw_mode = false;
        }

        if self.use_alternate_screen {
            execute!(stdout(), LeaveAlternateScreen, cursor::Show)?;
            self.use_alternate_screen = false;
        }
        Ok(())
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
