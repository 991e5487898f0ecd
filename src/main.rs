//! Spell Drop - falling-word spelling practice
//!
//! Single-session, self-contained terminal game. Words fall from the top of
//! the screen; missed words are spelled out loud through a TTS program.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spell_drop::cli::{Command, Display, InputHandler, Playfield, ScoreLine};
use spell_drop::config::{MissPolicy, SessionConfig};
use spell_drop::session::{Collaborators, NarrationPhase, PracticeSession, Speaker, WordQueue};
use spell_drop::speech::{CommandSpeaker, SilentSpeaker};
use spell_drop::{logging, words};
use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "Spell Drop")]
#[command(about = "Falling-word spelling practice with spoken feedback")]
struct Args {
    /// Word list: {"words": [...]}, a JSON array, or plain text
    #[arg(short, long, default_value = "data/words.json")]
    words: PathBuf,

    /// Seed for a reproducible word order
    #[arg(long)]
    seed: Option<u64>,

    /// Tick period in milliseconds
    #[arg(long, default_value = "16")]
    tick_ms: u64,

    /// Fall speed in rows per second
    #[arg(long, default_value = "3.0")]
    fall_speed: f32,

    /// Leftward drift in columns per second
    #[arg(long, default_value = "1.0")]
    drift: f32,

    /// Preferred voice (name or language code)
    #[arg(long, default_value = "en-gb")]
    voice: String,

    /// Rate multiplier for spelled letters
    #[arg(long, default_value = "0.8")]
    spell_rate: f32,

    /// Text-to-speech program
    #[arg(long, default_value = "espeak-ng")]
    speech_command: String,

    /// Disable speech entirely
    #[arg(short, long)]
    mute: bool,

    /// After spelling a missed word, move on instead of showing it again
    #[arg(long)]
    advance_after_miss: bool,

    /// Count words that reach the edge as timeouts rather than misses
    #[arg(long)]
    separate_timeouts: bool,

    /// Log verbosity (-v warn, -vv info, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Status line for the narration in progress
fn narration_status(word: &str, phase: NarrationPhase) -> String {
    match phase {
        NarrationPhase::SayWord | NarrationPhase::RepeatWord => format!("🔊 {}", word),
        NarrationPhase::SpellLetters(idx) => {
            let letters: Vec<String> = word
                .chars()
                .enumerate()
                .map(|(i, c)| if i == idx { format!("[{}]", c) } else { c.to_string() })
                .collect();
            format!("🔊 {}", letters.join(" "))
        }
    }
}

/// TTS worker, or silence when speech is muted or unavailable
fn open_speaker(args: &Args) -> spell_drop::Result<Box<dyn Speaker>> {
    if args.mute {
        return Ok(Box::new(SilentSpeaker));
    }
    match CommandSpeaker::spawn(&args.speech_command) {
        Ok(speaker) => Ok(Box::new(speaker)),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            warn!(error = %e, "continuing without speech");
            eprintln!("⚠ {} (continuing without speech)", e);
            Ok(Box::new(SilentSpeaker))
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init_logging(args.verbose, args.log_file.as_deref())?;

    let word_list = words::load(&args.words)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let queue = WordQueue::build(&word_list, &mut rng)?;
    let mut speaker = open_speaker(&args)?;

    let display = Display::alternate()?;
    let input = InputHandler::new();
    let mut field = Playfield::for_terminal()?;
    let mut score = ScoreLine::default();

    let config = SessionConfig {
        spawn: field.spawn_state(args.fall_speed, args.drift),
        spell_rate: args.spell_rate,
        preferred_voice: Some(args.voice.clone()),
        miss_policy: if args.advance_after_miss {
            MissPolicy::Advance
        } else {
            MissPolicy::Retry
        },
        separate_timeouts: args.separate_timeouts,
        ..SessionConfig::default()
    };

    let mut session = PracticeSession::start(
        queue,
        config,
        &mut Collaborators {
            stage: &mut field,
            speaker: speaker.as_mut(),
            scoreboard: &mut score,
        },
    )?;

    let tick = Duration::from_millis(args.tick_ms.max(1));
    let mut last = Instant::now();

    // Event loop
    'session: while !session.is_exhausted() {
        {
            let mut host = Collaborators {
                stage: &mut field,
                speaker: speaker.as_mut(),
                scoreboard: &mut score,
            };

            for id in host.speaker.finished() {
                session.on_utterance_end(id, &mut host)?;
            }

            match input.poll_until(last + tick)? {
                Some(Command::Quit) => break 'session,
                Some(Command::Decide(decision)) => {
                    session.decide(decision, &mut host)?;
                }
                None => {}
            }
        }

        let now = Instant::now();
        let dt = (now - last).as_secs_f32();
        last = now;

        if field.step(dt) {
            session.boundary_collision(&mut Collaborators {
                stage: &mut field,
                speaker: speaker.as_mut(),
                scoreboard: &mut score,
            })?;
        }

        let status = match (session.current_word(), session.narration_phase()) {
            (Some(word), Some(phase)) => Some(narration_status(word.as_str(), phase)),
            _ => None,
        };
        display.render(&field, &score, session.remaining(), status.as_deref())?;
    }

    // Cleanup
    drop(display);

    let summary = session.tally().summary();
    println!("\n🎉 Session Complete!");
    println!(
        "📊 Correct: {} | Incorrect: {} | Timeout: {} | First try: {:.0}% | {:.1}s",
        summary.correct,
        summary.incorrect,
        summary.timeout,
        summary.first_try_accuracy * 100.0,
        summary.duration_secs
    );

    if !summary.most_missed.is_empty() {
        let missed: Vec<String> = summary
            .most_missed
            .iter()
            .map(|(word, n)| format!("{} ×{}", word, n))
            .collect();
        println!("⚠️  Most missed: {}", missed.join(", "));
    }

    println!("Thanks for practicing!");

    Ok(())
}
