//! Speech backends for the terminal host
//!
//! - `CommandSpeaker`: runs an external TTS program (espeak-ng by default)
//!   on a worker thread, one utterance at a time, in submission order.
//!   Dropping it discards queued utterances and kills the one playing.
//! - `SilentSpeaker`: refuses everything, so narration completes at once

use crossbeam::channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

use crate::session::{Speaker, Utterance, UtteranceId, Voice};
use crate::{Error, Result};

/// Speaking rate (words per minute) that maps to a rate multiplier of 1.0
pub const DEFAULT_WPM: f32 = 175.0;

/// How often a playing utterance checks for shutdown
const STOP_POLL: Duration = Duration::from_millis(10);

struct Job {
    id: UtteranceId,
    utterance: Utterance,
}

/// How one utterance ended
enum Playback {
    Finished,
    Stopped,
}

/// Serial FIFO speech through an external program
pub struct CommandSpeaker {
    jobs: Option<Sender<Job>>,
    /// Never sent on; dropping it tells the worker to stop
    stop: Option<Sender<()>>,
    finished: Receiver<UtteranceId>,
    voice_updates: Receiver<Vec<Voice>>,
    voices: Vec<Voice>,
    next_id: u64,
    worker: Option<JoinHandle<()>>,
}

impl CommandSpeaker {
    /// Probe `program` and start the playback worker
    pub fn spawn(program: &str) -> Result<Self> {
        Command::new(program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| Error::SpeechUnavailable {
                message: format!("{}: {}", program, e),
            })?;

        let (job_tx, job_rx) = unbounded::<Job>();
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let (done_tx, done_rx) = unbounded();
        let (voices_tx, voices_rx) = unbounded();

        let lister = program.to_string();
        thread::Builder::new()
            .name("speech-voices".into())
            .spawn(move || match list_voices(&lister) {
                Ok(voices) => {
                    debug!(count = voices.len(), "voices available");
                    let _ = voices_tx.send(voices);
                }
                Err(e) => warn!(error = %e, "could not list voices"),
            })?;

        let player = program.to_string();
        let worker = thread::Builder::new()
            .name("speech".into())
            .spawn(move || {
                for job in job_rx.iter() {
                    if stop_requested(&stop_rx) {
                        break;
                    }
                    match play(&player, &job.utterance, &stop_rx) {
                        Ok(Playback::Finished) => {}
                        Ok(Playback::Stopped) => break,
                        Err(e) => {
                            warn!(text = %job.utterance.text, error = %e, "utterance failed")
                        }
                    }
                    if done_tx.send(job.id).is_err() {
                        break;
                    }
                }
                debug!("speech worker stopped");
            })?;

        Ok(CommandSpeaker {
            jobs: Some(job_tx),
            stop: Some(stop_tx),
            finished: done_rx,
            voice_updates: voices_rx,
            voices: Vec::new(),
            next_id: 0,
            worker: Some(worker),
        })
    }
}

impl Speaker for CommandSpeaker {
    fn voices(&mut self) -> Vec<Voice> {
        if let Some(latest) = self.voice_updates.try_iter().last() {
            self.voices = latest;
        }
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<UtteranceId> {
        let jobs = self.jobs.as_ref().ok_or_else(|| Error::SpeechUnavailable {
            message: "speaker shut down".into(),
        })?;

        self.next_id += 1;
        let id = UtteranceId(self.next_id);
        jobs.send(Job { id, utterance })
            .map_err(|_| Error::SpeechUnavailable {
                message: "speech worker stopped".into(),
            })?;
        Ok(id)
    }

    fn finished(&mut self) -> Vec<UtteranceId> {
        self.finished.try_iter().collect()
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.stop.take();
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Speaker with no audio backend
#[derive(Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn voices(&mut self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&mut self, _utterance: Utterance) -> Result<UtteranceId> {
        Err(Error::SpeechUnavailable {
            message: "speech disabled".into(),
        })
    }
}

/// Command-line arguments for one utterance
pub fn command_args(utterance: &Utterance) -> Vec<String> {
    let wpm = (DEFAULT_WPM * utterance.rate).round().max(1.0) as u32;
    let mut args = vec!["-s".to_string(), wpm.to_string()];
    if let Some(voice) = &utterance.voice {
        args.push("-v".to_string());
        args.push(voice.language.clone());
    }
    args.push("--".to_string());
    args.push(utterance.text.clone());
    args
}

fn stop_requested(stop: &Receiver<()>) -> bool {
    !matches!(stop.try_recv(), Err(TryRecvError::Empty))
}

/// Run one utterance to completion, or kill it once a stop is requested
fn play(program: &str, utterance: &Utterance, stop: &Receiver<()>) -> Result<Playback> {
    let mut child = Command::new(program)
        .args(command_args(utterance))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    loop {
        if let Some(status) = child.try_wait()? {
            if !status.success() {
                return Err(Error::SpeechUnavailable {
                    message: format!("{} exited with {}", program, status),
                });
            }
            return Ok(Playback::Finished);
        }

        match stop.recv_timeout(STOP_POLL) {
            Err(RecvTimeoutError::Timeout) => {}
            _ => {
                let _ = child.kill();
                child.wait()?;
                return Ok(Playback::Stopped);
            }
        }
    }
}

fn list_voices(program: &str) -> Result<Vec<Voice>> {
    let output = Command::new(program)
        .arg("--voices")
        .stderr(Stdio::null())
        .output()?;
    Ok(parse_voices(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse the `--voices` table: `Pty Language Age/Gender VoiceName File ...`
pub fn parse_voices(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            match cols.as_slice() {
                [_, language, _, name, ..] => Some(Voice {
                    name: name.to_string(),
                    language: language.to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}
