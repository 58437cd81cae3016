//! Rotary device input
//!
//! The device sends one text line per event: either the literal
//! `Button pressed` or a signed integer encoder position. Lines are read on a
//! background thread so the tick loop can poll without blocking.

use std::collections::VecDeque;
use std::io::{BufRead, ErrorKind};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::sim::Sample;

/// Line the device sends when its button is pressed
pub const BUTTON_LINE: &str = "Button pressed";

/// Something the tick loop can poll once per frame
pub trait InputSource {
    /// Next sample, or `Sample::None` if nothing is ready. Never blocks.
    fn poll_sample(&mut self) -> Sample;

    /// True once the source can never produce another sample
    fn is_closed(&self) -> bool {
        false
    }
}

/// Decode one device line. Garbage decodes to `Sample::None`.
pub fn parse_line(line: &str) -> Sample {
    let line = line.trim();
    if line.is_empty() {
        return Sample::None;
    }
    if line == BUTTON_LINE {
        return Sample::ButtonPressed;
    }
    match line.parse::<i64>() {
        Ok(raw) => Sample::Angle(raw),
        Err(e) => {
            log::warn!("Ignoring device line {line:?}: {e}");
            Sample::None
        }
    }
}

/// Reads device lines on a background thread
pub struct LineReader {
    rx: Receiver<String>,
    /// Sample held back so a press is not merged into a newer angle
    pending: Option<Sample>,
    disconnected: bool,
}

impl LineReader {
    /// Start reading `reader` until EOF or a read error.
    ///
    /// Bytes that are not UTF-8 are decoded lossily so a noisy line turns
    /// into an ignored sample instead of stopping the reader.
    pub fn spawn<R>(mut reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf).into_owned();
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => {
                        log::warn!("Device read failed: {e}");
                        break;
                    }
                }
            }
            log::info!("Device input closed");
        });
        Self {
            rx,
            pending: None,
            disconnected: false,
        }
    }
}

impl InputSource for LineReader {
    /// Drains everything queued since the last tick and keeps the newest
    /// angle. A button press is never dropped: if an angle came before it,
    /// the angle is returned now and the press on the next poll.
    fn poll_sample(&mut self) -> Sample {
        if let Some(sample) = self.pending.take() {
            return sample;
        }

        let mut latest = Sample::None;
        loop {
            match self.rx.try_recv() {
                Ok(line) => match parse_line(&line) {
                    Sample::None => {}
                    Sample::ButtonPressed => {
                        if latest == Sample::None {
                            return Sample::ButtonPressed;
                        }
                        self.pending = Some(Sample::ButtonPressed);
                        return latest;
                    }
                    angle => latest = angle,
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.disconnected = true;
                    break;
                }
            }
        }
        latest
    }

    fn is_closed(&self) -> bool {
        self.disconnected && self.pending.is_none()
    }
}

/// Replays a fixed list of samples, one per poll
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    samples: VecDeque<Sample>,
}

impl ScriptedInput {
    pub fn new(samples: impl IntoIterator<Item = Sample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_sample(&mut self) -> Sample {
        self.samples.pop_front().unwrap_or_default()
    }

    fn is_closed(&self) -> bool {
        self.samples.is_empty()
    }
}
