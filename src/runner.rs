//! Tick driver
//!
//! Polls input, advances the simulation and renders, once per frame at a
//! fixed rate. A slow frame is not made up for.

use std::thread;
use std::time::{Duration, Instant};

use crate::input::InputSource;
use crate::render::{Renderer, Snapshot};
use crate::sim::{GameSession, GeometryError, TickEvent, TickInput, tick};

/// Sleeps out the rest of each frame budget
#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    last: Instant,
}

impl FramePacer {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / tick_rate.max(1),
            last: Instant::now(),
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Block until one frame has passed since the previous call
    pub fn wait(&mut self) {
        let elapsed = self.last.elapsed();
        if let Some(remaining) = self.frame.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
        self.last = Instant::now();
    }
}

/// Owns the session and its collaborators
pub struct GameLoop<I, R> {
    pub session: GameSession,
    input: I,
    renderer: R,
}

impl<I: InputSource, R: Renderer> GameLoop<I, R> {
    pub fn new(session: GameSession, input: I, renderer: R) -> Self {
        Self {
            session,
            input,
            renderer,
        }
    }

    /// Run one frame: poll, tick, render
    pub fn step(&mut self) -> Result<TickEvent, GeometryError> {
        let quit = self.input.is_closed();
        let sample = self.input.poll_sample();
        let event = tick(&mut self.session, &TickInput { sample, quit })?;
        log_event(&event);
        self.renderer.render(&Snapshot::capture(&self.session));
        Ok(event)
    }

    /// Run until the player quits
    pub fn run(&mut self) -> Result<(), GeometryError> {
        let mut pacer = FramePacer::new(self.session.settings().tick_rate);
        log::info!("Game loop started at {:?} per frame", pacer.frame());

        loop {
            if self.step()? == TickEvent::Closed {
                break;
            }
            pacer.wait();
        }

        log::info!("Game closed with score {}", self.session.score);
        Ok(())
    }
}

fn log_event(event: &TickEvent) {
    match event {
        TickEvent::Pickup { score } => log::info!("Apple eaten, score {score}"),
        TickEvent::Died { cause, score } => log::info!("Crashed ({cause:?}) with score {score}"),
        TickEvent::Paused => log::info!("Paused"),
        TickEvent::Resumed => log::info!("Resumed"),
        TickEvent::Closed | TickEvent::Moved | TickEvent::Nothing => {}
    }
}
