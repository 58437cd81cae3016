//! Dial Snake entry point
//!
//! Usage: `dial-snake [SETTINGS_JSON] [DEVICE]`
//!
//! Reads encoder lines from DEVICE or from stdin, and runs the game headless
//! with a logging renderer.
//!
//! DEVICE is opened as a plain file, so the serial line must be configured
//! beforehand, e.g. `stty -F /dev/ttyUSB0 115200 raw -echo`.

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};

use dial_snake::Settings;
use dial_snake::input::LineReader;
use dial_snake::render::LogRenderer;
use dial_snake::runner::GameLoop;
use dial_snake::sim::GameSession;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Dial Snake starting...");

    let mut args = std::env::args().skip(1);

    let settings = match args.next() {
        Some(path) => {
            Settings::load(&path).with_context(|| format!("loading settings from {path}"))?
        }
        None => Settings::default(),
    };

    let input = match args.next() {
        Some(device) => {
            let file = File::open(&device).with_context(|| format!("opening device {device}"))?;
            log::info!(
                "Reading dial from {device} (configure the port first, e.g. `stty -F {device} 115200 raw -echo`)"
            );
            LineReader::spawn(BufReader::new(file))
        }
        None => {
            log::info!("Reading dial from stdin");
            LineReader::spawn(BufReader::new(io::stdin()))
        }
    };

    log::info!(
        "Arena {}x{}, {} obstacles, score policy {}",
        settings.arena_width,
        settings.arena_height,
        settings.obstacles.len(),
        settings.score_policy.as_str()
    );

    let session = GameSession::new(settings).context("invalid settings")?;
    let mut game = GameLoop::new(session, input, LogRenderer::default());
    game.run()?;
    Ok(())
}
