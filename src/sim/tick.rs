//! Fixed-rate simulation tick
//!
//! One call advances the session by one frame: menu handling while idle,
//! steering, movement, trail bookkeeping and collisions while running.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionOutcome, FatalCause, detect};
use super::geometry::GeometryError;
use super::kinematics::{integrate, wrap};
use super::state::{GamePhase, GameSession, MenuAction};

/// One reading from the rotary device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sample {
    /// Nothing new this tick
    #[default]
    None,
    /// Absolute encoder position
    Angle(i64),
    /// The dial's push button
    ButtonPressed,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub sample: Sample,
    /// Window closed or input gone
    pub quit: bool,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Nothing worth reporting
    Nothing,
    /// Head advanced without hitting anything
    Moved,
    Paused,
    Resumed,
    Pickup { score: u64 },
    /// Snake died; `score` is the score of the finished run
    Died { cause: FatalCause, score: u64 },
    Closed,
}

/// Advance the game state by one tick
pub fn tick(session: &mut GameSession, input: &TickInput) -> Result<TickEvent, GeometryError> {
    if input.quit && session.phase != GamePhase::Closed {
        session.phase = GamePhase::Closed;
        return Ok(TickEvent::Closed);
    }

    match session.phase {
        GamePhase::Closed => Ok(TickEvent::Nothing),
        GamePhase::Idle => Ok(menu_tick(session, input.sample)),
        GamePhase::Running => running_tick(session, input.sample),
    }
}

fn menu_tick(session: &mut GameSession, sample: Sample) -> TickEvent {
    match sample {
        Sample::None => TickEvent::Nothing,
        Sample::Angle(raw) => {
            session.select_from_raw(raw);
            TickEvent::Nothing
        }
        Sample::ButtonPressed => match session.selected_action() {
            Some(MenuAction::Play) => {
                session.phase = GamePhase::Running;
                TickEvent::Resumed
            }
            Some(MenuAction::Exit) => {
                session.phase = GamePhase::Closed;
                TickEvent::Closed
            }
            None => TickEvent::Nothing,
        },
    }
}

fn running_tick(session: &mut GameSession, sample: Sample) -> Result<TickEvent, GeometryError> {
    let settings = session.settings();
    let (sensitivity, max_turn_rate, speed) =
        (settings.sensitivity, settings.max_turn_rate, settings.speed);
    let (width, height, size) = (
        settings.arena_width,
        settings.arena_height,
        settings.segment_size,
    );

    match sample {
        // Pause keeps calibration so steering resumes in the same frame
        Sample::ButtonPressed => {
            session.phase = GamePhase::Idle;
            return Ok(TickEvent::Paused);
        }
        Sample::Angle(raw) => {
            session.heading.resolve_target_angle(raw, sensitivity);
        }
        Sample::None => {}
    }

    let angle = session.heading.steer(max_turn_rate);
    let next = wrap(integrate(session.head(), angle, speed), width, height, size);
    session.trail.append(next);

    match detect(session.settings(), &session.trail, session.target)? {
        CollisionOutcome::Fatal(cause) => {
            let score = session.score;
            session.die();
            Ok(TickEvent::Died { cause, score })
        }
        CollisionOutcome::Pickup => {
            session.apply_pickup();
            Ok(TickEvent::Pickup {
                score: session.score,
            })
        }
        CollisionOutcome::None => Ok(TickEvent::Moved),
    }
}
