//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - No rendering or device dependencies

pub mod collision;
pub mod geometry;
pub mod heading;
pub mod kinematics;
pub mod state;
pub mod tick;
pub mod trail;

pub use collision::{CollisionOutcome, FatalCause, detect, segment_circle};
pub use geometry::{Circle, GeometryError, Rect, Shape, overlaps};
pub use heading::{Heading, advance_heading};
pub use kinematics::{integrate, wrap};
pub use state::{GamePhase, GameSession, MenuAction, Obstacle};
pub use tick::{Sample, TickEvent, TickInput, tick};
pub use trail::{Segment, TrailStore};
