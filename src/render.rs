//! Render snapshot
//!
//! The simulation never draws. Each tick it hands a read-only snapshot to a
//! [`Renderer`], which owns pixels, fonts and menus.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GamePhase, GameSession, MenuAction, Obstacle, Segment};

/// Pause menu as the renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub selected: usize,
    pub options: Vec<&'static str>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    /// Top-left corner of the head
    pub head: Vec2,
    /// Facing angle in degrees
    pub heading: f32,
    /// Body segments newest first; the first one is flagged as the head
    pub segments: Vec<Segment>,
    pub obstacles: Vec<Obstacle>,
    pub target: Vec2,
    pub segment_size: f32,
    pub menu: MenuView,
}

impl Snapshot {
    pub fn capture(session: &GameSession) -> Self {
        let settings = session.settings();
        Self {
            phase: session.phase,
            score: session.score,
            head: session.head(),
            heading: session.heading.angle,
            segments: session.trail.sampled_segments(settings.spacing),
            obstacles: settings.obstacles.clone(),
            target: session.target,
            segment_size: settings.segment_size,
            menu: MenuView {
                selected: session.selected,
                options: MenuAction::ALL.iter().map(MenuAction::label).collect(),
            },
        }
    }
}

/// Draws snapshots
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Headless renderer that traces each frame as JSON
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_phase: Option<GamePhase>,
}

impl Renderer for LogRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        if self.last_phase != Some(snapshot.phase) {
            log::info!("Phase: {:?} (score {})", snapshot.phase, snapshot.score);
            self.last_phase = Some(snapshot.phase);
        }
        if log::log_enabled!(log::Level::Trace) {
            match serde_json::to_string(snapshot) {
                Ok(json) => log::trace!("{json}"),
                Err(e) => log::warn!("Failed to encode snapshot: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_capture_fresh_session() {
        let session = GameSession::new(Settings::default()).unwrap();
        let snapshot = Snapshot::capture(&session);
        assert_eq!(snapshot.phase, GamePhase::Idle);
        assert_eq!(snapshot.segments.len(), 1);
        assert!(snapshot.segments[0].is_head);
        assert_eq!(snapshot.head, snapshot.segments[0].pos);
        assert_eq!(snapshot.obstacles.len(), 10);
        assert_eq!(snapshot.menu.options, vec!["Play", "Exit"]);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(Settings::default()).unwrap();
        let json = serde_json::to_value(Snapshot::capture(&session)).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["phase"], "Idle");
        assert_eq!(json["segments"][0]["is_head"], true);
    }
}
