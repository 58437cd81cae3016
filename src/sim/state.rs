//! Game session state
//!
//! One `GameSession` is owned by the tick driver and passed by `&mut` into
//! every step; there is no ambient game state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::heading::Heading;
use super::trail::TrailStore;
use crate::consts::TARGET_GRID;
use crate::settings::{ScorePolicy, Settings, SettingsError};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pause menu, waiting for Play or Exit
    Idle,
    /// Snake is moving
    Running,
    /// Player quit
    Closed,
}

/// Pause menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuAction {
    Play,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 2] = [MenuAction::Play, MenuAction::Exit];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Play => "Play",
            MenuAction::Exit => "Exit",
        }
    }
}

/// A fixed rectangular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,
    pub score: u64,
    pub heading: Heading,
    pub trail: TrailStore,
    /// Top-left corner of the apple
    pub target: Vec2,
    /// Highlighted pause menu entry
    pub selected: usize,
    settings: Settings,
    rng: Pcg32,
}

impl GameSession {
    /// Create a session waiting in the pause menu
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let rng = Pcg32::seed_from_u64(settings.seed);
        let mut session = Self {
            phase: GamePhase::Idle,
            score: 0,
            heading: Heading::new(),
            trail: TrailStore::with_capacity(1),
            target: Vec2::ZERO,
            selected: 0,
            settings,
            rng,
        };
        session.respawn();
        Ok(session)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Where the head starts after a reset
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(
            (self.settings.arena_width / 2.0).floor(),
            (self.settings.arena_height / 2.0).floor(),
        )
    }

    /// Current head position (newest trail entry)
    pub fn head(&self) -> Vec2 {
        self.trail.newest().unwrap_or_else(|| self.spawn_point())
    }

    /// Snake length in trail entries
    pub fn capacity(&self) -> usize {
        self.trail.capacity()
    }

    /// Put the snake back at the start. Score follows the configured policy.
    pub fn reset(&mut self) {
        if self.settings.score_policy == ScorePolicy::ResetOnDeath {
            self.score = 0;
        }
        self.respawn();
    }

    fn respawn(&mut self) {
        self.heading = Heading::new();
        self.trail.reset(1);
        self.trail.append(self.spawn_point());
        self.respawn_target();
    }

    /// Reset after a fatal hit and drop back to the menu
    pub fn die(&mut self) {
        self.reset();
        self.phase = GamePhase::Idle;
    }

    /// Place the apple somewhere new, snapped to the grid
    pub fn respawn_target(&mut self) {
        let size = self.settings.segment_size;
        let x = self.random_grid_coord(self.settings.arena_width - size);
        let y = self.random_grid_coord(self.settings.arena_height - size);
        self.target = Vec2::new(x, y);
    }

    fn random_grid_coord(&mut self, span: f32) -> f32 {
        let upper = (span as u32).max(1);
        let raw = self.rng.random_range(0..upper) as f32;
        ((raw / TARGET_GRID).round() * TARGET_GRID).min(span.max(0.0))
    }

    /// Eat the apple: score, grow and move it
    pub fn apply_pickup(&mut self) {
        self.score += 1;
        self.trail.grow(self.settings.spacing);
        self.respawn_target();
    }

    /// Move the menu highlight from a raw encoder position
    pub fn select_from_raw(&mut self, raw: i64) -> usize {
        let count = MenuAction::ALL.len() as i64;
        self.selected = self.heading.calibrated_delta(raw).rem_euclid(count) as usize;
        self.selected
    }

    pub fn selected_action(&self) -> Option<MenuAction> {
        MenuAction::from_index(self.selected)
    }
}
