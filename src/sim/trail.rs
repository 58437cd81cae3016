//! Trail of past head positions
//!
//! The trail is the single source of truth for where the snake is: its newest
//! entry is the head, and every `stride`-th entry counting from the anchor is
//! a visible body segment.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A sampled body segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Top-left corner of the segment
    pub pos: Vec2,
    /// Index into the trail (0 = oldest)
    pub index: usize,
    /// Entries between this sample and the newest trail entry
    pub age: usize,
    /// Newest sampled segment, drawn as the head
    pub is_head: bool,
}

/// Capacity-bounded FIFO of head positions, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailStore {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl TrailStore {
    /// Empty trail holding at most `capacity` positions
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent position (the head)
    pub fn newest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    /// Positions oldest first
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    /// Record a new head position, evicting the oldest one if over capacity
    pub fn append(&mut self, pos: Vec2) {
        self.points.push_back(pos);
        if self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Raise the capacity; the trail fills up over the following appends
    pub fn grow(&mut self, by: usize) {
        self.capacity += by;
    }

    /// Drop every position and set a new capacity
    pub fn reset(&mut self, capacity: usize) {
        self.points.clear();
        self.capacity = capacity;
    }

    /// Every `stride`-th entry, newest first.
    ///
    /// Sampling is anchored at `last - last % stride` so segments sit on
    /// stride multiples of the trail index. The first yielded segment is the
    /// head.
    pub fn sampled_segments(&self, stride: usize) -> Vec<Segment> {
        let Some(last) = self.points.len().checked_sub(1) else {
            return Vec::new();
        };
        let stride = stride.max(1);
        let anchor = last - last % stride;

        (0..=anchor)
            .rev()
            .step_by(stride)
            .map(|index| Segment {
                pos: self.points[index],
                index,
                age: last - index,
                is_head: index == anchor,
            })
            .collect()
    }
}
