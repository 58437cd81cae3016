//! Head movement and toroidal wraparound

use glam::Vec2;

/// Advance `pos` by `speed` along `heading_deg` (screen space, y down)
#[inline]
pub fn integrate(pos: Vec2, heading_deg: f32, speed: f32) -> Vec2 {
    let (sin, cos) = heading_deg.to_radians().sin_cos();
    Vec2::new(pos.x + speed * cos, pos.y - speed * sin)
}

/// Teleport a segment whose center left the arena to the opposite edge.
///
/// `pos` is the segment's top-left corner; `size` its diameter. Each axis is
/// wrapped independently.
pub fn wrap(pos: Vec2, width: f32, height: f32, size: f32) -> Vec2 {
    let half = size / 2.0;
    Vec2::new(wrap_axis(pos.x, width, half), wrap_axis(pos.y, height, half))
}

#[inline]
fn wrap_axis(p: f32, extent: f32, half: f32) -> f32 {
    if p + half >= extent {
        -half
    } else if p + half < 0.0 {
        extent - 1.0 - half
    } else {
        p
    }
}
