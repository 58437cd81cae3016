//! Shape overlap tests
//!
//! Pure predicates over circles and axis-aligned rectangles. Every shape pair
//! is answered; malformed shapes are rejected with an error instead of
//! reporting "no overlap", which would hide real hits.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle by center and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Same circle with its radius reduced by `clearance`
    #[inline]
    pub fn shrink(self, clearance: f32) -> Self {
        Self {
            center: self.center,
            radius: self.radius - clearance,
        }
    }
}

/// An axis-aligned rectangle by top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Point of the rectangle nearest to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// Shapes understood by [`overlaps`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Rect(Rect),
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

impl From<Rect> for Shape {
    fn from(r: Rect) -> Self {
        Shape::Rect(r)
    }
}

/// A shape that cannot take part in an overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Radius negative or not finite (e.g. shrunk past zero by clearance)
    InvalidRadius(f32),
    /// Rectangle with a negative or non-finite side
    InvalidExtent { width: f32, height: f32 },
    /// Center or corner not finite
    NonFinitePosition,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidRadius(r) => write!(f, "invalid circle radius {r}"),
            GeometryError::InvalidExtent { width, height } => {
                write!(f, "invalid rectangle extent {width}x{height}")
            }
            GeometryError::NonFinitePosition => write!(f, "shape position is not finite"),
        }
    }
}

impl std::error::Error for GeometryError {}

impl Shape {
    fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Shape::Circle(c) => {
                if !c.center.is_finite() {
                    return Err(GeometryError::NonFinitePosition);
                }
                if !(c.radius.is_finite() && c.radius >= 0.0) {
                    return Err(GeometryError::InvalidRadius(c.radius));
                }
            }
            Shape::Rect(r) => {
                if !r.origin.is_finite() {
                    return Err(GeometryError::NonFinitePosition);
                }
                if !(r.size.is_finite() && r.size.x >= 0.0 && r.size.y >= 0.0) {
                    return Err(GeometryError::InvalidExtent {
                        width: r.size.x,
                        height: r.size.y,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Whether two shapes overlap. Touching edges do not count.
pub fn overlaps(a: &Shape, b: &Shape) -> Result<bool, GeometryError> {
    a.validate()?;
    b.validate()?;

    let hit = match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => circles_overlap(a, b),
        (Shape::Circle(c), Shape::Rect(r)) | (Shape::Rect(r), Shape::Circle(c)) => {
            circle_rect_overlap(c, r)
        }
        (Shape::Rect(a), Shape::Rect(b)) => rects_overlap(a, b),
    };
    Ok(hit)
}

#[inline]
fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

#[inline]
fn circle_rect_overlap(c: &Circle, r: &Rect) -> bool {
    r.closest_point(c.center).distance(c.center) < c.radius
}

#[inline]
fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}
