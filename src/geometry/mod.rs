//! Geometry builders
//!
//! Pure functions of (sides, radius, progress). Every builder returns a fresh
//! owned value; callers replace the previous instance wholesale rather than
//! patching it. Nothing in here knows about the GPU.

pub mod circle;
pub mod gradient;
pub mod grid;
pub mod polygon;
pub mod revolution;

pub use circle::{CircleReference, axis};
pub use gradient::{Color, gradient, palette, sweep_gradient};
pub use grid::Grid;
pub use polygon::{PolygonGeometry, approximate_pi, perimeter};
pub use revolution::{Revolution, Ring, RingKind};

use glam::Vec3;
use thiserror::Error;

/// Invalid builder input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("a polygon needs at least 3 sides, got {0}")]
    TooFewSides(u32),
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
}

/// An open or closed line strip with per-vertex colors and a shared opacity
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vec3>,
    /// One color per point
    pub colors: Vec<Color>,
    pub opacity: f32,
}

impl Polyline {
    /// Line strip with every vertex the same color
    pub fn solid(points: Vec<Vec3>, color: Color, opacity: f32) -> Self {
        let colors = vec![color; points.len()];
        Self {
            points,
            colors,
            opacity,
        }
    }

    /// Number of line segments in the strip
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// First and last point coincide (within `eps`)
    #[cfg(test)]
    pub fn is_closed(&self, eps: f32) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() > 2 => a.distance(*b) < eps,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_solid() {
        let line = Polyline::solid(vec![Vec3::ZERO, Vec3::X, Vec3::Y], palette::GOLDEN, 0.5);
        assert_eq!(line.colors.len(), 3);
        assert_eq!(line.segment_count(), 2);
        assert!(!line.is_closed(1e-5));
    }

    #[test]
    fn test_empty_polyline() {
        let line = Polyline::solid(Vec::new(), palette::GOLDEN, 1.0);
        assert_eq!(line.segment_count(), 0);
        assert!(!line.is_closed(1e-5));
    }
}
