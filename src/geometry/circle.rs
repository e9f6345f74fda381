//! Reference circle (the polygon's limit) and the revolution axis

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::Polyline;
use super::gradient::palette;
use crate::consts::CIRCLE_SEGMENTS;
use crate::polar_to_cartesian;

pub const CIRCLE_OPACITY: f32 = 0.5;
pub const AXIS_OPACITY: f32 = 0.9;
/// Axis extends this far past the circle, in radii
pub const AXIS_EXTENT: f32 = 1.8;

/// Fixed tessellation of the true circle the polygon converges to
#[derive(Debug, Clone, PartialEq)]
pub struct CircleReference {
    pub radius: f32,
    pub outline: Polyline,
}

impl CircleReference {
    pub fn new(radius: f32) -> Self {
        let points = (0..=CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * TAU;
                polar_to_cartesian(radius, angle).extend(0.0)
            })
            .collect();

        let mut circle = Self {
            radius,
            outline: Polyline::solid(points, palette::GOLDEN, CIRCLE_OPACITY),
        };
        circle.recolor(0.0);
        circle
    }

    /// Golden/pink wave travelling around the rim
    pub fn recolor(&mut self, elapsed: f32) {
        let count = self.outline.colors.len().saturating_sub(1).max(1) as f32;
        for (i, color) in self.outline.colors.iter_mut().enumerate() {
            let t = i as f32 / count;
            let wave = (t * PI * 4.0 + elapsed * 3.0).sin() * 0.5 + 0.5;
            *color = palette::GOLDEN.lerp(palette::DIVINE, wave);
        }
    }
}

/// Vertical axis the circle revolves around
pub fn axis(radius: f32) -> Polyline {
    let half = radius * AXIS_EXTENT;
    Polyline::solid(
        vec![Vec3::new(0.0, -half, 0.0), Vec3::new(0.0, half, 0.0)],
        palette::GOLDEN,
        AXIS_OPACITY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_tessellation() {
        let circle = CircleReference::new(1.5);
        assert_eq!(circle.outline.points.len(), CIRCLE_SEGMENTS as usize + 1);
        assert_eq!(circle.outline.segment_count(), CIRCLE_SEGMENTS as usize);
        assert!(circle.outline.is_closed(1e-5));
        for p in &circle.outline.points {
            assert!((p.length() - 1.5).abs() < 1e-5);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_circle_recolor_moves_wave() {
        let mut circle = CircleReference::new(1.0);
        let before = circle.outline.colors.clone();
        circle.recolor(0.7);
        assert_ne!(before, circle.outline.colors);
    }

    #[test]
    fn test_axis_spans_both_sides() {
        let line = axis(2.0);
        assert_eq!(line.points.len(), 2);
        assert!((line.points[0].y + 3.6).abs() < 1e-6);
        assert!((line.points[1].y - 3.6).abs() < 1e-6);
        assert_eq!(line.points[0].x, 0.0);
    }
}
