//! Regular polygon inscribed in a circle
//!
//! The Archimedes construction: an inscribed n-gon has perimeter
//! `n · 2r · sin(π/n)`, which approaches the circumference `2πr` from below as
//! `n` grows. Dividing by the diameter gives an estimate of π.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;

use super::gradient::{Color, gradient, palette};
use super::{GeometryError, Polyline};
use crate::consts::{MAX_SIDES, MIN_SIDES};
use crate::polar_to_cartesian;

/// Opacity of the outline and the center-to-vertex spokes
pub const OUTLINE_OPACITY: f32 = 1.0;
pub const RADIAL_OPACITY: f32 = 0.4;
/// Spokes fade to a dimmed cosmic violet at the center
const RADIAL_CENTER_DIM: f32 = 0.3;

/// Perimeter of a regular `sides`-gon inscribed in a circle of `radius`
pub fn perimeter(sides: u32, radius: f32) -> f64 {
    let n = sides as f64;
    let side_length = 2.0 * radius as f64 * (std::f64::consts::PI / n).sin();
    n * side_length
}

/// π estimate: inscribed perimeter over diameter
///
/// Independent of `radius` mathematically; the radius is kept in the formula
/// so the value shown is exactly what the drawn polygon measures.
pub fn approximate_pi(sides: u32, radius: f32) -> f64 {
    perimeter(sides, radius) / (2.0 * radius as f64)
}

/// Angle of vertex `i`, with vertex 0 pointing straight up
#[inline]
fn vertex_angle(i: u32, sides: u32) -> f32 {
    (i as f32 / sides as f32) * TAU - FRAC_PI_2
}

/// Outline, spokes and measurements for one side count
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonGeometry {
    pub sides: u32,
    pub radius: f32,
    /// Closed loop: `sides + 1` points, last equals first
    pub outline: Polyline,
    /// One two-point segment per vertex, center first
    pub radials: Vec<Polyline>,
    pub perimeter: f64,
    pub pi_approximation: f64,
}

impl PolygonGeometry {
    /// Build for `sides` (clamped to the supported range) and `radius`
    pub fn new(sides: u32, radius: f32) -> Self {
        let sides = sides.clamp(MIN_SIDES, MAX_SIDES);

        let outline_points: Vec<Vec3> = (0..=sides)
            .map(|i| polar_to_cartesian(radius, vertex_angle(i, sides)).extend(0.0))
            .collect();

        let radials = outline_points[..sides as usize]
            .iter()
            .map(|&vertex| Polyline::solid(vec![Vec3::ZERO, vertex], palette::COSMIC, RADIAL_OPACITY))
            .collect();

        let mut polygon = Self {
            sides,
            radius,
            outline: Polyline::solid(outline_points, palette::ETHEREAL, OUTLINE_OPACITY),
            radials,
            perimeter: perimeter(sides, radius),
            pi_approximation: approximate_pi(sides, radius),
        };
        polygon.recolor(0.0);
        polygon
    }

    /// Checked constructor: rejects instead of clamping
    pub fn try_new(sides: u32, radius: f32) -> Result<Self, GeometryError> {
        if sides < MIN_SIDES {
            return Err(GeometryError::TooFewSides(sides));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self::new(sides, radius))
    }

    /// Vertex positions (without the closing duplicate)
    pub fn vertices(&self) -> &[Vec3] {
        &self.outline.points[..self.sides as usize]
    }

    /// Re-walk the gradient with a time offset in [0, 1)
    pub fn recolor(&mut self, offset: f32) {
        let sides = self.sides as f32;

        for (i, color) in self.outline.colors.iter_mut().enumerate() {
            *color = gradient(i as f32 / sides + offset);
        }

        let center: Color = palette::COSMIC.scale(RADIAL_CENTER_DIM);
        for (i, radial) in self.radials.iter_mut().enumerate() {
            radial.colors[0] = center;
            radial.colors[1] = gradient(i as f32 / sides + offset);
        }
    }
}
