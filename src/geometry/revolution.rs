//! Surface of revolution: the reference circle swept around the Y axis
//!
//! Progress is measured in steps out of `max_steps`; a full sweep is 2π.
//! Each whole step leaves a ring behind, the fractional remainder shows an
//! eased in-between ring, and meridians trace the swept angle so far.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::Polyline;
use super::gradient::{Color, palette, sweep_band, sweep_gradient};
use crate::consts::MERIDIAN_COUNT;
use crate::ease_out_quad;

/// Fraction below which no in-between ring is drawn
pub const PARTIAL_THRESHOLD: f32 = 0.05;
/// In-between ring opacity per unit of fractional progress
pub const PARTIAL_OPACITY_SCALE: f32 = 0.7;

pub const FIRST_RING_OPACITY: f32 = 1.0;
pub const LATEST_RING_OPACITY: f32 = 0.9;
pub const RING_OPACITY: f32 = 0.5;

pub const MERIDIAN_BASE_OPACITY: f32 = 0.3;
pub const MERIDIAN_OPACITY_GAIN: f32 = 0.25;
/// Minimum samples along a meridian
const MERIDIAN_MIN_POINTS: u32 = 16;
/// Lightness wobble on the accent ring
const ACCENT_LIGHTNESS_WAVE: f32 = 0.1;
/// Per-ring phase shift when cycling colors
const RING_COLOR_STAGGER: f32 = 0.1;

/// Whether a ring marks a completed step or the eased in-between position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    Full,
    Partial,
}

/// One cross-section of the swept surface
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    /// Step index (for partial rings, the step it is leaving)
    pub step: u32,
    /// Rotation about Y, radians
    pub angle: f32,
    pub kind: RingKind,
    pub line: Polyline,
}

/// Rotation angle for a step index
#[inline]
pub fn step_angle(step: f32, max_steps: u32) -> f32 {
    step / max_steps as f32 * TAU
}

/// Circle of `radius` in the XY plane, rotated about Y by `angle`
fn swept_point(radius: f32, theta: f32, angle: f32) -> Vec3 {
    let x0 = theta.cos() * radius;
    let y0 = theta.sin() * radius;
    Vec3::new(x0 * angle.cos(), y0, x0 * angle.sin())
}

fn ring_points(radius: f32, angle: f32, segments: u32) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| swept_point(radius, i as f32 / segments as f32 * TAU, angle))
        .collect()
}

/// Rings and meridians for one progress value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Revolution {
    pub progress: f32,
    pub max_steps: u32,
    pub rings: Vec<Ring>,
    pub meridians: Vec<Polyline>,
}

impl Revolution {
    /// Build from scratch; `progress` is clamped to `[0, max_steps]`
    pub fn build(radius: f32, progress: f32, max_steps: u32, segments: u32) -> Self {
        let max_steps = max_steps.max(1);
        let segments = segments.max(3);
        let progress = if progress.is_finite() {
            progress.clamp(0.0, max_steps as f32)
        } else {
            0.0
        };

        let mut revolution = Self {
            progress,
            max_steps,
            rings: Vec::new(),
            meridians: Vec::new(),
        };
        if progress <= 0.0 {
            return revolution;
        }

        let full_steps = progress.floor() as u32;
        let fraction = progress - full_steps as f32;

        for step in 0..=full_steps.min(max_steps) {
            let angle = step_angle(step as f32, max_steps);
            let opacity = if step == 0 {
                FIRST_RING_OPACITY
            } else if step == full_steps {
                LATEST_RING_OPACITY
            } else {
                RING_OPACITY
            };

            let points = ring_points(radius, angle, segments);
            let (from, to) = sweep_band(angle / TAU);
            let colors = (0..points.len())
                .map(|i| {
                    let t = i as f32 / segments as f32;
                    from.lerp(to, (t * PI).sin() * 0.5 + 0.5)
                })
                .collect();

            revolution.rings.push(Ring {
                step,
                angle,
                kind: RingKind::Full,
                line: Polyline {
                    points,
                    colors,
                    opacity,
                },
            });
        }

        if fraction > PARTIAL_THRESHOLD && full_steps < max_steps {
            let current = step_angle(full_steps as f32, max_steps);
            let next = step_angle((full_steps + 1) as f32, max_steps);
            let angle = current + (next - current) * ease_out_quad(fraction);

            let points = ring_points(radius, angle, segments);
            let colors = (0..points.len())
                .map(|i| {
                    let t = i as f32 / segments as f32;
                    palette::ACCENT.offset_lightness((t * TAU).sin() * ACCENT_LIGHTNESS_WAVE)
                })
                .collect();

            revolution.rings.push(Ring {
                step: full_steps,
                angle,
                kind: RingKind::Partial,
                line: Polyline {
                    points,
                    colors,
                    opacity: fraction * PARTIAL_OPACITY_SCALE,
                },
            });
        }

        if full_steps >= 1 {
            revolution.meridians = meridians(radius, progress, full_steps, max_steps);
        }

        revolution
    }

    pub fn full_ring_count(&self) -> usize {
        self.rings.iter().filter(|r| r.kind == RingKind::Full).count()
    }

    pub fn partial_ring(&self) -> Option<&Ring> {
        self.rings.iter().find(|r| r.kind == RingKind::Partial)
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Swept angle so far, radians
    #[cfg(test)]
    pub fn swept_angle(&self) -> f32 {
        step_angle(self.progress, self.max_steps)
    }

    /// Cycle full rings and meridians through the sweep gradient
    ///
    /// The in-between ring keeps its accent color.
    pub fn recolor(&mut self, elapsed: f32) {
        let time_offset = (elapsed * crate::consts::REVOLUTION_COLOR_RATE).rem_euclid(1.0);

        let lines = self
            .rings
            .iter_mut()
            .filter(|r| r.kind == RingKind::Full)
            .map(|r| &mut r.line)
            .chain(self.meridians.iter_mut());

        for (index, line) in lines.enumerate() {
            let count = line.colors.len().max(1) as f32;
            let stagger = index as f32 * RING_COLOR_STAGGER;
            for (i, color) in line.colors.iter_mut().enumerate() {
                *color = sweep_gradient(i as f32 / count + time_offset + stagger);
            }
        }
    }
}

fn meridians(radius: f32, progress: f32, full_steps: u32, max_steps: u32) -> Vec<Polyline> {
    let max_angle = step_angle(progress.min(max_steps as f32), max_steps);
    let point_count = MERIDIAN_MIN_POINTS.max(full_steps * 2);
    let opacity = MERIDIAN_BASE_OPACITY + progress / max_steps as f32 * MERIDIAN_OPACITY_GAIN;

    (0..MERIDIAN_COUNT)
        .map(|m| {
            let theta = m as f32 / MERIDIAN_COUNT as f32 * TAU;
            let points: Vec<Vec3> = (0..=point_count)
                .map(|i| swept_point(radius, theta, i as f32 / point_count as f32 * max_angle))
                .collect();

            let len = points.len() as f32;
            let colors: Vec<Color> = (0..points.len())
                .map(|j| palette::GOLDEN.lerp(palette::COSMIC, j as f32 / len))
                .collect();

            Polyline {
                points,
                colors,
                opacity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_REVOLUTION_STEPS, RING_SEGMENTS};
    use proptest::prelude::*;

    fn build(progress: f32) -> Revolution {
        Revolution::build(1.2, progress, MAX_REVOLUTION_STEPS, RING_SEGMENTS)
    }

    #[test]
    fn test_zero_progress_is_empty() {
        let rev = build(0.0);
        assert!(rev.is_empty());
        assert!(rev.meridians.is_empty());
    }

    #[test]
    fn test_seed_progress_shows_first_ring_and_partial() {
        let rev = build(0.5);
        assert_eq!(rev.full_ring_count(), 1);
        let partial = rev.partial_ring().expect("partial ring");
        assert!((partial.line.opacity - 0.35).abs() < 1e-6);
        assert_eq!(partial.line.colors.len(), partial.line.points.len());
        // No meridians until a full step has been completed
        assert!(rev.meridians.is_empty());
    }

    #[test]
    fn test_ring_opacity_policy() {
        let rev = build(5.0);
        let opacities: Vec<f32> = rev.rings.iter().map(|r| r.line.opacity).collect();
        assert_eq!(opacities, vec![1.0, 0.5, 0.5, 0.5, 0.5, 0.9]);
    }

    #[test]
    fn test_partial_ring_angle_is_eased() {
        let rev = build(3.5);
        let partial = rev.partial_ring().unwrap();
        let current = step_angle(3.0, MAX_REVOLUTION_STEPS);
        let next = step_angle(4.0, MAX_REVOLUTION_STEPS);
        let expected = current + (next - current) * 0.75;
        assert!((partial.angle - expected).abs() < 1e-6);
        assert_eq!(partial.step, 3);
    }

    #[test]
    fn test_threshold_boundary() {
        assert!(build(2.05).partial_ring().is_none());
        assert!(build(2.06).partial_ring().is_some());
    }

    #[test]
    fn test_meridians() {
        let rev = build(10.0);
        assert_eq!(rev.meridians.len(), 12);
        for meridian in &rev.meridians {
            // max(16, 2 * 10) + 1 samples
            assert_eq!(meridian.points.len(), 21);
            assert!((meridian.opacity - (0.3 + 10.0 / 45.0 * 0.25)).abs() < 1e-6);
            // Meridians start on the unrotated circle (z = 0)
            assert!(meridian.points[0].z.abs() < 1e-6);
        }
    }

    #[test]
    fn test_complete_revolution() {
        let rev = build(45.0);
        assert_eq!(rev.full_ring_count(), 46);
        assert!(rev.partial_ring().is_none());
        assert!((rev.swept_angle() - TAU).abs() < 1e-5);
        // Meridians close back on themselves after a full turn
        for meridian in &rev.meridians {
            assert!(meridian.points[0].distance(*meridian.points.last().unwrap()) < 1e-4);
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(build(100.0).full_ring_count(), 46);
        assert!(build(-3.0).is_empty());
        assert!(build(f32::NAN).is_empty());
    }

    #[test]
    fn test_rings_lie_on_sphere() {
        let rev = build(7.3);
        for ring in &rev.rings {
            for p in &ring.line.points {
                assert!((p.length() - 1.2).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_recolor_keeps_accent() {
        let mut rev = build(4.5);
        let accent = rev.partial_ring().unwrap().line.colors.clone();
        let full_before = rev.rings[0].line.colors.clone();
        rev.recolor(1.7);
        assert_eq!(rev.partial_ring().unwrap().line.colors, accent);
        assert_ne!(rev.rings[0].line.colors, full_before);
    }

    proptest! {
        #[test]
        fn prop_ring_count_law(k in 0u32..=45, f in 0.0f32..1.0) {
            let progress = k as f32 + f;
            prop_assume!(progress > 0.0 && progress <= 45.0);
            // Work from what floor() actually sees after float addition
            let whole = progress.floor() as u32;
            let frac = progress - whole as f32;

            let rev = build(progress);
            let full = whole.min(MAX_REVOLUTION_STEPS) as usize + 1;
            prop_assert_eq!(rev.full_ring_count(), full);

            let expect_partial = frac > PARTIAL_THRESHOLD && whole < MAX_REVOLUTION_STEPS;
            prop_assert_eq!(rev.partial_ring().is_some(), expect_partial);
        }
    }
}
