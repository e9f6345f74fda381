//! Everything the renderer draws, owned by the driver
//!
//! Each slot holds at most one geometry instance. Installing a new one drops
//! the old one on the spot, so stale geometry can never be drawn.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};

use crate::consts::*;
use crate::geometry::{CircleReference, Grid, PolygonGeometry, Polyline, Revolution};

/// Per-object transform (uniform scale, then rotation about Y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub rotation_y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation_y: 0.0,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// A geometry slot with visibility and transform
#[derive(Debug, Clone)]
pub struct Node<T> {
    item: Option<T>,
    pub visible: bool,
    pub transform: Transform,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            item: None,
            visible: true,
            transform: Transform::default(),
        }
    }
}

impl<T> Node<T> {
    pub fn with(item: T) -> Self {
        Self {
            item: Some(item),
            ..Default::default()
        }
    }

    /// Install a fresh instance, dropping the previous one
    pub fn replace(&mut self, item: T) {
        self.item = Some(item);
    }

    pub fn clear(&mut self) {
        self.item = None;
    }

    pub fn get(&self) -> Option<&T> {
        self.item.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.item.as_mut()
    }

    /// Item to draw this frame, if any
    pub fn drawable(&self) -> Option<&T> {
        if self.visible { self.item.as_ref() } else { None }
    }
}

/// Camera that eases toward a per-phase framing and can orbit the origin
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    /// Framing the camera eases toward (before orbit)
    pub target: Vec3,
    /// Point the camera looks at
    pub focus: Vec3,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    /// Accumulated orbit angle around Y
    pub orbit: f32,
    pub fov_y: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: CAMERA_POLYGON,
            target: CAMERA_POLYGON,
            focus: Vec3::ZERO,
            auto_rotate: false,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            orbit: 0.0,
            fov_y: 60f32.to_radians(),
        }
    }
}

impl CameraRig {
    /// Ease toward the target and advance the orbit
    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate {
            // One full orbit per 60 s at speed 1
            self.orbit = (self.orbit + TAU / 60.0 * self.auto_rotate_speed * dt).rem_euclid(TAU);
        }
        let goal = self.goal();
        let t = (dt * CAMERA_EASE_RATE).clamp(0.0, 1.0);
        self.position = self.position.lerp(goal, t);
    }

    /// Where the camera is heading, orbit included
    pub fn goal(&self) -> Vec3 {
        Quat::from_rotation_y(self.orbit) * self.target
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Jump straight to a framing (used on reset)
    pub fn snap_to(&mut self, target: Vec3) {
        self.target = target;
        self.orbit = 0.0;
        self.position = target;
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, self.focus, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, aspect.max(0.01), 0.1, 100.0);
        proj * view
    }
}

/// All drawable objects plus camera and overlay flags
#[derive(Debug, Clone)]
pub struct Scene {
    pub grid: Node<Grid>,
    pub circle: Node<CircleReference>,
    pub polygon: Node<PolygonGeometry>,
    pub axis: Node<Polyline>,
    pub revolution: Node<Revolution>,
    pub camera: CameraRig,
    pub final_message_visible: bool,
}

impl Scene {
    /// Initial phase-1 scene
    pub fn new(sides: u32, radius: f32, show_grid: bool) -> Self {
        let mut grid = Node::with(Grid::default());
        grid.visible = show_grid;

        let mut axis = Node::with(crate::geometry::axis(radius));
        axis.visible = false;

        Self {
            grid,
            circle: Node::with(CircleReference::new(radius)),
            polygon: Node::with(PolygonGeometry::new(sides, radius)),
            axis,
            revolution: Node::default(),
            camera: CameraRig::default(),
            final_message_visible: false,
        }
    }

    /// Show or hide the phase-1 objects together
    pub fn set_phase_one_visible(&mut self, visible: bool) {
        self.polygon.visible = visible;
        self.circle.visible = visible;
    }
}
