//! Animation driver: owns the simulation state and the scene built from it
//!
//! Each frame applies the queued commands and the auto-play step, turning
//! the resulting events into scene changes. Geometry is never patched in place: a change to the side
//! count, radius or sweep progress rebuilds the affected object from scratch.

use crate::consts::*;
use crate::geometry::{CircleReference, PolygonGeometry, Revolution, axis};
use crate::scene::{Scene, Transform};
use crate::settings::Settings;
use crate::sim::{Command, Phase, SimEvent, SimulationState, TickInput, apply_command, auto_play_step};
use crate::ui::hud::HudModel;

/// Scene objects that need rebuilding after a batch of events
#[derive(Debug, Default, Clone, Copy)]
struct Rebuild {
    polygon: bool,
    circle: bool,
    axis: bool,
    revolution: bool,
}

pub struct Driver {
    state: SimulationState,
    scene: Scene,
    /// Skip breathing and color cycling
    reduced_motion: bool,
    ring_segments: u32,
    show_grid: bool,
}

impl Driver {
    pub fn new(settings: &Settings) -> Self {
        let state = SimulationState::with_preferences(settings.radius, settings.speed, settings.show_axis);
        let mut scene = Scene::new(state.rounded_sides(), state.radius(), settings.show_grid);
        scene.camera.auto_rotate_speed = settings.auto_rotate_speed;

        log::info!(
            "Driver ready: radius {:.2}, speed {:.2}, quality {}",
            state.radius(),
            state.speed(),
            settings.quality.as_str()
        );

        Self {
            state,
            scene,
            reduced_motion: settings.reduced_motion,
            ring_segments: settings.quality.ring_segments(),
            show_grid: settings.show_grid,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn pi_approximation(&self) -> f64 {
        self.state.pi_approximation()
    }

    pub fn hud(&self) -> HudModel {
        HudModel::from_state(&self.state, self.scene.final_message_visible)
    }

    /// Advance one frame: commands, auto-play, scene sync, ambient animation
    ///
    /// Commands run one at a time in arrival order, each followed by its
    /// scene sync.
    pub fn update(&mut self, input: &TickInput) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for command in &input.commands {
            events.extend(self.execute(*command));
        }

        let mut stepped = Vec::new();
        auto_play_step(&mut self.state, input.dt, &mut stepped);
        self.sync_scene(&stepped);
        events.extend(stepped);

        let dt = input.dt.clamp(0.0, MAX_FRAME_DT);
        self.animate(dt, input.elapsed);
        events
    }

    /// Apply a command right away, outside the frame loop
    pub fn execute(&mut self, command: Command) -> Vec<SimEvent> {
        let mut events = Vec::new();
        apply_command(&mut self.state, command, &mut events);
        self.sync_scene(&events);
        self.apply_scene_command(command);
        events
    }

    pub fn advance_phase(&mut self) -> Vec<SimEvent> {
        self.execute(Command::Advance)
    }

    pub fn reset(&mut self) -> Vec<SimEvent> {
        self.execute(Command::Reset)
    }

    pub fn toggle_axis(&mut self, show: bool) {
        self.execute(Command::ToggleAxis(show));
    }

    pub fn toggle_grid(&mut self, show: bool) {
        self.execute(Command::ToggleGrid(show));
    }

    fn apply_scene_command(&mut self, command: Command) {
        match command {
            Command::ToggleGrid(show) => {
                self.show_grid = show;
                self.scene.grid.visible = show;
            }
            Command::SetAutoRotate(on) => self.scene.camera.auto_rotate = on,
            _ => {}
        }
    }

    fn sync_scene(&mut self, events: &[SimEvent]) {
        let mut rebuild = Rebuild::default();

        for event in events {
            match *event {
                SimEvent::SidesChanged => rebuild.polygon = true,
                SimEvent::RadiusChanged => {
                    rebuild.polygon = true;
                    rebuild.circle = true;
                    rebuild.axis = true;
                    rebuild.revolution = true;
                }
                SimEvent::RevolutionChanged => rebuild.revolution = true,
                SimEvent::AxisToggled(show) => self.scene.axis.visible = show,
                SimEvent::AutoPlayChanged(_) => {}
                SimEvent::PhaseChanged { to: Phase::Revolution, .. } => {
                    self.scene.set_phase_one_visible(false);
                    self.scene.grid.visible = false;
                    self.scene.axis.visible = self.state.show_axis();
                    self.scene.camera.set_target(CAMERA_REVOLUTION);
                    rebuild.revolution = true;
                }
                SimEvent::PhaseChanged { to: Phase::Complete, .. } => {
                    self.scene.final_message_visible = true;
                    self.scene.camera.auto_rotate = true;
                    self.scene.camera.set_target(CAMERA_FINAL);
                }
                SimEvent::PhaseChanged { .. } => {}
                SimEvent::Reset => {
                    self.scene.revolution.clear();
                    self.scene.revolution.transform = Transform::default();
                    self.scene.set_phase_one_visible(true);
                    self.scene.polygon.transform = Transform::default();
                    self.scene.circle.transform = Transform::default();
                    self.scene.grid.visible = self.show_grid;
                    self.scene.axis.visible = false;
                    self.scene.final_message_visible = false;
                    self.scene.camera.auto_rotate = false;
                    self.scene.camera.snap_to(CAMERA_POLYGON);
                    rebuild.polygon = true;
                    rebuild.circle = true;
                }
            }
        }

        let radius = self.state.radius();
        if rebuild.polygon {
            self.scene
                .polygon
                .replace(PolygonGeometry::new(self.state.rounded_sides(), radius));
        }
        if rebuild.circle {
            self.scene.circle.replace(CircleReference::new(radius));
        }
        if rebuild.axis {
            self.scene.axis.replace(axis(radius));
        }
        if rebuild.revolution {
            if self.state.phase() == Phase::Polygon {
                self.scene.revolution.clear();
            } else {
                self.scene.revolution.replace(Revolution::build(
                    radius,
                    self.state.revolution_progress(),
                    self.state.max_revolution_steps(),
                    self.ring_segments,
                ));
            }
        }
    }

    /// Cosmetic motion; never touches the simulation state
    fn animate(&mut self, dt: f32, elapsed: f32) {
        self.scene.camera.update(dt);

        if self.state.phase() == Phase::Polygon {
            if self.reduced_motion {
                return;
            }
            let transform = Transform {
                scale: 1.0 + (elapsed * BREATHING_RATE).sin() * BREATHING_AMPLITUDE,
                rotation_y: 0.0,
            };
            self.scene.polygon.transform = transform;
            self.scene.circle.transform = transform;

            let offset = (elapsed * COLOR_CYCLE_RATE).rem_euclid(1.0);
            if let Some(polygon) = self.scene.polygon.get_mut() {
                polygon.recolor(offset);
            }
            if let Some(circle) = self.scene.circle.get_mut() {
                circle.recolor(elapsed);
            }
        } else {
            self.scene.revolution.transform.rotation_y = elapsed * REVOLUTION_SPIN_RATE;
            if self.reduced_motion {
                return;
            }
            if let Some(revolution) = self.scene.revolution.get_mut() {
                revolution.recolor(elapsed);
            }
        }
    }
}
