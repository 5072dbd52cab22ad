/*
 * Application Module
 *
 * The viewer is the host render loop: once per frame it runs the control
 * panel, advances the flock by one step and leaves drawing to the renderer.
 * The flock never sees anything visual; agent index i is simply drawn as the
 * i-th marker.
 */

use std::sync::OnceLock;
use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::info;

use crate::camera::Camera;
use crate::debug::{DebugInfo, FlockStats};
use crate::flock::Flock;
use crate::input;
use crate::params::SimulationParams;
use crate::renderer;
use crate::ui;

// What the binary resolved from the command line
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub params: SimulationParams,
    pub seed: u64,
}

// nannou builds the model from a plain fn, so the launch config is parked here
static LAUNCH: OnceLock<LaunchConfig> = OnceLock::new();

#[derive(Debug, Clone, Copy)]
pub struct ViewSettings {
    pub paused: bool,
    pub show_debug: bool,
    pub show_boundary: bool,
    pub fit_bounds_to_view: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            paused: false,
            show_debug: false,
            show_boundary: true,
            fit_bounds_to_view: false,
        }
    }
}

pub struct Model {
    pub flock: Flock,
    pub params: SimulationParams,
    pub view: ViewSettings,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
    // Seed of the next respawn
    pub seed: u64,
}

pub fn run(config: LaunchConfig) {
    let _ = LAUNCH.set(config);
    nannou::app(model).update(update).run();
}

pub fn model(app: &App) -> Model {
    let config = LAUNCH.get().cloned().unwrap_or_else(|| LaunchConfig {
        params: SimulationParams::default(),
        seed: 0,
    });

    let window_id = app
        .new_window()
        .title("3D Boids")
        .size(1280, 720)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to build the viewer window");

    let window = app.window(window_id).expect("viewer window closed during setup");
    let egui = Egui::from_window(&window);

    let params = config.params;
    let flock = Flock::seeded(params.num_agents, &params, config.seed);
    info!(agents = flock.len(), seed = config.seed, "viewer started");

    Model {
        flock,
        params,
        view: ViewSettings::default(),
        egui,
        debug_info: DebugInfo::default(),
        camera: Camera::new(),
        mouse_position: Vec2::ZERO,
        seed: config.seed,
    }
}

pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let response = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &mut model.view,
        &model.debug_info,
        &model.camera,
    );

    if response.reset_camera {
        model.camera.reset();
    }

    if response.reset_flock || response.changes.population_changed {
        respawn(model);
    }

    if !model.view.paused {
        let start = Instant::now();
        if model.view.fit_bounds_to_view {
            let bounds = model.camera.frustum_bounds(app.window_rect(), model.params.boundary.z);
            model.flock.advance_with_bounds(&model.params, &bounds);
        } else {
            model.flock.advance(&model.params);
        }
        model.debug_info.step_time = start.elapsed();
    }

    model.debug_info.stats = model
        .view
        .show_debug
        .then(|| FlockStats::measure(&model.flock, &model.params));
}

// The population is fixed for a flock's lifetime; a new size means a new flock
fn respawn(model: &mut Model) {
    model.seed = model.seed.wrapping_add(1);
    model.flock = Flock::seeded(model.params.num_agents, &model.params, model.seed);
    info!(agents = model.flock.len(), seed = model.seed, "respawned flock");
}
