/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds every tunable
 * constant of a run: ranges, rule weights, speed limit, spawn volume and the
 * boundary box. It also provides the presets, validation, JSON loading and the
 * change detection used by the control panel.
 */

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{FlockError, FlockResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_agents: usize,
    pub vision_range: f32,
    pub collision_range: f32,
    pub speed_limit: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    // Full widths of the spawn box, centred on the origin
    pub spawn_extent: Vec3,
    pub initial_speed: f32,
    // Half-extents of the containment box
    pub boundary: Vec3,
    pub turn_factor: f32,
    // Performance settings, never change the outcome of a step
    pub enable_parallel: bool,
    pub enable_spatial_grid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    // Small 3D scene framed by a perspective camera
    Scene,
    // Large vision range, fast agents
    Wide,
}

impl Preset {
    pub fn params(self) -> SimulationParams {
        match self {
            Preset::Scene => SimulationParams::scene(),
            Preset::Wide => SimulationParams::wide(),
        }
    }
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, PartialEq)]
struct ParamSnapshot {
    num_agents: usize,
    vision_range: f32,
    collision_range: f32,
    speed_limit: f32,
    cohesion_weight: f32,
    separation_weight: f32,
    alignment_weight: f32,
    boundary: Vec3,
    turn_factor: f32,
    enable_parallel: bool,
    enable_spatial_grid: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamChanges {
    pub population_changed: bool,
    pub any_changed: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::scene()
    }
}

impl SimulationParams {
    pub fn scene() -> Self {
        Self {
            num_agents: 50,
            vision_range: 2.2,
            collision_range: 1.5,
            speed_limit: 0.1,
            cohesion_weight: 0.025,
            separation_weight: 0.08,
            alignment_weight: 0.03,
            spawn_extent: Vec3::new(12.0, 12.0, 3.0),
            initial_speed: 0.04,
            boundary: Vec3::new(15.0, 10.0, 3.0),
            turn_factor: -1.0,
            enable_parallel: false,
            enable_spatial_grid: false,
        }
    }

    pub fn wide() -> Self {
        Self {
            num_agents: 100,
            vision_range: 200.0,
            collision_range: 3.0,
            speed_limit: 15.0,
            cohesion_weight: 0.01,
            separation_weight: 0.06,
            alignment_weight: 0.04,
            spawn_extent: Vec3::new(10.0, 10.0, 10.0),
            initial_speed: 10.0,
            boundary: Vec3::new(15.0, 10.0, 10.0),
            turn_factor: -1.0,
            enable_parallel: false,
            enable_spatial_grid: false,
        }
    }

    pub fn validate(&self) -> FlockResult<()> {
        if !(self.vision_range.is_finite() && self.vision_range > 0.0) {
            return Err(invalid(format!("vision_range must be positive, got {}", self.vision_range)));
        }
        if !(self.collision_range >= 0.0 && self.collision_range <= self.vision_range) {
            return Err(invalid(format!(
                "collision_range must lie in [0, vision_range = {}], got {}",
                self.vision_range, self.collision_range
            )));
        }
        if !(self.speed_limit.is_finite() && self.speed_limit > 0.0) {
            return Err(invalid(format!("speed_limit must be positive, got {}", self.speed_limit)));
        }

        let weights = [
            ("cohesion_weight", self.cohesion_weight),
            ("separation_weight", self.separation_weight),
            ("alignment_weight", self.alignment_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {weight}")));
            }
        }

        let extents = [("spawn_extent", self.spawn_extent), ("boundary", self.boundary)];
        for (name, extent) in extents {
            let ok = [extent.x, extent.y, extent.z]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0);
            if !ok {
                return Err(invalid(format!("{name} components must be finite and non-negative, got {extent}")));
            }
        }

        if !(self.initial_speed.is_finite() && self.initial_speed >= 0.0) {
            return Err(invalid(format!("initial_speed must be non-negative, got {}", self.initial_speed)));
        }

        // A U-turn must reverse the component without growing it past the clamp
        if !(self.turn_factor >= -1.0 && self.turn_factor < 0.0) {
            return Err(invalid(format!("turn_factor must lie in [-1, 0), got {}", self.turn_factor)));
        }

        Ok(())
    }

    // Parse a parameter file; missing fields fall back to the scene preset
    pub fn from_json_str(json: &str) -> FlockResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> FlockResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> FlockResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            num_agents: self.num_agents,
            vision_range: self.vision_range,
            collision_range: self.collision_range,
            speed_limit: self.speed_limit,
            cohesion_weight: self.cohesion_weight,
            separation_weight: self.separation_weight,
            alignment_weight: self.alignment_weight,
            boundary: self.boundary,
            turn_factor: self.turn_factor,
            enable_parallel: self.enable_parallel,
            enable_spatial_grid: self.enable_spatial_grid,
        }
    }

    // Take a snapshot of the current values, to be compared after the UI ran
    pub fn take_snapshot(&self) -> ParamTracker {
        ParamTracker {
            previous: self.snapshot(),
        }
    }

    // Get parameter ranges for UI sliders
    pub fn num_agents_range() -> std::ops::RangeInclusive<usize> {
        2..=5000
    }

    pub fn speed_limit_range() -> std::ops::RangeInclusive<f32> {
        0.01..=20.0
    }

    pub fn weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn range_range() -> std::ops::RangeInclusive<f32> {
        0.1..=250.0
    }
}

// Holds the values seen before a round of UI edits
#[derive(Debug, Clone)]
pub struct ParamTracker {
    previous: ParamSnapshot,
}

impl ParamTracker {
    pub fn detect_changes(&self, params: &SimulationParams) -> ParamChanges {
        let current = params.snapshot();
        ParamChanges {
            population_changed: current.num_agents != self.previous.num_agents,
            any_changed: current != self.previous,
        }
    }
}

fn invalid(message: String) -> FlockError {
    FlockError::InvalidParams(message)
}
