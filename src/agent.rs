/*
 * Agent Module
 *
 * An agent is nothing more than a position and a velocity. Its identity is its
 * index in the flock; anything visual about it belongs to the host.
 */

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::params::SimulationParams;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Agent {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }

    // Spawn an agent inside the spawn box with a random initial velocity
    pub fn random<R: Rng + ?Sized>(rng: &mut R, params: &SimulationParams) -> Self {
        let extent = params.spawn_extent;
        let position = Vec3::new(
            centered(rng, extent.x),
            centered(rng, extent.y),
            centered(rng, extent.z),
        );

        let speed = params.initial_speed;
        let velocity = Vec3::new(
            centered(rng, speed),
            centered(rng, speed),
            centered(rng, speed),
        );

        Self { position, velocity }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

// Uniform sample from [-width/2, width/2); a degenerate width yields 0
fn centered<R: Rng + ?Sized>(rng: &mut R, width: f32) -> f32 {
    if width > 0.0 {
        let half = width / 2.0;
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}
