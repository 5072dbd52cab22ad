/*
 * Debug Information Module
 *
 * FlockStats summarizes a flock at one instant (speeds, centroid, how crowded
 * the neighborhoods are, how many agents are out of bounds). DebugInfo holds
 * the per-frame timing shown by the viewer.
 */

use std::time::Duration;

use glam::Vec3;
use serde::Serialize;

use crate::flock::Flock;
use crate::params::SimulationParams;
use crate::physics::bounded_distance;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlockStats {
    pub frame: u64,
    pub agents: usize,
    pub mean_speed: f32,
    pub max_speed: f32,
    pub centroid: Vec3,
    pub mean_neighbors: f32,
    pub out_of_bounds: usize,
}

impl FlockStats {
    // O(n^2): meant for logging and the debug overlay, not for every frame of a large flock
    pub fn measure(flock: &Flock, params: &SimulationParams) -> Self {
        let agents = flock.agents();
        let n = agents.len();

        if n == 0 {
            return Self {
                frame: flock.frame(),
                agents: 0,
                mean_speed: 0.0,
                max_speed: 0.0,
                centroid: Vec3::ZERO,
                mean_neighbors: 0.0,
                out_of_bounds: 0,
            };
        }

        let mut speed_sum = 0.0;
        let mut max_speed: f32 = 0.0;
        let mut centroid = Vec3::ZERO;
        let mut neighbor_total = 0usize;
        let mut out_of_bounds = 0;

        for (i, agent) in agents.iter().enumerate() {
            let speed = agent.speed();
            speed_sum += speed;
            max_speed = max_speed.max(speed);
            centroid += agent.position;

            neighbor_total += agents
                .iter()
                .enumerate()
                .filter(|&(j, other)| {
                    j != i && bounded_distance(agent.position, other.position, params.vision_range) < params.vision_range
                })
                .count();

            let p = agent.position;
            let b = params.boundary;
            if p.x.abs() > b.x || p.y.abs() > b.y || p.z.abs() > b.z {
                out_of_bounds += 1;
            }
        }

        Self {
            frame: flock.frame(),
            agents: n,
            mean_speed: speed_sum / n as f32,
            max_speed,
            centroid: centroid / n as f32,
            mean_neighbors: neighbor_total as f32 / n as f32,
            out_of_bounds,
        }
    }
}

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub step_time: Duration,
    pub stats: Option<FlockStats>,
}
