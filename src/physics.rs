/*
 * Physics Module
 *
 * This module implements one flocking step. Each agent scans the other agents,
 * then applies, in order:
 * 1. Cohesion: steer towards the centre of mass of neighbors
 * 2. Separation: steer away from agents inside the collision range
 * 3. Alignment: blend the pending velocity towards the neighbors' average
 * 4. Speed clamp
 * 5. Boundary U-turn
 *
 * Every agent reads the same start-of-step snapshot and the results are only
 * committed once all of them are computed, so the outcome does not depend on
 * agent order, on the parallel scan, or on the spatial grid.
 */

use glam::Vec3;
use rayon::prelude::*;

use crate::agent::Agent;
use crate::bounds::BoundsProvider;
use crate::params::SimulationParams;
use crate::spatial_grid::SpatialGrid;

// Returned by the pre-filter instead of a real distance; larger than any range
pub const FAR_DISTANCE: f32 = f32::INFINITY;

// Distance between two points, or FAR_DISTANCE as soon as one axis delta
// exceeds the vision range (the Euclidean distance can only be larger)
#[inline]
pub fn bounded_distance(a: Vec3, b: Vec3, vision_range: f32) -> f32 {
    let d = a - b;
    if d.x.abs() > vision_range || d.y.abs() > vision_range || d.z.abs() > vision_range {
        return FAR_DISTANCE;
    }
    d.length()
}

// Running tallies of one agent's neighborhood
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborSums {
    pub position_sum: Vec3,
    pub velocity_sum: Vec3,
    pub neighbors: usize,
    pub separation: Vec3,
}

impl Default for NeighborSums {
    fn default() -> Self {
        Self {
            position_sum: Vec3::ZERO,
            velocity_sum: Vec3::ZERO,
            neighbors: 0,
            separation: Vec3::ZERO,
        }
    }
}

impl NeighborSums {
    #[inline]
    fn accumulate(&mut self, position: Vec3, other_position: Vec3, other_velocity: Vec3, params: &SimulationParams) {
        let d = bounded_distance(position, other_position, params.vision_range);

        if d < params.vision_range {
            self.position_sum += other_position;
            self.velocity_sum += other_velocity;
            self.neighbors += 1;
        }

        // Vector pointing away from a colliding neighbor
        if d <= params.collision_range {
            self.separation += position - other_position;
        }
    }

    pub fn center_of_mass(&self) -> Option<Vec3> {
        (self.neighbors > 0).then(|| self.position_sum / self.neighbors as f32)
    }

    pub fn average_velocity(&self) -> Option<Vec3> {
        (self.neighbors > 0).then(|| self.velocity_sum / self.neighbors as f32)
    }
}

// Scan the candidate agents around agent `index`; the agent itself is skipped
pub fn scan_neighbors(
    index: usize,
    positions: &[Vec3],
    velocities: &[Vec3],
    candidates: impl IntoIterator<Item = usize>,
    params: &SimulationParams,
) -> NeighborSums {
    let position = positions[index];
    let mut sums = NeighborSums::default();

    for j in candidates {
        if j == index {
            continue;
        }
        sums.accumulate(position, positions[j], velocities[j], params);
    }

    sums
}

// Steps 4-6: the three flocking rules, applied to the current velocity
pub fn apply_rules(position: Vec3, velocity: Vec3, sums: &NeighborSums, params: &SimulationParams) -> Vec3 {
    let mut delta = velocity;

    if let Some(center) = sums.center_of_mass() {
        delta += (center - position) * params.cohesion_weight;
    }

    delta += sums.separation * params.separation_weight;

    // Blends the already-adjusted delta, not the pre-step velocity
    if let Some(average) = sums.average_velocity() {
        delta += (average - delta) * params.alignment_weight;
    }

    delta
}

// Scale the vector down so its length does not exceed the limit
#[inline]
pub fn limit_speed(velocity: Vec3, speed_limit: f32) -> Vec3 {
    let speed = velocity.length();
    if speed > speed_limit {
        velocity * (speed_limit / speed)
    } else {
        velocity
    }
}

// U-turn on every axis where the agent is out of bounds and still heading out
#[inline]
pub fn stay_in_bounds(position: Vec3, mut velocity: Vec3, half_extents: Vec3, turn_factor: f32) -> Vec3 {
    if (position.x < -half_extents.x && velocity.x < 0.0) || (position.x > half_extents.x && velocity.x > 0.0) {
        velocity.x *= turn_factor;
    }
    if (position.y < -half_extents.y && velocity.y < 0.0) || (position.y > half_extents.y && velocity.y > 0.0) {
        velocity.y *= turn_factor;
    }
    if (position.z < -half_extents.z && velocity.z < 0.0) || (position.z > half_extents.z && velocity.z > 0.0) {
        velocity.z *= turn_factor;
    }
    velocity
}

// Next state of one agent given its neighborhood
pub fn steer<B: BoundsProvider + ?Sized>(
    position: Vec3,
    velocity: Vec3,
    sums: &NeighborSums,
    params: &SimulationParams,
    bounds: &B,
) -> Agent {
    let delta = apply_rules(position, velocity, sums, params);
    let delta = limit_speed(delta, params.speed_limit);
    let delta = stay_in_bounds(position, delta, bounds.half_extents_at(position), params.turn_factor);

    Agent::new(position + delta, delta)
}

// Compute the next state of every agent from a start-of-step snapshot.
// Nothing is written back here; the caller commits the returned states.
pub fn step<B: BoundsProvider + ?Sized>(
    positions: &[Vec3],
    velocities: &[Vec3],
    params: &SimulationParams,
    bounds: &B,
    grid: Option<&SpatialGrid>,
) -> Vec<Agent> {
    let n = positions.len();

    let next_agent = |i: usize| {
        let sums = match grid {
            Some(grid) => scan_neighbors(i, positions, velocities, grid.nearby_indices(positions[i]), params),
            None => scan_neighbors(i, positions, velocities, 0..n, params),
        };
        steer(positions[i], velocities[i], &sums, params, bounds)
    };

    if params.enable_parallel {
        (0..n).into_par_iter().map(next_agent).collect()
    } else {
        (0..n).map(next_agent).collect()
    }
}
