/*
 * Flock Module
 *
 * The Flock owns a fixed population of agents and advances it one step per
 * call. The host reads positions and velocities back after each step and maps
 * agent indices to whatever it draws.
 */

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::agent::Agent;
use crate::bounds::{BoundsProvider, FixedBounds};
use crate::error::{FlockError, FlockResult};
use crate::params::SimulationParams;
use crate::physics;
use crate::spatial_grid::SpatialGrid;

pub struct Flock {
    agents: Vec<Agent>,
    frame: u64,
    // Scratch broad-phase, rebuilt from scratch on every step
    grid: SpatialGrid,
}

impl Clone for Flock {
    fn clone(&self) -> Self {
        Self::from_agents_at_frame(self.agents.clone(), self.frame)
    }
}

impl std::fmt::Debug for Flock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flock")
            .field("agents", &self.agents.len())
            .field("frame", &self.frame)
            .finish()
    }
}

impl Flock {
    /// Spawns `n` agents at random inside the spawn box of `params`.
    pub fn create<R: Rng + ?Sized>(n: usize, params: &SimulationParams, rng: &mut R) -> Self {
        let agents: Vec<Agent> = (0..n).map(|_| Agent::random(rng, params)).collect();
        debug!(agents = agents.len(), "created flock");
        Self::from_agents(agents)
    }

    /// Same as [`Flock::create`] with a reproducible ChaCha8 stream.
    pub fn seeded(n: usize, params: &SimulationParams, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::create(n, params, &mut rng)
    }

    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self::from_agents_at_frame(agents, 0)
    }

    fn from_agents_at_frame(agents: Vec<Agent>, frame: u64) -> Self {
        Self {
            agents,
            frame,
            grid: SpatialGrid::new(1.0),
        }
    }

    /// Builds a flock from separate position and velocity stores.
    ///
    /// Both stores must describe the same agents; a length mismatch is
    /// rejected rather than truncated.
    pub fn from_parts(positions: Vec<Vec3>, velocities: Vec<Vec3>) -> FlockResult<Self> {
        if positions.len() != velocities.len() {
            return Err(FlockError::LengthMismatch {
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }

        let agents = positions
            .into_iter()
            .zip(velocities)
            .map(|(position, velocity)| Agent::new(position, velocity))
            .collect();
        Ok(Self::from_agents(agents))
    }

    /// Advances every agent by one step, containing them in `params.boundary`.
    pub fn advance(&mut self, params: &SimulationParams) {
        self.advance_with_bounds(params, &FixedBounds(params.boundary));
    }

    /// Advances every agent by one step, asking `bounds` for the box each
    /// agent must stay in.
    pub fn advance_with_bounds<B: BoundsProvider + ?Sized>(&mut self, params: &SimulationParams, bounds: &B) {
        // Start-of-step snapshot shared by every agent's scan
        let positions: Vec<Vec3> = self.agents.iter().map(|agent| agent.position).collect();
        let velocities: Vec<Vec3> = self.agents.iter().map(|agent| agent.velocity).collect();

        let grid = if params.enable_spatial_grid {
            self.grid.rebuild(params.vision_range, &positions);
            Some(&self.grid)
        } else {
            None
        };

        let next = physics::step(&positions, &velocities, params, bounds, grid);

        trace!(
            frame = self.frame,
            agents = next.len(),
            parallel = params.enable_parallel,
            spatial_grid = params.enable_spatial_grid,
            "advanced flock"
        );

        // Commit only once every agent has its next state
        self.agents = next;
        self.frame += 1;
    }

    /// Returns the next state, leaving `self` untouched.
    pub fn advanced(&self, params: &SimulationParams) -> Flock {
        let mut next = self.clone();
        next.advance(params);
        next
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    // (position, velocity) pairs in agent order
    pub fn states(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.agents.iter().map(|agent| (agent.position, agent.velocity))
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.agents.iter().map(|agent| agent.position)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    // Number of steps taken since creation
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
