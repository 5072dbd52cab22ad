/*
 * Boid Flocking Simulation - Module Definitions
 *
 * The simulation core (agents, parameters, flock, physics, bounds, spatial
 * grid, statistics) has no knowledge of rendering. The viewer modules are the
 * host render loop and are only compiled with the `viewer` feature.
 */

// Re-export key components for easier access
pub use agent::Agent;
pub use bounds::{BoundsProvider, FixedBounds, FrustumBounds};
pub use debug::{DebugInfo, FlockStats};
pub use error::{FlockError, FlockResult};
pub use flock::Flock;
pub use params::{ParamChanges, Preset, SimulationParams};
pub use spatial_grid::SpatialGrid;

pub use glam::Vec3;

// Simulation core
pub mod agent;
pub mod bounds;
pub mod debug;
pub mod error;
pub mod flock;
pub mod params;
pub mod physics;
pub mod spatial_grid;

// Host render loop
#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod camera;
#[cfg(feature = "viewer")]
pub mod input;
#[cfg(feature = "viewer")]
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod ui;

// Constants
pub const AGENT_SIZE: f32 = 6.0;
