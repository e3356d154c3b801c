/*
 * Boid Flocking Simulation - Module Definitions
 *
 * Predator and prey flocking in a bounded 2D area. The library holds the
 * simulation core (agents, neighbor indexing, steering rules, stepping);
 * the desktop host in `main.rs` only draws agents and edits parameters.
 */

// Re-export key components for easier access
pub use boid::{Boid, FlockId, Species};
pub use bounds::Bounds;
pub use debug::TickStats;
pub use error::{FlockError, Result};
pub use flock::{Flock, FlockSetup};
pub use params::{FlockParams, UpdateOrder};
pub use quadtree::QuadTree;
pub use rules::Steering;
pub use simulation::Simulation;
pub use spatial_grid::SpatialGrid;
pub use spatial_index::{
    LinearIndex, NeighborIndexKind, SpatialIndex, MAX_GRID_CELLS, MAX_QUADTREE_LEVELS,
};

// Define modules
pub mod boid;
pub mod boundary;
pub mod bounds;
pub mod debug;
pub mod error;
pub mod flock;
pub mod params;
pub mod physics;
pub mod quadtree;
pub mod rules;
pub mod simulation;
pub mod spatial_grid;
pub mod spatial_index;
pub mod vector;

// Constants
/// Each initial velocity component is drawn uniformly from `[-R, R]`.
pub const INITIAL_VELOCITY_RANGE: f32 = 5.0;
