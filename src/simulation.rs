/*
 * Simulation Module
 *
 * Owns one run: the flock, its parameters, the neighbor index and the tick
 * counter. Hosts drive it with `step` once per frame and read agents back
 * through `render_with` between ticks.
 */

use crate::boid::Boid;
use crate::debug::TickStats;
use crate::error::Result;
use crate::flock::{Flock, FlockSetup};
use crate::params::FlockParams;
use crate::physics;
use crate::spatial_index::SpatialIndex;

pub struct Simulation {
    flock: Flock,
    params: FlockParams,
    index: Box<dyn SpatialIndex<usize>>,
    tick: u64,
}

impl Simulation {
    pub fn new(setup: &FlockSetup, params: FlockParams) -> Result<Self> {
        params.validate()?;
        let flock = Flock::from_setup(setup)?;
        Self::with_flock(flock, params)
    }

    /// Run an existing flock, e.g. hand-placed agents.
    pub fn with_flock(flock: Flock, params: FlockParams) -> Result<Self> {
        params.validate()?;
        let index = params.neighbor_index.build(flock.area())?;

        log::info!(
            "simulation ready: {} boids, {} index, {:?} updates",
            flock.len(),
            index.name(),
            params.update_order
        );

        Ok(Self {
            flock,
            params,
            index,
            tick: 0,
        })
    }

    /// Advance every boid by one tick.
    pub fn step(&mut self) -> TickStats {
        self.tick += 1;
        physics::update_boids(&mut self.flock, &self.params, self.index.as_mut(), self.tick)
    }

    /// Call `draw` once per boid, in store order.
    pub fn render_with<C, F>(&self, ctx: &mut C, mut draw: F)
    where
        F: FnMut(&mut C, &Boid),
    {
        for boid in self.flock.boids() {
            draw(ctx, boid);
        }
    }

    pub fn set_visual_range(&mut self, visual_range: f32) -> Result<()> {
        self.params.set_visual_range(visual_range)
    }

    /// Replace agents and configuration. On error the current run is kept.
    pub fn reinitialize(&mut self, setup: &FlockSetup, params: FlockParams) -> Result<()> {
        *self = Self::new(setup, params)?;
        Ok(())
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    /// Ticks completed since construction.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
