/*
 * Flocking Rules Module
 *
 * Computes the velocity change for one focal boid from a set of candidate
 * neighbors. Candidates may include boids that are out of range (the index
 * over-approximates) and the focal boid itself; both are filtered here.
 *
 * 1. Cohesion: steer towards the weighted centroid of attractive neighbors.
 *    Prey are attracted to their own flock; predators to any prey, over an
 *    extended range and with extra weight.
 * 2. Alignment: prey match the average velocity of their own flock.
 * 3. Separation: move away from anything closer than `min_distance`,
 *    much harder from predators. Not averaged, so threats add up.
 */

use nannou::prelude::Vec2;

use crate::boid::{Boid, Species};
use crate::params::FlockParams;

/// Per-rule velocity deltas for one boid and one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steering {
    pub cohesion: Vec2,
    pub alignment: Vec2,
    pub separation: Vec2,
    /// Candidates that passed at least one rule's distance test.
    pub neighbors: usize,
}

impl Steering {
    #[inline]
    pub fn total(&self) -> Vec2 {
        self.cohesion + self.alignment + self.separation
    }
}

/// Largest distance at which any rule can fire for a focal boid of
/// `species`. Neighbor queries must cover at least this radius.
pub fn query_radius(species: Species, params: &FlockParams) -> f32 {
    let base = params.visual_range.max(params.min_distance);
    if species.is_predator() {
        base.max(params.visual_range * params.predator_to_prey_visual_range_multiplier)
    } else {
        base
    }
}

/// Steering for the boid at `focal_index`.
///
/// `neighbors` yields `(store index, boid)` pairs; an entry with
/// `focal_index` is skipped.
pub fn steer<'a, I>(focal_index: usize, focal: &Boid, neighbors: I, params: &FlockParams) -> Steering
where
    I: IntoIterator<Item = (usize, &'a Boid)>,
{
    let visual_range_sq = params.visual_range * params.visual_range;
    let hunting_range = params.visual_range * params.predator_to_prey_visual_range_multiplier;
    let hunting_range_sq = hunting_range * hunting_range;
    let min_distance_sq = params.min_distance * params.min_distance;

    let predator = focal.is_predator();

    let mut center = Vec2::ZERO;
    let mut center_weight = 0.0;
    let mut average_velocity = Vec2::ZERO;
    let mut alignment_count = 0usize;
    let mut move_away = Vec2::ZERO;
    let mut neighbors_seen = 0usize;

    for (index, other) in neighbors {
        if index == focal_index {
            continue;
        }

        let d_squared = focal.position.distance_squared(other.position);

        let same_flock = focal.species.same_flock(other.species);
        let other_predator = other.is_predator();
        let hunting = predator && !other_predator;

        let mut qualified = false;

        // Cohesion
        let range_sq = if hunting { hunting_range_sq } else { visual_range_sq };
        if d_squared < range_sq && same_flock != predator {
            let weight = if hunting { params.prey_attraction_factor } else { 1.0 };
            center += other.position * weight;
            center_weight += weight;
            qualified = true;
        }

        // Alignment
        if d_squared < visual_range_sq && same_flock && !predator {
            average_velocity += other.velocity;
            alignment_count += 1;
            qualified = true;
        }

        // Separation
        if d_squared < min_distance_sq {
            let factor = if other_predator && !predator {
                params.predator_avoidance_factor
            } else {
                1.0
            };
            move_away += (focal.position - other.position) * factor;
            qualified = true;
        }

        if qualified {
            neighbors_seen += 1;
        }
    }

    let mut steering = Steering {
        neighbors: neighbors_seen,
        ..Steering::default()
    };

    if center_weight > 0.0 {
        let centroid = center / center_weight;
        steering.cohesion = (centroid - focal.position) * params.coherence_factor;
    }

    if alignment_count > 0 {
        let average = average_velocity / alignment_count as f32;
        steering.alignment = (average - focal.velocity) * params.alignment_factor;
    }

    steering.separation = move_away * params.separation_factor;

    steering
}
