/*
 * Boid Module
 *
 * This module defines the Boid struct and its species.
 * A boid is either a predator or a member of one prey flock. Prey steer
 * with their own flock (cohesion, alignment) and flee predators; predators
 * ignore each other for cohesion and are drawn towards any prey.
 */

use nannou::prelude::Vec2;
use rand::Rng;

use crate::bounds::Bounds;
use crate::params::FlockParams;
use crate::vector::VecExt;
use crate::INITIAL_VELOCITY_RANGE;

/// Prey flock identifier. Flock ids start at 1; tag 0 is the predator tag.
pub type FlockId = u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Predator,
    Prey(FlockId),
}

impl Species {
    pub const PREDATOR_TAG: u16 = 0;

    /// Tag 0 is the predator; every other tag is a prey flock.
    pub fn from_tag(tag: u16) -> Self {
        if tag == Self::PREDATOR_TAG {
            Species::Predator
        } else {
            Species::Prey(tag)
        }
    }

    pub fn tag(self) -> u16 {
        match self {
            Species::Predator => Self::PREDATOR_TAG,
            Species::Prey(flock) => flock,
        }
    }

    #[inline]
    pub fn is_predator(self) -> bool {
        matches!(self, Species::Predator)
    }

    /// Predators share one flock; prey match on flock id.
    #[inline]
    pub fn same_flock(self, other: Species) -> bool {
        match (self, other) {
            (Species::Predator, Species::Predator) => true,
            (Species::Prey(a), Species::Prey(b)) => a == b,
            _ => false,
        }
    }

    pub fn speed_limit(self, params: &FlockParams) -> f32 {
        match self {
            Species::Predator => params.predator_speed_limit,
            Species::Prey(_) => params.prey_speed_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub species: Species,
}

impl Boid {
    pub fn new(position: Vec2, velocity: Vec2, species: Species) -> Self {
        Self {
            position,
            velocity,
            species,
        }
    }

    /// Uniform position inside `area`, uniform velocity components in
    /// `[-INITIAL_VELOCITY_RANGE, INITIAL_VELOCITY_RANGE]`.
    ///
    /// `area` must not be degenerate.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, area: &Bounds, species: Species) -> Self {
        let x = rng.gen_range(area.min.x..area.max.x);
        let y = rng.gen_range(area.min.y..area.max.y);
        let vx = rng.gen_range(-INITIAL_VELOCITY_RANGE..=INITIAL_VELOCITY_RANGE);
        let vy = rng.gen_range(-INITIAL_VELOCITY_RANGE..=INITIAL_VELOCITY_RANGE);

        Self::new(Vec2::new(x, y), Vec2::new(vx, vy), species)
    }

    // Add a steering delta to the velocity
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.velocity += force;
    }

    #[inline]
    pub fn limit_speed(&mut self, limit: f32) {
        self.velocity = self.velocity.limit_length(limit);
    }

    #[inline]
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    /// Direction of travel, used to orient the drawn shape.
    #[inline]
    pub fn heading(&self) -> f32 {
        self.velocity.heading()
    }

    /// Index entry for this boid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_point(self.position)
    }

    #[inline]
    pub fn is_predator(&self) -> bool {
        self.species.is_predator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn species_tags_round_trip_through_predator_convention() {
        assert_eq!(Species::from_tag(0), Species::Predator);
        assert_eq!(Species::from_tag(3), Species::Prey(3));
        assert_eq!(Species::Prey(2).tag(), 2);
        assert!(Species::Predator.same_flock(Species::Predator));
        assert!(!Species::Prey(1).same_flock(Species::Prey(2)));
    }

    #[test]
    fn prey_zero_is_not_a_predator_flock() {
        // Shares the predator tag, but not its flock
        assert_eq!(Species::Prey(0).tag(), Species::Predator.tag());
        assert!(!Species::Prey(0).same_flock(Species::Predator));
        assert!(!Species::Predator.same_flock(Species::Prey(0)));
        assert!(Species::Prey(0).same_flock(Species::Prey(0)));
    }

    #[test]
    fn speed_limit_depends_on_species() {
        let params = FlockParams::default();
        assert_eq!(Species::Predator.speed_limit(&params), 8.0);
        assert_eq!(Species::Prey(1).speed_limit(&params), 5.0);
    }

    #[test]
    fn random_boid_lies_in_area() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let area = Bounds::from_xy(-50.0, 10.0, 50.0, 20.0);
        for _ in 0..200 {
            let boid = Boid::random(&mut rng, &area, Species::Prey(1));
            assert!(area.contains(boid.position));
            assert!(boid.velocity.x.abs() <= INITIAL_VELOCITY_RANGE);
            assert!(boid.velocity.y.abs() <= INITIAL_VELOCITY_RANGE);
        }
    }

    #[test]
    fn limit_then_integrate() {
        let mut boid = Boid::new(vec2(0.0, 0.0), vec2(6.0, 8.0), Species::Prey(1));
        boid.limit_speed(5.0);
        assert!((boid.speed() - 5.0).abs() < 1e-5);
        boid.integrate();
        assert!((boid.position.x - 3.0).abs() < 1e-5);
        assert!((boid.position.y - 4.0).abs() < 1e-5);
    }
}
