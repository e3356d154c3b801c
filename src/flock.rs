/*
 * Flock Module
 *
 * The agent store. A Flock owns every boid of a run together with the
 * area they fly in. The population is fixed once built; changing counts
 * means building a new Flock.
 *
 * Construction conventions:
 * - the first `predators` boids are predators
 * - every other boid joins a prey flock drawn uniformly from 1..=prey_flocks
 * - positions are uniform in the area, velocity components uniform in
 *   [-INITIAL_VELOCITY_RANGE, INITIAL_VELOCITY_RANGE]
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::boid::{Boid, FlockId, Species};
use crate::bounds::Bounds;
use crate::error::{FlockError, Result};

/// Construction arguments for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockSetup {
    pub area: Bounds,
    pub total: usize,
    pub predators: usize,
    pub prey_flocks: usize,
    /// Fixed seed for a reproducible scatter; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for FlockSetup {
    fn default() -> Self {
        Self {
            area: Bounds::from_xy(0.0, 0.0, 1000.0, 1000.0),
            total: 200,
            predators: 4,
            prey_flocks: 2,
            seed: None,
        }
    }
}

impl FlockSetup {
    pub fn new(area: Bounds, total: usize, predators: usize, prey_flocks: usize) -> Self {
        Self {
            area,
            total,
            predators,
            prey_flocks,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[inline]
    pub fn prey(&self) -> usize {
        self.total.saturating_sub(self.predators)
    }

    pub fn validate(&self) -> Result<()> {
        check_area(&self.area)?;

        if self.predators > self.total {
            return Err(FlockError::TooManyPredators {
                predators: self.predators,
                total: self.total,
            });
        }

        let prey = self.prey();
        if prey > 0 && self.prey_flocks == 0 {
            return Err(FlockError::NoPreyFlocks { prey });
        }

        if self.prey_flocks > FlockId::MAX as usize {
            return Err(FlockError::InvalidParameter {
                name: "prey_flocks",
                value: self.prey_flocks as f64,
            });
        }

        Ok(())
    }
}

fn check_area(area: &Bounds) -> Result<()> {
    if area.is_degenerate() {
        return Err(FlockError::DegenerateArea {
            width: area.width(),
            height: area.height(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flock {
    area: Bounds,
    boids: Vec<Boid>,
}

impl Flock {
    /// Build from a setup, seeding with `ChaCha8Rng` when a seed is given.
    pub fn from_setup(setup: &FlockSetup) -> Result<Self> {
        match setup.seed {
            Some(seed) => Self::generate(setup, &mut ChaCha8Rng::seed_from_u64(seed)),
            None => Self::generate(setup, &mut StdRng::from_entropy()),
        }
    }

    pub fn generate<R: Rng + ?Sized>(setup: &FlockSetup, rng: &mut R) -> Result<Self> {
        setup.validate()?;

        let mut boids = Vec::with_capacity(setup.total);
        for i in 0..setup.total {
            let species = if i < setup.predators {
                Species::Predator
            } else {
                Species::Prey(rng.gen_range(1..=setup.prey_flocks as FlockId))
            };
            boids.push(Boid::random(rng, &setup.area, species));
        }

        log::info!(
            "generated {} boids ({} predators, {} prey flocks)",
            setup.total,
            setup.predators,
            setup.prey_flocks
        );

        Ok(Self {
            area: setup.area,
            boids,
        })
    }

    /// Store hand-placed boids, e.g. for scripted scenarios.
    pub fn from_boids(area: Bounds, boids: Vec<Boid>) -> Result<Self> {
        check_area(&area)?;
        Ok(Self { area, boids })
    }

    #[inline]
    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    /// Only the stepper mutates boids.
    #[inline]
    pub(crate) fn boids_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    #[inline]
    pub fn area(&self) -> Bounds {
        self.area
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn count_species(&self, species: Species) -> usize {
        self.boids.iter().filter(|b| b.species == species).count()
    }

    pub fn predators(&self) -> impl Iterator<Item = &Boid> {
        self.boids.iter().filter(|b| b.is_predator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(total: usize, predators: usize, prey_flocks: usize) -> FlockSetup {
        FlockSetup::new(Bounds::from_xy(0.0, 0.0, 800.0, 600.0), total, predators, prey_flocks)
    }

    #[test]
    fn first_boids_are_predators() {
        let flock = Flock::from_setup(&setup(50, 3, 2).with_seed(1)).unwrap();
        assert_eq!(flock.len(), 50);
        assert!(flock.boids()[..3].iter().all(Boid::is_predator));
        assert!(flock.boids()[3..].iter().all(|b| !b.is_predator()));
        assert_eq!(flock.predators().count(), 3);
    }

    #[test]
    fn prey_flocks_are_in_range() {
        let flock = Flock::from_setup(&setup(300, 0, 3).with_seed(2)).unwrap();
        for boid in flock.boids() {
            match boid.species {
                Species::Prey(id) => assert!((1..=3).contains(&id)),
                Species::Predator => panic!("no predators requested"),
            }
        }
        // 300 draws over three flocks will hit each one
        for id in 1..=3 {
            assert!(flock.count_species(Species::Prey(id)) > 0);
        }
    }

    #[test]
    fn seeded_setups_repeat() {
        let a = Flock::from_setup(&setup(40, 2, 2).with_seed(99)).unwrap();
        let b = Flock::from_setup(&setup(40, 2, 2).with_seed(99)).unwrap();
        let c = Flock::from_setup(&setup(40, 2, 2).with_seed(100)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rejects_malformed_arguments() {
        assert!(matches!(
            Flock::from_setup(&setup(5, 6, 1)),
            Err(FlockError::TooManyPredators { predators: 6, total: 5 })
        ));
        assert!(matches!(
            Flock::from_setup(&setup(5, 2, 0)),
            Err(FlockError::NoPreyFlocks { prey: 3 })
        ));

        let flat = FlockSetup::new(Bounds::from_xy(0.0, 0.0, 100.0, 0.0), 5, 0, 1);
        assert!(matches!(
            Flock::from_setup(&flat),
            Err(FlockError::DegenerateArea { .. })
        ));
    }

    #[test]
    fn all_predators_need_no_flocks() {
        let flock = Flock::from_setup(&setup(4, 4, 0).with_seed(3)).unwrap();
        assert_eq!(flock.count_species(Species::Predator), 4);
    }

    #[test]
    fn empty_flock_is_allowed() {
        let flock = Flock::from_setup(&setup(0, 0, 0)).unwrap();
        assert!(flock.is_empty());
    }
}
