/*
 * Simulation Parameters Module
 *
 * This module defines the FlockParams struct that contains every tunable
 * number the steering rules, the containment policy and the stepper read.
 * Parameters are fixed during a tick. `visual_range` may be changed between
 * ticks; everything else is replaced wholesale between runs. Values can be
 * loaded from a TOML file, where missing keys keep their defaults.
 */

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FlockError, Result};
use crate::spatial_index::NeighborIndexKind;

/// How agents observe each other within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// Every agent reads the pre-tick state; deltas land after all agents
    /// are evaluated. Result does not depend on store order.
    #[default]
    Snapshot,
    /// Agents are updated in store order and later agents see earlier
    /// agents' new velocity and position.
    Sequential,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockParams {
    pub visual_range: f32,
    pub coherence_factor: f32,
    pub alignment_factor: f32,
    pub min_distance: f32,
    pub separation_factor: f32,

    // Predator / prey interaction
    pub predator_avoidance_factor: f32,
    pub prey_attraction_factor: f32,
    pub predator_to_prey_visual_range_multiplier: f32,

    pub predator_speed_limit: f32,
    pub prey_speed_limit: f32,

    // Containment
    pub container_margin: f32,
    pub turning_force: f32,

    pub update_order: UpdateOrder,
    pub neighbor_index: NeighborIndexKind,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            visual_range: 75.0,
            coherence_factor: 0.01,
            alignment_factor: 0.05,
            min_distance: 20.0,
            separation_factor: 0.1,

            predator_avoidance_factor: 10.0,
            prey_attraction_factor: 3.0,
            predator_to_prey_visual_range_multiplier: 4.0,

            predator_speed_limit: 8.0,
            prey_speed_limit: 5.0,

            container_margin: 100.0,
            turning_force: 0.4,

            update_order: UpdateOrder::Snapshot,
            neighbor_index: NeighborIndexKind::default(),
        }
    }
}

impl FlockParams {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let params: FlockParams = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let params = Self::from_toml_str(&text)?;
        log::info!("loaded flock parameters from {}", path.as_ref().display());
        Ok(params)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject negative or non-finite values and non-positive speed limits.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("visual_range", self.visual_range),
            ("coherence_factor", self.coherence_factor),
            ("alignment_factor", self.alignment_factor),
            ("min_distance", self.min_distance),
            ("separation_factor", self.separation_factor),
            ("predator_avoidance_factor", self.predator_avoidance_factor),
            ("prey_attraction_factor", self.prey_attraction_factor),
            (
                "predator_to_prey_visual_range_multiplier",
                self.predator_to_prey_visual_range_multiplier,
            ),
            ("container_margin", self.container_margin),
            ("turning_force", self.turning_force),
        ];
        for (name, value) in non_negative {
            check_non_negative(name, value)?;
        }

        for (name, value) in [
            ("predator_speed_limit", self.predator_speed_limit),
            ("prey_speed_limit", self.prey_speed_limit),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(FlockError::InvalidParameter {
                    name,
                    value: value as f64,
                });
            }
        }

        self.neighbor_index.validate()
    }

    /// Change the live visual range, leaving the rest untouched.
    pub fn set_visual_range(&mut self, visual_range: f32) -> Result<()> {
        check_non_negative("visual_range", visual_range)?;
        self.visual_range = visual_range;
        Ok(())
    }

    /// Highest speed any agent can reach.
    #[inline]
    pub fn max_speed_limit(&self) -> f32 {
        self.predator_speed_limit.max(self.prey_speed_limit)
    }

    // Parameter ranges for UI sliders
    pub fn visual_range_range() -> RangeInclusive<f32> {
        0.0..=300.0
    }

    pub fn total_boids_range() -> RangeInclusive<usize> {
        2..=5000
    }

    pub fn predators_range() -> RangeInclusive<usize> {
        0..=50
    }

    pub fn prey_flocks_range() -> RangeInclusive<usize> {
        1..=8
    }
}

fn check_non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FlockError::InvalidParameter {
            name,
            value: value as f64,
        })
    }
}
