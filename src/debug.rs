/*
 * Debug Information Module
 *
 * Per-tick counters produced by the stepper, and the DebugInfo the host
 * shows in its debug panel.
 *
 * Includes metrics for:
 * - FPS (frames per second) and frame time
 * - neighbor candidates returned by the index versus neighbors that
 *   actually passed a rule's distance test (index efficiency)
 */

use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    /// Ticks completed so far, including this one.
    pub tick: u64,
    /// Candidates handed to the rule engine, summed over all boids.
    pub candidates: usize,
    /// Candidates that passed at least one rule's distance test.
    pub neighbors: usize,
    /// Entry copies stored in the index this tick.
    pub index_entries: usize,
    pub index_name: &'static str,
}

impl TickStats {
    /// Share of candidates that were real neighbors, 1.0 when there were none.
    pub fn hit_ratio(&self) -> f32 {
        if self.candidates == 0 {
            1.0
        } else {
            self.neighbors as f32 / self.candidates as f32
        }
    }
}

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub last_tick: TickStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_handles_empty_ticks() {
        assert_eq!(TickStats::default().hit_ratio(), 1.0);

        let stats = TickStats {
            candidates: 8,
            neighbors: 2,
            ..TickStats::default()
        };
        assert_eq!(stats.hit_ratio(), 0.25);
    }
}
