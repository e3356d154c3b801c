/*
 * Spatial Index Module
 *
 * A pluggable neighbor index that can be swapped without touching the
 * steering code. Entries are (bounds, handle) pairs; handles are plain
 * copyable ids (store indices in the simulation), never owning references.
 *
 * Contract shared by every implementation:
 * - `retrieve` returns every handle whose stored bounds overlap the query,
 *   each at most once, with no false negatives;
 * - extra handles (false positives) are allowed and must be filtered by
 *   the caller's own distance test.
 */

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::{FlockError, Result};
use crate::quadtree::QuadTree;
use crate::spatial_grid::{self, SpatialGrid};

/// Deepest quad-tree a configuration may ask for. Coincident entries are
/// pushed down to this depth recursively.
pub const MAX_QUADTREE_LEVELS: usize = 32;

/// Most cells a grid index may allocate.
pub const MAX_GRID_CELLS: usize = 1 << 22;

pub trait SpatialIndex<T> {
    /// Drop every entry, keeping the configured layout.
    fn clear(&mut self);

    fn insert(&mut self, bounds: Bounds, item: T);

    /// Handles whose bounds could overlap `query`, deduplicated.
    fn retrieve(&self, query: &Bounds) -> Vec<T>;

    /// Number of stored entry copies. Entries spanning several regions
    /// count once per region.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable name for logging and the debug panel.
    fn name(&self) -> &'static str;
}

/// Keep the first occurrence of each handle, preserving order.
pub(crate) fn dedup_in_place<T: Copy + Eq + Hash>(items: &mut Vec<T>) {
    let mut seen = HashSet::with_capacity(items.len());
    items.retain(|item| seen.insert(*item));
}

/// Which index the stepper rebuilds each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NeighborIndexKind {
    /// Scan every entry; fine for small populations.
    Linear,
    QuadTree { max_objects: usize, max_levels: usize },
    Grid { cell_size: f32 },
}

impl Default for NeighborIndexKind {
    fn default() -> Self {
        NeighborIndexKind::QuadTree {
            max_objects: 10,
            max_levels: 8,
        }
    }
}

impl NeighborIndexKind {
    /// Check the layout on its own, without an area.
    pub fn validate(&self) -> Result<()> {
        match *self {
            NeighborIndexKind::Linear => Ok(()),
            NeighborIndexKind::QuadTree {
                max_objects,
                max_levels,
            } => {
                if max_objects == 0 {
                    return Err(FlockError::InvalidParameter {
                        name: "neighbor_index.max_objects",
                        value: 0.0,
                    });
                }
                if max_levels > MAX_QUADTREE_LEVELS {
                    return Err(FlockError::InvalidParameter {
                        name: "neighbor_index.max_levels",
                        value: max_levels as f64,
                    });
                }
                Ok(())
            }
            NeighborIndexKind::Grid { cell_size } => {
                if cell_size.is_finite() && cell_size > 0.0 {
                    Ok(())
                } else {
                    Err(FlockError::InvalidParameter {
                        name: "neighbor_index.cell_size",
                        value: cell_size as f64,
                    })
                }
            }
        }
    }

    /// Check the layout against the area it will cover.
    pub fn validate_for(&self, area: &Bounds) -> Result<()> {
        self.validate()?;

        if let NeighborIndexKind::Grid { cell_size } = *self {
            match spatial_grid::cell_count(area, cell_size) {
                Some(cells) if cells <= MAX_GRID_CELLS => {}
                _ => {
                    return Err(FlockError::InvalidParameter {
                        name: "neighbor_index.cell_size",
                        value: cell_size as f64,
                    })
                }
            }
        }

        Ok(())
    }

    /// Build an empty index covering `area`.
    pub fn build(&self, area: Bounds) -> Result<Box<dyn SpatialIndex<usize>>> {
        self.validate_for(&area)?;

        let index: Box<dyn SpatialIndex<usize>> = match *self {
            NeighborIndexKind::Linear => Box::new(LinearIndex::new()),
            NeighborIndexKind::QuadTree {
                max_objects,
                max_levels,
            } => Box::new(QuadTree::new(area, max_objects, max_levels)),
            NeighborIndexKind::Grid { cell_size } => Box::new(SpatialGrid::new(area, cell_size)),
        };
        Ok(index)
    }
}

/// Flat list of entries, scanned in full on every query.
#[derive(Debug, Clone, Default)]
pub struct LinearIndex<T> {
    entries: Vec<(Bounds, T)>,
}

impl<T> LinearIndex<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> SpatialIndex<T> for LinearIndex<T> {
    fn clear(&mut self) {
        self.entries.clear();
    }

    fn insert(&mut self, bounds: Bounds, item: T) {
        self.entries.push((bounds, item));
    }

    fn retrieve(&self, query: &Bounds) -> Vec<T> {
        let mut found: Vec<T> = self
            .entries
            .iter()
            .filter(|(bounds, _)| bounds.overlaps(query))
            .map(|&(_, item)| item)
            .collect();
        dedup_in_place(&mut found);
        found
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::vec2;

    #[test]
    fn linear_index_filters_by_overlap() {
        let mut index = LinearIndex::new();
        index.insert(Bounds::from_point(vec2(1.0, 1.0)), 0usize);
        index.insert(Bounds::from_point(vec2(50.0, 50.0)), 1usize);
        index.insert(Bounds::from_xy(0.0, 0.0, 2.0, 2.0), 0usize);

        assert_eq!(index.len(), 3);
        assert_eq!(index.retrieve(&Bounds::from_xy(0.0, 0.0, 5.0, 5.0)), vec![0]);

        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn builds_requested_kind() {
        let area = Bounds::from_xy(0.0, 0.0, 100.0, 100.0);
        let name = |kind: NeighborIndexKind| kind.build(area).unwrap().name();
        assert_eq!(name(NeighborIndexKind::Linear), "linear");
        assert_eq!(name(NeighborIndexKind::default()), "quadtree");
        assert_eq!(name(NeighborIndexKind::Grid { cell_size: 10.0 }), "grid");
    }

    #[test]
    fn rejects_unusable_layouts() {
        assert!(NeighborIndexKind::Grid { cell_size: 0.0 }.validate().is_err());
        assert!(NeighborIndexKind::QuadTree {
            max_objects: 0,
            max_levels: 4
        }
        .validate()
        .is_err());
        assert!(NeighborIndexKind::QuadTree {
            max_objects: 1,
            max_levels: 0
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn quadtree_depth_is_capped() {
        let at_cap = NeighborIndexKind::QuadTree {
            max_objects: 1,
            max_levels: MAX_QUADTREE_LEVELS,
        };
        assert!(at_cap.validate().is_ok());

        let too_deep = NeighborIndexKind::QuadTree {
            max_objects: 1,
            max_levels: 200_000,
        };
        assert!(matches!(
            too_deep.validate(),
            Err(FlockError::InvalidParameter {
                name: "neighbor_index.max_levels",
                ..
            })
        ));
    }

    #[test]
    fn grid_cell_count_is_checked_against_the_area() {
        let area = Bounds::from_xy(0.0, 0.0, 1000.0, 1000.0);
        let fine = NeighborIndexKind::Grid { cell_size: 1e-4 };

        // Fine on its own, too many cells for this area
        assert!(fine.validate().is_ok());
        assert!(matches!(
            fine.validate_for(&area),
            Err(FlockError::InvalidParameter {
                name: "neighbor_index.cell_size",
                ..
            })
        ));
        assert!(fine.build(area).is_err());

        // 1000 x 1000 cells still fits
        assert!(NeighborIndexKind::Grid { cell_size: 1.0 }.build(area).is_ok());
    }
}
