/*
 * Quad-tree Module
 *
 * Region-subdividing neighbor index. A node stores entries until it holds
 * more than `max_objects` of them, then (if it is above `max_levels`)
 * splits into four equal quadrants and pushes every entry down into each
 * quadrant its bounds overlap. An entry straddling a split line is stored
 * in several children; `retrieve` removes the duplicates.
 *
 * Quadrant tests are independent per side: the low side matches `< mid`,
 * the high side matches `>= mid`. A point lying exactly on a split line
 * therefore always lands in the high-side child, and a query touching the
 * line descends into both. Nodes at the depth limit never split and are
 * scanned linearly.
 */

use std::hash::Hash;

use nannou::prelude::Vec2;

use crate::bounds::Bounds;
use crate::spatial_index::{dedup_in_place, SpatialIndex};

#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    bounds: Bounds,
    max_objects: usize,
    max_levels: usize,
    level: usize,
    objects: Vec<(Bounds, T)>,
    nodes: Option<Box<[QuadTree<T>; 4]>>,
}

impl<T: Copy + Eq + Hash> QuadTree<T> {
    pub fn new(bounds: Bounds, max_objects: usize, max_levels: usize) -> Self {
        Self::with_level(bounds, max_objects, max_levels, 0)
    }

    fn with_level(bounds: Bounds, max_objects: usize, max_levels: usize, level: usize) -> Self {
        Self {
            bounds,
            max_objects,
            max_levels,
            level,
            objects: Vec::new(),
            nodes: None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_split(&self) -> bool {
        self.nodes.is_some()
    }

    /// Deepest level currently present below (and including) this node.
    pub fn depth(&self) -> usize {
        match &self.nodes {
            Some(nodes) => nodes.iter().map(QuadTree::depth).max().unwrap_or(self.level),
            None => self.level,
        }
    }

    fn split(&mut self) {
        let next_level = self.level + 1;
        let [a, b, c, d] = self.bounds.quadrants();
        let (max_objects, max_levels) = (self.max_objects, self.max_levels);
        let child = |bounds| QuadTree::with_level(bounds, max_objects, max_levels, next_level);

        self.nodes = Some(Box::new([child(a), child(b), child(c), child(d)]));
    }

    /// Which child quadrants `object` could overlap.
    fn quadrant_mask(&self, object: &Bounds) -> [bool; 4] {
        quadrant_mask_at(self.bounds.center(), object)
    }

    pub fn insert(&mut self, bounds: Bounds, item: T) {
        let mask = self.quadrant_mask(&bounds);

        if let Some(nodes) = self.nodes.as_mut() {
            for (node, _) in nodes.iter_mut().zip(mask).filter(|(_, hit)| *hit) {
                node.insert(bounds, item);
            }
            return;
        }

        self.objects.push((bounds, item));

        if self.objects.len() > self.max_objects && self.level < self.max_levels {
            self.split();

            let mid = self.bounds.center();
            let objects = std::mem::take(&mut self.objects);
            if let Some(nodes) = self.nodes.as_mut() {
                for (object_bounds, object) in objects {
                    let mask = quadrant_mask_at(mid, &object_bounds);
                    for (node, _) in nodes.iter_mut().zip(mask).filter(|(_, hit)| *hit) {
                        node.insert(object_bounds, object);
                    }
                }
            }
        }
    }

    pub fn retrieve(&self, query: &Bounds) -> Vec<T> {
        let mut found = Vec::new();
        self.collect(query, &mut found);
        dedup_in_place(&mut found);
        found
    }

    fn collect(&self, query: &Bounds, out: &mut Vec<T>) {
        out.extend(self.objects.iter().map(|&(_, item)| item));

        if let Some(nodes) = &self.nodes {
            let mask = self.quadrant_mask(query);
            for (node, _) in nodes.iter().zip(mask).filter(|(_, hit)| *hit) {
                node.collect(query, out);
            }
        }
    }

    /// Remove all entries and children.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.nodes = None;
    }

    pub fn len(&self) -> usize {
        let below = self
            .nodes
            .as_ref()
            .map_or(0, |nodes| nodes.iter().map(QuadTree::len).sum());
        self.objects.len() + below
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn quadrant_mask_at(mid: Vec2, object: &Bounds) -> [bool; 4] {
    let starts_low_y = object.min.y < mid.y;
    let starts_low_x = object.min.x < mid.x;
    let ends_high_y = object.max.y >= mid.y;
    let ends_high_x = object.max.x >= mid.x;

    [
        starts_low_y && starts_low_x,
        starts_low_y && ends_high_x,
        starts_low_x && ends_high_y,
        ends_high_x && ends_high_y,
    ]
}

impl<T: Copy + Eq + Hash> SpatialIndex<T> for QuadTree<T> {
    fn clear(&mut self) {
        QuadTree::clear(self);
    }

    fn insert(&mut self, bounds: Bounds, item: T) {
        QuadTree::insert(self, bounds, item);
    }

    fn retrieve(&self, query: &Bounds) -> Vec<T> {
        QuadTree::retrieve(self, query)
    }

    fn len(&self) -> usize {
        QuadTree::len(self)
    }

    fn name(&self) -> &'static str {
        "quadtree"
    }
}
