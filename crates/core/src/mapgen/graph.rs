//! Folds road coordinate sequences into one deduplicated node graph.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Archetype, Coordinate, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub struct NodeInfo {
    pub coordinate: Coordinate,
    /// World-space placement, fixed when the node is first seen.
    pub position: Vec2,
    pub roads_in: BTreeSet<Coordinate>,
    pub roads_out: BTreeSet<Coordinate>,
    pub archetype: Option<Archetype>,
}

impl NodeInfo {
    fn new(coordinate: Coordinate, position: Vec2) -> Self {
        Self {
            coordinate,
            position,
            roads_in: BTreeSet::new(),
            roads_out: BTreeSet::new(),
            archetype: None,
        }
    }
}

/// Single owner of every node in a run, addressed by coordinate value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeGraph {
    nodes: BTreeMap<Coordinate, NodeInfo>,
}

impl NodeGraph {
    /// Adds the road's nodes and edges. `place` runs once per coordinate the
    /// graph has not seen yet; revisited nodes keep their position.
    pub fn add_road(&mut self, points: &[Coordinate], mut place: impl FnMut(Coordinate) -> Vec2) {
        for &point in points {
            self.nodes.entry(point).or_insert_with(|| NodeInfo::new(point, place(point)));
        }

        for pair in points.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if let Some(node) = self.nodes.get_mut(&prev) {
                node.roads_out.insert(next);
            }
            if let Some(node) = self.nodes.get_mut(&next) {
                node.roads_in.insert(prev);
            }
        }
    }

    pub fn get(&self, coordinate: &Coordinate) -> Option<&NodeInfo> {
        self.nodes.get(coordinate)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut NodeInfo> {
        self.nodes.values_mut()
    }

    pub fn into_nodes(self) -> BTreeMap<Coordinate, NodeInfo> {
        self.nodes
    }

    /// `b` in `a.roads_out` exactly when `a` in `b.roads_in`, with no dangling references.
    pub fn adjacency_is_symmetric(&self) -> bool {
        adjacency_is_symmetric(&self.nodes)
    }
}

pub(super) fn adjacency_is_symmetric(nodes: &BTreeMap<Coordinate, NodeInfo>) -> bool {
    nodes.values().all(|node| {
        let outbound_mirrored = node.roads_out.iter().all(|next| {
            nodes.get(next).is_some_and(|target| target.roads_in.contains(&node.coordinate))
        });
        let inbound_mirrored = node.roads_in.iter().all(|prev| {
            nodes.get(prev).is_some_and(|source| source.roads_out.contains(&node.coordinate))
        });
        outbound_mirrored && inbound_mirrored
    })
}
