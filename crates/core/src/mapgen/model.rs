//! Public data models for generated run maps.

use std::collections::BTreeMap;

use xxhash_rust::xxh3::xxh3_64;

use super::graph::{NodeInfo, adjacency_is_symmetric};
use super::road::SegmentSet;
use crate::types::{Coordinate, RoadSegment};

/// Hue advance between consecutive road indices.
const ROAD_HUE_STEP: f32 = 0.137_508;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Road {
    pub index: usize,
    pub points: Vec<Coordinate>,
}

impl Road {
    pub fn segments(&self) -> impl Iterator<Item = RoadSegment> + '_ {
        self.points.windows(2).map(|pair| RoadSegment::new(pair[0], pair[1]))
    }

    /// Presentation hint in `[0, 1)` for renderers that color roads by index.
    pub fn hue(&self) -> f32 {
        (self.index as f32 * ROAD_HUE_STEP) % 1.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedMap {
    pub map_length: i32,
    pub width: i32,
    pub nodes: BTreeMap<Coordinate, NodeInfo>,
    pub roads: Vec<Road>,
}

impl GeneratedMap {
    pub fn node(&self, coordinate: Coordinate) -> Option<&NodeInfo> {
        self.nodes.get(&coordinate)
    }

    pub fn nodes_on_floor(&self, floor: i32) -> impl Iterator<Item = &NodeInfo> {
        let first = Coordinate { floor, lane: i32::MIN };
        let last = Coordinate { floor, lane: i32::MAX };
        self.nodes.range(first..=last).map(|(_, node)| node)
    }

    pub fn start_nodes(&self) -> impl Iterator<Item = &NodeInfo> {
        self.nodes_on_floor(0)
    }

    pub fn end_nodes(&self) -> impl Iterator<Item = &NodeInfo> {
        self.nodes_on_floor(self.map_length - 1)
    }

    /// Every distinct directed edge laid by the roads.
    pub fn segments(&self) -> SegmentSet {
        self.roads.iter().flat_map(Road::segments).collect()
    }

    pub fn adjacency_is_symmetric(&self) -> bool {
        adjacency_is_symmetric(&self.nodes)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.map_length.to_le_bytes());
        bytes.extend(self.width.to_le_bytes());

        bytes.extend((self.nodes.len() as u32).to_le_bytes());
        for node in self.nodes.values() {
            extend_coordinate(&mut bytes, node.coordinate);
            bytes.extend(node.position.x.to_bits().to_le_bytes());
            bytes.extend(node.position.y.to_bits().to_le_bytes());

            bytes.extend((node.roads_in.len() as u32).to_le_bytes());
            for &prev in &node.roads_in {
                extend_coordinate(&mut bytes, prev);
            }
            bytes.extend((node.roads_out.len() as u32).to_le_bytes());
            for &next in &node.roads_out {
                extend_coordinate(&mut bytes, next);
            }

            match &node.archetype {
                Some(archetype) => {
                    bytes.push(1);
                    bytes.extend((archetype.as_str().len() as u32).to_le_bytes());
                    bytes.extend(archetype.as_str().as_bytes());
                }
                None => bytes.push(0),
            }
        }

        bytes.extend((self.roads.len() as u32).to_le_bytes());
        for road in &self.roads {
            bytes.extend((road.index as u32).to_le_bytes());
            bytes.extend((road.points.len() as u32).to_le_bytes());
            for &point in &road.points {
                extend_coordinate(&mut bytes, point);
            }
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn extend_coordinate(bytes: &mut Vec<u8>, coordinate: Coordinate) {
    bytes.extend(coordinate.floor.to_le_bytes());
    bytes.extend(coordinate.lane.to_le_bytes());
}
