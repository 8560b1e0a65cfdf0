//! High-level run-map orchestration: roads, node graph, layout, then archetypes.

use log::{debug, info};

use super::graph::NodeGraph;
use super::layout::NodeLayout;
use super::model::{GeneratedMap, Road};
use super::road::{SegmentSet, generate_road};
use crate::config::MapConfig;
use crate::random::RandomSource;
use crate::types::GenerationError;

pub struct MapGenerator {
    config: MapConfig,
}

impl MapGenerator {
    /// Rejects invalid settings up front so `generate` never sees them.
    pub fn new(config: MapConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Builds a fresh map. Any archetype failure aborts the run with no partial graph.
    pub fn generate(&self, rng: &mut impl RandomSource) -> Result<GeneratedMap, GenerationError> {
        let config = &self.config;
        let map_length = rng.range_i32(config.min_map_length, config.max_map_length + 1);
        let layout = NodeLayout::from_config(config);

        let mut segments = SegmentSet::default();
        let mut graph = NodeGraph::default();
        let mut roads = Vec::with_capacity(config.path_amount as usize);

        for index in 0..config.path_amount as usize {
            let points = generate_road(map_length, config.width, &mut segments, rng);
            graph.add_road(&points, |coordinate| layout.place(coordinate, &mut *rng));
            debug!(
                "road {index} starts at lane {} and ends at lane {}",
                points.first().map_or(-1, |point| point.lane),
                points.last().map_or(-1, |point| point.lane)
            );
            roads.push(Road { index, points });
        }

        if config.assign_archetypes {
            for node in graph.iter_mut() {
                node.archetype = Some(config.slots.resolve(node.coordinate.floor, rng)?);
            }
        }

        let map = GeneratedMap {
            map_length,
            width: config.width,
            nodes: graph.into_nodes(),
            roads,
        };
        info!(
            "generated map: {} floors, {} roads, {} nodes, {} edges, fingerprint {:016x}",
            map.map_length,
            map.roads.len(),
            map.nodes.len(),
            segments.len(),
            map.fingerprint()
        );
        Ok(map)
    }
}
