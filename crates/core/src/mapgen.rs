//! Procedural run-map generation split into coherent submodules.

pub mod model;

mod generator;
mod graph;
mod layout;
mod road;
mod slots;

use crate::config::{MapConfig, SlotTable};
use crate::random::{RandomSource, seeded_rng};
use crate::types::{Archetype, GenerationError};

pub use generator::MapGenerator;
pub use graph::{NodeGraph, NodeInfo};
pub use layout::{NodeLayout, jitter};
pub use model::{GeneratedMap, Road};
pub use road::{MAX_LANE_ATTEMPTS, SegmentSet, generate_road};

pub fn generate_map(config: &MapConfig, seed: u64) -> Result<GeneratedMap, GenerationError> {
    MapGenerator::new(config.clone())?.generate(&mut seeded_rng(seed))
}

/// Standalone archetype lookup, independent of any generated graph.
pub fn resolve_archetype(
    slots: &SlotTable,
    floor: i32,
    rng: &mut impl RandomSource,
) -> Result<Archetype, GenerationError> {
    slots.resolve(floor, rng)
}
