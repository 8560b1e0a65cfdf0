pub mod config;
pub mod mapgen;
pub mod random;
pub mod types;

pub use config::{ConfigLoadError, FloorExclusion, FloorOverride, MapConfig, SlotEntry, SlotTable};
pub use mapgen::{GeneratedMap, MapGenerator, NodeInfo, Road, generate_map, resolve_archetype};
pub use random::{RandomSource, seeded_rng};
pub use types::*;
