//! Jittered world-space placement for graph coordinates.

use crate::config::MapConfig;
use crate::random::RandomSource;
use crate::types::{Coordinate, Vec2};

/// Grid-space position of `coordinate`, nudged by up to `|strength|` on each axis.
pub fn jitter(coordinate: Coordinate, strength: f32, rng: &mut impl RandomSource) -> Vec2 {
    let strength = strength.abs();
    let x = coordinate.lane as f32 + rng.range_f32(-strength, strength);
    let y = coordinate.floor as f32 + rng.range_f32(-strength, strength);
    Vec2::new(x, y)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeLayout {
    pub shuffle_strength: f32,
    pub distance_between_nodes: f32,
    pub origin: Vec2,
}

impl NodeLayout {
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            shuffle_strength: config.shuffle_strength,
            distance_between_nodes: config.distance_between_nodes,
            origin: config.origin,
        }
    }

    pub fn place(&self, coordinate: Coordinate, rng: &mut impl RandomSource) -> Vec2 {
        jitter(coordinate, self.shuffle_strength, rng) * self.distance_between_nodes + self.origin
    }
}
