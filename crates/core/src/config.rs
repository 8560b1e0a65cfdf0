//! Generation settings and slot-table configuration, loadable from TOML.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Archetype, ConfigIssue, Vec2};

/// One weighted candidate in the slot pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub archetype: Archetype,
    pub spawn_odds: f32,
    /// First floor on which the entry may be rolled.
    #[serde(default)]
    pub unlock_floor: i32,
}

impl SlotEntry {
    pub fn new(archetype: &str, spawn_odds: f32, unlock_floor: i32) -> Self {
        Self { archetype: Archetype::new(archetype), spawn_odds, unlock_floor }
    }
}

/// Pins a floor to a single archetype, bypassing the weighted roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorOverride {
    pub floor: i32,
    pub archetype: Archetype,
}

/// Vetoes an archetype on one floor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorExclusion {
    pub floor: i32,
    pub archetype: Archetype,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotTable {
    pub entries: Vec<SlotEntry>,
    pub overrides: Vec<FloorOverride>,
    pub exclusions: Vec<FloorExclusion>,
}

impl SlotTable {
    /// Small pool shipped as the default: fights everywhere, softer nodes unlocking
    /// as the run climbs, and a guaranteed fight on the first floor.
    pub fn starter() -> Self {
        Self {
            entries: vec![
                SlotEntry::new("combat", 5.0, 0),
                SlotEntry::new("event", 2.0, 1),
                SlotEntry::new("market", 1.0, 2),
                SlotEntry::new("rest", 1.0, 3),
                SlotEntry::new("elite", 1.0, 4),
            ],
            overrides: vec![FloorOverride { floor: 0, archetype: Archetype::new("combat") }],
            exclusions: vec![FloorExclusion { floor: 4, archetype: Archetype::new("rest") }],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigIssue> {
        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.spawn_odds.is_finite() {
                return Err(ConfigIssue::NonFiniteValue { field: "spawn_odds" });
            }
            if entry.spawn_odds < 0.0 {
                return Err(ConfigIssue::NegativeSpawnOdds { index, spawn_odds: entry.spawn_odds });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub min_map_length: i32,
    /// Inclusive upper bound on the number of floors.
    pub max_map_length: i32,
    pub width: i32,
    pub path_amount: i32,
    pub shuffle_strength: f32,
    pub distance_between_nodes: f32,
    pub origin: Vec2,
    pub assign_archetypes: bool,
    pub slots: SlotTable,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            min_map_length: 12,
            max_map_length: 15,
            width: 5,
            path_amount: 6,
            shuffle_strength: 0.3,
            distance_between_nodes: 1.0,
            origin: Vec2::ZERO,
            assign_archetypes: true,
            slots: SlotTable::starter(),
        }
    }
}

impl MapConfig {
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if self.width < 1 {
            return Err(ConfigIssue::WidthBelowOne { width: self.width });
        }
        if self.path_amount < 1 {
            return Err(ConfigIssue::PathAmountBelowOne { path_amount: self.path_amount });
        }
        if self.min_map_length < 1 {
            return Err(ConfigIssue::MapLengthBelowOne { min_map_length: self.min_map_length });
        }
        if self.min_map_length > self.max_map_length {
            return Err(ConfigIssue::MapLengthBoundsInverted {
                min_map_length: self.min_map_length,
                max_map_length: self.max_map_length,
            });
        }
        if self.max_map_length == i32::MAX {
            return Err(ConfigIssue::MapLengthTooLarge { max_map_length: self.max_map_length });
        }
        for (field, value) in [
            ("shuffle_strength", self.shuffle_strength),
            ("distance_between_nodes", self.distance_between_nodes),
            ("origin.x", self.origin.x),
            ("origin.y", self.origin.y),
        ] {
            if !value.is_finite() {
                return Err(ConfigIssue::NonFiniteValue { field });
            }
        }
        for (field, value) in [
            ("shuffle_strength", self.shuffle_strength),
            ("distance_between_nodes", self.distance_between_nodes),
        ] {
            if value < 0.0 {
                return Err(ConfigIssue::NegativeValue { field, value });
            }
        }
        self.slots.validate()
    }

    /// Parses and validates a TOML document. Missing keys fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(content).map_err(ConfigLoadError::Parse)?;
        config.validate().map_err(ConfigLoadError::Invalid)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path).map_err(ConfigLoadError::Io)?;
        Self::from_toml_str(&content)
    }
}

/// Describes why a config file could not be turned into a usable `MapConfig`.
#[derive(Debug)]
pub enum ConfigLoadError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(ConfigIssue),
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(e) => write!(f, "config is not valid TOML: {e}"),
            Self::Invalid(issue) => write!(f, "config rejected: {issue}"),
        }
    }
}

impl Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}
