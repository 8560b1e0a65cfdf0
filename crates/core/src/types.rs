use std::error::Error;
use std::fmt;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// Grid address of a map node. Field order keeps `Ord` floor-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub floor: i32,
    pub lane: i32,
}

impl Coordinate {
    pub const fn new(lane: i32, floor: i32) -> Self {
        Self { floor, lane }
    }
}

/// Directed edge between two coordinates on consecutive floors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoadSegment {
    start: Coordinate,
    end: Coordinate,
}

impl RoadSegment {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        debug_assert_eq!(end.floor, start.floor + 1, "segments always climb one floor");
        Self { start, end }
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn end(&self) -> Coordinate {
        self.end
    }

    pub fn lane_delta(&self) -> i32 {
        self.end.lane - self.start.lane
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Gameplay tag assigned to a node, e.g. `combat` or `rest`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Archetype(pub String);

impl Archetype {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The configuration rule a rejected `MapConfig` or slot table broke.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigIssue {
    WidthBelowOne { width: i32 },
    PathAmountBelowOne { path_amount: i32 },
    MapLengthBelowOne { min_map_length: i32 },
    MapLengthBoundsInverted { min_map_length: i32, max_map_length: i32 },
    /// The inclusive length draw needs `max_map_length + 1` to fit in an `i32`.
    MapLengthTooLarge { max_map_length: i32 },
    NegativeValue { field: &'static str, value: f32 },
    NegativeSpawnOdds { index: usize, spawn_odds: f32 },
    NonFiniteValue { field: &'static str },
    /// Eligible entries exist for the floor but their odds sum to zero.
    NoPositiveOdds { floor: i32 },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WidthBelowOne { width } => write!(f, "width must be at least 1, got {width}"),
            Self::PathAmountBelowOne { path_amount } => {
                write!(f, "path_amount must be at least 1, got {path_amount}")
            }
            Self::MapLengthBelowOne { min_map_length } => {
                write!(f, "min_map_length must be at least 1, got {min_map_length}")
            }
            Self::MapLengthBoundsInverted { min_map_length, max_map_length } => write!(
                f,
                "min_map_length ({min_map_length}) exceeds max_map_length ({max_map_length})"
            ),
            Self::MapLengthTooLarge { max_map_length } => {
                write!(f, "max_map_length must be below {}, got {max_map_length}", i32::MAX)
            }
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::NegativeSpawnOdds { index, spawn_odds } => {
                write!(f, "slot entry {index} has negative spawn_odds {spawn_odds}")
            }
            Self::NonFiniteValue { field } => write!(f, "{field} must be a finite number"),
            Self::NoPositiveOdds { floor } => {
                write!(f, "eligible slot entries on floor {floor} have zero total spawn_odds")
            }
        }
    }
}

/// Failures that abort a whole generation run or a standalone archetype lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationError {
    InvalidConfiguration(ConfigIssue),
    NoEligibleArchetype { floor: i32 },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(issue) => write!(f, "invalid map configuration: {issue}"),
            Self::NoEligibleArchetype { floor } => {
                write!(f, "no eligible archetype for floor {floor}")
            }
        }
    }
}

impl Error for GenerationError {}

impl From<ConfigIssue> for GenerationError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}
