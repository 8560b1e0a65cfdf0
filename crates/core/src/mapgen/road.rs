//! Floor-by-floor road walking with the duplicate-edge and no-crossing rules.

use std::collections::BTreeSet;

use log::trace;

use crate::random::RandomSource;
use crate::types::{Coordinate, RoadSegment};

/// Random lane picks tried per step before the road is forced straight ahead.
pub const MAX_LANE_ATTEMPTS: u32 = 7;

/// Every directed edge laid so far in one generation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SegmentSet {
    segments: BTreeSet<RoadSegment>,
}

impl SegmentSet {
    pub fn contains(&self, segment: &RoadSegment) -> bool {
        self.segments.contains(segment)
    }

    pub fn insert(&mut self, segment: RoadSegment) -> bool {
        self.segments.insert(segment)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First pair of segments that swap lanes between the same two floors, if any.
    ///
    /// Only a `x+1 -> x` edge next to an `x -> x+1` edge can cross, so each
    /// leftward edge is checked against its single mirror.
    pub fn find_crossing(&self) -> Option<(RoadSegment, RoadSegment)> {
        self.segments.iter().filter(|segment| segment.lane_delta() == -1).find_map(|leftward| {
            let start = leftward.start();
            let mirror = RoadSegment::new(
                Coordinate::new(start.lane - 1, start.floor),
                Coordinate::new(start.lane, start.floor + 1),
            );
            self.contains(&mirror).then_some((*leftward, mirror))
        })
    }
}

impl FromIterator<RoadSegment> for SegmentSet {
    fn from_iter<I: IntoIterator<Item = RoadSegment>>(iter: I) -> Self {
        Self { segments: iter.into_iter().collect() }
    }
}

/// Walks one road from floor 0 up to `map_length - 1`, recording its edges in `segments`.
pub fn generate_road(
    map_length: i32,
    width: i32,
    segments: &mut SegmentSet,
    rng: &mut impl RandomSource,
) -> Vec<Coordinate> {
    debug_assert!(map_length >= 1 && width >= 1);
    let mut points = Vec::with_capacity(map_length.max(1) as usize);
    let mut current = Coordinate::new(rng.range_i32(0, width), 0);
    points.push(current);

    for _ in 1..map_length {
        let next = next_road_point(current, width, segments, rng);
        segments.insert(RoadSegment::new(current, next));
        points.push(next);
        current = next;
    }

    points
}

fn next_road_point(
    current: Coordinate,
    width: i32,
    segments: &SegmentSet,
    rng: &mut impl RandomSource,
) -> Coordinate {
    for _ in 0..MAX_LANE_ATTEMPTS {
        let lane = (current.lane + rng.range_i32(-1, 2)).clamp(0, width - 1);
        let candidate = Coordinate::new(lane, current.floor + 1);
        if is_open_step(current, candidate, segments) {
            return candidate;
        }
    }

    trace!("lane retries exhausted at {current:?}, continuing straight");
    Coordinate::new(current.lane, current.floor + 1)
}

fn is_open_step(current: Coordinate, candidate: Coordinate, segments: &SegmentSet) -> bool {
    if segments.contains(&RoadSegment::new(current, candidate)) {
        return false;
    }

    let straight_ahead = Coordinate::new(current.lane, current.floor + 1);
    let neighbour_lane = match candidate.lane - current.lane {
        -1 => current.lane - 1,
        1 => current.lane + 1,
        _ => return true,
    };
    let crossing = RoadSegment::new(Coordinate::new(neighbour_lane, current.floor), straight_ahead);
    !segments.contains(&crossing)
}
