//! Floor-aware weighted archetype selection over the configured slot table.

use crate::config::{SlotEntry, SlotTable};
use crate::random::RandomSource;
use crate::types::{Archetype, ConfigIssue, GenerationError};

impl SlotTable {
    /// Archetype pinned to `floor`, if any override names it. The first match wins.
    pub fn override_for(&self, floor: i32) -> Option<&Archetype> {
        self.overrides.iter().find(|pinned| pinned.floor == floor).map(|pinned| &pinned.archetype)
    }

    pub fn is_excluded(&self, floor: i32, archetype: &Archetype) -> bool {
        self.exclusions.iter().any(|veto| veto.floor == floor && &veto.archetype == archetype)
    }

    /// Entries unlocked by `floor` and not vetoed on it, in configured order.
    pub fn eligible(&self, floor: i32) -> impl Iterator<Item = &SlotEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.unlock_floor <= floor)
            .filter(move |entry| !self.is_excluded(floor, &entry.archetype))
    }

    /// Picks the archetype for a node on `floor`.
    ///
    /// Overrides short-circuit everything else. Otherwise a roll `r` in
    /// `[0, total)` is walked through the eligible entries, subtracting each
    /// entry's odds, and the first entry that brings `r` to zero or below is
    /// chosen. Zero-odds entries are stepped over and never picked.
    pub fn resolve(
        &self,
        floor: i32,
        rng: &mut impl RandomSource,
    ) -> Result<Archetype, GenerationError> {
        if let Some(archetype) = self.override_for(floor) {
            return Ok(archetype.clone());
        }
        self.validate()?;

        let eligible: Vec<&SlotEntry> = self.eligible(floor).collect();
        if eligible.is_empty() {
            return Err(GenerationError::NoEligibleArchetype { floor });
        }

        let total: f32 = eligible.iter().map(|entry| entry.spawn_odds).sum();
        if total <= 0.0 {
            return Err(ConfigIssue::NoPositiveOdds { floor }.into());
        }

        let mut remainder = rng.unit_f32() * total;
        let weighted = eligible.iter().filter(|entry| entry.spawn_odds > 0.0);
        for entry in weighted.clone() {
            remainder -= entry.spawn_odds;
            if remainder <= 0.0 {
                return Ok(entry.archetype.clone());
            }
        }

        // Float rounding can leave a sliver of the roll past the final boundary.
        weighted
            .last()
            .map(|entry| entry.archetype.clone())
            .ok_or(GenerationError::InvalidConfiguration(ConfigIssue::NoPositiveOdds { floor }))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::{FloorExclusion, FloorOverride};
    use crate::random::scripted::ScriptedRandom;
    use crate::random::seeded_rng;

    fn table(entries: Vec<SlotEntry>) -> SlotTable {
        SlotTable { entries, ..SlotTable::default() }
    }

    fn tally(slots: &SlotTable, floor: i32, draws: usize, seed: u64) -> BTreeMap<String, usize> {
        let mut rng = seeded_rng(seed);
        let mut counts = BTreeMap::new();
        for _ in 0..draws {
            let archetype = slots.resolve(floor, &mut rng).expect("resolvable floor");
            *counts.entry(archetype.0).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn odds_are_relative_weights() {
        let slots = table(vec![SlotEntry::new("a", 1.0, 0), SlotEntry::new("b", 3.0, 0)]);

        let counts = tally(&slots, 0, 10_000, 4_242);

        let b_share = counts.get("b").copied().unwrap_or(0) as f64 / 10_000.0;
        assert!((0.72..=0.78).contains(&b_share), "b picked {b_share:.3} of the time");
    }

    #[test]
    fn override_beats_weights_and_exclusions() {
        let mut slots = table(vec![SlotEntry::new("a", 1.0, 0)]);
        slots.overrides.push(FloorOverride { floor: 3, archetype: Archetype::new("b") });
        slots.exclusions.push(FloorExclusion { floor: 3, archetype: Archetype::new("b") });

        let mut rng = seeded_rng(17);
        for _ in 0..100 {
            assert_eq!(slots.resolve(3, &mut rng), Ok(Archetype::new("b")));
        }
        assert_eq!(slots.resolve(2, &mut rng), Ok(Archetype::new("a")));
    }

    #[test]
    fn override_does_not_consume_a_roll() {
        let mut slots = table(vec![SlotEntry::new("a", 1.0, 0)]);
        slots.overrides.push(FloorOverride { floor: 0, archetype: Archetype::new("b") });

        let mut rng = ScriptedRandom::default();
        assert_eq!(slots.resolve(0, &mut rng), Ok(Archetype::new("b")));
    }

    #[test]
    fn exclusion_can_empty_a_floor() {
        let mut slots = table(vec![SlotEntry::new("a", 1.0, 0)]);
        slots.exclusions.push(FloorExclusion { floor: 2, archetype: Archetype::new("a") });

        let mut rng = seeded_rng(1);
        assert_eq!(
            slots.resolve(2, &mut rng),
            Err(GenerationError::NoEligibleArchetype { floor: 2 })
        );
        assert_eq!(slots.resolve(1, &mut rng), Ok(Archetype::new("a")));
    }

    #[test]
    fn locked_entries_never_roll_below_their_unlock_floor() {
        let slots = table(vec![SlotEntry::new("early", 1.0, 0), SlotEntry::new("late", 100.0, 5)]);

        for floor in 0..5 {
            let counts = tally(&slots, floor, 500, floor as u64);
            assert_eq!(counts.get("late"), None, "late rolled on floor {floor}");
        }
        let counts = tally(&slots, 5, 500, 77);
        assert!(counts.get("late").copied().unwrap_or(0) > 400);
    }

    #[test]
    fn empty_pool_has_no_eligible_archetype() {
        let slots = SlotTable::default();
        assert_eq!(
            slots.resolve(0, &mut seeded_rng(3)),
            Err(GenerationError::NoEligibleArchetype { floor: 0 })
        );
    }

    #[test]
    fn zero_total_odds_is_a_configuration_error() {
        let slots = table(vec![SlotEntry::new("a", 0.0, 0)]);
        assert_eq!(
            slots.resolve(4, &mut seeded_rng(3)),
            Err(GenerationError::InvalidConfiguration(ConfigIssue::NoPositiveOdds { floor: 4 }))
        );
    }

    #[test]
    fn negative_odds_are_rejected_before_rolling() {
        let slots = table(vec![SlotEntry::new("a", -1.0, 0)]);
        let mut rng = ScriptedRandom::default();
        assert!(matches!(
            slots.resolve(0, &mut rng),
            Err(GenerationError::InvalidConfiguration(ConfigIssue::NegativeSpawnOdds { .. }))
        ));
    }

    #[test]
    fn zero_odds_entry_is_never_picked_even_on_a_zero_roll() {
        let slots = table(vec![SlotEntry::new("never", 0.0, 0), SlotEntry::new("always", 2.0, 0)]);
        let mut rng = ScriptedRandom::with_units([0.0]);
        assert_eq!(slots.resolve(0, &mut rng), Ok(Archetype::new("always")));
    }

    #[test]
    fn roll_on_a_boundary_resolves_to_the_earlier_entry() {
        let slots = table(vec![SlotEntry::new("a", 1.0, 0), SlotEntry::new("b", 1.0, 0)]);
        let mut rng = ScriptedRandom::with_units([0.5, 0.75]);
        assert_eq!(slots.resolve(0, &mut rng), Ok(Archetype::new("a")));
        assert_eq!(slots.resolve(0, &mut rng), Ok(Archetype::new("b")));
    }

    #[test]
    fn eligible_preserves_configured_order() {
        let mut slots = table(vec![
            SlotEntry::new("combat", 1.0, 0),
            SlotEntry::new("market", 1.0, 1),
            SlotEntry::new("rest", 1.0, 0),
        ]);
        slots.exclusions.push(FloorExclusion { floor: 1, archetype: Archetype::new("rest") });

        let names: Vec<&str> = slots.eligible(1).map(|entry| entry.archetype.as_str()).collect();
        assert_eq!(names, vec!["combat", "market"]);
    }
}
