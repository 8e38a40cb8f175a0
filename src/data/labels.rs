//! Synthetic pit-stop labels
//!
//! The source tables carry no pit-stop outcomes, so training labels are
//! simulated per entry at startup. The stop count is a deterministic rule on
//! the race round; the pit lap and tire draws are intentionally unseeded and
//! differ from run to run. Model fitting itself is seeded, so only the
//! labels change across process starts.

use rand::Rng;
use std::ops::Range;

use crate::data::csv_loader::RaceEntry;

/// Tire compounds offered on a one-stop strategy.
pub const ONE_STOP_TIRES: [&str; 2] = ["Medium", "Hard"];
/// Tire compounds offered on a two-stop strategy.
pub const TWO_STOP_TIRES: [&str; 3] = ["Soft", "Medium", "Hard"];

/// Pit-lap window for one-stop races (half-open).
pub const ONE_STOP_LAP_RANGE: Range<u32> = 15..26;
/// Pit-lap window for two-stop races (half-open).
pub const TWO_STOP_LAP_RANGE: Range<u32> = 10..21;

/// Simulated pit-stop outcome attached to one race entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PitStopLabel {
    pub stop_count: u8,
    pub pit_lap: u32,
    pub next_tire: &'static str,
}

/// Stop count rule: early-round races pit once, the rest twice.
pub fn stop_count_for_round(race_round: u32) -> u8 {
    if race_round < 10 {
        1
    } else {
        2
    }
}

/// Simulate labels for every entry with a fresh unseeded RNG.
pub fn synthesize_labels(entries: &[RaceEntry]) -> Vec<PitStopLabel> {
    synthesize_labels_with(entries, &mut rand::thread_rng())
}

/// Simulate labels drawing from the supplied RNG. Rows are independent; the
/// lap window and tire choices depend only on the entry's stop count.
pub fn synthesize_labels_with<R: Rng>(entries: &[RaceEntry], rng: &mut R) -> Vec<PitStopLabel> {
    entries
        .iter()
        .map(|entry| {
            let stop_count = stop_count_for_round(entry.race_round);
            let (lap_range, tires): (Range<u32>, &[&'static str]) = if stop_count == 1 {
                (ONE_STOP_LAP_RANGE, &ONE_STOP_TIRES)
            } else {
                (TWO_STOP_LAP_RANGE, &TWO_STOP_TIRES)
            };
            PitStopLabel {
                stop_count,
                pit_lap: rng.gen_range(lap_range),
                next_tire: tires[rng.gen_range(0..tires.len())],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(race_round: u32) -> RaceEntry {
        RaceEntry {
            race_id: race_round,
            driver_id: 44,
            grid_position: 1,
            circuit_name: "Monza".to_string(),
            circuit_country: "Italy".to_string(),
            year: 2023,
            race_round,
        }
    }

    #[test]
    fn test_stop_count_rule_is_deterministic() {
        assert_eq!(stop_count_for_round(1), 1);
        assert_eq!(stop_count_for_round(9), 1);
        assert_eq!(stop_count_for_round(10), 2);
        assert_eq!(stop_count_for_round(22), 2);
    }

    #[test]
    fn test_labels_respect_per_strategy_ranges() {
        let entries: Vec<RaceEntry> = (1..=22)
            .flat_map(|round| std::iter::repeat_with(move || entry(round)).take(10))
            .collect();
        let labels = synthesize_labels(&entries);

        assert_eq!(labels.len(), entries.len());
        for (entry, label) in entries.iter().zip(&labels) {
            assert_eq!(label.stop_count, stop_count_for_round(entry.race_round));
            if label.stop_count == 1 {
                assert!(
                    ONE_STOP_LAP_RANGE.contains(&label.pit_lap),
                    "one-stop lap {}",
                    label.pit_lap
                );
                assert!(ONE_STOP_TIRES.contains(&label.next_tire));
            } else {
                assert!(
                    TWO_STOP_LAP_RANGE.contains(&label.pit_lap),
                    "two-stop lap {}",
                    label.pit_lap
                );
                assert!(TWO_STOP_TIRES.contains(&label.next_tire));
            }
        }
    }

    #[test]
    fn test_injected_rng_pins_the_draws() {
        let entries = vec![entry(3), entry(15)];
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);

        let a = synthesize_labels_with(&entries, &mut rng_a);
        let b = synthesize_labels_with(&entries, &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_entry_set_yields_no_labels() {
        assert!(synthesize_labels(&[]).is_empty());
    }
}
