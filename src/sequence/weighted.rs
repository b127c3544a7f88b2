//! Weighted-sampling label generator ("pure-constrained")
//!
//! Draws the sequence one label at a time. Each category carries a weight
//! equal to its remaining stock; the category placed last is weighted zero
//! for the next draw, so a draw can never repeat it.
//!
//! # Exhaustion and repair
//!
//! Near the end of a run the only stock left may belong to the category that
//! was just placed. All weights are then zero and no draw is possible. The
//! generator stops drawing and inserts the leftover copies into the sequence
//! already built, each one at the latest gap whose two neighbours differ
//! from it. With equal stock per category and `K >= 2` such gaps always
//! exist, so the result never has two equal neighbours.

use super::{CategoryCounts, LabelGenerator, LabelSequence};
use crate::error::{StimError, StimResult};
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

/// Outcome of a single weighted draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Draw {
    Picked(usize),
    /// Every weight is zero
    Exhausted,
}

/// Element-by-element weighted draw excluding the previous category
pub struct WeightedSamplingGenerator {
    rng: Xoshiro256PlusPlus,
    /// Number of generations that needed the repair pass
    repairs: u64,
}

impl WeightedSamplingGenerator {
    /// Create a generator with random seed
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_entropy(),
            repairs: 0,
        }
    }

    /// Create a generator with specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            repairs: 0,
        }
    }

    /// How many generated sequences went through the repair pass
    pub fn repairs(&self) -> u64 {
        self.repairs
    }
}

impl Default for WeightedSamplingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelGenerator for WeightedSamplingGenerator {
    fn generate(&mut self, num_categories: usize, elements: usize) -> StimResult<LabelSequence> {
        let counts = CategoryCounts::new(num_categories, elements)?;
        let total = counts.total();

        let mut weights = vec![elements; num_categories];
        let mut labels: Vec<usize> = Vec::with_capacity(total);
        let mut prev: Option<usize> = None;

        while labels.len() < total {
            // Hold back the previous category for this draw only
            let held = prev.map(|p| (p, std::mem::replace(&mut weights[p], 0)));

            match draw(&mut self.rng, &weights)? {
                Draw::Picked(category) => {
                    labels.push(category);
                    weights[category] -= 1;
                    if let Some((p, old_weight)) = held {
                        weights[p] = old_weight;
                    }
                    prev = Some(category);
                }
                Draw::Exhausted => {
                    // The first draw always has stock, so a category is held here
                    let (blocked, remaining) = held.ok_or_else(|| {
                        StimError::impossible("no stock left before the first draw")
                    })?;
                    debug!(
                        category = blocked,
                        remaining,
                        placed = labels.len(),
                        "weighted draw exhausted, repairing"
                    );
                    insert_blocked(&mut labels, blocked, remaining)?;
                    self.repairs += 1;
                    break;
                }
            }
        }

        if labels.len() != total {
            return Err(StimError::impossible(format!(
                "generated {} labels, expected {}",
                labels.len(),
                total
            )));
        }

        Ok(LabelSequence::from_generated(labels, counts))
    }

    fn name(&self) -> &'static str {
        "weighted-sampling"
    }
}

/// Single weighted draw over the current stock
fn draw<R: Rng + ?Sized>(rng: &mut R, weights: &[usize]) -> StimResult<Draw> {
    match WeightedIndex::<usize>::new(weights) {
        Ok(dist) => Ok(Draw::Picked(dist.sample(rng))),
        Err(WeightedError::AllWeightsZero) => Ok(Draw::Exhausted),
        Err(e) => Err(StimError::invalid(format!("invalid category weights: {}", e))),
    }
}

/// Insert `times` copies of `value` without creating equal neighbours
///
/// Each copy searches backward from `len - 2` for an index `i` where neither
/// `labels[i]` nor `labels[i - 1]` is `value`, and goes in before `i`. The
/// front of the sequence is the last resort.
pub(crate) fn insert_blocked(labels: &mut Vec<usize>, value: usize, times: usize) -> StimResult<()> {
    for inserted in 0..times {
        let slot = find_slot(labels, value).ok_or_else(|| {
            StimError::impossible(format!(
                "no slot left for category {} ({} of {} copies placed)",
                value, inserted, times
            ))
        })?;
        labels.insert(slot, value);
    }
    Ok(())
}

fn find_slot(labels: &[usize], value: usize) -> Option<usize> {
    if labels.len() >= 2 {
        for i in (1..=labels.len() - 2).rev() {
            if labels[i] != value && labels[i - 1] != value {
                return Some(i);
            }
        }
    }
    match labels.first() {
        Some(&first) if first != value => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_no_adjacent_repeats() {
        let mut generator = WeightedSamplingGenerator::new();

        for _ in 0..100 {
            let seq = generator.generate(10, 50).unwrap();
            assert_eq!(seq.len(), 500);
            assert_eq!(seq.adjacent_repeats(), 0);
            assert!(seq.category_counts().iter().all(|&c| c == 50));
        }
    }

    #[test]
    fn test_weighted_repair_path_is_taken() {
        let mut generator = WeightedSamplingGenerator::with_seed(99);

        for _ in 0..2000 {
            let seq = generator.generate(3, 5).unwrap();
            assert_eq!(seq.adjacent_repeats(), 0);
            assert_eq!(seq.category_counts(), vec![5, 5, 5]);
        }

        assert!(generator.repairs() > 0, "repair pass never ran in 2000 small runs");
    }

    #[test]
    fn test_weighted_seeded() {
        let a = WeightedSamplingGenerator::with_seed(12345).generate(4, 10).unwrap();
        let b = WeightedSamplingGenerator::with_seed(12345).generate(4, 10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_weighted_single_element_per_category() {
        let mut generator = WeightedSamplingGenerator::with_seed(5);
        let seq = generator.generate(7, 1).unwrap();

        let mut sorted = seq.labels().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_weighted_invalid_counts() {
        let mut generator = WeightedSamplingGenerator::with_seed(1);
        assert!(matches!(generator.generate(1, 3), Err(StimError::InvalidArgument(_))));
        assert!(matches!(generator.generate(3, 0), Err(StimError::InvalidArgument(_))));
        assert_eq!(generator.repairs(), 0);
    }

    #[test]
    fn test_draw_exhausted_signal() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        assert_eq!(draw(&mut rng, &[0, 0, 0]).unwrap(), Draw::Exhausted);
        assert_eq!(draw(&mut rng, &[0, 3, 0]).unwrap(), Draw::Picked(1));
    }

    #[test]
    fn test_insert_blocked_scans_backward() {
        // Built prefix of a 3x3 run that ran dry with two 2s left
        let mut labels = vec![0, 1, 0, 1, 0, 1, 2];
        insert_blocked(&mut labels, 2, 2).unwrap();

        assert_eq!(labels, vec![0, 1, 0, 1, 2, 0, 2, 1, 2]);
        assert_eq!(crate::sequence::count_adjacent_repeats(&labels), 0);
    }

    #[test]
    fn test_insert_blocked_falls_back_to_front() {
        let mut labels = vec![1, 0];
        insert_blocked(&mut labels, 0, 1).unwrap();
        assert_eq!(labels, vec![0, 1, 0]);
    }

    #[test]
    fn test_insert_blocked_reports_missing_slot() {
        let mut labels = vec![0];
        assert!(matches!(
            insert_blocked(&mut labels, 0, 1),
            Err(StimError::ImpossibleConstraint(_))
        ));
    }
}
