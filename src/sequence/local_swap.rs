//! Local-swap label generator ("pseudo-constrained")
//!
//! Builds the sequence in `E` chunks, each a fresh permutation of all `K`
//! categories. When a chunk would start with the category that ended the
//! previous one, its first and last entries are swapped before appending.
//!
//! Only the boundary being appended is checked. This keeps every category
//! spread evenly over the run (each chunk holds one of each), which some
//! experiments want even though it is not a uniform draw over all valid
//! orders.
//!
//! # Example
//!
//! ```
//! use stimrand::sequence::{LabelGenerator, local_swap::LocalSwapGenerator};
//!
//! let mut generator = LocalSwapGenerator::with_seed(42);
//! let labels = generator.generate(4, 3).unwrap();
//! assert_eq!(labels.len(), 12);
//! ```

use super::{CategoryCounts, LabelGenerator, LabelSequence};
use crate::error::StimResult;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Chunked shuffle with a one-step-back boundary swap
pub struct LocalSwapGenerator {
    rng: Xoshiro256PlusPlus,
}

impl LocalSwapGenerator {
    /// Create a generator with random seed
    pub fn new() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Create a generator with specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl Default for LocalSwapGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelGenerator for LocalSwapGenerator {
    fn generate(&mut self, num_categories: usize, elements: usize) -> StimResult<LabelSequence> {
        let counts = CategoryCounts::new(num_categories, elements)?;
        let mut labels: Vec<usize> = Vec::with_capacity(counts.total());
        let mut chunk: Vec<usize> = (0..num_categories).collect();

        for _ in 0..elements {
            chunk.shuffle(&mut self.rng);

            if labels.last() == Some(&chunk[0]) {
                chunk.swap(0, num_categories - 1);
            }

            labels.extend_from_slice(&chunk);
        }

        Ok(LabelSequence::from_generated(labels, counts))
    }

    fn name(&self) -> &'static str {
        "local-swap"
    }
}
