//! Coordinator module
//!
//! Runs a validated [`Config`]: subsets first, then prerandomizations,
//! then the optional JSON summary.

use crate::config::Config;
use crate::output::summary::{write_summary, RunSummary};
use crate::output::{prepare_output_dir, PRERANDS_DIR, SUBSETS_DIR};
use crate::prerand::{method_categories, Prerandomizer};
use crate::stimuli::StimulusSet;
use crate::subsets::create_subsets;
use crate::Result;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Execute every step the configuration asks for
pub fn run(config: &Config) -> Result<RunSummary> {
    let stimuli = StimulusSet::open(&config.stimuli.path, config.stimuli.categories.clone())?;
    let root = stimuli.path();
    let dir_type = config.output.dir_type;

    // Fail before anything is split or written
    if let Some(ref prerands) = config.prerands {
        method_categories(&stimuli, prerands.method)?;
    }

    let mut rng = match config.runtime.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    };

    let mut summary = RunSummary::new(root, stimuli.categories(), config.runtime.seed);
    match stimuli.categories() {
        Some(categories) => info!(categories = %categories.join(", "), "using categories"),
        None => warn!(path = %root.display(), "no categories found, only unconstrained prerandomization is possible"),
    }

    let mut subsets_dir: Option<PathBuf> = None;
    if let Some(ref subsets) = config.subsets {
        let dir = prepare_output_dir(root, SUBSETS_DIR, dir_type, config.output.subsets_dir.as_deref())?;
        summary.subsets = create_subsets(&mut rng, &stimuli, subsets.count, &dir)?;
        subsets_dir = Some(dir);
    } else if let Some(ref dir) = config.output.subsets_dir {
        if dir.is_dir() {
            debug!(dir = %dir.display(), "reusing existing subsets");
            subsets_dir = Some(dir.clone());
        }
    }

    if let Some(ref prerands) = config.prerands {
        let dir = prepare_output_dir(root, PRERANDS_DIR, dir_type, config.output.prerands_dir.as_deref())?;
        let mut prerandomizer = Prerandomizer::with_seed(rng.gen());

        summary.method = Some(prerands.method);
        summary.prerands = prerandomizer.create_prerands(
            &stimuli,
            subsets_dir.as_deref(),
            &dir,
            prerands.count,
            prerands.method,
        )?;

        if prerandomizer.repairs() > 0 {
            debug!(repairs = prerandomizer.repairs(), "weighted sampling needed repairs");
        }
    }

    if let Some(ref path) = config.output.json_summary {
        write_summary(path, &summary)?;
        info!(path = %path.display(), "wrote run summary");
    }

    Ok(summary)
}
