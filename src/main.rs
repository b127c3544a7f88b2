//! stimrand CLI entry point

use anyhow::{Context, Result};
use stimrand::config::{cli::Cli, cli_convert, toml, validator, Config};
use stimrand::output::summary::RunSummary;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    println!("stimrand v{}", env!("CARGO_PKG_VERSION"));
    println!("Balanced subsets and constrained prerandomizations");
    println!();

    let cli = Cli::parse_args();
    cli.validate()?;

    enable_tracing(cli.debug);

    let config = match cli.config {
        Some(ref path) => {
            let file_config = toml::parse_toml_file(path)?;
            toml::merge_cli_with_config(&cli, file_config)?
        }
        None => cli_convert::build_config_from_cli(&cli)?,
    };

    validator::validate_config(&config).context("Configuration validation failed")?;

    print!("{}", config);

    if config.runtime.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    println!();
    let summary = stimrand::coordinator::run(&config)?;
    print_results(&summary, &config);

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--debug`
fn enable_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

/// Print what the run wrote
fn print_results(summary: &RunSummary, config: &Config) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    match summary.categories {
        Some(ref categories) => println!("Categories: {}", categories.join(", ")),
        None => println!("Categories: none"),
    }
    if let Some(seed) = summary.seed {
        println!("Seed: {}", seed);
    }
    println!();

    if !summary.subsets.is_empty() {
        println!("Subsets:");
        for subset in &summary.subsets {
            println!("  {} ({} items)", subset.path.display(), subset.items);
        }
        println!();
    }

    if !summary.prerands.is_empty() {
        println!("Prerandomizations:");
        if let Some(method) = summary.method {
            println!("  Method: {}", method);
        }
        println!("  Files:  {}", summary.prerands.len());
        if let Some(first) = summary.prerands.first() {
            if let Some(dir) = first.path.parent() {
                println!("  Dir:    {}", dir.display());
            }
        }
        println!("  Adjacent category repeats: {}", summary.total_adjacent_repeats());
        println!();
    }

    if let Some(ref path) = config.output.json_summary {
        println!("Summary written to {}", path.display());
    }
}
