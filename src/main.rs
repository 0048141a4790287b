// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `lacing`: enumerate spoke lacing patterns into a text file.
//!
//! **Usage:**
//! ```text
//! lacing [--output patterns.txt] [--offset-bits 3] [--max-length 6] [--families ABC] [-v]
//! ```
//!
//! Refuses to run if the output file already exists.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use strum::IntoEnumIterator;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spoke_lacing::config::{MAX_LENGTH, OFFSET_BITS};
use spoke_lacing::context::statistics::Counters;
use spoke_lacing::output::create_pattern_file;
use spoke_lacing::{Family, LacingConfig, LacingContext};

/// Enumerate lacing patterns for wire-spoke wheels.
#[derive(Parser)]
#[command(name = "lacing", version, about)]
struct Args {
    /// File to write patterns to; must not already exist.
    #[arg(short, long, default_value = "patterns.txt")]
    output: PathBuf,

    /// Bits per packed offset (largest offset is 2^(bits-1) - 1).
    #[arg(long, default_value_t = OFFSET_BITS)]
    offset_bits: u32,

    /// Longest pattern, including padding.
    #[arg(long, default_value_t = MAX_LENGTH)]
    max_length: usize,

    /// Families to search, e.g. "AB"; always run in A, B, C order.
    #[arg(long, default_value = "ABC")]
    families: String,

    /// More logging (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_families(letters: &str) -> Result<Vec<Family>> {
    let mut families = Vec::new();
    for letter in letters.chars() {
        let family = Family::from_str(&letter.to_string())
            .with_context(|| format!("unknown family {letter:?} (expected A, B or C)"))?;
        families.push(family);
    }
    if families.is_empty() {
        bail!("no families selected");
    }
    Ok(families)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let families = parse_families(&args.families)?;
    let config = LacingConfig::new(args.offset_bits, args.max_length)?;
    let file = create_pattern_file(&args.output)?;
    let mut ctx = LacingContext::new(config, file)?;
    let accepted = ctx
        .run(&families)
        .with_context(|| format!("while writing {}", args.output.display()))?;

    let statistics = ctx.statistics();
    for family in Family::iter() {
        info!(
            %family,
            accepted = statistics.get(family, Counters::Accepted),
            degenerate = statistics.get(family, Counters::Degenerate),
            padding_conflicts = statistics.get(family, Counters::PaddingConflicts),
            duplicates = statistics.get(family, Counters::Duplicates),
            "summary"
        );
    }
    info!(
        accepted,
        sieve_marked = ctx.sieve().marked(),
        output = %args.output.display(),
        "done"
    );
    Ok(())
}
