// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for the lacing search.
//!
//! Every error here is fatal for a run: the enumeration is a deterministic
//! offline computation, so nothing is retried. Variants carry enough context
//! (family, length, depth) to diagnose the failure from a log line.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::pattern::Family;

/// Errors that can stop a lacing run.
#[derive(Debug, Error)]
pub enum LacingError {
    /// Offset width and maximum length do not describe a usable search.
    #[error("invalid configuration (offset bits {offset_bits}, max length {max_length}): {reason}")]
    InvalidConfig {
        offset_bits: u32,
        max_length: usize,
        reason: &'static str,
    },

    /// Offset magnitude does not fit the configured field width.
    #[error("offset {value} is outside -{max}..={max}")]
    OffsetOutOfRange { value: i32, max: i32 },

    /// The sieve could not be allocated; the search cannot proceed without it.
    #[error("cannot allocate sieve of {bits} bits")]
    SieveAllocation {
        bits: u64,
        #[source]
        source: TryReserveError,
    },

    /// Refusing to mix new results into an old output file.
    #[error("output file {} already exists", path.display())]
    OutputExists { path: PathBuf },

    /// Failure opening or writing the output.
    #[error("I/O error on pattern output")]
    Io(#[from] io::Error),

    /// Search bookkeeping is inconsistent; results would be wrong.
    #[error(
        "invariant violated in family {family} at length {length}, depth {depth}: {detail} (rim {occupancy:#b})"
    )]
    InvariantViolation {
        family: Family,
        length: usize,
        depth: usize,
        occupancy: u64,
        detail: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LacingError>;
