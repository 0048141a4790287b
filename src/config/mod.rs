// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Run configuration.
//!
//! The compile-time constants in [`constants`] give the defaults; a
//! [`LacingConfig`] carries the values actually used by one run, so that a
//! single binary (and the test suite) can search several sizes.

pub mod constants;

pub use constants::{MAX_LENGTH, OFFSET_BITS};

use crate::error::{LacingError, Result};
use constants::{MAX_OFFSET_BITS, MAX_PATTERN_BITS, MAX_RIM_SLOTS, MAX_WRITTEN_LENGTH};

/// Offset width and maximum pattern length for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LacingConfig {
    offset_bits: u32,
    max_length: usize,
}

impl LacingConfig {
    /// Validate and build a configuration.
    ///
    /// `offset_bits` must leave room for a sign bit and at least one magnitude
    /// bit, `offset_bits * max_length` must not exceed [`MAX_PATTERN_BITS`],
    /// and `max_length` must not exceed [`MAX_WRITTEN_LENGTH`].
    pub fn new(offset_bits: u32, max_length: usize) -> Result<Self> {
        let invalid = |reason| LacingError::InvalidConfig {
            offset_bits,
            max_length,
            reason,
        };
        if offset_bits < 2 {
            return Err(invalid("offsets need a sign bit and a magnitude bit"));
        }
        if offset_bits > MAX_OFFSET_BITS {
            return Err(invalid("offset field wider than 8 bits"));
        }
        if max_length == 0 {
            return Err(invalid("maximum length must be at least one spoke"));
        }
        if max_length > MAX_WRITTEN_LENGTH {
            return Err(invalid("padding is written as a single digit, so at most 10 spokes"));
        }
        if max_length > MAX_RIM_SLOTS {
            return Err(invalid("rim occupancy is limited to 64 slots"));
        }
        if offset_bits as usize * max_length > MAX_PATTERN_BITS as usize {
            return Err(invalid("packed patterns exceed the sieve limit of 32 bits"));
        }
        Ok(Self {
            offset_bits,
            max_length,
        })
    }

    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Largest legal offset magnitude.
    pub fn max_offset(&self) -> i32 {
        (1 << (self.offset_bits - 1)) - 1
    }

    /// Bits in a packed pattern of `max_length` offsets.
    pub fn pattern_bits(&self) -> u32 {
        self.offset_bits * self.max_length as u32
    }

    /// One sieve bit per possible packed pattern.
    pub fn sieve_bits(&self) -> u64 {
        1 << self.pattern_bits()
    }

    /// Number of `u64` words backing the sieve.
    pub fn sieve_words(&self) -> usize {
        self.sieve_bits().div_ceil(64) as usize
    }

    pub fn sieve_bytes(&self) -> usize {
        self.sieve_words() * 8
    }
}

impl Default for LacingConfig {
    fn default() -> Self {
        Self {
            offset_bits: OFFSET_BITS,
            max_length: MAX_LENGTH,
        }
    }
}
