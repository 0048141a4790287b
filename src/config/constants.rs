// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time defaults for the lacing search.
//!
//! This module defines OFFSET_BITS (width of one packed spoke offset) and
//! MAX_LENGTH (longest pattern searched), plus the sizes derived from them.
//! Both can be configured at compile time via cargo features, and overridden
//! at run time through [`LacingConfig`](super::LacingConfig).
//!
//! Search time is roughly exponential in the product of the two, and sieve
//! memory doubles with every extra bit of `OFFSET_BITS * MAX_LENGTH`, so the
//! two must be chosen together.
//!
//! # Example
//!
//! ```bash
//! # Default: OFFSET_BITS=3, MAX_LENGTH=6
//! cargo build
//!
//! # Offsets up to +/-1 on patterns of up to 8 spokes
//! cargo build --features offset_bits_2,max_length_8
//! ```

/// Width in bits of one sign-magnitude offset field.
///
/// - `offset_bits_2` → 2 (offsets -1..=1)
/// - `offset_bits_3` → 3 (offsets -3..=3)
/// - `offset_bits_4` → 4 (offsets -7..=7)
/// - (default) → 3
#[cfg(not(any(
    feature = "offset_bits_2",
    feature = "offset_bits_3",
    feature = "offset_bits_4"
)))]
pub const OFFSET_BITS: u32 = 3;

#[cfg(feature = "offset_bits_2")]
pub const OFFSET_BITS: u32 = 2;

#[cfg(feature = "offset_bits_3")]
pub const OFFSET_BITS: u32 = 3;

#[cfg(feature = "offset_bits_4")]
pub const OFFSET_BITS: u32 = 4;

/// Maximum number of spokes in a (padded) pattern.
#[cfg(not(any(
    feature = "max_length_4",
    feature = "max_length_6",
    feature = "max_length_8"
)))]
pub const MAX_LENGTH: usize = 6;

#[cfg(feature = "max_length_4")]
pub const MAX_LENGTH: usize = 4;

#[cfg(feature = "max_length_6")]
pub const MAX_LENGTH: usize = 6;

#[cfg(feature = "max_length_8")]
pub const MAX_LENGTH: usize = 8;

/// The reserved field value: sign bit set, zero magnitude ("negative zero").
const UNUSED_OFFSET: u64 = 1 << (OFFSET_BITS - 1);

/// Largest offset magnitude.
pub const MAX_OFFSET: i32 = (UNUSED_OFFSET - 1) as i32;

/// Bits in a fully packed pattern of MAX_LENGTH offsets.
const PATTERN_BITS: u32 = OFFSET_BITS * MAX_LENGTH as u32;

/// Upper bound on `offset_bits * max_length` accepted at run time.
///
/// The sieve holds one bit per packed pattern, so this caps it at 512 MiB.
pub const MAX_PATTERN_BITS: u32 = 32;

/// Widest offset field we support (the codec works on `u8` magnitudes).
pub const MAX_OFFSET_BITS: u32 = 8;

/// Longest pattern accepted at run time.
///
/// Output lines carry the padding as a single digit, and padding is at most
/// one less than the maximum length.
pub const MAX_WRITTEN_LENGTH: usize = 10;

/// Rim occupancy is one `u64`, one bit per rim slot.
pub const MAX_RIM_SLOTS: usize = 64;

const _: () = assert!(OFFSET_BITS >= 2, "need a sign bit and a magnitude bit");
const _: () = assert!(
    MAX_LENGTH <= MAX_WRITTEN_LENGTH,
    "padding would need more than one digit"
);
const _: () = assert!(
    PATTERN_BITS <= MAX_PATTERN_BITS,
    "OFFSET_BITS * MAX_LENGTH exceeds the sieve limit"
);
