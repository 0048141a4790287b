// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The sieve: one bit per packed pattern already reported.
//!
//! When a pattern is accepted, every pattern equivalent to it is marked so
//! that it is never reported again:
//!
//! - every rotation (the same lacing starting at a different hole),
//! - every rotation of every periodic extension up to the maximum length
//!   (the unit repeated around a wheel with a multiple of its holes),
//! - for Family C, the mirror image and all of the above for it.
//!
//! Because extensions are marked at acceptance time, shorter units must be
//! accepted before longer ones; the search grows lengths upward and tries
//! paddings in ascending order.
//!
//! The bitset is sized once for `2^(offset_bits * max_length)` keys and
//! never resized. Bits are only ever set.

use crate::config::LacingConfig;
use crate::error::{LacingError, Result};
use crate::pattern::{Family, Offset, OffsetCodec, PackedPattern};

/// Packed images of a complete sequence on a wheel with `padding` extra
/// radial spokes.
///
/// A and B patterns are symmetric: their mirror image is one of their own
/// rotations, padded or not. A C pattern's mirror image is a different
/// pattern describing the same lacing, so it is returned as a second image.
pub fn images(
    family: Family,
    sequence: &[Offset],
    codec: OffsetCodec,
    padding: usize,
) -> Result<(PackedPattern, Option<PackedPattern>)> {
    let pattern = PackedPattern::pack(codec, &family.expand(sequence))?.padded(padding);
    let mirror = (family == Family::C).then(|| pattern.mirrored());
    Ok((pattern, mirror))
}

/// Dense bitset of sieve keys.
#[derive(Debug)]
pub struct Sieve {
    words: Vec<u64>,
    max_length: usize,
    marked: u64,
}

impl Sieve {
    /// Allocate an empty sieve for `config`.
    ///
    /// Allocation failure is reported rather than aborting, so the caller can
    /// say which configuration was too large.
    pub fn new(config: &LacingConfig) -> Result<Self> {
        let len = config.sieve_words();
        let mut words = Vec::new();
        words
            .try_reserve_exact(len)
            .map_err(|source| LacingError::SieveAllocation {
                bits: config.sieve_bits(),
                source,
            })?;
        words.resize(len, 0);
        Ok(Self {
            words,
            max_length: config.max_length(),
            marked: 0,
        })
    }

    fn index(key: u64) -> (usize, u32) {
        ((key / 64) as usize, (key % 64) as u32)
    }

    /// Whether `pattern` (at its own length) has been marked.
    pub fn contains(&self, pattern: &PackedPattern) -> bool {
        let (word, shift) = Self::index(pattern.key(self.max_length));
        (self.words[word] >> shift) & 1 != 0
    }

    /// Mark one pattern; returns true if it was not already marked.
    pub fn insert(&mut self, pattern: &PackedPattern) -> bool {
        let (word, shift) = Self::index(pattern.key(self.max_length));
        let bit = 1 << shift;
        let fresh = self.words[word] & bit == 0;
        self.words[word] |= bit;
        if fresh {
            self.marked += 1;
        }
        fresh
    }

    /// Mark every rotation of `pattern` and of its periodic extensions.
    fn mark_equivalents(&mut self, pattern: &PackedPattern) {
        let length = pattern.len();
        for times in 1..=self.max_length / length {
            for rotation in pattern.repeat(times).rotations() {
                self.insert(&rotation);
            }
        }
    }

    /// Accept a new pattern, given as one or more equivalent images.
    ///
    /// Returns false, marking nothing, if any image is already in the sieve.
    /// Otherwise marks every image with all its equivalents and returns true.
    pub fn accept(&mut self, images: &[PackedPattern]) -> bool {
        if images.iter().any(|image| self.contains(image)) {
            return false;
        }
        for image in images {
            self.mark_equivalents(image);
        }
        true
    }

    /// Number of keys marked so far.
    pub fn marked(&self) -> u64 {
        self.marked
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}
