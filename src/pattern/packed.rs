// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit-packed full patterns.
//!
//! A [`PackedPattern`] concatenates the offset fields of a full pattern into
//! one `u64`, in text order: the first written offset is the most significant
//! field, the last sits at bit 0.
//!
//! ```text
//! "-2,1,0" (b = 3):   110 001 000
//! ```
//!
//! Patterns of different lengths can pack to the same integer (`0` and
//! `0,0` both pack to zero), so the sieve uses [`PackedPattern::key`], which
//! fills every field above the pattern with the unused sentinel. Real
//! offsets never encode to the sentinel, so keys are unique per length.

use super::offset::{Offset, OffsetCodec};
use crate::error::Result;

/// A full pattern packed into `length` fields of `codec.bits()` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedPattern {
    bits: u64,
    length: usize,
    codec: OffsetCodec,
}

impl PackedPattern {
    /// Pack a full pattern given in text order.
    pub fn pack(codec: OffsetCodec, offsets: &[Offset]) -> Result<Self> {
        let mut bits = 0;
        for &offset in offsets {
            bits = (bits << codec.bits()) | codec.encode(offset)?;
        }
        Ok(Self {
            bits,
            length: offsets.len(),
            codec,
        })
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    fn width(&self) -> u32 {
        self.codec.bits() * self.length as u32
    }

    fn mask(&self) -> u64 {
        match self.width() {
            64 => u64::MAX,
            width => (1 << width) - 1,
        }
    }

    /// Field of the `index`-th offset in text order.
    fn field(&self, index: usize) -> u64 {
        let shift = self.codec.bits() * (self.length - 1 - index) as u32;
        (self.bits >> shift) & self.codec.field_mask()
    }

    /// Rotate the wheel by one hole: the first field moves to the end.
    pub fn rotate(&self) -> Self {
        if self.length <= 1 {
            return *self;
        }
        let b = self.codec.bits();
        let top = self.bits >> (b * (self.length as u32 - 1));
        Self {
            bits: ((self.bits << b) | top) & self.mask(),
            ..*self
        }
    }

    /// Every rotation, starting with the pattern itself.
    pub fn rotations(&self) -> impl Iterator<Item = PackedPattern> {
        std::iter::successors(Some(*self), |pattern| Some(pattern.rotate())).take(self.length)
    }

    /// Append `padding` radial spokes.
    pub fn padded(&self, padding: usize) -> Self {
        Self {
            bits: self.bits << (self.codec.bits() * padding as u32),
            length: self.length + padding,
            codec: self.codec,
        }
    }

    /// The unit repeated `times` times around a larger wheel.
    pub fn repeat(&self, times: usize) -> Self {
        let width = self.width();
        let bits = (0..times).fold(0, |acc, _| (acc << width) | self.bits);
        Self {
            bits,
            length: self.length * times,
            codec: self.codec,
        }
    }

    /// Mirror image: every offset negated, order reversed.
    pub fn mirrored(&self) -> Self {
        let b = self.codec.bits();
        let bits = (0..self.length).fold(0, |acc, index| {
            (acc << b) | self.codec.negate(self.field(self.length - 1 - index))
        });
        Self { bits, ..*self }
    }

    /// Sieve index: the pattern with unused-sentinel fields up to `max_length`.
    pub fn key(&self, max_length: usize) -> u64 {
        let b = self.codec.bits();
        (self.length..max_length).fold(self.bits, |key, index| {
            key | (self.codec.unused() << (b * index as u32))
        })
    }
}
