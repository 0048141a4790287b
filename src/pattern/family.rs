// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The three pattern families.
//!
//! The search assigns offsets to a *sequence* `s[0], s[1], ...`; the family
//! decides how that sequence becomes a full pattern around the wheel. The
//! full pattern is laid out in text order (index `k` is hub `k`), which is
//! exactly the layout the pattern-string parser expands a line into:
//!
//! ```text
//! A (h terms, length 2h-1):  s[h-1] .. s[1] s[0] -s[1] .. -s[h-1]
//!                                            ^ center (radial)
//! B (h terms, length 2h):    s[h-1] .. s[1] s[0] -s[0] -s[1] .. -s[h-1]
//! C (h terms, length h):     s[h-1] .. s[1] s[0]
//! ```
//!
//! Search index `i` therefore owns hub `anchor - i` with offset `s[i]`, and
//! for A and B also the mirror hub on the far side of the anchor with offset
//! `-s[i]`. A spoke from hub `k` with offset `o` lands on rim slot
//! `(k + o) mod length`, so mirrored offsets run counter-clockwise from the
//! mirrored hub.

use strum_macros::{Display, EnumCount, EnumIter, EnumString};

use super::offset::Offset;

/// Family tag of a lacing pattern.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter, EnumString,
)]
#[repr(u8)]
pub enum Family {
    /// Odd length, point-symmetric, one radial center spoke.
    A,
    /// Even length, point-symmetric, no center spoke.
    B,
    /// No enforced symmetry.
    C,
}

/// Hub positions controlled by one search index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Hub carrying `s[i]`.
    pub hub: usize,
    /// Hub carrying `-s[i]`, for mirrored families.
    pub mirror: Option<usize>,
}

impl Family {
    /// Letter written after the offsets in a pattern line.
    pub fn letter(self) -> char {
        match self {
            Family::A => 'A',
            Family::B => 'B',
            Family::C => 'C',
        }
    }

    /// Shortest full pattern the family can form.
    pub fn min_length(self) -> usize {
        match self {
            Family::A | Family::C => 1,
            Family::B => 2,
        }
    }

    /// Growth of the full length per extra sequence term.
    pub fn length_step(self) -> usize {
        match self {
            Family::A | Family::B => 2,
            Family::C => 1,
        }
    }

    /// Sequence terms needed for a full pattern of `length` spokes.
    pub fn terms(self, length: usize) -> usize {
        match self {
            Family::A => length.div_ceil(2),
            Family::B => length / 2,
            Family::C => length,
        }
    }

    /// Full pattern length for a sequence of `terms` offsets.
    pub fn full_length(self, terms: usize) -> usize {
        match self {
            Family::A => 2 * terms - 1,
            Family::B => 2 * terms,
            Family::C => terms,
        }
    }

    /// Hub of `s[0]` in a full pattern of `length` spokes.
    fn anchor(self, length: usize) -> usize {
        match self {
            Family::A => (length - 1) / 2,
            Family::B => length / 2 - 1,
            Family::C => length - 1,
        }
    }

    /// Hubs that search index `index` assigns at full length `length`.
    ///
    /// The A center (index 0) is its own mirror and claims a single hub.
    pub fn placement(self, index: usize, length: usize) -> Placement {
        let anchor = self.anchor(length);
        let mirror = match self {
            Family::A if index > 0 => Some(anchor + index),
            Family::A | Family::C => None,
            Family::B => Some(anchor + 1 + index),
        };
        Placement {
            hub: anchor - index,
            mirror,
        }
    }

    /// Expand a sequence into the full pattern, in text order.
    pub fn expand(self, sequence: &[Offset]) -> Vec<Offset> {
        let outward = sequence.iter().rev().copied();
        let mirrored = sequence.iter().map(|offset| offset.negate());
        match self {
            Family::A => outward.chain(mirrored.skip(1)).collect(),
            Family::B => outward.chain(mirrored).collect(),
            Family::C => outward.collect(),
        }
    }

    /// Whether a complete sequence is rejected before it reaches the sieve.
    ///
    /// - A: the center must be radial, and a zero outermost offset (when
    ///   there is more than one term) is rejected.
    /// - B: a zero outermost offset is rejected.
    /// - C: sequences with every offset strictly of one sign are rejected;
    ///   they are a shift of a pattern containing a radial spoke.
    pub fn is_degenerate(self, sequence: &[Offset]) -> bool {
        let (Some(center), Some(outermost)) = (sequence.first(), sequence.last()) else {
            return true;
        };
        match self {
            Family::A => !center.is_zero() || (sequence.len() > 1 && outermost.is_zero()),
            Family::B => outermost.is_zero(),
            Family::C => {
                sequence.iter().all(|offset| offset.is_positive())
                    || sequence.iter().all(|offset| offset.is_negative())
            }
        }
    }
}
