// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rim conflict model.
//!
//! For a pattern of `length` spokes, a spoke from hub `k` with offset `o`
//! claims rim slot `(k + o) mod length`. A pattern is a valid lacing when
//! every slot is claimed exactly once. Replicating a valid unit around a
//! larger wheel keeps it valid, so slots are only ever considered modulo the
//! unit length.
//!
//! # Examples
//!
//! ```
//! use spoke_lacing::pattern::Offset;
//! use spoke_lacing::rim::{slot, Occupancy};
//!
//! let rim = Occupancy::empty();
//! let rim = rim.try_claim(slot(Offset::new(1), 0, 2)).unwrap();
//! assert!(rim.try_claim(slot(Offset::new(-1), 0, 2)).is_none()); // slot 1 again
//! let rim = rim.try_claim(slot(Offset::new(-1), 1, 2)).unwrap();
//! assert!(rim.is_full(2));
//! ```

use std::fmt;

use crate::pattern::Offset;

/// Single-bit mask of the rim slot claimed by a spoke.
///
/// The modulus is the true (non-negative) one: hub 0 with offset -1 on a
/// length-5 pattern lands on slot 4.
pub fn slot(offset: Offset, hub: usize, length: usize) -> u64 {
    debug_assert!(length > 0 && length <= 64);
    let index = (hub as i64 + offset.value() as i64).rem_euclid(length as i64);
    1 << index
}

/// Rim slots claimed so far, one bit per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Occupancy(u64);

impl Occupancy {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every slot of a `length`-spoke pattern claimed.
    pub fn full(length: usize) -> Self {
        match length {
            64 => Self(u64::MAX),
            _ => Self((1 << length) - 1),
        }
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_full(self, length: usize) -> bool {
        self == Self::full(length)
    }

    /// Number of claimed slots.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Claim `bits`, or `None` if any of them is taken.
    ///
    /// Claims are all-or-nothing, so a mirrored pair either lands together
    /// or leaves the rim untouched.
    pub fn try_claim(self, bits: u64) -> Option<Self> {
        (self.0 & bits == 0).then_some(Self(self.0 | bits))
    }

    /// Undo an earlier claim of `bits`.
    pub fn release(self, bits: u64) -> Self {
        debug_assert_eq!(self.0 & bits, bits, "releasing unclaimed slots");
        Self(self.0 ^ bits)
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

/// The slot two hubs would share, if replaying a pattern finds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub hub: usize,
    pub slot: usize,
}

/// Claim every spoke of a full pattern (text order) from an empty rim.
///
/// Returns the final occupancy, which is full for any pattern with no
/// conflict, since the pattern has exactly one spoke per slot.
pub fn replay(pattern: &[Offset]) -> Result<Occupancy, Conflict> {
    let length = pattern.len();
    pattern
        .iter()
        .enumerate()
        .try_fold(Occupancy::empty(), |rim, (hub, &offset)| {
            let bit = slot(offset, hub, length);
            rim.try_claim(bit).ok_or(Conflict {
                hub,
                slot: bit.trailing_zeros() as usize,
            })
        })
}
