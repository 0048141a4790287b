// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Per-family counters, stored in the context and incremented as candidates
//! pass through the acceptance policy.

use strum::EnumCount;
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

use crate::pattern::Family;

#[derive(Debug, EnumCountMacro, EnumIter, IntoStaticStr, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    /// Complete sequences produced by the search.
    Candidates,
    /// Rejected by the family's degeneracy rules.
    Degenerate,
    /// A padding whose extra radial spokes collide with the pattern.
    PaddingConflicts,
    /// Already in the sieve.
    Duplicates,
    /// Written to the output.
    Accepted,
    /// Offsets tried by the search.
    Nodes,
    /// Offsets pruned by a rim conflict.
    Conflicts,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    stats: [[u64; Counters::COUNT]; Family::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment(&mut self, family: Family, counter: Counters) {
        self.add(family, counter, 1);
    }

    pub(crate) fn add(&mut self, family: Family, counter: Counters, amount: u64) {
        self.stats[family as usize][counter as usize] += amount;
    }

    /// Get the current value of the specified counter for one family.
    pub fn get(&self, family: Family, counter: Counters) -> u64 {
        self.stats[family as usize][counter as usize]
    }

    /// Sum of a counter over all families.
    pub fn total(&self, counter: Counters) -> u64 {
        self.stats.iter().map(|row| row[counter as usize]).sum()
    }
}
