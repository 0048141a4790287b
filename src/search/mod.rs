// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Backtracking search for complete lacings of one family.
//!
//! The search walks every offset sequence of every length up to the maximum,
//! pruning a branch as soon as a spoke would land on a rim slot that is
//! already taken. It is a small explicit state machine over a stack of
//! frames, one frame per assigned sequence index:
//!
//! ```text
//!              ┌────────────── conflict ─────────────┐
//!              v                                     │
//! Descending → Incrementing ── claimed, more terms ──┴→ Descending
//!              │        │
//!              │        └── claimed, rim full → LengthComplete (yield) → Incrementing
//!              └── overflow → Backtracking ── stack non-empty → Incrementing
//!                                  │
//!                                  └── stack empty → LengthGrow → Descending
//!                                                        │
//!                                                        └── past max → Exhausted
//! ```
//!
//! Each frame remembers the slot bits it claimed, so backtracking is a pop
//! and an XOR rather than recomputing what to undo.
//!
//! Sequences are yielded in a fixed order (lengths ascending, then offsets
//! in codec order at each depth), which keeps whole runs deterministic.

use tracing::trace;

use crate::error::{LacingError, Result};
use crate::pattern::{Family, Offset, OffsetCodec, OffsetSequence};
use crate::rim::{slot, Occupancy};

/// Where the search is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Push a frame for the next index.
    Descending,
    /// Try the next offset at the deepest index.
    Incrementing,
    /// The deepest index is exhausted.
    Backtracking,
    /// Every index is assigned and every slot claimed.
    LengthComplete,
    /// All sequences of the current length have been tried.
    LengthGrow,
    /// Nothing left to search.
    Exhausted,
}

/// One assigned index of the sequence.
#[derive(Debug, Clone, Copy, Default)]
struct Frame {
    /// Current field; `None` before the first value is tried.
    field: Option<u64>,
    /// Slot bits this frame holds on the rim (zero if none).
    claimed: u64,
}

/// Search for every complete lacing of one family.
///
/// Implements `Iterator`, yielding each complete sequence once. An invariant
/// violation is yielded as an error and ends the iteration.
#[derive(Debug)]
pub struct LacingSearch {
    family: Family,
    codec: OffsetCodec,
    max_length: usize,
    /// Full pattern length currently being searched.
    length: usize,
    frames: Vec<Frame>,
    rim: Occupancy,
    state: SearchState,
    /// Statistics: offsets tried.
    nodes: u64,
    /// Statistics: offsets pruned by a rim conflict.
    conflicts: u64,
}

impl LacingSearch {
    pub fn new(family: Family, codec: OffsetCodec, max_length: usize) -> Self {
        let length = family.min_length();
        let state = if length > max_length {
            SearchState::Exhausted
        } else {
            SearchState::Descending
        };
        Self {
            family,
            codec,
            max_length,
            length,
            frames: Vec::with_capacity(family.terms(max_length)),
            rim: Occupancy::empty(),
            state,
            nodes: 0,
            conflicts: 0,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Returns (nodes, conflicts): offsets tried and offsets pruned.
    pub fn statistics(&self) -> (u64, u64) {
        (self.nodes, self.conflicts)
    }

    fn invariant(&mut self, detail: &'static str) -> LacingError {
        let error = LacingError::InvariantViolation {
            family: self.family,
            length: self.length,
            depth: self.frames.len(),
            occupancy: self.rim.bits(),
            detail,
        };
        self.state = SearchState::Exhausted;
        error
    }

    fn sequence(&self) -> OffsetSequence {
        OffsetSequence::new(
            self.frames
                .iter()
                .filter_map(|frame| frame.field.and_then(|field| self.codec.decode(field)))
                .collect(),
        )
    }

    /// Slot bits the spoke(s) of `index` claim with `offset`.
    fn claims(&self, index: usize, offset: Offset) -> Option<u64> {
        let placement = self.family.placement(index, self.length);
        let own = slot(offset, placement.hub, self.length);
        match placement.mirror {
            None => Some(own),
            // Both spokes of a pair on one slot is a conflict of its own.
            Some(mirror) => {
                let other = slot(offset.negate(), mirror, self.length);
                (own & other == 0).then_some(own | other)
            }
        }
    }

    /// Advance the deepest frame by one offset.
    fn increment(&mut self) -> Result<()> {
        let index = self.frames.len() - 1;
        let frame = self.frames[index];
        self.rim = self.rim.release(frame.claimed);
        self.frames[index].claimed = 0;

        let Some(field) = self.codec.next(frame.field) else {
            self.state = SearchState::Backtracking;
            return Ok(());
        };
        self.frames[index].field = Some(field);
        self.nodes += 1;

        // The sentinel is skipped by `next`, so every field decodes.
        let Some(offset) = self.codec.decode(field) else {
            return Err(self.invariant("unused offset reached the search"));
        };
        let claimed = self
            .claims(index, offset)
            .and_then(|bits| self.rim.try_claim(bits).map(|rim| (bits, rim)));
        match claimed {
            None => {
                self.conflicts += 1;
            }
            Some((bits, rim)) => {
                self.rim = rim;
                self.frames[index].claimed = bits;
                self.state = if index + 1 == self.family.terms(self.length) {
                    SearchState::LengthComplete
                } else {
                    SearchState::Descending
                };
            }
        }
        Ok(())
    }

    /// Run the state machine until the next complete sequence.
    fn advance(&mut self) -> Result<Option<OffsetSequence>> {
        loop {
            match self.state {
                SearchState::Descending => {
                    self.frames.push(Frame::default());
                    self.state = SearchState::Incrementing;
                }
                SearchState::Incrementing => self.increment()?,
                SearchState::Backtracking => {
                    self.frames.pop();
                    self.state = if self.frames.is_empty() {
                        SearchState::LengthGrow
                    } else {
                        SearchState::Incrementing
                    };
                }
                SearchState::LengthComplete => {
                    if !self.rim.is_full(self.length) {
                        return Err(self.invariant("complete sequence leaves rim slots empty"));
                    }
                    self.state = SearchState::Incrementing;
                    let sequence = self.sequence();
                    trace!(family = %self.family, length = self.length, %sequence, "complete");
                    return Ok(Some(sequence));
                }
                SearchState::LengthGrow => {
                    if !self.rim.is_empty() {
                        return Err(self.invariant("rim not empty after unwinding a length"));
                    }
                    trace!(
                        family = %self.family,
                        length = self.length,
                        nodes = self.nodes,
                        conflicts = self.conflicts,
                        "length exhausted"
                    );
                    self.length += self.family.length_step();
                    self.state = if self.length > self.max_length {
                        SearchState::Exhausted
                    } else {
                        SearchState::Descending
                    };
                }
                SearchState::Exhausted => return Ok(None),
            }
        }
    }
}

impl Iterator for LacingSearch {
    type Item = Result<OffsetSequence>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rim::replay;

    fn search(family: Family, bits: u32, max_length: usize) -> Vec<OffsetSequence> {
        LacingSearch::new(family, OffsetCodec::new(bits), max_length)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    fn texts(sequences: &[OffsetSequence]) -> Vec<String> {
        sequences.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_a_length_one_accepts_every_center() {
        // On a one-spoke wheel every offset lands on the only slot.
        let found = search(Family::A, 2, 1);
        assert_eq!(texts(&found), vec!["0", "1", "-1"]);
    }

    #[test]
    fn test_b_length_two() {
        let found = search(Family::B, 3, 2);
        assert_eq!(texts(&found), vec!["0", "1", "2", "3", "-1", "-2", "-3"]);
    }

    #[test]
    fn test_c_length_two() {
        // hub 1 holds s[0], hub 0 holds s[1]
        let found = search(Family::C, 2, 2);
        let length_two: Vec<String> = texts(&found).into_iter().filter(|t| t.contains(',')).collect();
        assert_eq!(length_two, vec!["0,0", "1,1", "-1,1", "1,-1", "-1,-1"]);
    }

    #[test]
    fn test_every_yield_is_a_valid_lacing() {
        for family in [Family::A, Family::B, Family::C] {
            for sequence in search(family, 3, 5) {
                let full = family.expand(sequence.as_slice());
                assert!(full.len() <= 5);
                assert!(replay(&full).is_ok(), "{family} {sequence}");
            }
        }
    }

    #[test]
    fn test_c_finds_every_valid_pattern() {
        // Brute force over all length-3 patterns with offsets -1..=1.
        let mut expected = 0;
        for a in -1..=1 {
            for b in -1..=1 {
                for c in -1..=1 {
                    let full: Vec<Offset> = [a, b, c].iter().map(|&v| Offset::new(v)).collect();
                    if replay(&full).is_ok() {
                        expected += 1;
                    }
                }
            }
        }
        let found = search(Family::C, 2, 3);
        assert_eq!(found.iter().filter(|s| s.len() == 3).count(), expected);
    }

    #[test]
    fn test_ends_exhausted() {
        let mut search = LacingSearch::new(Family::B, OffsetCodec::new(2), 4);
        let count = search.by_ref().count();
        assert!(count > 0);
        assert_eq!(search.state(), SearchState::Exhausted);
        assert!(search.next().is_none());
        let (nodes, conflicts) = search.statistics();
        assert!(nodes > conflicts);
    }

    #[test]
    fn test_b_longer_than_max_is_empty() {
        assert!(search(Family::B, 3, 1).is_empty());
    }
}
