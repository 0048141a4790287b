// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Offsets, families, and packed patterns.

pub mod family;
pub mod offset;
pub mod packed;

pub use family::{Family, Placement};
pub use offset::{Offset, OffsetCodec};
pub use packed::PackedPattern;

use std::fmt;

use crate::error::{LacingError, Result};

/// The offsets assigned by the search, innermost (index 0) first.
///
/// For A the innermost term is the radial center; for B it is the spoke next
/// to the mirror axis. Text form writes the outermost term first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct OffsetSequence(Vec<Offset>);

impl OffsetSequence {
    pub fn new(offsets: Vec<Offset>) -> Self {
        Self(offsets)
    }

    pub fn as_slice(&self) -> &[Offset] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<&[i32]> for OffsetSequence {
    type Error = LacingError;

    fn try_from(values: &[i32]) -> Result<Self> {
        values
            .iter()
            .map(|&value| Offset::try_from(value))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for OffsetSequence {
    /// Comma-separated, outermost first: `[0, 1, -2]` is written `-2,1,0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, offset) in self.0.iter().rev().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}
