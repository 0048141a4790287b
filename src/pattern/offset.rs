// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Spoke offsets and their sign-magnitude field encoding.
//!
//! An offset is the signed number of rim-hole steps between a spoke's hub
//! position and its rim position. In a packed pattern each offset occupies
//! `b` bits: the top bit is the sign, the rest the magnitude.
//!
//! ```text
//! b = 3:   field  000 001 010 011 100 101 110 111
//!          value    0   1   2   3  --  -1  -2  -3
//! ```
//!
//! Field `100` ("negative zero") is the **unused** sentinel. It is never a
//! legal offset: zero has exactly one encoding, which matters when packed
//! patterns are compared for equality in the sieve.
//!
//! # Examples
//!
//! ```
//! use spoke_lacing::pattern::{Offset, OffsetCodec};
//!
//! let codec = OffsetCodec::new(3);
//! let field = codec.encode(Offset::new(-2)).unwrap();
//! assert_eq!(field, 0b110);
//! assert_eq!(codec.decode(field), Some(Offset::new(-2)));
//! assert_eq!(codec.decode(codec.unused()), None);
//! assert_eq!(codec.negate(codec.encode(Offset::ZERO).unwrap()), 0);
//! ```

use std::fmt;

use crate::config::LacingConfig;
use crate::error::{LacingError, Result};

/// A signed spoke offset.
///
/// Offsets are stored in an `i8`; the widest supported field (8 bits) has a
/// largest magnitude of 127.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Offset(i8);

impl Offset {
    /// The radial spoke.
    pub const ZERO: Offset = Offset(0);

    pub const fn new(value: i8) -> Self {
        Self(value)
    }

    pub fn value(self) -> i32 {
        self.0 as i32
    }

    pub fn magnitude(self) -> u32 {
        self.0.unsigned_abs() as u32
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// The mirror-image offset.
    pub fn negate(self) -> Self {
        Self(-self.0)
    }
}

impl TryFrom<i32> for Offset {
    type Error = LacingError;

    fn try_from(value: i32) -> Result<Self> {
        i8::try_from(value)
            .map(Self)
            .map_err(|_| LacingError::OffsetOutOfRange {
                value,
                max: i8::MAX as i32,
            })
    }
}

impl fmt::Display for Offset {
    /// `-` prefix when negative, plain digits otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts offsets to and from `b`-bit sign-magnitude fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetCodec {
    bits: u32,
}

impl OffsetCodec {
    /// Codec for `bits`-wide fields (2..=8).
    pub fn new(bits: u32) -> Self {
        debug_assert!((2..=8).contains(&bits), "unsupported offset width {bits}");
        Self { bits }
    }

    pub fn from_config(config: &LacingConfig) -> Self {
        Self::new(config.offset_bits())
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// The sign bit, which on its own is the unused sentinel.
    pub fn unused(&self) -> u64 {
        1 << (self.bits - 1)
    }

    /// All bits of one field.
    pub fn field_mask(&self) -> u64 {
        (1 << self.bits) - 1
    }

    fn magnitude_mask(&self) -> u64 {
        self.unused() - 1
    }

    pub fn max_magnitude(&self) -> i32 {
        self.magnitude_mask() as i32
    }

    /// Encode a legal offset.
    pub fn encode(&self, offset: Offset) -> Result<u64> {
        let magnitude = offset.magnitude() as u64;
        if magnitude > self.magnitude_mask() {
            return Err(LacingError::OffsetOutOfRange {
                value: offset.value(),
                max: self.max_magnitude(),
            });
        }
        if offset.is_negative() {
            Ok(self.unused() | magnitude)
        } else {
            Ok(magnitude)
        }
    }

    /// Decode a field; the unused sentinel has no offset.
    pub fn decode(&self, field: u64) -> Option<Offset> {
        let field = field & self.field_mask();
        if field == self.unused() {
            return None;
        }
        let magnitude = (field & self.magnitude_mask()) as i8;
        if field & self.unused() != 0 {
            Some(Offset::new(-magnitude))
        } else {
            Some(Offset::new(magnitude))
        }
    }

    /// Flip the sign bit, leaving zero (and the sentinel) untouched.
    pub fn negate(&self, field: u64) -> u64 {
        if field & self.magnitude_mask() == 0 {
            field
        } else {
            field ^ self.unused()
        }
    }

    /// The next field in search order, skipping the sentinel.
    ///
    /// `None` starts the sequence at zero; overflow past the last field
    /// returns `None`.
    pub fn next(&self, field: Option<u64>) -> Option<u64> {
        let mut next = match field {
            None => 0,
            Some(field) => field + 1,
        };
        if next == self.unused() {
            next += 1;
        }
        (next <= self.field_mask()).then_some(next)
    }

    /// Every legal offset, in search order.
    pub fn offsets(&self) -> impl Iterator<Item = Offset> + '_ {
        std::iter::successors(self.next(None), move |&field| self.next(Some(field)))
            .filter_map(move |field| self.decode(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_width_3() {
        let codec = OffsetCodec::new(3);
        let expected = [(0, 0b000), (1, 0b001), (3, 0b011), (-1, 0b101), (-3, 0b111)];
        for (value, field) in expected {
            assert_eq!(codec.encode(Offset::new(value)).unwrap(), field, "{value}");
        }
    }

    #[test]
    fn test_encode_out_of_range() {
        let codec = OffsetCodec::new(3);
        assert!(matches!(
            codec.encode(Offset::new(4)),
            Err(LacingError::OffsetOutOfRange { value: 4, max: 3 })
        ));
        assert!(codec.encode(Offset::new(-4)).is_err());
        assert!(OffsetCodec::new(2).encode(Offset::new(2)).is_err());
    }

    #[test]
    fn test_unused_never_decodes() {
        for bits in 2..=8 {
            let codec = OffsetCodec::new(bits);
            assert_eq!(codec.decode(codec.unused()), None);
        }
    }

    #[test]
    fn test_negate_zero_keeps_unique_form() {
        let codec = OffsetCodec::new(3);
        assert_eq!(codec.negate(0), 0);
        assert_eq!(codec.negate(codec.unused()), codec.unused());
        assert_eq!(codec.negate(0b010), 0b110);
        assert_eq!(codec.negate(0b110), 0b010);
    }

    #[test]
    fn test_search_order() {
        let codec = OffsetCodec::new(3);
        let values: Vec<i32> = codec.offsets().map(Offset::value).collect();
        assert_eq!(values, vec![0, 1, 2, 3, -1, -2, -3]);

        let codec = OffsetCodec::new(2);
        let values: Vec<i32> = codec.offsets().map(Offset::value).collect();
        assert_eq!(values, vec![0, 1, -1]);
    }

    #[test]
    fn test_next_skips_sentinel_and_overflows() {
        let codec = OffsetCodec::new(3);
        assert_eq!(codec.next(None), Some(0));
        assert_eq!(codec.next(Some(0b011)), Some(0b101));
        assert_eq!(codec.next(Some(0b111)), None);
    }

    #[test]
    fn test_offset_from_wide_value() {
        assert_eq!(Offset::try_from(-3).unwrap(), Offset::new(-3));
        assert_eq!(Offset::try_from(127).unwrap().value(), 127);
        assert!(matches!(
            Offset::try_from(128),
            Err(LacingError::OffsetOutOfRange { value: 128, max: 127 })
        ));
        assert!(Offset::try_from(-200).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Offset::new(-3).to_string(), "-3");
        assert_eq!(Offset::ZERO.to_string(), "0");
        assert_eq!(Offset::new(2).to_string(), "2");
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(bits in 2u32..=8, raw in -127i8..=127) {
            let codec = OffsetCodec::new(bits);
            let offset = Offset::new(raw);
            match codec.encode(offset) {
                Ok(field) => {
                    prop_assert_ne!(field, codec.unused());
                    prop_assert_eq!(codec.decode(field), Some(offset));
                }
                Err(_) => prop_assert!(i32::from(raw).abs() > codec.max_magnitude()),
            }
        }

        #[test]
        fn negate_matches_offset_negation(bits in 2u32..=8, raw in -127i8..=127) {
            let codec = OffsetCodec::new(bits);
            let offset = Offset::new(raw);
            if let Ok(field) = codec.encode(offset) {
                prop_assert_eq!(codec.decode(codec.negate(field)), Some(offset.negate()));
            }
        }
    }
}
