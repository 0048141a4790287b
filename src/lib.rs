// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enumeration of lacing patterns for wire-spoke wheels.
//!
//! A lacing connects every hub hole to a distinct rim hole with a straight
//! spoke. A pattern is a short repeating unit of spoke *offsets* (rim holes
//! between a spoke's hub position and its rim position); it is valid when,
//! repeated around the wheel, every rim hole receives exactly one spoke.
//!
//! # Architecture
//!
//! ## Families
//!
//! Patterns fall into three families, searched in this order:
//! - **A**: odd length, mirror-symmetric about one radial center spoke
//! - **B**: even length, mirror-symmetric with no center spoke
//! - **C**: no enforced symmetry
//!
//! ## Search
//!
//! For each family, [`LacingSearch`] walks every offset sequence of every
//! length up to the maximum with explicit push/pop backtracking, pruning as
//! soon as two spokes would share a rim hole.
//!
//! ## Sieve
//!
//! Every complete sequence is packed into an integer and checked against a
//! dense bitset. Accepting a pattern marks all its rotations, its mirror
//! image (Family C) and every periodic extension up to the maximum length,
//! so each equivalence class is reported once. Short units are also tried
//! with radial "padding" spokes appended, so they fit larger wheels.
//!
//! ## Output
//!
//! Each accepted pattern is appended to a text file as
//! `<offsets><family><padding> <total length>`, e.g. `-1,0A 3`.
//!
//! # Example
//!
//! ```
//! use spoke_lacing::{Family, LacingConfig, LacingContext};
//!
//! let config = LacingConfig::new(2, 3).unwrap();
//! let mut ctx = LacingContext::new(config, Vec::new()).unwrap();
//! ctx.run(&[Family::A, Family::B, Family::C]).unwrap();
//! let output = String::from_utf8(ctx.into_writer()).unwrap();
//! assert_eq!(output, "0A 1\n-1,0A 3\n1B 2\n");
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod pattern;
pub mod rim;
pub mod search;
pub mod sieve;

// Re-export commonly used types
pub use config::LacingConfig;
pub use context::LacingContext;
pub use error::{LacingError, Result};
pub use pattern::{Family, Offset, OffsetCodec, OffsetSequence, PackedPattern};
pub use search::LacingSearch;
pub use sieve::Sieve;
