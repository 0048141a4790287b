// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Run context: everything one enumeration run owns.
//!
//! The LacingContext combines:
//! - the configuration and offset codec (fixed for the run)
//! - the sieve (grows as patterns are accepted, never shrinks)
//! - the output emitter
//! - statistics
//!
//! Families share the sieve and must run in order A, B, C: symmetric
//! patterns claim their classes first, and C only reports what is left.
//! Independent contexts share nothing, so tests can run several side by
//! side, each with a fresh sieve.

pub mod statistics;

use std::io::Write;

use tracing::{debug, info};

use crate::config::LacingConfig;
use crate::error::Result;
use crate::output::{Emitter, LacingRecord};
use crate::pattern::{Family, Offset, OffsetCodec, OffsetSequence};
use crate::rim::replay;
use crate::search::{LacingSearch, SearchState};
use crate::sieve::{images, Sieve};
use statistics::{Counters, Statistics};

/// State of one enumeration run.
#[derive(Debug)]
pub struct LacingContext<W: Write> {
    config: LacingConfig,
    codec: OffsetCodec,
    sieve: Sieve,
    emitter: Emitter<W>,
    statistics: Statistics,
}

impl<W: Write> LacingContext<W> {
    /// Allocate the sieve and wrap the output sink.
    pub fn new(config: LacingConfig, writer: W) -> Result<Self> {
        info!(
            max_offset = config.max_offset(),
            max_length = config.max_length(),
            "lacing search configured"
        );
        info!(
            kib = config.sieve_bytes() / 1024,
            words = config.sieve_words(),
            "allocating sieve"
        );
        Ok(Self {
            config,
            codec: OffsetCodec::from_config(&config),
            sieve: Sieve::new(&config)?,
            emitter: Emitter::new(writer),
            statistics: Statistics::new(),
        })
    }

    pub fn sieve(&self) -> &Sieve {
        &self.sieve
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Run the given families, always in A, B, C order, each at most once.
    pub fn run(&mut self, families: &[Family]) -> Result<u64> {
        let mut ordered = families.to_vec();
        ordered.sort();
        ordered.dedup();
        let mut accepted = 0;
        for family in ordered {
            accepted += self.run_family(family)?;
        }
        self.emitter.flush()?;
        info!(lines = self.emitter.lines(), "pattern output flushed");
        Ok(accepted)
    }

    /// Search one family to exhaustion, emitting every new pattern.
    ///
    /// Returns the number of patterns written.
    pub fn run_family(&mut self, family: Family) -> Result<u64> {
        info!(%family, "searching for group patterns");
        let before = self.statistics.get(family, Counters::Accepted);
        let mut search = LacingSearch::new(family, self.codec, self.config.max_length());
        for sequence in search.by_ref() {
            let sequence = sequence?;
            self.consider(family, &sequence)?;
        }
        debug_assert_eq!(search.state(), SearchState::Exhausted);
        let (nodes, conflicts) = search.statistics();
        self.statistics.add(family, Counters::Nodes, nodes);
        self.statistics.add(family, Counters::Conflicts, conflicts);

        let found = self.statistics.get(family, Counters::Accepted) - before;
        info!(
            %family,
            found,
            candidates = self.statistics.get(family, Counters::Candidates),
            duplicates = self.statistics.get(family, Counters::Duplicates),
            nodes,
            sieve_marked = self.sieve.marked(),
            "found group patterns"
        );
        Ok(found)
    }

    /// Apply the acceptance policy to one complete sequence, for every
    /// padding that still fits.
    fn consider(&mut self, family: Family, sequence: &OffsetSequence) -> Result<()> {
        self.statistics.increment(family, Counters::Candidates);
        if family.is_degenerate(sequence.as_slice()) {
            self.statistics.increment(family, Counters::Degenerate);
            return Ok(());
        }

        let mut full = family.expand(sequence.as_slice());
        let length = full.len();
        for padding in 0..=self.config.max_length() - length {
            full.resize(length + padding, Offset::ZERO);
            // Padding shifts where the unit wraps, so it can collide.
            if replay(&full).is_err() {
                self.statistics.increment(family, Counters::PaddingConflicts);
                continue;
            }

            let (image, mirror) = images(family, sequence.as_slice(), self.codec, padding)?;
            let accepted = match mirror {
                Some(mirror) => self.sieve.accept(&[image, mirror]),
                None => self.sieve.accept(&[image]),
            };
            if !accepted {
                self.statistics.increment(family, Counters::Duplicates);
                continue;
            }

            let record = LacingRecord {
                family,
                sequence: sequence.clone(),
                padding,
            };
            debug!(pattern = %record, "accepted");
            self.statistics.increment(family, Counters::Accepted);
            self.emitter.emit(&record)?;
        }
        Ok(())
    }

    /// Finish the run, returning the output sink.
    pub fn into_writer(self) -> W {
        self.emitter.into_inner()
    }
}
