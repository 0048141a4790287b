// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pattern output.
//!
//! Each accepted pattern becomes one line:
//!
//! ```text
//! <offsets><family><padding if non-zero> <total length>
//! -1,0A 3
//! 1B2 4
//! ```
//!
//! Offsets are written outermost first (for A, the center is last), which is
//! the form the pattern-string parser reads back: it mirrors A and B lines
//! around their last term and appends `padding` radial spokes.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::error::{LacingError, Result};
use crate::pattern::{Family, OffsetSequence};

/// One accepted pattern, as written to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LacingRecord {
    pub family: Family,
    pub sequence: OffsetSequence,
    pub padding: usize,
}

impl LacingRecord {
    /// Spokes in the padded pattern: the smallest wheel it fits.
    pub fn total_length(&self) -> usize {
        self.family.full_length(self.sequence.len()) + self.padding
    }

    /// Pattern name without the length, e.g. `2,-1B1`.
    pub fn name(&self) -> String {
        let mut name = format!("{}{}", self.sequence, self.family.letter());
        if self.padding > 0 {
            name.push_str(&self.padding.to_string());
        }
        name
    }
}

impl fmt::Display for LacingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.total_length())
    }
}

/// Open a new pattern file, refusing to touch an existing one.
///
/// The file is returned unbuffered: every line reaches the OS as it is
/// emitted, so an interrupted run keeps everything reported so far.
pub fn create_pattern_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|error| match error.kind() {
            io::ErrorKind::AlreadyExists => LacingError::OutputExists {
                path: path.to_path_buf(),
            },
            _ => LacingError::Io(error),
        })
}

/// Append-only sink for pattern lines.
#[derive(Debug)]
pub struct Emitter<W: Write> {
    writer: W,
    lines: u64,
}

impl<W: Write> Emitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Write one record as a line.
    pub fn emit(&mut self, record: &LacingRecord) -> Result<()> {
        writeln!(self.writer, "{record}")?;
        self.lines += 1;
        Ok(())
    }

    /// Lines written so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
