// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use spoke_lacing::pattern::Offset;
use spoke_lacing::rim::replay;
use spoke_lacing::{Family, LacingConfig, LacingContext};

/// Run the enumeration into memory and return the output text.
pub fn run_to_string(offset_bits: u32, max_length: usize, families: &[Family]) -> String {
    let config = LacingConfig::new(offset_bits, max_length).expect("valid config");
    let mut ctx = LacingContext::new(config, Vec::new()).expect("sieve allocates");
    ctx.run(families).expect("run completes");
    String::from_utf8(ctx.into_writer()).expect("output is UTF-8")
}

pub const ALL: [Family; 3] = [Family::A, Family::B, Family::C];

/// One output line read back the way the pattern-string parser reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unpacked {
    pub family: Family,
    pub padding: usize,
    pub total_length: usize,
    /// Full padded pattern, hub `k` at index `k`.
    pub full: Vec<i32>,
}

/// Expand a line: `-1,0A1 4` → A, padding 1, `[-1, 0, 1, 0]`.
///
/// A mirrors around its last term (the center), B around the gap after its
/// last term, C is used as written; then `padding` zeros are appended.
pub fn unpack(line: &str) -> Unpacked {
    let (name, total) = line.split_once(' ').expect("name and length");
    let total_length: usize = total.parse().expect("numeric length");
    let split = name
        .find(|c: char| matches!(c, 'A' | 'B' | 'C'))
        .expect("family letter present");
    let family = match &name[split..split + 1] {
        "A" => Family::A,
        "B" => Family::B,
        _ => Family::C,
    };
    let padding = match &name[split + 1..] {
        "" => 0,
        digits => digits.parse().expect("numeric padding"),
    };
    let written: Vec<i32> = name[..split]
        .split(',')
        .map(|term| term.parse().expect("numeric offset"))
        .collect();

    let mut full = written.clone();
    match family {
        Family::A => full.extend(written.iter().rev().skip(1).map(|v| -v)),
        Family::B => full.extend(written.iter().rev().map(|v| -v)),
        Family::C => {}
    }
    full.extend(std::iter::repeat(0).take(padding));
    Unpacked {
        family,
        padding,
        total_length,
        full,
    }
}

pub fn offsets(values: &[i32]) -> Vec<Offset> {
    values.iter().map(|&v| Offset::try_from(v).unwrap()).collect()
}

pub fn is_lacing(values: &[i32]) -> bool {
    replay(&offsets(values)).is_ok()
}

pub fn rotations(values: &[i32]) -> Vec<Vec<i32>> {
    (0..values.len())
        .map(|turn| {
            let mut rotated = values.to_vec();
            rotated.rotate_left(turn);
            rotated
        })
        .collect()
}

pub fn mirror(values: &[i32]) -> Vec<i32> {
    values.iter().rev().map(|v| -v).collect()
}

/// Count equivalence classes of C-family lacings by brute force.
///
/// Walks every pattern of every length up to `max_length` with offsets in
/// `-max_offset..=max_offset`, skipping invalid lacings and patterns whose
/// offsets all share one strict sign. A pattern starts a new class unless it
/// is a rotation, mirror image, or repeat of one already counted.
pub fn brute_force_c_classes(max_offset: i32, max_length: usize) -> usize {
    let mut seen: HashSet<Vec<i32>> = HashSet::new();
    let mut classes = 0;
    for length in 1..=max_length {
        for pattern in all_patterns(max_offset, length) {
            if !is_lacing(&pattern)
                || pattern.iter().all(|&v| v > 0)
                || pattern.iter().all(|&v| v < 0)
                || seen.contains(&pattern)
            {
                continue;
            }
            classes += 1;
            for image in [pattern.clone(), mirror(&pattern)] {
                for times in 1..=max_length / length {
                    let repeated = image.repeat(times);
                    seen.extend(rotations(&repeated));
                }
            }
        }
    }
    classes
}

fn all_patterns(max_offset: i32, length: usize) -> Vec<Vec<i32>> {
    let mut patterns = vec![Vec::new()];
    for _ in 0..length {
        patterns = patterns
            .into_iter()
            .flat_map(|prefix| {
                (-max_offset..=max_offset).map(move |v| {
                    let mut next = prefix.clone();
                    next.push(v);
                    next
                })
            })
            .collect();
    }
    patterns
}
