// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Properties of a whole enumeration run at the default size
//! (offsets up to +/-3, patterns up to 6 spokes).

mod common;

use std::collections::{HashMap, HashSet};

use common::{is_lacing, mirror, rotations, run_to_string, unpack, Unpacked, ALL};
use spoke_lacing::Family;

fn default_run() -> Vec<String> {
    run_to_string(3, 6, &ALL).lines().map(String::from).collect()
}

#[test]
fn test_default_run_size() {
    let lines = default_run();
    assert_eq!(lines.len(), 295);
    let count = |family: Family| lines.iter().filter(|line| unpack(line).family == family).count();
    assert_eq!(count(Family::A), 24);
    assert_eq!(count(Family::B), 46);
    assert_eq!(count(Family::C), 225);
}

#[test]
fn test_default_run_starts_with_a() {
    let lines = default_run();
    assert_eq!(
        &lines[..6],
        &["0A 1", "2,0A 3", "2,0A1 4", "2,0A2 5", "2,0A3 6", "3,0A 3"]
    );
}

#[test]
fn test_every_line_is_a_lacing() {
    for line in default_run() {
        let Unpacked {
            full, total_length, ..
        } = unpack(&line);
        assert_eq!(full.len(), total_length, "{line}");
        assert!(total_length <= 6, "{line}");
        assert!(is_lacing(&full), "{line}");
    }
}

#[test]
fn test_no_two_lines_are_rotations() {
    let mut owner: HashMap<Vec<i32>, String> = HashMap::new();
    for line in default_run() {
        let full = unpack(&line).full;
        for rotation in rotations(&full) {
            if let Some(first) = owner.get(&rotation) {
                assert_eq!(first, &line, "{line} is a rotation of {first}");
            }
            owner.insert(rotation, line.clone());
        }
    }
}

#[test]
fn test_no_line_repeats_a_shorter_line() {
    let lines = default_run();
    let units: HashSet<Vec<i32>> = lines
        .iter()
        .flat_map(|line| rotations(&unpack(line).full))
        .collect();
    for line in &lines {
        let full = unpack(line).full;
        for period in 1..full.len() {
            if full.len() % period == 0 && full.chunks(period).all(|c| c == &full[..period]) {
                assert!(!units.contains(&full[..period]), "{line} repeats a shorter pattern");
            }
        }
    }
}

#[test]
fn test_c_mirror_images_not_reported() {
    let lines = default_run();
    let all: HashMap<Vec<i32>, String> = lines
        .iter()
        .flat_map(|line| {
            rotations(&unpack(line).full)
                .into_iter()
                .map(move |rotation| (rotation, line.clone()))
        })
        .collect();
    for line in lines.iter().filter(|line| line.contains('C')) {
        let image = mirror(&unpack(line).full);
        if let Some(other) = all.get(&image) {
            assert_eq!(other, line, "{line} and {other} are mirror images");
        }
    }
}

#[test]
fn test_radial_reported_once() {
    let lines = default_run();
    let radial: Vec<&String> = lines
        .iter()
        .filter(|line| unpack(line).full.iter().all(|&v| v == 0))
        .collect();
    assert_eq!(radial, vec!["0A 1"]);
}

#[test]
fn test_offsets_stay_in_range() {
    for line in default_run() {
        let Unpacked { full, .. } = unpack(&line);
        assert!(full.iter().all(|v| v.abs() <= 3), "{line}");
        // Negative zero would be the unused sentinel leaking out.
        assert!(!line.contains("-0"), "{line}");
    }
}

#[test]
fn test_symmetric_families_are_symmetric() {
    for line in default_run() {
        let Unpacked { family, padding, full, .. } = unpack(&line);
        if family == Family::C {
            continue;
        }
        let unit = &full[..full.len() - padding];
        assert_eq!(mirror(unit), unit, "{line}");
        if family == Family::A {
            assert_eq!(unit[unit.len() / 2], 0, "{line} has a non-radial center");
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    assert_eq!(run_to_string(3, 6, &ALL), run_to_string(3, 6, &ALL));
}
