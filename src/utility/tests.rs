// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::fs::{read_json_or_default, write_json_atomic};
use super::summary::{BatchFailures, Overflow};

fn failures(n: usize) -> BatchFailures {
    let mut batch = BatchFailures::new();
    for i in 1..=n {
        batch.push(&format!("repo{i}"), "boom");
    }
    batch
}

#[test]
fn test_summary_lines_caps_at_max() {
    insta::assert_snapshot!(failures(7).render(5, Overflow::Lines), @r"
    repo1: boom
    repo2: boom
    repo3: boom
    repo4: boom
    repo5: boom
    ...and 2 more.
    ");
}

#[test]
fn test_summary_inline_caps_at_max() {
    insta::assert_snapshot!(
        failures(5).render(3, Overflow::Inline),
        @"repo1: boom | repo2: boom | repo3: boom (+2 more)"
    );
}

#[test]
fn test_summary_without_overflow() {
    let batch = failures(2);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.render(3, Overflow::Inline), "repo1: boom | repo2: boom");
    assert!(BatchFailures::new().is_empty());
}

#[test]
fn test_json_missing_or_malformed_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let missing: Vec<String> = read_json_or_default(&dir.path().join("none.json"));
    assert!(missing.is_empty());

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{not json").unwrap();
    let malformed: Vec<String> = read_json_or_default(&bad);
    assert!(malformed.is_empty());
}

#[test]
fn test_write_json_atomic_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested/deeper/list.json");
    write_json_atomic(&target, &vec!["a", "b"]).unwrap();

    let text = std::fs::read_to_string(&target).unwrap();
    insta::assert_snapshot!(text, @r#"
    [
      "a",
      "b"
    ]
    "#);
    let back: Vec<String> = read_json_or_default(&target);
    assert_eq!(back, ["a", "b"]);
}
