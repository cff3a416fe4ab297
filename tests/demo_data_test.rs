// ABOUTME: End-to-end export tests over the generated synthetic demo data set
// ABOUTME: Validates authorization, per-category coverage, ordering, and unit handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashMap;

use common::{exporter_into, read_json_lines};

use vitals_export::models::TimeRange;
use vitals_export::providers::SyntheticProvider;

#[tokio::test]
async fn test_authorize_then_export_covers_every_category() {
    let dir = tempfile::tempdir().unwrap();
    let provider = SyntheticProvider::with_demo_data(7, 42);
    let exporter = exporter_into(dir.path(), provider);

    exporter.authorize().await.unwrap();
    let outcome = exporter.export(TimeRange::last_days(8)).await.unwrap();

    assert!(outcome.is_complete());
    for entry in &outcome.categories {
        assert!(
            entry.records_written > 0,
            "{} exported no records",
            entry.category
        );
    }

    let lines = read_json_lines(&outcome.path);
    assert_eq!(lines.len() as u64, outcome.total_records());

    // Per-category line counts match the reported outcome
    let mut per_type: HashMap<String, u64> = HashMap::new();
    for line in &lines {
        *per_type
            .entry(line["type"].as_str().unwrap().to_owned())
            .or_default() += 1;
    }
    for entry in &outcome.categories {
        assert_eq!(
            per_type.get(&entry.category.to_string()).copied(),
            Some(entry.records_written),
            "line count mismatch for {}",
            entry.category
        );
    }
}

#[tokio::test]
async fn test_demo_lines_are_ordered_within_each_category() {
    let dir = tempfile::tempdir().unwrap();
    let provider = SyntheticProvider::with_demo_data(5, 7);
    let exporter = exporter_into(dir.path(), provider);
    let outcome = exporter.export(TimeRange::last_days(6)).await.unwrap();

    let lines = read_json_lines(&outcome.path);
    let mut last_start: HashMap<&str, i64> = HashMap::new();
    for line in &lines {
        let kind = line["type"].as_str().unwrap();
        let start = line["startDate"].as_i64().unwrap();
        let end = line["endDate"].as_i64().unwrap();
        assert!(start <= end, "{kind} line has an inverted interval");
        if let Some(previous) = last_start.get(kind) {
            assert!(
                start >= *previous,
                "{kind} lines out of order: {start} after {previous}"
            );
        }
        last_start.insert(kind, start);
    }
}

#[tokio::test]
async fn test_demo_quantities_carry_canonical_units_and_ranges() {
    let dir = tempfile::tempdir().unwrap();
    let provider = SyntheticProvider::with_demo_data(3, 21);
    let exporter = exporter_into(dir.path(), provider);
    let outcome = exporter.export(TimeRange::last_days(4)).await.unwrap();

    for line in &read_json_lines(&outcome.path) {
        match line["type"].as_str().unwrap() {
            "HeartRate" => {
                assert_eq!(line["unit"], "count/min");
                let bpm = line["value"].as_f64().unwrap();
                assert!((30.0..=220.0).contains(&bpm), "implausible bpm {bpm}");
            }
            "HRV" => assert_eq!(line["unit"], "ms"),
            "RespiratoryRate" => assert_eq!(line["unit"], "breaths/min"),
            "OxygenSaturation" => {
                assert_eq!(line["unit"], "%");
                let percent = line["value"].as_f64().unwrap();
                assert!(
                    (80.0..=100.0).contains(&percent),
                    "oxygen saturation {percent} is not a percentage"
                );
            }
            "SleepAnalysis" => {
                let stage = line["metadata"]["stage"].as_str().unwrap();
                assert!(["InBed", "Asleep", "Awake"].contains(&stage));
            }
            other => panic!("unexpected record type {other}"),
        }
    }
}
