// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides exporter construction, time helpers, and NDJSON file readers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `vitals_export`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Once};

use chrono::{DateTime, TimeZone, Utc};

use vitals_export::config::ExportConfig;
use vitals_export::export::Exporter;
use vitals_export::models::TimeRange;
use vitals_export::providers::SyntheticProvider;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the test logging level; defaults to quiet
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Instant at `secs` seconds past the Unix epoch
pub fn instant(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// A range comfortably containing the sample instants used in these tests
pub fn test_range() -> TimeRange {
    TimeRange::new(instant(1_699_000_000), instant(1_701_000_000)).unwrap()
}

/// Exporter writing into `dir` with a short reply deadline
pub fn exporter_into(dir: &Path, provider: SyntheticProvider) -> Exporter {
    init_test_logging();
    let config = ExportConfig {
        output_dir: dir.to_path_buf(),
        reply_timeout_secs: 2,
        ..ExportConfig::default()
    };
    Exporter::new(Arc::new(provider), config)
}

/// Parse every line of an NDJSON file as a standalone JSON document
pub fn read_json_lines(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// The sorted key names of one parsed NDJSON line
pub fn keys_of(line: &serde_json::Value) -> Vec<String> {
    line.as_object().unwrap().keys().cloned().collect()
}
