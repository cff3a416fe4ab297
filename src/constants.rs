// ABOUTME: System-wide constants and configuration values for the vitals export pipeline
// ABOUTME: Contains paging limits, timeout durations, and environment variable configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

//! # Constants Module
//!
//! Application constants and environment-based configuration values.
//! This module provides both hardcoded constants and environment variable configuration.

use std::env;

/// Numeric limits and thresholds
pub mod limits {
    /// Maximum samples a provider may deliver in a single page
    pub const MAX_PAGE_SIZE: usize = 1_000;

    /// Default page size requested from providers
    pub const DEFAULT_PAGE_SIZE: usize = 500;

    /// Default export window when no explicit range is given (days)
    pub const DEFAULT_EXPORT_WINDOW_DAYS: i64 = 730;
}

/// Timeout and duration constants
pub mod timeouts {
    /// How long the sequential reader waits for the first page of a category
    /// before abandoning it and moving on
    pub const PAGE_REPLY_TIMEOUT_SECS: u64 = 30;
}

/// Exporter and file defaults
pub mod defaults {
    /// Stem used when naming export files
    pub const EXPORT_FILE_PREFIX: &str = "vitals-export";

    /// Extension for newline-delimited `JSON` output
    pub const EXPORT_FILE_EXTENSION: &str = "ndjson";

    /// Unit label recorded when a quantity sample carries no unit of its own
    pub const FALLBACK_UNIT: &str = "count";
}

/// Service identity strings used in logs
pub mod service_names {
    /// Canonical service name for log attribution
    pub const VITALS_EXPORT: &str = "vitals-export";
}

/// Environment-based configuration
pub mod env_config {
    use super::env;

    /// Get export output directory from environment, if set
    #[must_use]
    pub fn export_dir() -> Option<String> {
        env::var("VITALS_EXPORT_DIR").ok()
    }

    /// Get export file prefix from environment, if set
    #[must_use]
    pub fn export_prefix() -> Option<String> {
        env::var("VITALS_EXPORT_PREFIX").ok()
    }

    /// Get page reply timeout in seconds from environment, if set and valid
    #[must_use]
    pub fn reply_timeout_secs() -> Option<u64> {
        env::var("VITALS_EXPORT_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
    }

    /// Get provider page limit from environment, if set and valid
    #[must_use]
    pub fn page_limit() -> Option<usize> {
        env::var("VITALS_EXPORT_PAGE_LIMIT")
            .ok()
            .and_then(|raw| raw.parse().ok())
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    }
}
