// ABOUTME: Top-level error types for the export pipeline
// ABOUTME: Defines ExportError with structured context for every way an export can abort
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

//! # Export Error Types
//!
//! Structured errors for the export pipeline:
//! - `ExportError` - failures that abort an entire export run
//!
//! Per-category failures (a provider error or a page timeout while reading one
//! category) do not surface here; they are recorded in the run's
//! [`ExportOutcome`](crate::models::ExportOutcome) and the run continues with
//! the remaining categories.

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::providers::ProviderError;

/// Failures that abort an entire export run.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The health data store is not available on this system
    #[error("Health data is not available from provider '{provider}'")]
    Unsupported {
        /// Name of the provider that reported itself unavailable
        provider: String,
    },

    /// The user declined to share the requested categories
    #[error("Authorization denied for health data access")]
    AuthDenied,

    /// The authorization request itself failed before the user could answer
    #[error("Authorization request failed")]
    AuthFailed {
        /// Underlying provider error
        #[source]
        source: ProviderError,
    },

    /// The requested time range is inverted
    #[error("Invalid export range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested range start
        start: DateTime<Utc>,
        /// Requested range end
        end: DateTime<Utc>,
    },

    /// Creating or writing the export file failed
    #[error("Export file I/O failed at {path}")]
    Io {
        /// Path of the export file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// Create an I/O error carrying the export file path
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
