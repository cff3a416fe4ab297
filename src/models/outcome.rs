// ABOUTME: Export run outcome types reported back to callers
// ABOUTME: ExportOutcome with per-category status, counts, and the session id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use super::category::Category;

/// Result of one export run.
///
/// An outcome exists even when some categories failed: per-category
/// failures are isolated and recorded here rather than aborting the run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    /// Identifier correlating this run's log lines, file name, and outcome
    pub session_id: Uuid,
    /// Path of the written export file
    pub path: PathBuf,
    /// One entry per category, in processing order
    pub categories: Vec<CategoryOutcome>,
}

/// What happened to one category during an export run.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOutcome {
    /// Which category this entry describes
    pub category: Category,
    /// Records written to the file for this category
    pub records_written: u64,
    /// How the category's read ended
    pub status: CategoryStatus,
}

/// Terminal state of one category read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CategoryStatus {
    /// All pages were delivered and written
    Completed,
    /// The 30 second page deadline expired; whatever arrived was kept
    TimedOut,
    /// The provider reported an error for this category
    Failed {
        /// Human-readable provider error
        message: String,
    },
}

impl ExportOutcome {
    /// Total records written across all categories
    #[must_use]
    pub fn total_records(&self) -> u64 {
        self.categories.iter().map(|c| c.records_written).sum()
    }

    /// Whether every category completed without timeout or failure
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.categories
            .iter()
            .all(|c| c.status == CategoryStatus::Completed)
    }
}
