// ABOUTME: Export configuration covering output location, file naming, and paging
// ABOUTME: Loads settings from VITALS_EXPORT_* environment variables with sane defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{defaults, env_config, timeouts};

/// Settings for a single export run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the export file is written into
    pub output_dir: PathBuf,
    /// Leading component of the export file name
    pub file_prefix: String,
    /// Seconds to wait for each category's first page reply
    pub reply_timeout_secs: u64,
    /// Maximum samples requested per page, when set
    pub page_limit: Option<usize>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs::document_dir().unwrap_or_else(|| PathBuf::from(".")),
            file_prefix: defaults::EXPORT_FILE_PREFIX.to_owned(),
            reply_timeout_secs: timeouts::PAGE_REPLY_TIMEOUT_SECS,
            page_limit: None,
        }
    }
}

impl ExportConfig {
    /// Load export configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            output_dir: env_config::export_dir().map_or(base.output_dir, PathBuf::from),
            file_prefix: env_config::export_prefix().unwrap_or(base.file_prefix),
            reply_timeout_secs: env_config::reply_timeout_secs().unwrap_or(base.reply_timeout_secs),
            page_limit: env_config::page_limit().or(base.page_limit),
        }
    }

    /// Deadline applied to each category's page replies
    #[must_use]
    pub const fn reply_timeout(&self) -> Duration {
        Duration::from_secs(self.reply_timeout_secs)
    }

    /// Full path of the export file for the session stamped at `at`
    ///
    /// The name carries a millisecond timestamp for readability and the
    /// session id for uniqueness: two sessions never share a path, even
    /// when they start within the same millisecond.
    #[must_use]
    pub fn export_file_path(&self, at: DateTime<Utc>, session_id: Uuid) -> PathBuf {
        let stamp = at.format("%Y%m%dT%H%M%S%.3fZ");
        let prefix = &self.file_prefix;
        let extension = defaults::EXPORT_FILE_EXTENSION;
        self.output_dir
            .join(format!("{prefix}-{stamp}-{session_id}.{extension}"))
    }
}
