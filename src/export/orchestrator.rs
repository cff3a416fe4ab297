// ABOUTME: Export session orchestrator running all categories sequentially
// ABOUTME: Owns authorization, file creation, per-category isolation, and the outcome report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::ExportConfig;
use crate::errors::ExportError;
use crate::models::{Category, CategoryOutcome, CategoryStatus, ExportOutcome, TimeRange};
use crate::providers::HealthProvider;

use super::reader::{read_category, CategoryReadError, ReaderConfig};
use super::writer::NdjsonWriter;

/// Runs export sessions against one health data provider.
///
/// Categories are read strictly one after another into a single export file.
/// A provider failure or timeout in one category never blocks the rest: it
/// is recorded in the outcome and the run moves on. Only filesystem errors
/// and a dead provider abort a session.
pub struct Exporter {
    provider: Arc<dyn HealthProvider>,
    config: ExportConfig,
}

impl Exporter {
    /// Create an exporter over `provider` with the given settings
    #[must_use]
    pub fn new(provider: Arc<dyn HealthProvider>, config: ExportConfig) -> Self {
        Self { provider, config }
    }

    /// Confirm the provider is present and the user grants access.
    ///
    /// Must succeed before [`Self::export`] is called; the provider is free
    /// to prompt the user during this call.
    ///
    /// # Errors
    /// Returns [`ExportError::Unsupported`] when the provider reports no
    /// health data store, [`ExportError::AuthFailed`] when the authorization
    /// request itself errors, and [`ExportError::AuthDenied`] when the user
    /// declines.
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn authorize(&self) -> Result<(), ExportError> {
        if !self.provider.is_available().await {
            return Err(ExportError::Unsupported {
                provider: self.provider.name().to_owned(),
            });
        }

        let granted = self
            .provider
            .request_authorization(&Category::ALL)
            .await
            .map_err(|source| ExportError::AuthFailed { source })?;
        if !granted {
            return Err(ExportError::AuthDenied);
        }

        info!(
            "{provider} granted read access for all export categories",
            provider = self.provider.name()
        );
        Ok(())
    }

    /// Export every category within `range` to a freshly named NDJSON file.
    ///
    /// Categories run in their fixed order, each isolated from the others:
    /// a provider error or reply timeout is recorded in the returned
    /// [`ExportOutcome`] and the remaining categories still run. The file
    /// contains every record written before a later failure, since lines
    /// are flushed as they are appended.
    ///
    /// # Errors
    /// Returns [`ExportError::Io`] when the export file cannot be created
    /// or written; per-category provider trouble is reported in the
    /// outcome instead.
    #[instrument(skip(self, range), fields(provider = self.provider.name()))]
    pub async fn export(&self, range: TimeRange) -> Result<ExportOutcome, ExportError> {
        let session_id = Uuid::new_v4();
        let path = self.config.export_file_path(Utc::now(), session_id);
        info!(session_id = %session_id, path = %path.display(), "starting export session");

        let mut writer = NdjsonWriter::create(&path)
            .await
            .map_err(|source| ExportError::io(&path, source))?;
        let reader_config = ReaderConfig {
            reply_timeout: self.config.reply_timeout(),
            page_limit: self.config.page_limit,
        };

        let mut categories = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let before = writer.record_count();
            let status = match read_category(
                self.provider.as_ref(),
                category,
                range,
                &reader_config,
                &mut writer,
            )
            .await
            {
                Ok(outcome) if outcome.timed_out => CategoryStatus::TimedOut,
                Ok(_) => CategoryStatus::Completed,
                Err(CategoryReadError::Provider(error)) => {
                    warn!(category = %category, "category failed, continuing with the rest: {error}");
                    CategoryStatus::Failed {
                        message: error.to_string(),
                    }
                }
                Err(CategoryReadError::Write(source)) => {
                    return Err(ExportError::io(&path, source));
                }
            };

            let records_written = writer.record_count() - before;
            info!(category = %category, records_written, "category finished");
            categories.push(CategoryOutcome {
                category,
                records_written,
                status,
            });
        }

        let dropped = writer.dropped_count();
        if dropped > 0 {
            warn!("{dropped} records were dropped for carrying non-finite values");
        }

        let total = writer
            .finish()
            .await
            .map_err(|source| ExportError::io(&path, source))?;
        info!(session_id = %session_id, total, path = %path.display(), "export session finished");

        Ok(ExportOutcome {
            session_id,
            path,
            categories,
        })
    }
}
