// ABOUTME: NDJSON export file writer with per-line durability
// ABOUTME: Defines the RecordSink seam between the category reader and the filesystem
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::models::ExportRecord;

/// Destination for shaped export records.
///
/// The category reader is written against this seam so its paging and
/// timeout behavior can be exercised without touching the filesystem.
#[async_trait]
pub trait RecordSink: Send {
    /// Deliver one shaped record.
    ///
    /// # Errors
    /// Returns any I/O error raised by the underlying destination.
    async fn deliver(&mut self, record: ExportRecord) -> io::Result<()>;
}

/// Writes export records to a file, one JSON document per line.
///
/// Every line is flushed as it is written, so the file stays valid NDJSON
/// up to the last completed record even if a later category aborts the run.
#[derive(Debug)]
pub struct NdjsonWriter {
    file: File,
    path: PathBuf,
    records_written: u64,
    records_dropped: u64,
}

impl NdjsonWriter {
    /// Open the export file at `path`, truncating any previous contents.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the file cannot be created.
    pub async fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).await?;
        Ok(Self {
            file,
            path,
            records_written: 0,
            records_dropped: 0,
        })
    }

    /// Append one record as a single NDJSON line and flush it.
    ///
    /// A record carrying a non-finite value is dropped and counted rather
    /// than aborting the export: JSON has no representation for `NaN` or
    /// the infinities, and `serde_json` would render them as `null`,
    /// corrupting the quantity record shape. Only I/O failures are fatal.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the line cannot be written.
    pub async fn append(&mut self, record: &ExportRecord) -> io::Result<()> {
        // serde_json writes non-finite floats as null instead of failing
        if record.value.is_some_and(|value| !value.is_finite()) {
            self.records_dropped += 1;
            warn!(
                "dropping {kind} record with a non-finite value",
                kind = record.record_type
            );
            return Ok(());
        }
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.file.write_all(&line).await?;
        self.file.flush().await?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of lines written so far
    #[must_use]
    pub const fn record_count(&self) -> u64 {
        self.records_written
    }

    /// Number of records dropped for carrying non-finite values
    #[must_use]
    pub const fn dropped_count(&self) -> u64 {
        self.records_dropped
    }

    /// Path of the file being written
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and sync the file, returning the total line count.
    ///
    /// Consumes the writer: nothing can be appended after `finish`.
    ///
    /// # Errors
    /// Returns the underlying I/O error when the final flush or sync fails.
    pub async fn finish(mut self) -> io::Result<u64> {
        self.file.flush().await?;
        self.file.sync_all().await?;
        Ok(self.records_written)
    }
}

#[async_trait]
impl RecordSink for NdjsonWriter {
    async fn deliver(&mut self, record: ExportRecord) -> io::Result<()> {
        self.append(&record).await
    }
}

/// In-memory sink used by reader tests.
#[async_trait]
impl RecordSink for Vec<ExportRecord> {
    async fn deliver(&mut self, record: ExportRecord) -> io::Result<()> {
        self.push(record);
        Ok(())
    }
}
