// ABOUTME: Sequential category reader that bridges callback-style providers
// ABOUTME: Walks anchored pages under one deadline and feeds shaped records to a sink
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use crate::constants::timeouts;
use crate::models::{Category, RawSample, TimeRange};
use crate::providers::{AnchoredQuery, HealthProvider, ProviderError, QuerySink};

use super::shape::shape;
use super::writer::RecordSink;

/// Knobs for reading one category out of a provider.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Budget for all of a category's page replies combined
    pub reply_timeout: Duration,
    /// Maximum samples requested per page, when set
    pub page_limit: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            reply_timeout: Duration::from_secs(timeouts::PAGE_REPLY_TIMEOUT_SECS),
            page_limit: None,
        }
    }
}

/// What happened while reading one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryReadOutcome {
    /// Records handed to the sink, across pages and late updates
    pub records_delivered: u64,
    /// Whether the category hit its reply deadline before the last page
    pub timed_out: bool,
}

/// Failure while reading one category.
#[derive(Debug, Error)]
pub enum CategoryReadError {
    /// The provider reported a failure or went away mid-category
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Writing a shaped record to the sink failed
    #[error("failed to write export record: {0}")]
    Write(#[from] io::Error),
}

/// Read every page of `category` within `range` and deliver shaped records
/// to `sink` in provider order.
///
/// Providers deliver pages by callback; this function turns that into a
/// sequential walk. Each page gets a fresh reply channel, while one shared
/// update channel collects samples the provider pushes outside the paged
/// replies. All page replies share a single deadline of
/// [`ReaderConfig::reply_timeout`], measured from the first request: a
/// category that misses it stops early with `timed_out` set rather than
/// failing the export. Whatever updates are already queued are drained
/// without blocking before returning, on the success and timeout paths
/// both.
///
/// # Errors
/// Returns [`CategoryReadError::Provider`] when a page reply carries a
/// provider failure or the provider drops the reply channel, and
/// [`CategoryReadError::Write`] when the sink rejects a record.
pub async fn read_category<S: RecordSink>(
    provider: &dyn HealthProvider,
    category: Category,
    range: TimeRange,
    config: &ReaderConfig,
    sink: &mut S,
) -> Result<CategoryReadOutcome, CategoryReadError> {
    let deadline = Instant::now() + config.reply_timeout;
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();

    let mut records_delivered = 0_u64;
    let mut timed_out = false;
    let mut query = AnchoredQuery::initial(category, range, config.page_limit);

    loop {
        let (reply_tx, reply_rx) = oneshot::channel();
        provider
            .run_anchored_query(query.clone(), QuerySink::new(reply_tx, update_tx.clone()))
            .await;

        let Ok(reply) = timeout_at(deadline, reply_rx).await else {
            warn!(
                "{category} missed its page reply deadline after {timeout:?}",
                timeout = config.reply_timeout
            );
            timed_out = true;
            break;
        };

        let page = match reply {
            Ok(result) => result?,
            Err(_closed) => {
                return Err(ProviderError::disconnected(provider.name(), category).into());
            }
        };

        debug!(
            "{category} page carried {count} samples (has_more: {has_more})",
            count = page.samples.len(),
            has_more = page.has_more
        );
        records_delivered += deliver_all(&page.samples, category, sink).await?;

        if !page.has_more {
            break;
        }
        query = query.next_page(page.anchor);
    }

    while let Ok(batch) = update_rx.try_recv() {
        debug!(
            "{category} drained a late update of {count} samples",
            count = batch.len()
        );
        records_delivered += deliver_all(&batch, category, sink).await?;
    }

    Ok(CategoryReadOutcome {
        records_delivered,
        timed_out,
    })
}

/// Shape and deliver a batch of samples, preserving provider order.
async fn deliver_all<S: RecordSink>(
    samples: &[RawSample],
    category: Category,
    sink: &mut S,
) -> Result<u64, CategoryReadError> {
    let mut delivered = 0;
    for sample in samples {
        if let Some(record) = shape(sample, category) {
            sink.deliver(record).await?;
            delivered += 1;
        }
    }
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use chrono::{DateTime, TimeZone as _, Utc};

    use crate::models::{Category, ExportRecord, RawSample, TimeRange};
    use crate::providers::{QueryFault, SyntheticProvider};

    use super::{read_category, CategoryReadError, ReaderConfig};

    fn instant(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn test_range() -> TimeRange {
        TimeRange::new(instant(1_699_999_000), instant(1_700_100_000)).unwrap()
    }

    fn heart_rate_samples(count: i64) -> Vec<RawSample> {
        (0..count)
            .map(|i| {
                let at = instant(1_700_000_000 + i * 60);
                RawSample::quantity(at, at, 60.0 + i as f64)
            })
            .collect()
    }

    fn quick_config() -> ReaderConfig {
        ReaderConfig {
            reply_timeout: Duration::from_secs(5),
            page_limit: None,
        }
    }

    #[tokio::test]
    async fn delivers_every_page_in_provider_order() {
        let provider = SyntheticProvider::new().with_page_size(4);
        provider
            .add_samples(Category::HeartRate, heart_rate_samples(10))
            .unwrap();

        let mut sink: Vec<ExportRecord> = Vec::new();
        let outcome = read_category(
            &provider,
            Category::HeartRate,
            test_range(),
            &quick_config(),
            &mut sink,
        )
        .await
        .unwrap();

        assert_eq!(outcome.records_delivered, 10);
        assert!(!outcome.timed_out);
        assert_eq!(sink.len(), 10);
        let starts: Vec<i64> = sink.iter().map(|record| record.start_date).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }

    #[tokio::test]
    async fn empty_category_finishes_with_zero_records() {
        let provider = SyntheticProvider::new();
        let mut sink: Vec<ExportRecord> = Vec::new();
        let outcome = read_category(
            &provider,
            Category::RespiratoryRate,
            test_range(),
            &quick_config(),
            &mut sink,
        )
        .await
        .unwrap();

        assert_eq!(outcome.records_delivered, 0);
        assert!(!outcome.timed_out);
    }

    #[tokio::test]
    async fn withheld_reply_times_out_without_error() {
        let provider = SyntheticProvider::new();
        provider
            .add_samples(Category::HeartRate, heart_rate_samples(3))
            .unwrap();
        provider
            .inject_fault(Category::HeartRate, QueryFault::Withhold)
            .unwrap();

        let config = ReaderConfig {
            reply_timeout: Duration::from_millis(50),
            page_limit: None,
        };
        let mut sink: Vec<ExportRecord> = Vec::new();
        let outcome = read_category(
            &provider,
            Category::HeartRate,
            test_range(),
            &config,
            &mut sink,
        )
        .await
        .unwrap();

        assert!(outcome.timed_out);
        assert_eq!(outcome.records_delivered, 0);
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_provider_error() {
        let provider = SyntheticProvider::new();
        provider
            .inject_fault(
                Category::HeartRate,
                QueryFault::Fail {
                    message: "sensor offline".to_owned(),
                },
            )
            .unwrap();

        let mut sink: Vec<ExportRecord> = Vec::new();
        let result = read_category(
            &provider,
            Category::HeartRate,
            test_range(),
            &quick_config(),
            &mut sink,
        )
        .await;

        assert!(matches!(result, Err(CategoryReadError::Provider(_))));
    }

    #[tokio::test]
    async fn dropped_reply_channel_surfaces_as_provider_error() {
        let provider = SyntheticProvider::new();
        provider
            .inject_fault(Category::HeartRate, QueryFault::Disconnect)
            .unwrap();

        let mut sink: Vec<ExportRecord> = Vec::new();
        let result = read_category(
            &provider,
            Category::HeartRate,
            test_range(),
            &quick_config(),
            &mut sink,
        )
        .await;

        assert!(matches!(result, Err(CategoryReadError::Provider(_))));
    }

    #[tokio::test]
    async fn late_updates_are_drained_after_the_final_page() {
        let provider = SyntheticProvider::new();
        provider
            .add_samples(Category::HeartRate, heart_rate_samples(2))
            .unwrap();
        let late = instant(1_700_050_000);
        provider
            .queue_late_update(
                Category::HeartRate,
                vec![RawSample::quantity(late, late, 71.0)],
            )
            .unwrap();

        let mut sink: Vec<ExportRecord> = Vec::new();
        let outcome = read_category(
            &provider,
            Category::HeartRate,
            test_range(),
            &quick_config(),
            &mut sink,
        )
        .await
        .unwrap();

        assert_eq!(outcome.records_delivered, 3);
        assert_eq!(sink.last().unwrap().value, Some(71.0));
    }

    #[tokio::test]
    async fn samples_outside_the_range_are_not_delivered() {
        let provider = SyntheticProvider::new();
        let inside = instant(1_700_000_000);
        let outside = instant(1_800_000_000);
        provider
            .add_samples(
                Category::HeartRate,
                vec![
                    RawSample::quantity(inside, inside, 61.0),
                    RawSample::quantity(outside, outside, 88.0),
                ],
            )
            .unwrap();

        let mut sink: Vec<ExportRecord> = Vec::new();
        let outcome = read_category(
            &provider,
            Category::HeartRate,
            test_range(),
            &quick_config(),
            &mut sink,
        )
        .await
        .unwrap();

        assert_eq!(outcome.records_delivered, 1);
        assert_eq!(sink[0].value, Some(61.0));
    }
}
