// ABOUTME: In-memory synthetic health provider for development and testing
// ABOUTME: Configurable sample stores, anchor-faithful paging, and query fault injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

//! # Synthetic Health Provider
//!
//! A synthetic provider for development, testing, and demonstration. Unlike
//! a real on-device health store, the synthetic provider:
//!
//! - Requires no platform permissions
//! - Supports dynamic sample injection per category
//! - Generates deterministic demo data from a seed
//! - Can inject query faults to exercise reader edge cases
//!
//! ## Thread Safety
//!
//! All stores are behind `RwLock`; deliveries run on spawned tasks that
//! snapshot the store before answering, so injection and queries can
//! interleave safely.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;
use tracing::debug;

use crate::constants::limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::models::{Category, RawSample};

use super::core::{AnchoredQuery, HealthProvider, QuerySink};
use super::errors::ProviderError;
use super::pagination::{QueryAnchor, SamplePage};

/// Provider name reported in errors and log fields
const PROVIDER_NAME: &str = "synthetic";

/// How long a withheld reply keeps its channel open.
///
/// Must outlive any reader deadline so the reader observes a timeout
/// rather than a disconnect.
const WITHHOLD_HOLD: Duration = Duration::from_secs(3600);

/// Source device names attached to generated demo samples
const DEMO_SOURCES: [&str; 3] = ["Vitals Watch", "Vitals Ring", "Vitals Band"];

/// Injected behavior for queries against one category.
#[derive(Debug, Clone)]
pub enum QueryFault {
    /// Reply with a query error instead of a page
    Fail {
        /// Message carried in the resulting error
        message: String,
    },
    /// Hold the reply channel open without ever answering
    Withhold,
    /// Answer normally, but only after this delay
    Delay(Duration),
    /// Drop the reply channel without answering
    Disconnect,
}

/// Synthetic health provider backed by in-memory per-category stores.
///
/// # Examples
///
/// ```rust,no_run
/// use vitals_export::providers::SyntheticProvider;
///
/// // Two weeks of deterministic demo data
/// let provider = SyntheticProvider::with_demo_data(14, 42);
/// ```
pub struct SyntheticProvider {
    /// Samples per category, ascending by start time
    samples: Arc<RwLock<HashMap<Category, Vec<RawSample>>>>,
    /// Injected query faults per category
    faults: Arc<RwLock<HashMap<Category, QueryFault>>>,
    /// Update batches delivered after the first page reply per category
    late_updates: Arc<RwLock<HashMap<Category, Vec<Vec<RawSample>>>>>,
    /// Whether `is_available` reports the store as present
    available: bool,
    /// Whether the user grants the authorization request
    grant_authorization: bool,
    /// Injected failure for the authorization request itself
    authorization_failure: Option<String>,
    /// Page size used when a query carries no limit
    page_size: usize,
}

impl SyntheticProvider {
    /// Create an empty provider
    #[must_use]
    pub fn new() -> Self {
        Self::with_samples(HashMap::new())
    }

    /// Create a provider pre-loaded with the given per-category samples
    #[must_use]
    pub fn with_samples(samples: HashMap<Category, Vec<RawSample>>) -> Self {
        Self {
            samples: Arc::new(RwLock::new(samples)),
            faults: Arc::new(RwLock::new(HashMap::new())),
            late_updates: Arc::new(RwLock::new(HashMap::new())),
            available: true,
            grant_authorization: true,
            authorization_failure: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a provider pre-loaded with deterministic demo data.
    ///
    /// Generates `days` days of sleep, heart rate, `HRV`, respiratory rate,
    /// and oxygen saturation samples working backward from now. The same
    /// seed always produces the same samples.
    #[must_use]
    pub fn with_demo_data(days: u32, seed: u64) -> Self {
        Self::with_samples(Self::generate_demo_data(days, seed, Utc::now()))
    }

    /// Report the store as unavailable or available
    #[must_use]
    pub const fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Control whether the authorization request is granted
    #[must_use]
    pub const fn with_authorization_grant(mut self, granted: bool) -> Self {
        self.grant_authorization = granted;
        self
    }

    /// Make the authorization request itself fail with `message`
    #[must_use]
    pub fn with_authorization_failure(mut self, message: impl Into<String>) -> Self {
        self.authorization_failure = Some(message.into());
        self
    }

    /// Set the page size used when queries carry no limit
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Append samples to a category's store.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::QueryFailed`] if the sample store lock is
    /// poisoned.
    pub fn add_samples(
        &self,
        category: Category,
        mut new_samples: Vec<RawSample>,
    ) -> Result<(), ProviderError> {
        self.samples
            .write()
            .map_err(|_| Self::poisoned(category, "sample store"))?
            .entry(category)
            .or_default()
            .append(&mut new_samples);
        Ok(())
    }

    /// Number of samples currently stored for a category.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::QueryFailed`] if the sample store lock is
    /// poisoned.
    pub fn sample_count(&self, category: Category) -> Result<usize, ProviderError> {
        Ok(self
            .samples
            .read()
            .map_err(|_| Self::poisoned(category, "sample store"))?
            .get(&category)
            .map_or(0, Vec::len))
    }

    /// Inject a query fault for one category.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::QueryFailed`] if the fault table lock is
    /// poisoned.
    pub fn inject_fault(&self, category: Category, fault: QueryFault) -> Result<(), ProviderError> {
        self.faults
            .write()
            .map_err(|_| Self::poisoned(category, "fault table"))?
            .insert(category, fault);
        Ok(())
    }

    /// Queue a batch of samples delivered through the update channel after
    /// the first page reply for `category`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::QueryFailed`] if the update queue lock is
    /// poisoned.
    pub fn queue_late_update(
        &self,
        category: Category,
        samples: Vec<RawSample>,
    ) -> Result<(), ProviderError> {
        self.late_updates
            .write()
            .map_err(|_| Self::poisoned(category, "update queue"))?
            .entry(category)
            .or_default()
            .push(samples);
        Ok(())
    }

    /// Generate deterministic demo data working backward from `now`
    #[must_use]
    pub fn generate_demo_data(
        days: u32,
        seed: u64,
        now: DateTime<Utc>,
    ) -> HashMap<Category, Vec<RawSample>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store: HashMap<Category, Vec<RawSample>> = HashMap::new();

        for day in (0..days).rev() {
            let day_anchor = now - ChronoDuration::days(i64::from(day));
            Self::generate_night(&mut rng, &mut store, day_anchor);
            Self::generate_day_quantities(&mut rng, &mut store, day_anchor);
        }

        store
    }

    /// One night of sleep samples ending well before `day_anchor`
    fn generate_night(
        rng: &mut StdRng,
        store: &mut HashMap<Category, Vec<RawSample>>,
        day_anchor: DateTime<Utc>,
    ) {
        let bed_start = day_anchor - ChronoDuration::hours(26)
            + ChronoDuration::minutes(rng.gen_range(-20..20));
        let bed_minutes = rng.gen_range(420..520);
        let bed_end = bed_start + ChronoDuration::minutes(bed_minutes);
        let source = DEMO_SOURCES[rng.gen_range(0..DEMO_SOURCES.len())];

        let sleep = store.entry(Category::SleepAnalysis).or_default();
        // Whole-night in-bed interval, then asleep segments with a brief
        // awakening, the way device sleep trackers report
        sleep.push(RawSample::categorical(bed_start, bed_end, 0).with_source(source));

        let onset = bed_start + ChronoDuration::minutes(rng.gen_range(5..25));
        let wake_at = onset + ChronoDuration::minutes(rng.gen_range(150..240));
        let wake_minutes = rng.gen_range(2..10);
        let back_asleep = wake_at + ChronoDuration::minutes(wake_minutes);

        sleep.push(RawSample::categorical(onset, wake_at, 1).with_source(source));
        sleep.push(RawSample::categorical(wake_at, back_asleep, 2).with_source(source));
        sleep.push(
            RawSample::categorical(back_asleep, bed_end - ChronoDuration::minutes(5), 1)
                .with_source(source),
        );
    }

    /// Daytime quantity samples for the 24 hours before `day_anchor`
    fn generate_day_quantities(
        rng: &mut StdRng,
        store: &mut HashMap<Category, Vec<RawSample>>,
        day_anchor: DateTime<Utc>,
    ) {
        let day_start = day_anchor - ChronoDuration::hours(24);
        let source = DEMO_SOURCES[rng.gen_range(0..DEMO_SOURCES.len())];

        // Heart rate roughly every two hours, resting at night and
        // elevated through the day
        let heart_rate = store.entry(Category::HeartRate).or_default();
        for slot in 0..12 {
            let at = day_start + ChronoDuration::hours(slot * 2)
                + ChronoDuration::minutes(rng.gen_range(0..40));
            let daytime = (7..22).contains(&(slot * 2));
            let bpm = if daytime {
                rng.gen_range(62.0..95.0)
            } else {
                rng.gen_range(48.0..62.0)
            };
            let mut sample = RawSample::quantity(at, at, bpm).with_unit("count/min");
            // Every few readings arrive without a source attribution
            if slot % 5 != 4 {
                sample = sample.with_source(source);
            }
            heart_rate.push(sample);
        }

        // One overnight HRV reading
        let hrv_at = day_start + ChronoDuration::hours(4);
        store.entry(Category::HeartRateVariability).or_default().push(
            RawSample::quantity(hrv_at, hrv_at, rng.gen_range(28.0..82.0))
                .with_unit("ms")
                .with_source(source),
        );

        // One nightly respiratory rate average
        let rr_at = day_start + ChronoDuration::hours(5);
        store.entry(Category::RespiratoryRate).or_default().push(
            RawSample::quantity(rr_at, rr_at, rng.gen_range(12.5..17.5))
                .with_unit("count/min")
                .with_source(source),
        );

        // Two oxygen saturation spot checks, stored as 0..1 fractions
        let spo2 = store.entry(Category::OxygenSaturation).or_default();
        for slot in 0..2 {
            let at = day_start + ChronoDuration::hours(6 + slot * 10);
            spo2.push(
                RawSample::quantity(at, at, rng.gen_range(0.93..0.99))
                    .with_unit("%")
                    .with_source(source),
            );
        }
    }

    /// One filtered, ordered page for `query`, or an error for a bad anchor
    fn page_for(&self, query: &AnchoredQuery) -> Result<SamplePage, ProviderError> {
        let offset = match &query.anchor {
            None => 0,
            Some(anchor) => Self::parse_anchor(query.category, anchor).ok_or_else(|| {
                ProviderError::query_failed(PROVIDER_NAME, query.category, "malformed query anchor")
            })?,
        };

        let matching: Vec<RawSample> = self
            .samples
            .read()
            .map_err(|_| Self::poisoned(query.category, "sample store"))?
            .get(&query.category)
            .map(|all| {
                all.iter()
                    .filter(|s| query.range.contains_start(s.start))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let limit = query.limit.unwrap_or(self.page_size).min(MAX_PAGE_SIZE);
        let end = offset.saturating_add(limit).min(matching.len());
        let start = offset.min(matching.len());
        let page: Vec<RawSample> = matching[start..end].to_vec();
        let has_more = end < matching.len();
        let anchor = Self::anchor_at(query.category, end);

        Ok(SamplePage::new(page, anchor, has_more))
    }

    /// Encode a position in the filtered snapshot as an anchor
    fn anchor_at(category: Category, offset: usize) -> QueryAnchor {
        QueryAnchor::encode(&format!("{}:{offset}", category.label()))
    }

    /// Decode an anchor produced by [`Self::anchor_at`] for the same category
    fn parse_anchor(category: Category, anchor: &QueryAnchor) -> Option<usize> {
        let payload = anchor.decode()?;
        let (label, offset) = payload.split_once(':')?;
        if label != category.label() {
            return None;
        }
        offset.parse().ok()
    }

    fn poisoned(category: Category, lock: &str) -> ProviderError {
        ProviderError::query_failed(PROVIDER_NAME, category, format!("RwLock poisoned: {lock}"))
    }

    /// Fault injected for `category`, if any
    fn fault_for(&self, category: Category) -> Option<QueryFault> {
        self.faults
            .read()
            .ok()
            .and_then(|faults| faults.get(&category).cloned())
    }

    /// Take the queued update batches for `category`
    fn take_late_updates(&self, category: Category) -> Vec<Vec<RawSample>> {
        self.late_updates
            .write()
            .ok()
            .and_then(|mut queues| queues.remove(&category))
            .unwrap_or_default()
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn request_authorization(&self, categories: &[Category]) -> Result<bool, ProviderError> {
        debug!(count = categories.len(), "authorization requested");
        if let Some(message) = &self.authorization_failure {
            return Err(ProviderError::authorization_failed(PROVIDER_NAME, message));
        }
        Ok(self.grant_authorization)
    }

    async fn run_anchored_query(&self, query: AnchoredQuery, sink: QuerySink) {
        let fault = self.fault_for(query.category);
        let page = self.page_for(&query);
        let first_page = query.anchor.is_none();
        let updates = if first_page {
            self.take_late_updates(query.category)
        } else {
            Vec::new()
        };

        // Deliver from a separate task, as a real callback-based store would
        tokio::spawn(async move {
            match fault {
                Some(QueryFault::Fail { message }) => {
                    sink.respond(Err(ProviderError::query_failed(
                        PROVIDER_NAME,
                        query.category,
                        message,
                    )));
                    return;
                }
                Some(QueryFault::Disconnect) => {
                    drop(sink);
                    return;
                }
                Some(QueryFault::Withhold) => {
                    // Keep the reply channel open past any reader deadline
                    sleep(WITHHOLD_HOLD).await;
                    drop(sink);
                    return;
                }
                Some(QueryFault::Delay(delay)) => sleep(delay).await,
                None => {}
            }

            let update_sender = sink.update_sender();
            sink.respond(page);
            for batch in updates {
                if update_sender.send(batch).is_err() {
                    debug!("late update receiver dropped before delivery");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use tokio::sync::{mpsc, oneshot};

    use super::{QueryFault, SyntheticProvider};
    use crate::models::{Category, RawSample, TimeRange};
    use crate::providers::core::{AnchoredQuery, HealthProvider, QuerySink};
    use crate::providers::errors::ProviderError;
    use crate::providers::pagination::SamplePage;

    fn spread_samples(count: usize) -> Vec<RawSample> {
        let base = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
        (0..count)
            .map(|i| {
                let at = base + ChronoDuration::minutes(i as i64);
                RawSample::quantity(at, at, 60.0 + i as f64)
            })
            .collect()
    }

    fn wide_range() -> TimeRange {
        TimeRange::new(
            Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    async fn fetch_page(
        provider: &SyntheticProvider,
        query: AnchoredQuery,
    ) -> Result<SamplePage, ProviderError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let (update_tx, _update_rx) = mpsc::unbounded_channel();
        provider
            .run_anchored_query(query, QuerySink::new(reply_tx, update_tx))
            .await;
        reply_rx.await.unwrap()
    }

    #[tokio::test]
    async fn pages_walk_the_store_without_overlap() {
        let provider = SyntheticProvider::new().with_page_size(4);
        provider
            .add_samples(Category::HeartRate, spread_samples(10))
            .unwrap();
        assert_eq!(provider.sample_count(Category::HeartRate).unwrap(), 10);

        let mut query = AnchoredQuery::initial(Category::HeartRate, wide_range(), None);
        let mut seen = Vec::new();
        loop {
            let page = fetch_page(&provider, query.clone()).await.unwrap();
            seen.extend(page.samples);
            if !page.has_more {
                break;
            }
            query = query.next_page(page.anchor);
        }

        assert_eq!(seen.len(), 10);
        assert_eq!(seen, spread_samples(10));
    }

    #[tokio::test]
    async fn anchor_from_another_category_is_rejected() {
        let provider = SyntheticProvider::new();
        provider
            .add_samples(Category::HeartRate, spread_samples(3))
            .unwrap();

        let first = fetch_page(
            &provider,
            AnchoredQuery::initial(Category::HeartRate, wide_range(), Some(2)),
        )
        .await
        .unwrap();

        let misdirected = AnchoredQuery {
            category: Category::RespiratoryRate,
            range: wide_range(),
            anchor: Some(first.anchor),
            limit: None,
        };
        let err = fetch_page(&provider, misdirected).await.unwrap_err();
        assert!(matches!(err, ProviderError::QueryFailed { .. }));
    }

    #[tokio::test]
    async fn injected_failure_surfaces_as_query_error() {
        let provider = SyntheticProvider::new();
        provider
            .inject_fault(
                Category::HeartRate,
                QueryFault::Fail {
                    message: "store offline".into(),
                },
            )
            .unwrap();

        let err = fetch_page(
            &provider,
            AnchoredQuery::initial(Category::HeartRate, wide_range(), None),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProviderError::QueryFailed { .. }));
    }

    #[test]
    fn demo_data_is_deterministic_per_seed() {
        let now = Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap();
        let a = SyntheticProvider::generate_demo_data(5, 7, now);
        let b = SyntheticProvider::generate_demo_data(5, 7, now);
        let c = SyntheticProvider::generate_demo_data(5, 8, now);

        assert_eq!(a, b);
        assert_ne!(
            a.get(&Category::HeartRate).unwrap(),
            c.get(&Category::HeartRate).unwrap()
        );
        for category in Category::ALL {
            assert!(!a.get(&category).unwrap().is_empty());
        }
    }

    #[test]
    fn demo_samples_are_ordered_within_each_category() {
        let now = Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap();
        let store = SyntheticProvider::generate_demo_data(7, 3, now);
        for samples in store.values() {
            for pair in samples.windows(2) {
                assert!(pair[0].start <= pair[1].start);
            }
        }
    }
}
