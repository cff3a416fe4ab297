// ABOUTME: Core provider trait and query types for health data access
// ABOUTME: HealthProvider abstraction, anchored query requests, and delivery sinks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

//! # Health Data Provider Abstraction
//!
//! This module defines the shared contract every health data provider
//! implements. Providers are callback-shaped, mirroring how on-device
//! health stores actually behave: [`HealthProvider::run_anchored_query`]
//! registers a query and returns immediately, and the provider delivers
//! results from its own task through the [`QuerySink`] channels. The
//! export reader bridges this back into sequential control flow.
//!
//! ## Delivery Contract
//!
//! For every registered query the provider sends exactly one reply, either
//! a [`SamplePage`] or a [`ProviderError`], through the sink's single-use
//! reply channel. Samples that materialize after the reply (a store
//! flushing stragglers) may follow through the sink's update channel for
//! as long as the reader keeps it open. Both channels tolerate a dropped
//! receiver: the reader may have timed out and moved on.
//!
//! ## Example: Implementing a Provider
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use vitals_export::models::Category;
//! use vitals_export::providers::{
//!     AnchoredQuery, HealthProvider, ProviderError, QueryAnchor, QuerySink, SamplePage,
//! };
//!
//! pub struct CustomProvider;
//!
//! #[async_trait]
//! impl HealthProvider for CustomProvider {
//!     fn name(&self) -> &'static str {
//!         "custom"
//!     }
//!
//!     async fn is_available(&self) -> bool {
//!         true
//!     }
//!
//!     async fn request_authorization(
//!         &self,
//!         _categories: &[Category],
//!     ) -> Result<bool, ProviderError> {
//!         Ok(true)
//!     }
//!
//!     async fn run_anchored_query(&self, query: AnchoredQuery, sink: QuerySink) {
//!         // Nothing stored: answer with a final empty page.
//!         let anchor = query
//!             .anchor
//!             .unwrap_or_else(|| QueryAnchor::encode("start"));
//!         sink.respond(Ok(SamplePage::empty(anchor)));
//!     }
//! }
//! ```

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::models::{Category, RawSample, TimeRange};

use super::errors::ProviderError;
use super::pagination::{QueryAnchor, SamplePage};

/// Request for one page of samples from a provider's store.
#[derive(Debug, Clone)]
pub struct AnchoredQuery {
    /// Category to read
    pub category: Category,
    /// Export window; membership is half-open on the sample's start
    pub range: TimeRange,
    /// Position of the previous page, `None` for the first request
    pub anchor: Option<QueryAnchor>,
    /// Maximum samples to deliver in the reply, `None` for provider default
    pub limit: Option<usize>,
}

impl AnchoredQuery {
    /// First-page query for a category, without an anchor
    #[must_use]
    pub const fn initial(category: Category, range: TimeRange, limit: Option<usize>) -> Self {
        Self {
            category,
            range,
            anchor: None,
            limit,
        }
    }

    /// Follow-up query continuing from `anchor`
    #[must_use]
    pub fn next_page(&self, anchor: QueryAnchor) -> Self {
        Self {
            category: self.category,
            range: self.range,
            anchor: Some(anchor),
            limit: self.limit,
        }
    }
}

/// Reply channel for one page plus the update channel for late deliveries.
#[derive(Debug)]
pub struct QuerySink {
    reply: oneshot::Sender<Result<SamplePage, ProviderError>>,
    updates: mpsc::UnboundedSender<Vec<RawSample>>,
}

impl QuerySink {
    /// Create a sink from a reply sender and an update sender
    #[must_use]
    pub const fn new(
        reply: oneshot::Sender<Result<SamplePage, ProviderError>>,
        updates: mpsc::UnboundedSender<Vec<RawSample>>,
    ) -> Self {
        Self { reply, updates }
    }

    /// Deliver the single page reply for this query, consuming the sink.
    ///
    /// A dropped receiver is tolerated: the reader has moved on and the
    /// reply is discarded.
    pub fn respond(self, result: Result<SamplePage, ProviderError>) {
        if self.reply.send(result).is_err() {
            debug!("page reply receiver dropped before delivery");
        }
    }

    /// Clone the update sender for deliveries after the reply is consumed.
    ///
    /// [`respond`](Self::respond) takes the sink by value, so a provider
    /// that wants to push late samples clones the sender first and sends
    /// through the clone once the reply is out.
    #[must_use]
    pub fn update_sender(&self) -> mpsc::UnboundedSender<Vec<RawSample>> {
        self.updates.clone()
    }
}

/// Unified interface to a permissioned on-device health data store.
#[async_trait]
pub trait HealthProvider: Send + Sync {
    /// Stable provider name used in errors and log fields
    fn name(&self) -> &'static str;

    /// Whether health data is available on this system at all
    async fn is_available(&self) -> bool;

    /// Ask the user to share the given categories.
    ///
    /// Returns `Ok(true)` when access was granted, `Ok(false)` when the
    /// user declined.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::AuthorizationFailed`] when the request
    /// itself fails before the user could answer.
    async fn request_authorization(&self, categories: &[Category]) -> Result<bool, ProviderError>;

    /// Register an anchored query and return without waiting for results.
    ///
    /// The provider delivers exactly one reply through the sink from its
    /// own task: a [`SamplePage`] on success or a [`ProviderError`] on
    /// failure. Late updates may follow through the sink's update channel.
    async fn run_anchored_query(&self, query: AnchoredQuery, sink: QuerySink);
}
