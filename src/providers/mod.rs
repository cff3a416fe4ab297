// ABOUTME: Health data provider integrations for on-device sample stores
// ABOUTME: Unifies provider access behind HealthProvider with anchored pagination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

//! # Providers
//!
//! Access to permissioned health data stores. The [`HealthProvider`] trait
//! is the seam: the export pipeline is written against it, and the
//! [`SyntheticProvider`] implements it in memory for development, tests,
//! and the demo binary.

/// Provider trait, query description, and reply sink
pub mod core;
/// Provider error types
pub mod errors;
/// Opaque query anchors and sample pages
pub mod pagination;
/// In-memory provider with generated vitals data
pub mod synthetic_provider;

// Re-export the provider surface for convenience
pub use self::core::{AnchoredQuery, HealthProvider, QuerySink};
pub use errors::ProviderError;
pub use pagination::{QueryAnchor, SamplePage};
pub use synthetic_provider::{QueryFault, SyntheticProvider};
