// ABOUTME: Main library entry point for the vitals export pipeline
// ABOUTME: Provides provider access, record shaping, and NDJSON export sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Vitals Export
//!
//! Exports permissioned physiological samples -- sleep analysis, heart rate,
//! heart rate variability, respiratory rate, and oxygen saturation -- out of
//! a health data provider into a newline-delimited `JSON` file.
//!
//! ## Features
//!
//! - **Anchored pagination**: large categories stream page by page instead of
//!   loading every sample into memory
//! - **Sequential categories**: one category at a time in a fixed order, each
//!   under its own page reply deadline
//! - **Failure isolation**: a category that fails or times out is recorded in
//!   the outcome while the remaining categories still run
//! - **Canonical units**: every quantity is exported in one fixed unit per
//!   category, whatever unit the provider delivered
//!
//! ## Quick Start
//!
//! 1. Point `VITALS_EXPORT_DIR` at the directory to write into
//! 2. Run the `vitals-export` binary, or drive an [`export::Exporter`]
//!    directly as below
//!
//! ## Architecture
//!
//! - **Providers**: the [`providers::HealthProvider`] seam over permissioned
//!   sample stores, with a synthetic in-memory implementation
//! - **Models**: categories, raw samples, export records, and run outcomes
//! - **Export**: the sequential reader, unit normalization, record shaping,
//!   and the NDJSON writer
//! - **Config**: environment-driven settings for output location and paging
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use vitals_export::config::ExportConfig;
//! use vitals_export::export::Exporter;
//! use vitals_export::models::TimeRange;
//! use vitals_export::providers::SyntheticProvider;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Arc::new(SyntheticProvider::with_demo_data(30, 7));
//!     let exporter = Exporter::new(provider, ExportConfig::from_env());
//!
//!     exporter.authorize().await?;
//!     let outcome = exporter.export(TimeRange::last_days(30)).await?;
//!     println!(
//!         "wrote {} records to {}",
//!         outcome.total_records(),
//!         outcome.path.display()
//!     );
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the binary crate (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access them.

/// Environment-driven export settings
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Top-level error types for export sessions
pub mod errors;

/// The export pipeline: reader, shaping, writer, and orchestrator
pub mod export;

/// Production logging and structured output
pub mod logging;

/// Common data models for physiological samples and export records
pub mod models;

/// Health data provider implementations
pub mod providers;
