// ABOUTME: Export pipeline from provider pages to the NDJSON file
// ABOUTME: Sample shaping, the category reader, the line writer, and the session orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

//! # Export pipeline
//!
//! One category at a time: [`read_category`] walks a provider's anchored
//! pages and hands each sample to [`shape`], which normalizes units and
//! produces the record the [`NdjsonWriter`] appends as one flushed line.
//! The [`Exporter`] strings the categories together into a session and
//! reports a per-category outcome.

/// Unit normalization for quantity values
pub mod normalize;
/// Export session orchestration across all categories
pub mod orchestrator;
/// Sequential per-category page reader with reply deadlines
pub mod reader;
/// Raw sample to export record shaping
pub mod shape;
/// NDJSON file writer and the record sink seam
pub mod writer;

// Re-export the pipeline surface for convenience
pub use normalize::normalize;
pub use orchestrator::Exporter;
pub use reader::{read_category, CategoryReadError, CategoryReadOutcome, ReaderConfig};
pub use shape::shape;
pub use writer::{NdjsonWriter, RecordSink};
