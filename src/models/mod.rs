// ABOUTME: Core data models for the vitals export pipeline
// ABOUTME: Re-exports categories, raw samples, exported records, ranges, and outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

//! # Data Models
//!
//! Core data structures used throughout the export pipeline. Nothing here
//! knows about any concrete provider: providers deliver [`RawSample`]s, the
//! pipeline turns them into [`ExportRecord`]s.
//!
//! ## Core Models
//!
//! - [`Category`]: the five exported physiological categories, in order
//! - [`RawSample`]: one provider-delivered sample, quantity or categorical
//! - [`ExportRecord`]: one line of the NDJSON output
//! - [`TimeRange`]: validated export window with half-open membership
//! - [`ExportOutcome`]: per-category result of a run

// Domain modules
mod category;
mod outcome;
mod range;
mod record;
mod sample;

// Re-export all public types for convenience
pub use category::{Category, CategoryDescriptor, SampleKind, EXPORT_CATEGORIES};
pub use outcome::{CategoryOutcome, CategoryStatus, ExportOutcome};
pub use range::TimeRange;
pub use record::{ExportRecord, RecordMetadata, SleepStage};
pub use sample::{RawSample, SampleBody};
