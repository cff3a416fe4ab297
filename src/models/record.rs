// ABOUTME: Exported record shape written to the NDJSON file
// ABOUTME: ExportRecord, sleep metadata, and the SleepStage code mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use serde::{Deserialize, Serialize};

/// One line of the export file.
///
/// Field order here is serialization order. Quantity categories carry
/// `value` + `unit` and no metadata; sleep records carry `metadata.stage`
/// and no value or unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    /// Category label, one of the five fixed export labels
    #[serde(rename = "type")]
    pub record_type: String,
    /// Interval start as milliseconds since the Unix epoch
    pub start_date: i64,
    /// Interval end as milliseconds since the Unix epoch
    pub end_date: i64,
    /// Recording device or app name; empty string when unknown
    pub source: String,
    /// Normalized measurement value (quantity categories only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Canonical unit label (quantity categories only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Sleep stage metadata (sleep category only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMetadata>,
}

/// Metadata object attached to sleep records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Named sleep stage for this interval
    pub stage: SleepStage,
}

/// Named sleep stages, mapped from provider category codes.
#[non_exhaustive]
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SleepStage {
    /// Time in bed, not necessarily asleep
    InBed,
    /// Asleep
    Asleep,
    /// Awake during a sleep session
    Awake,
    /// Code not recognized; preserved rather than dropped
    Unknown,
}

impl SleepStage {
    /// Map a provider category code to a named stage.
    ///
    /// Codes follow the on-device sleep analysis convention: 0 is in-bed,
    /// 1 is asleep, 2 is awake. Anything else maps to `Unknown` so that
    /// unrecognized stages survive the export instead of vanishing.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::InBed,
            1 => Self::Asleep,
            2 => Self::Awake,
            _ => Self::Unknown,
        }
    }
}
