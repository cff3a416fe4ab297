// ABOUTME: Shapes raw provider samples into export records
// ABOUTME: Applies unit normalization, epoch-millisecond timestamps, and sleep stage mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use crate::models::{
    Category, ExportRecord, RawSample, RecordMetadata, SampleBody, SampleKind, SleepStage,
};

use super::normalize::normalize;

/// Shape one raw sample into the record written to the export file.
///
/// Quantity categories get a normalized `value` and canonical `unit`;
/// categorical categories get `metadata.stage` instead. A sample whose body
/// does not match the category's kind is dropped by returning `None`.
#[must_use]
pub fn shape(sample: &RawSample, category: Category) -> Option<ExportRecord> {
    let (value, unit, metadata) = match (category.kind(), &sample.body) {
        (SampleKind::Quantity, SampleBody::Quantity { value, .. }) => {
            let (normalized, unit) = normalize(category, *value);
            (Some(normalized), Some(unit.to_owned()), None)
        }
        (SampleKind::Categorical, SampleBody::Categorical { code }) => {
            let metadata = RecordMetadata {
                stage: SleepStage::from_code(*code),
            };
            (None, None, Some(metadata))
        }
        _ => return None,
    };

    Some(ExportRecord {
        record_type: category.label().to_owned(),
        start_date: sample.start.timestamp_millis(),
        end_date: sample.end.timestamp_millis(),
        source: sample.source.clone().unwrap_or_default(),
        value,
        unit,
        metadata,
    })
}
