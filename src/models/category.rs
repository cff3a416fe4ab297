// ABOUTME: Export category definitions and the normalization table driving the pipeline
// ABOUTME: Category enum, CategoryDescriptor rows, and the ordered EXPORT_CATEGORIES table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physiological data categories this pipeline exports.
///
/// The export always walks [`EXPORT_CATEGORIES`] in declaration order:
/// sleep first, then the four quantity series.
#[non_exhaustive]
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    /// Sleep analysis intervals (in bed, asleep, awake)
    SleepAnalysis,
    /// Heart rate readings
    HeartRate,
    /// Heart rate variability (`SDNN`)
    #[serde(rename = "HRV")]
    HeartRateVariability,
    /// Respiratory rate readings
    RespiratoryRate,
    /// Blood oxygen saturation readings
    OxygenSaturation,
}

/// Whether a category's samples carry a numeric quantity or a categorical code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SampleKind {
    /// Samples carry a floating point value and a unit
    Quantity,
    /// Samples carry an integer code mapped to a named stage
    Categorical,
}

/// Normalization rules for one export category.
///
/// The pipeline is driven entirely by these rows: adding a category means
/// adding a row to [`EXPORT_CATEGORIES`], not touching the export loop.
#[derive(Debug, Clone, Copy)]
pub struct CategoryDescriptor {
    /// Which category this row describes
    pub category: Category,
    /// Label written to the `type` field of every exported record
    pub label: &'static str,
    /// Whether samples carry a quantity or a categorical code
    pub kind: SampleKind,
    /// Canonical unit label written alongside quantity values
    pub unit: Option<&'static str>,
    /// Multiplier applied to raw quantity values before writing
    pub scale: f64,
}

/// The five exported categories, in the order the pipeline processes them.
pub const EXPORT_CATEGORIES: [CategoryDescriptor; 5] = [
    CategoryDescriptor {
        category: Category::SleepAnalysis,
        label: "SleepAnalysis",
        kind: SampleKind::Categorical,
        unit: None,
        scale: 1.0,
    },
    CategoryDescriptor {
        category: Category::HeartRate,
        label: "HeartRate",
        kind: SampleKind::Quantity,
        unit: Some("count/min"),
        scale: 1.0,
    },
    CategoryDescriptor {
        category: Category::HeartRateVariability,
        label: "HRV",
        kind: SampleKind::Quantity,
        unit: Some("ms"),
        scale: 1.0,
    },
    CategoryDescriptor {
        category: Category::RespiratoryRate,
        label: "RespiratoryRate",
        kind: SampleKind::Quantity,
        unit: Some("breaths/min"),
        scale: 1.0,
    },
    CategoryDescriptor {
        category: Category::OxygenSaturation,
        label: "OxygenSaturation",
        kind: SampleKind::Quantity,
        unit: Some("%"),
        // Raw saturation arrives as a 0..1 fraction and is exported as a percentage
        scale: 100.0,
    },
];

impl Category {
    /// All exported categories in processing order
    pub const ALL: [Self; 5] = [
        Self::SleepAnalysis,
        Self::HeartRate,
        Self::HeartRateVariability,
        Self::RespiratoryRate,
        Self::OxygenSaturation,
    ];

    /// Normalization row for this category
    #[must_use]
    pub const fn descriptor(self) -> &'static CategoryDescriptor {
        match self {
            Self::SleepAnalysis => &EXPORT_CATEGORIES[0],
            Self::HeartRate => &EXPORT_CATEGORIES[1],
            Self::HeartRateVariability => &EXPORT_CATEGORIES[2],
            Self::RespiratoryRate => &EXPORT_CATEGORIES[3],
            Self::OxygenSaturation => &EXPORT_CATEGORIES[4],
        }
    }

    /// Label written to the `type` field of exported records
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.descriptor().label
    }

    /// Whether this category's samples carry a quantity or a categorical code
    #[must_use]
    pub const fn kind(self) -> SampleKind {
        self.descriptor().kind
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
