// ABOUTME: Raw sample types as delivered by health data providers
// ABOUTME: RawSample with quantity or categorical body, prior to shaping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use chrono::{DateTime, Utc};

/// One sample as delivered by a provider, before shaping.
///
/// Raw samples are transient: they flow from a provider page through the
/// shaper and are never persisted in this form.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    /// When the measurement interval began
    pub start: DateTime<Utc>,
    /// When the measurement interval ended
    pub end: DateTime<Utc>,
    /// Recording device or app name, when the provider knows it
    pub source: Option<String>,
    /// The measured payload
    pub body: SampleBody,
}

/// Payload of a raw sample.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBody {
    /// A numeric measurement
    Quantity {
        /// Measured value in the category's native measure
        value: f64,
        /// Provider-native unit metadata; informational only, the exported
        /// unit always comes from the category table
        unit: Option<String>,
    },
    /// A coded observation, such as a sleep stage
    Categorical {
        /// Provider-defined integer code
        code: i32,
    },
}

impl RawSample {
    /// Create a quantity sample without source or unit metadata
    #[must_use]
    pub const fn quantity(start: DateTime<Utc>, end: DateTime<Utc>, value: f64) -> Self {
        Self {
            start,
            end,
            source: None,
            body: SampleBody::Quantity { value, unit: None },
        }
    }

    /// Create a categorical sample without source metadata
    #[must_use]
    pub const fn categorical(start: DateTime<Utc>, end: DateTime<Utc>, code: i32) -> Self {
        Self {
            start,
            end,
            source: None,
            body: SampleBody::Categorical { code },
        }
    }

    /// Attach a recording source name
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach provider-native unit metadata to a quantity body.
    ///
    /// No effect on categorical samples.
    #[must_use]
    pub fn with_unit(mut self, label: impl Into<String>) -> Self {
        if let SampleBody::Quantity { unit, .. } = &mut self.body {
            *unit = Some(label.into());
        }
        self
    }
}
