// ABOUTME: Unit normalization for exported quantity values
// ABOUTME: Maps each category onto its canonical export unit via the descriptor table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Export Project

use crate::constants::defaults;
use crate::models::Category;

/// Convert a provider-native quantity into its canonical export unit.
///
/// Values are scaled per the category descriptor: oxygen saturation arrives
/// as a 0..=1 fraction and is exported as a percentage, every other quantity
/// passes through unchanged. Categories without a canonical unit fall back to
/// a plain sample count so the result is always well-formed.
#[must_use]
pub fn normalize(category: Category, raw_value: f64) -> (f64, &'static str) {
    let descriptor = category.descriptor();
    let unit = descriptor.unit.unwrap_or(defaults::FALLBACK_UNIT);
    (raw_value * descriptor.scale, unit)
}

#[cfg(test)]
mod tests {
    use super::{normalize, Category};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn heart_rate_passes_through_in_beats_per_minute() {
        let (value, unit) = normalize(Category::HeartRate, 61.5);
        assert_close(value, 61.5);
        assert_eq!(unit, "count/min");
    }

    #[test]
    fn heart_rate_variability_reports_milliseconds() {
        let (value, unit) = normalize(Category::HeartRateVariability, 48.0);
        assert_close(value, 48.0);
        assert_eq!(unit, "ms");
    }

    #[test]
    fn respiratory_rate_reports_breaths_per_minute() {
        let (value, unit) = normalize(Category::RespiratoryRate, 14.2);
        assert_close(value, 14.2);
        assert_eq!(unit, "breaths/min");
    }

    #[test]
    fn oxygen_saturation_fraction_becomes_percentage() {
        let (value, unit) = normalize(Category::OxygenSaturation, 0.97);
        assert_close(value, 97.0);
        assert_eq!(unit, "%");
    }

    #[test]
    fn category_without_canonical_unit_falls_back_to_count() {
        let (value, unit) = normalize(Category::SleepAnalysis, 3.0);
        assert_close(value, 3.0);
        assert_eq!(unit, "count");
    }
}
