// ABOUTME: Imperial-to-metric conversion for ingredient quantities
// ABOUTME: Converts US volume and weight units to ml/g and promotes large amounts to l/kg
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

/// Volume conversion constants (to milliliters)
const ML_PER_CUP: f64 = 240.0;
const ML_PER_TBSP: f64 = 15.0;
const ML_PER_TSP: f64 = 5.0;
const ML_PER_FL_OZ: f64 = 29.57;
const ML_PER_PINT: f64 = 473.2;
const ML_PER_QUART: f64 = 946.4;
const ML_PER_GALLON: f64 = 3785.4;

/// Weight conversion constants (to grams)
const GRAMS_PER_OZ: f64 = 28.35;
const GRAMS_PER_LB: f64 = 453.6;

/// ml per l and g per kg
const METRIC_SCALE: f64 = 1000.0;

/// Threshold above which ml/g are shown as l/kg
const PROMOTION_THRESHOLD: f64 = 1000.0;

/// Base metric unit a US unit converts into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricBase {
    /// Volume, milliliters
    Milliliters,
    /// Weight, grams
    Grams,
}

impl MetricBase {
    /// Abbreviation for display
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::Milliliters => "ml",
            Self::Grams => "g",
        }
    }
}

/// Factor and base unit for a volume or weight unit, matched case-insensitively
///
/// Metric units map onto ml/g too, so `1 L` and `500 ml` share a base.
/// `T` (tablespoon) and `t` (teaspoon) are the one case-sensitive pair.
#[must_use]
pub fn metric_factor(unit: &str) -> Option<(f64, MetricBase)> {
    let unit = unit.trim();
    match unit {
        "T" => return Some((ML_PER_TBSP, MetricBase::Milliliters)),
        "t" => return Some((ML_PER_TSP, MetricBase::Milliliters)),
        _ => {}
    }
    let factor = match unit.to_lowercase().trim_end_matches('.') {
        "cup" | "cups" | "c" => (ML_PER_CUP, MetricBase::Milliliters),
        "tbsp" | "tbs" | "tablespoon" | "tablespoons" => (ML_PER_TBSP, MetricBase::Milliliters),
        "tsp" | "teaspoon" | "teaspoons" => (ML_PER_TSP, MetricBase::Milliliters),
        "fl oz" | "fluid ounce" | "fluid ounces" => (ML_PER_FL_OZ, MetricBase::Milliliters),
        "pint" | "pints" | "pt" => (ML_PER_PINT, MetricBase::Milliliters),
        "quart" | "quarts" | "qt" => (ML_PER_QUART, MetricBase::Milliliters),
        "gallon" | "gallons" | "gal" => (ML_PER_GALLON, MetricBase::Milliliters),
        "oz" | "ounce" | "ounces" => (GRAMS_PER_OZ, MetricBase::Grams),
        "lb" | "lbs" | "pound" | "pounds" => (GRAMS_PER_LB, MetricBase::Grams),
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
            (1.0, MetricBase::Milliliters)
        }
        "l" | "liter" | "liters" | "litre" | "litres" => (METRIC_SCALE, MetricBase::Milliliters),
        "g" | "gram" | "grams" => (1.0, MetricBase::Grams),
        "kg" | "kilogram" | "kilograms" => (METRIC_SCALE, MetricBase::Grams),
        _ => return None,
    };
    Some(factor)
}

/// Convert a quantity to its metric base unit (ml or g)
///
/// Units without a metric equivalent (pieces, cloves, cans) come back unchanged.
#[must_use]
pub fn to_metric_base(quantity: f64, unit: &str) -> (f64, String) {
    metric_factor(unit).map_or_else(
        || (quantity, unit.to_owned()),
        |(factor, base)| (quantity * factor, base.abbreviation().to_owned()),
    )
}

/// Promote ml/g to l/kg at 1000 and round to one decimal place
///
/// Non-metric units are returned untouched.
#[must_use]
pub fn present_metric(quantity: f64, unit: &str) -> (f64, String) {
    let (quantity, unit) = match unit {
        "ml" if quantity >= PROMOTION_THRESHOLD => (quantity / METRIC_SCALE, "l"),
        "g" if quantity >= PROMOTION_THRESHOLD => (quantity / METRIC_SCALE, "kg"),
        "ml" | "g" | "l" | "kg" => (quantity, unit),
        _ => return (quantity, unit.to_owned()),
    };
    (round_tenths(quantity), unit.to_owned())
}

/// Convert a quantity straight to its display form in metric
#[must_use]
pub fn convert_to_metric(quantity: f64, unit: &str) -> (f64, String) {
    let (quantity, unit) = to_metric_base(quantity, unit);
    present_metric(quantity, &unit)
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_conversions() {
        assert_eq!(convert_to_metric(2.0, "cups"), (480.0, "ml".to_owned()));
        assert_eq!(convert_to_metric(1.0, "T"), (15.0, "ml".to_owned()));
        assert_eq!(convert_to_metric(1.0, "t"), (5.0, "ml".to_owned()));
        assert_eq!(convert_to_metric(5.0, "cup"), (1.2, "l".to_owned()));
    }

    #[test]
    fn test_weight_conversions() {
        assert_eq!(convert_to_metric(1.0, "lb"), (453.6, "g".to_owned()));
        assert_eq!(convert_to_metric(3.0, "Pounds"), (1.4, "kg".to_owned()));
        assert_eq!(convert_to_metric(4.0, "oz"), (113.4, "g".to_owned()));
    }

    #[test]
    fn test_metric_units_share_base_in_any_case() {
        assert_eq!(to_metric_base(1.0, "L"), (1000.0, "ml".to_owned()));
        assert_eq!(to_metric_base(250.0, "ML"), (250.0, "ml".to_owned()));
        assert_eq!(to_metric_base(2.0, "Kg"), (2000.0, "g".to_owned()));
        assert_eq!(to_metric_base(40.0, "grams"), (40.0, "g".to_owned()));
        assert_eq!(convert_to_metric(1.5, "litres"), (1.5, "l".to_owned()));
        assert_eq!(convert_to_metric(750.0, "G"), (750.0, "g".to_owned()));
    }

    #[test]
    fn test_unknown_units_pass_through() {
        assert_eq!(convert_to_metric(3.0, "cloves"), (3.0, "cloves".to_owned()));
        assert_eq!(convert_to_metric(1.0, ""), (1.0, String::new()));
        assert!(metric_factor("can").is_none());
    }
}
