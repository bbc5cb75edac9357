//! Damage cost estimation from detection model output
//!
//! Maps each detected damage class to a part name, looks up the part's
//! unit price in a brand price table, weights by detection confidence,
//! and sums the line prices.

use crate::constants::damage_class_name;
use crate::types::{CostEstimate, PriceDetail, PriceMapping, Prediction};

/// Round a confidence score to three decimal places.
///
/// Rounds half up in decimal terms: a value written as 0.8765 lands on
/// 0.877 even though its nearest f64 sits marginally below the midpoint,
/// so scaled values within the tolerance of a midpoint count as on it.
fn round_confidence(confidence: f64) -> f64 {
    const MIDPOINT_TOLERANCE: f64 = 1e-9;

    let scaled = confidence * 1000.0;
    let floor = scaled.floor();
    if scaled - floor >= 0.5 - MIDPOINT_TOLERANCE {
        (floor + 1.0) / 1000.0
    } else {
        floor / 1000.0
    }
}

/// Estimate total repair cost for a set of detections.
///
/// Each prediction contributes `price * confidence`, where the confidence
/// is rounded to three decimals before multiplication and the price
/// defaults to 0 for parts absent from the mapping. Class ids outside the
/// model's table resolve to "Unknown".
///
/// The returned breakdown keeps input order and never merges duplicate
/// classes; the total is the exact sum of the line prices, not rounded.
pub fn estimate_damage_cost(
    predictions: &[Prediction],
    price_mapping: &PriceMapping,
) -> CostEstimate {
    let mut total_price = 0.0;
    let mut details = Vec::with_capacity(predictions.len());

    for prediction in predictions {
        let confidence = round_confidence(prediction.confidence);
        let part = damage_class_name(prediction.class);
        let unit_price = price_mapping.get(part).copied().unwrap_or(0.0);
        let price = unit_price * confidence;

        total_price += price;
        details.push(PriceDetail {
            confidence,
            part: part.to_string(),
            price,
        });
    }

    CostEstimate {
        total_price,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to build a small price table
    fn price_table() -> PriceMapping {
        let mut table = PriceMapping::new();
        table.insert("Bonnet Dent/Damage".to_string(), 100.0);
        table.insert("Door Outer Panel Dent".to_string(), 180.0);
        table.insert("Front Bumper Damage".to_string(), 250.0);
        table.insert("Headlight Assembly Damage".to_string(), 120.0);
        table
    }

    fn prediction(class: i64, confidence: f64) -> Prediction {
        Prediction { class, confidence }
    }

    // ==========================================
    // Basic estimation tests
    // ==========================================

    #[test]
    fn test_single_prediction() {
        // class 0 = Bonnet Dent/Damage, 0.8765 rounds to 0.877
        // 100 * 0.877 = 87.7
        let estimate = estimate_damage_cost(&[prediction(0, 0.8765)], &price_table());

        assert!((estimate.total_price - 87.7).abs() < 1e-9);
        assert_eq!(estimate.details.len(), 1);
        assert_eq!(estimate.details[0].part, "Bonnet Dent/Damage");
        assert!((estimate.details[0].confidence - 0.877).abs() < 1e-12);
        assert!((estimate.details[0].price - 87.7).abs() < 1e-9);
    }

    #[test]
    fn test_multiple_predictions_sum() {
        // 250 * 0.92 + 120 * 0.75 = 230 + 90 = 320
        let predictions = [prediction(4, 0.92), prediction(6, 0.75)];
        let estimate = estimate_damage_cost(&predictions, &price_table());

        assert!((estimate.total_price - 320.0).abs() < 1e-9);
        assert_eq!(estimate.details.len(), 2);
    }

    #[test]
    fn test_empty_predictions() {
        let estimate = estimate_damage_cost(&[], &price_table());

        assert_eq!(estimate.total_price, 0.0);
        assert!(estimate.details.is_empty());
    }

    #[test]
    fn test_total_equals_sum_of_lines() {
        let predictions = [
            prediction(0, 0.811),
            prediction(2, 0.433),
            prediction(4, 0.999),
        ];
        let estimate = estimate_damage_cost(&predictions, &price_table());

        let line_sum: f64 = estimate.details.iter().map(|d| d.price).sum();
        assert!((estimate.total_price - line_sum).abs() < 1e-12);
    }

    // ==========================================
    // Unknown classes and missing prices
    // ==========================================

    #[test]
    fn test_unknown_class_with_empty_table() {
        let estimate = estimate_damage_cost(&[prediction(99, 0.5)], &PriceMapping::new());

        assert_eq!(estimate.total_price, 0.0);
        assert_eq!(estimate.details.len(), 1);
        assert_eq!(estimate.details[0].part, "Unknown");
        assert!((estimate.details[0].confidence - 0.5).abs() < 1e-12);
        assert_eq!(estimate.details[0].price, 0.0);
    }

    #[test]
    fn test_negative_class_is_unknown() {
        let estimate = estimate_damage_cost(&[prediction(-3, 0.9)], &price_table());

        assert_eq!(estimate.details[0].part, "Unknown");
        assert_eq!(estimate.total_price, 0.0);
    }

    #[test]
    fn test_unknown_entry_in_table_is_priced() {
        // A caller may price "Unknown" explicitly; the default-0 only
        // applies to parts absent from the table
        let mut table = PriceMapping::new();
        table.insert("Unknown".to_string(), 50.0);

        let estimate = estimate_damage_cost(&[prediction(42, 0.5)], &table);

        assert!((estimate.total_price - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_part_missing_from_table_costs_zero() {
        // class 10 = Roof Dent/Damage, not in the helper table
        let estimate = estimate_damage_cost(&[prediction(10, 0.95)], &price_table());

        assert_eq!(estimate.details[0].part, "Roof Dent/Damage");
        assert_eq!(estimate.details[0].price, 0.0);
        assert_eq!(estimate.total_price, 0.0);
    }

    // ==========================================
    // Duplicates and ordering
    // ==========================================

    #[test]
    fn test_duplicate_classes_accumulate() {
        // Two dents on different doors stay two line items
        // 180 * 0.9 + 180 * 0.6 = 162 + 108 = 270
        let predictions = [prediction(2, 0.9), prediction(2, 0.6)];
        let estimate = estimate_damage_cost(&predictions, &price_table());

        assert_eq!(estimate.details.len(), 2);
        assert!((estimate.details[0].price - 162.0).abs() < 1e-9);
        assert!((estimate.details[1].price - 108.0).abs() < 1e-9);
        assert!((estimate.total_price - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_details_preserve_input_order() {
        let predictions = [prediction(13, 0.7), prediction(0, 0.8), prediction(5, 0.6)];
        let estimate = estimate_damage_cost(&predictions, &price_table());

        let parts: Vec<&str> = estimate.details.iter().map(|d| d.part.as_str()).collect();
        assert_eq!(
            parts,
            [
                "Taillight Assembly Damage",
                "Bonnet Dent/Damage",
                "Front Windshield Damage"
            ]
        );
    }

    // ==========================================
    // Rounding behavior
    // ==========================================

    #[test]
    fn test_rounding_happens_before_multiplication() {
        // 0.87649 rounds to 0.876, not 0.877; the unrounded value is
        // never multiplied
        let mut table = PriceMapping::new();
        table.insert("Bonnet Dent/Damage".to_string(), 1000.0);

        let estimate = estimate_damage_cost(&[prediction(0, 0.87649)], &table);

        assert!((estimate.details[0].confidence - 0.876).abs() < 1e-12);
        assert!((estimate.details[0].price - 876.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_confidence_midpoint_rounds_up() {
        assert!((round_confidence(0.8765) - 0.877).abs() < 1e-12);
        assert!((round_confidence(0.0005) - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_round_confidence_below_midpoint_rounds_down() {
        assert!((round_confidence(0.87649) - 0.876).abs() < 1e-12);
        assert!((round_confidence(0.1234) - 0.123).abs() < 1e-12);
    }

    #[test]
    fn test_round_confidence_exact_values_unchanged() {
        assert!((round_confidence(0.5) - 0.5).abs() < 1e-12);
        assert!((round_confidence(1.0) - 1.0).abs() < 1e-12);
        assert_eq!(round_confidence(0.0), 0.0);
    }

    #[test]
    fn test_total_is_not_rounded() {
        // 100 * 0.333 = 33.3 and 100 * 0.667 = 66.7; the total keeps
        // whatever the exact f64 sum is
        let predictions = [prediction(0, 0.333), prediction(0, 0.667)];
        let mut table = PriceMapping::new();
        table.insert("Bonnet Dent/Damage".to_string(), 100.0);

        let estimate = estimate_damage_cost(&predictions, &table);
        let expected = 100.0 * 0.333 + 100.0 * 0.667;

        assert_eq!(estimate.total_price, expected);
    }

    #[test]
    fn test_zero_confidence_costs_nothing() {
        let estimate = estimate_damage_cost(&[prediction(0, 0.0)], &price_table());

        assert_eq!(estimate.total_price, 0.0);
        assert_eq!(estimate.details[0].price, 0.0);
    }
}
