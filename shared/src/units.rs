//! Unit conversion for body metrics
//!
//! Profiles are entered in imperial units (feet/inches, pounds) and every
//! formula works in SI. Conversion happens here and nowhere else.

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Meters per inch
pub const M_PER_INCH: f64 = 0.0254;

/// Body weight in kilograms from pounds
pub fn pounds_to_kg(pounds: f64) -> f64 {
    pounds * KG_PER_LB
}

// ============================================================================
// Height
// ============================================================================

/// Total height in inches from a feet + inches pair
pub fn total_inches(feet: u32, inches: u32) -> u32 {
    feet.saturating_mul(12).saturating_add(inches)
}

/// Height in centimeters from a feet + inches pair
pub fn feet_inches_to_cm(feet: u32, inches: u32) -> f64 {
    total_inches(feet, inches) as f64 * CM_PER_INCH
}

/// Height in meters from a feet + inches pair
pub fn feet_inches_to_m(feet: u32, inches: u32) -> f64 {
    total_inches(feet, inches) as f64 * M_PER_INCH
}

/// Format a height the way it is shown in the profile summary: `5'10"`
pub fn format_feet_inches(feet: u32, inches: u32) -> String {
    format!("{}'{}\"", feet, inches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_weight_conversion() {
        assert!((pounds_to_kg(180.0) - 81.64656).abs() < 1e-9);
        assert_eq!(pounds_to_kg(0.0), 0.0);
    }

    #[test]
    fn test_height_conversion() {
        assert_eq!(total_inches(5, 10), 70);
        assert!((feet_inches_to_cm(5, 10) - 177.8).abs() < 1e-9);
        assert!((feet_inches_to_m(6, 0) - 1.8288).abs() < 1e-9);
        assert_eq!(format_feet_inches(5, 10), "5'10\"");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: converting a sum equals summing the conversions
        #[test]
        fn prop_pounds_to_kg_is_linear(a in 0.0f64..500.0, b in 0.0f64..500.0) {
            prop_assert!((pounds_to_kg(a + b) - (pounds_to_kg(a) + pounds_to_kg(b))).abs() < 1e-9);
        }

        /// Property: centimeters and meters agree
        #[test]
        fn prop_cm_and_m_agree(feet in 0u32..9, inches in 0u32..12) {
            let cm = feet_inches_to_cm(feet, inches);
            let m = feet_inches_to_m(feet, inches);
            prop_assert!((cm / 100.0 - m).abs() < 1e-9);
        }
    }
}
