//! Measurement text formatting
//!
//! Distance values are meters, area values square meters. Values that
//! truncate to integer zero are not formatted at all; the caller hides the
//! label instead (see [`crate::ui::label::LabelManager`]).

/// True when a measured value truncates to integer zero and its label should
/// be hidden rather than rendered as "0.00".
pub fn truncates_to_zero(value: f64) -> bool {
    value as i64 == 0
}

/// Formats a distance in meters: >= 1 km renders as kilometers, both with two
/// decimal places.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{:.2} m", meters)
    }
}

/// Formats an area in square meters: >= 1 hectare renders as square
/// kilometers. Values are rounded to two decimals with trailing zeros
/// trimmed, so "5000 m²" rather than "5000.00 m²".
pub fn format_area(sq_meters: f64) -> String {
    if sq_meters >= 10_000.0 {
        format!("{} km²", round2(sq_meters / 1_000_000.0))
    } else {
        format!("{} m²", round2(sq_meters))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_below_a_kilometer() {
        assert_eq!(format_distance(950.0), "950.00 m");
    }

    #[test]
    fn test_distance_in_kilometers() {
        assert_eq!(format_distance(1500.0), "1.50 km");
        assert_eq!(format_distance(1000.0), "1.00 km");
    }

    #[test]
    fn test_area_in_square_meters() {
        assert_eq!(format_area(5000.0), "5000 m²");
        assert_eq!(format_area(123.456), "123.46 m²");
    }

    #[test]
    fn test_area_in_square_kilometers() {
        assert_eq!(format_area(25_000.0), "0.03 km²");
        assert_eq!(format_area(2_500_000.0), "2.5 km²");
    }

    #[test]
    fn test_zero_truncation_guard() {
        assert!(truncates_to_zero(0.0));
        assert!(truncates_to_zero(0.99));
        assert!(!truncates_to_zero(1.0));
        assert!(!truncates_to_zero(950.0));
    }
}
