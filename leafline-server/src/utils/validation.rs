//! Input validation helpers
//!
//! Centralized request validation for the delivery endpoints.

use crate::db::models::GeoPoint;
use crate::utils::AppError;

/// Rejection message when a request arrives without usable coordinates.
pub const COORDINATES_REQUIRED: &str = "User coordinates required to calculate delivery zone.";

/// Extract a `{lat, lng}` pair from a JSON request body.
///
/// Missing fields and non-numeric values are both caller errors and are
/// rejected before any slot computation happens.
pub fn parse_coordinates(body: &serde_json::Value) -> Result<GeoPoint, AppError> {
    let lat = body.get("lat").and_then(serde_json::Value::as_f64);
    let lng = body.get("lng").and_then(serde_json::Value::as_f64);

    match (lat, lng) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
            Ok(GeoPoint { lat, lng })
        }
        _ => Err(AppError::validation(COORDINATES_REQUIRED)),
    }
}

/// Validate that a delivery cutoff hour is a real local hour.
pub fn validate_cutoff_hour(hour: u8) -> Result<(), AppError> {
    if hour > 23 {
        return Err(AppError::validation(format!(
            "delivery_cutoff_hour must be between 0 and 23, got {hour}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_coordinates_ok() {
        let body = json!({"lat": 44.0, "lng": -76.0});
        let point = parse_coordinates(&body).unwrap();
        assert_eq!(point.lat, 44.0);
        assert_eq!(point.lng, -76.0);
    }

    #[test]
    fn test_parse_coordinates_missing() {
        for body in [json!({}), json!({"lat": 44.0}), json!({"lng": -76.0})] {
            let err = parse_coordinates(&body).unwrap_err();
            assert!(matches!(err, AppError::Validation(msg) if msg == COORDINATES_REQUIRED));
        }
    }

    #[test]
    fn test_parse_coordinates_non_numeric() {
        let body = json!({"lat": "44.0", "lng": -76.0});
        let err = parse_coordinates(&body).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == COORDINATES_REQUIRED));
    }

    #[test]
    fn test_validate_cutoff_hour() {
        assert!(validate_cutoff_hour(0).is_ok());
        assert!(validate_cutoff_hour(23).is_ok());
        assert!(validate_cutoff_hour(24).is_err());
    }
}
