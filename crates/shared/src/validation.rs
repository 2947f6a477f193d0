//! Common validation utilities.

use chrono::{NaiveDate, Utc};
use validator::ValidationError;

/// Highest shelf level a rack can physically have.
const MAX_SHELF_LEVEL: i32 = 50;

/// Upper bound for a single weight measurement in grams (100 kg).
const MAX_WEIGHT_GRAMS: f64 = 100_000.0;

/// Validates that a shelf level is within 1..=50.
pub fn validate_shelf_level(level: i32) -> Result<(), ValidationError> {
    if (1..=MAX_SHELF_LEVEL).contains(&level) {
        Ok(())
    } else {
        let mut err = ValidationError::new("shelf_level_range");
        err.message = Some("Shelf level must be between 1 and 50".into());
        Err(err)
    }
}

/// Validates that a weight measurement is positive and plausible.
pub fn validate_weight_grams(weight: f64) -> Result<(), ValidationError> {
    if weight > 0.0 && weight <= MAX_WEIGHT_GRAMS {
        Ok(())
    } else {
        let mut err = ValidationError::new("weight_range");
        err.message = Some("Weight must be between 0 and 100000 grams".into());
        Err(err)
    }
}

/// Validates that an interval length is at least one day.
pub fn validate_interval_days(days: i32) -> Result<(), ValidationError> {
    if days >= 1 {
        Ok(())
    } else {
        let mut err = ValidationError::new("interval_days_range");
        err.message = Some("Interval must be at least 1 day".into());
        Err(err)
    }
}

/// Validates a day-of-week list (0 = Sunday .. 6 = Saturday, non-empty).
pub fn validate_days_of_week(days: &[i16]) -> Result<(), ValidationError> {
    if days.is_empty() {
        let mut err = ValidationError::new("days_of_week_empty");
        err.message = Some("At least one day of week is required".into());
        return Err(err);
    }
    if days.iter().all(|d| (0..=6).contains(d)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("days_of_week_range");
        err.message = Some("Days of week must be between 0 (Sunday) and 6 (Saturday)".into());
        Err(err)
    }
}

/// Validates that a date is not in the future (hatch/acquisition dates).
pub fn validate_not_future_date(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date <= Utc::now().date_naive() {
        Ok(())
    } else {
        let mut err = ValidationError::new("future_date");
        err.message = Some("Date cannot be in the future".into());
        Err(err)
    }
}

/// Validates an ISO 4217 currency code (three uppercase ASCII letters).
pub fn validate_currency(code: &str) -> Result<(), ValidationError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("currency_format");
        err.message = Some("Currency must be a three-letter uppercase code".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_shelf_level() {
        assert!(validate_shelf_level(1).is_ok());
        assert!(validate_shelf_level(50).is_ok());
        assert!(validate_shelf_level(0).is_err());
        assert!(validate_shelf_level(-3).is_err());
        assert!(validate_shelf_level(51).is_err());
    }

    #[test]
    fn test_validate_weight_grams() {
        assert!(validate_weight_grams(0.5).is_ok());
        assert!(validate_weight_grams(2500.0).is_ok());
        assert!(validate_weight_grams(0.0).is_err());
        assert!(validate_weight_grams(-10.0).is_err());
        assert!(validate_weight_grams(200_000.0).is_err());
    }

    #[test]
    fn test_validate_interval_days() {
        assert!(validate_interval_days(1).is_ok());
        assert!(validate_interval_days(14).is_ok());
        assert!(validate_interval_days(0).is_err());
        assert!(validate_interval_days(-5).is_err());
    }

    #[test]
    fn test_validate_days_of_week() {
        assert!(validate_days_of_week(&[0, 3, 6]).is_ok());
        assert!(validate_days_of_week(&[]).is_err());
        assert!(validate_days_of_week(&[7]).is_err());
        assert!(validate_days_of_week(&[-1]).is_err());
    }

    #[test]
    fn test_validate_not_future_date() {
        let today = Utc::now().date_naive();
        assert!(validate_not_future_date(&today).is_ok());
        assert!(validate_not_future_date(&(today - Duration::days(365))).is_ok());
        assert!(validate_not_future_date(&(today + Duration::days(1))).is_err());
    }

    #[test]
    fn test_validate_currency() {
        assert!(validate_currency("USD").is_ok());
        assert!(validate_currency("EUR").is_ok());
        assert!(validate_currency("usd").is_err());
        assert!(validate_currency("US").is_err());
        assert!(validate_currency("DOLLARS").is_err());
    }
}
