use crate::utils::error::{Result, TimeStreamError};
use chrono::TimeDelta;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| TimeStreamError::missing(field_name))
}

pub fn validate_non_zero_amount(field_name: &str, amount: i64) -> Result<()> {
    if amount == 0 {
        return Err(TimeStreamError::InvalidStepMagnitude {
            field: field_name.to_string(),
            value: amount.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_zero_duration(field_name: &str, delta: TimeDelta) -> Result<()> {
    if delta.is_zero() {
        return Err(TimeStreamError::InvalidStepMagnitude {
            field: field_name.to_string(),
            value: delta.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TimeStreamError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(TimeStreamError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        let absent: Option<i32> = None;
        assert_eq!(*validate_required_field("every.unit", &present).unwrap(), 3);

        let err = validate_required_field("every.unit", &absent).unwrap_err();
        assert!(matches!(
            err,
            TimeStreamError::MissingRequiredValue { ref field } if field == "every.unit"
        ));
    }

    #[test]
    fn test_validate_non_zero() {
        assert!(validate_non_zero_amount("every", 2).is_ok());
        assert!(validate_non_zero_amount("every", -2).is_ok());
        assert!(matches!(
            validate_non_zero_amount("every", 0),
            Err(TimeStreamError::InvalidStepMagnitude { .. })
        ));

        assert!(validate_non_zero_duration("every", TimeDelta::seconds(-2)).is_ok());
        assert!(matches!(
            validate_non_zero_duration("every", TimeDelta::zero()),
            Err(TimeStreamError::InvalidStepMagnitude { .. })
        ));
    }

    #[test]
    fn test_validate_strings_and_numbers() {
        assert!(validate_non_empty_string("output.format", "%H:%M").is_ok());
        assert!(validate_non_empty_string("output.format", "  ").is_err());
        assert!(validate_positive_number("output.limit", 5, 1).is_ok());
        assert!(validate_positive_number("output.limit", 0, 1).is_err());
    }
}
