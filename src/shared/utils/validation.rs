use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    pub fn validate_name(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} cannot be empty", field)));
        }
        if value.len() > 255 {
            return Err(AppError::Validation(format!(
                "{} too long (max 255 characters)",
                field
            )));
        }
        Ok(())
    }

    pub fn validate_launch_year(year: i32) -> Result<(), AppError> {
        if year <= 0 {
            return Err(AppError::Validation(
                "Launch year must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_duration(minutes: i32) -> Result<(), AppError> {
        if minutes <= 0 {
            return Err(AppError::Validation(
                "Duration must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_oversized_names() {
        assert!(Validator::validate_name("Name", "").is_err());
        assert!(Validator::validate_name("Name", "   ").is_err());
        assert!(Validator::validate_name("Name", &"x".repeat(256)).is_err());
        assert!(Validator::validate_name("Name", "Drama").is_ok());
    }

    #[test]
    fn rejects_non_positive_year_and_duration() {
        assert!(Validator::validate_launch_year(0).is_err());
        assert!(Validator::validate_launch_year(2022).is_ok());
        assert!(Validator::validate_duration(-5).is_err());
        assert!(Validator::validate_duration(120).is_ok());
    }
}
