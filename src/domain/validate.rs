use super::error::ValidationError;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

pub fn check_rating(field: &str, value: u8, max: u8) -> Result<(), ValidationError> {
    if value > max {
        return Err(ValidationError::RatingOutOfRange {
            field: field.to_string(),
            value,
            max,
        });
    }
    Ok(())
}

pub fn check_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

pub fn today() -> String {
    chrono::Local::now().date_naive().format(DATE_FORMAT).to_string()
}
