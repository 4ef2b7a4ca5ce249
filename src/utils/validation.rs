use crate::domain::model::UserInput;
use crate::utils::error::{Result, SajuError};
use chrono::{Datelike, NaiveDate, NaiveTime};
use url::Url;

/// Earliest birth year the input form offers.
pub const MIN_BIRTH_YEAR: i32 = 1940;
/// How many years past the current one a reading may target.
pub const TARGET_YEAR_SPAN: i32 = 5;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SajuError::validation(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SajuError::validation(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(SajuError::validation(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SajuError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SajuError::validation(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Accepts an empty string (unknown time) or a 24h `HH:MM` value.
pub fn validate_birth_time(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() != 5 || NaiveTime::parse_from_str(value, "%H:%M").is_err() {
        return Err(SajuError::validation(
            field_name,
            value,
            "Expected a 24-hour HH:MM time or nothing",
        ));
    }
    Ok(())
}

/// Applies the input form's constraints, relative to `current_year`.
pub fn validate_user_input(input: &UserInput, current_year: i32) -> Result<()> {
    validate_non_empty_string("name", &input.name)?;
    validate_range("birth_year", input.birth_year, MIN_BIRTH_YEAR, current_year)?;
    validate_range("birth_month", input.birth_month, 1, 12)?;
    validate_range("birth_day", input.birth_day, 1, 31)?;

    if NaiveDate::from_ymd_opt(input.birth_year, input.birth_month, input.birth_day).is_none() {
        return Err(SajuError::validation(
            "birth_day",
            format!(
                "{}-{:02}-{:02}",
                input.birth_year, input.birth_month, input.birth_day
            ),
            "Not a calendar date",
        ));
    }

    validate_birth_time("birth_time", &input.birth_time)?;
    validate_range(
        "target_year",
        input.target_year,
        current_year,
        current_year + TARGET_YEAR_SPAN,
    )?;
    Ok(())
}

impl Validate for UserInput {
    fn validate(&self) -> Result<()> {
        validate_user_input(self, chrono::Local::now().year())
    }
}
