//! Input validation utilities

use chrono::NaiveDate;
use common::models::EntityId;
use regex::Regex;
use std::sync::OnceLock;

/// Validate a client's full name
pub fn validate_full_name(name: &str) -> Result<(), String> {
    let name = name.trim();

    if name.is_empty() {
        return Err("Full name is required".to_string());
    }

    if name.chars().count() > 100 {
        return Err("Full name must be at most 100 characters long".to_string());
    }

    Ok(())
}

/// Validate phone number
pub fn validate_phone(phone: &str) -> Result<(), String> {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex =
        PHONE_REGEX.get_or_init(|| Regex::new(r"^[0-9 +()\-]+$").expect("Failed to compile phone regex"));

    if !regex.is_match(phone) {
        return Err("Phone can only contain digits, spaces, and + ( ) -".to_string());
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err("Phone must contain between 7 and 15 digits".to_string());
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters long".to_string());
    }

    if username.len() > 64 {
        return Err("Username must be at most 64 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_.@+\-]+$").expect("Failed to compile username regex")
    });

    if !regex.is_match(username) {
        return Err(
            "Username can only contain letters, numbers, and the characters _ . @ + -".to_string(),
        );
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate that a password and its confirmation match
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), String> {
    if password != confirmation {
        return Err("Passwords do not match".to_string());
    }

    Ok(())
}

/// Validate that a referenced record id is present
pub fn validate_reference(field: &str, id: &EntityId) -> Result<(), String> {
    if id.is_empty() {
        return Err(format!("{field} is required"));
    }

    Ok(())
}

/// Validate an amount that must be strictly positive
pub fn validate_positive_amount(field: &str, amount: f64) -> Result<(), String> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(format!("{field} must be greater than zero"));
    }

    Ok(())
}

/// Validate an amount that may be zero but not negative
pub fn validate_non_negative_amount(field: &str, amount: f64) -> Result<(), String> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("{field} must not be negative"));
    }

    Ok(())
}

/// Validate that a date range does not end before it starts
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if end < start {
        return Err("End date must not be before start date".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("300 123 4567").is_ok());
        assert!(validate_phone("+57 (300) 123-4567").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("300-CALL-NOW").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("ana.perez@example.com").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("ana perez").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("correct horse").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
        assert!(validate_password_confirmation("abcdefgh", "abcdefgh").is_ok());
        assert!(validate_password_confirmation("abcdefgh", "abcdefgi").is_err());
    }

    #[test]
    fn test_validate_full_name() {
        assert!(validate_full_name("María José Gómez").is_ok());
        assert!(validate_full_name("   ").is_err());
        assert!(validate_full_name(&"ñ".repeat(100)).is_ok());
        assert!(validate_full_name(&"ñ".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_amounts() {
        assert!(validate_positive_amount("Amount", 1.0).is_ok());
        assert!(validate_positive_amount("Amount", 0.0).is_err());
        assert!(validate_positive_amount("Amount", f64::NAN).is_err());
        assert!(validate_non_negative_amount("Balance", 0.0).is_ok());
        assert!(validate_non_negative_amount("Balance", -0.5).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        assert!(validate_date_range(start, end).is_ok());
        assert!(validate_date_range(start, start).is_ok());
        assert!(validate_date_range(end, start).is_err());
    }
}
