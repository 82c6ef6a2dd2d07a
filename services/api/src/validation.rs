//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate an email address for registration
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email không được để trống".to_string());
    }

    if email.len() > 254 {
        return Err("Email quá dài".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Email không hợp lệ".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("khach@example.com").is_ok());
        assert!(validate_email("huong.nguyen+shop@mail.example.vn").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(validate_email("").is_err());
        assert!(validate_email("khach").is_err());
        assert!(validate_email("khach@").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("khach@example").is_err());
    }
}
