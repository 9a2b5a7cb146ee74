//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

/// Hackathon names appear in headers and blob paths
static HACKATHON_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("hackathon name pattern is valid")
});

/// Validate user name format
pub fn validate_user_name(name: &str) -> Result<(), &'static str> {
    if name.len() < 3 {
        return Err("User name must be at least 3 characters");
    }
    if name.len() > 32 {
        return Err("User name must be at most 32 characters");
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err("User name can only contain letters, numbers, underscores, and hyphens");
    }
    if !name.chars().next().map(|c| c.is_alphabetic()).unwrap_or(false) {
        return Err("User name must start with a letter");
    }
    Ok(())
}

/// Validate a hackathon name
pub fn validate_hackathon_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("Hackathon name cannot be empty");
    }
    if name.len() > 64 {
        return Err("Hackathon name must be at most 64 characters");
    }
    if !HACKATHON_NAME_RE.is_match(name) {
        return Err("Hackathon name can only contain letters, numbers, underscores, and hyphens");
    }
    Ok(())
}

/// Validate a cloud service name (DNS label)
pub fn validate_cloud_service_name(name: &str) -> Result<(), &'static str> {
    if name.len() < 3 || name.len() > 63 {
        return Err("Cloud service name must be 3 to 63 characters");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err("Cloud service name can only contain letters, numbers, and hyphens");
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err("Cloud service name cannot start or end with a hyphen");
    }
    Ok(())
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_user_name() {
        assert!(validate_user_name("alice").is_ok());
        assert!(validate_user_name("Alice_123").is_ok());
        assert!(validate_user_name("ab").is_err()); // Too short
        assert!(validate_user_name("123abc").is_err()); // Starts with number
        assert!(validate_user_name("user@name").is_err()); // Invalid character
    }

    #[test]
    fn test_validate_hackathon_name() {
        assert!(validate_hackathon_name("spring-hack_2024").is_ok());
        assert!(validate_hackathon_name("").is_err());
        assert!(validate_hackathon_name("-leading").is_err());
        assert!(validate_hackathon_name("has space").is_err());
        assert!(validate_hackathon_name("a/b").is_err());
    }

    #[test]
    fn test_validate_cloud_service_name() {
        assert!(validate_cloud_service_name("hack-vm-01").is_ok());
        assert!(validate_cloud_service_name("ab").is_err());
        assert!(validate_cloud_service_name("-svc").is_err());
        assert!(validate_cloud_service_name("svc_1").is_err());
    }

    #[test]
    fn test_cloud_service_name_rejects_path_segments() {
        assert!(validate_cloud_service_name("../storageservices/victim").is_err());
        assert!(validate_cloud_service_name("svc/../../x").is_err());
        assert!(validate_cloud_service_name("svc?comp=media").is_err());
    }

    #[test]
    fn test_hackathon_name_pattern_compiles() {
        assert!(HACKATHON_NAME_RE.is_match("spring-hack"));
        assert!(!HACKATHON_NAME_RE.is_match("_spring"));
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  Spring\u{0007} Hack \n"), "Spring Hack");
    }
}
