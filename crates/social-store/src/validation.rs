//! Input validation run before any network call
//!
//! Lengths are counted in characters, not bytes.

use crate::error::ValidationErrors;
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_POST_LENGTH: usize = 5000;
pub const MAX_COMMENT_LENGTH: usize = 1000;
pub const MAX_STORY_TEXT_LENGTH: usize = 500;
pub const MIN_PASSWORD_LENGTH: usize = 8;

fn username_regex() -> &'static Regex {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    USERNAME_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap())
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn check_body(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: &str,
    max: usize,
) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} cannot be empty", label));
    } else if value.chars().count() > max {
        errors.add(field, format!("{} must be {} characters or less", label, max));
    }
}

pub fn validate_post(content: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_body(&mut errors, "content", "Post content", content, MAX_POST_LENGTH);
    errors.into_result()
}

pub fn validate_comment(content: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_body(&mut errors, "content", "Comment", content, MAX_COMMENT_LENGTH);
    errors.into_result()
}

/// A story needs media or text; text is capped
pub fn validate_story(media_url: Option<&str>, text: Option<&str>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let has_media = media_url.is_some_and(|url| !url.trim().is_empty());
    let text = text.filter(|text| !text.trim().is_empty());

    if !has_media && text.is_none() {
        errors.add("media", "A story needs an image or some text");
    }
    if let Some(text) = text {
        if text.chars().count() > MAX_STORY_TEXT_LENGTH {
            errors.add(
                "text",
                format!("Story text must be {} characters or less", MAX_STORY_TEXT_LENGTH),
            );
        }
    }
    errors.into_result()
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !email_regex().is_match(email) {
        errors.add("email", "Invalid email format");
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_email(&mut errors, email);
    if password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors.into_result()
}

/// Sign-up form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub username: String,
    pub display_name: String,
}

pub fn validate_signup(form: &SignupForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let display_name = form.display_name.trim();
    if display_name.is_empty() {
        errors.add("display_name", "Display name is required");
    } else if display_name.chars().count() < 2 {
        errors.add("display_name", "Display name must be at least 2 characters");
    } else if form.display_name.chars().count() > 100 {
        errors.add("display_name", "Display name must be less than 100 characters");
    }

    let username_len = form.username.chars().count();
    if form.username.trim().is_empty() {
        errors.add("username", "Username is required");
    } else if username_len < 3 {
        errors.add("username", "Username must be at least 3 characters");
    } else if username_len > 30 {
        errors.add("username", "Username must be less than 30 characters");
    } else if !username_regex().is_match(&form.username) {
        errors.add(
            "username",
            "Username can only contain letters, numbers, underscores, and hyphens",
        );
    }

    check_email(&mut errors, &form.email);

    let password = &form.password;
    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add("password", "Password must be at least 8 characters");
    } else if !(password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit()))
    {
        errors.add(
            "password",
            "Password must contain uppercase, lowercase, and numbers",
        );
    }

    if form.confirm_password.is_empty() {
        errors.add("confirm_password", "Please confirm your password");
    } else if form.confirm_password != form.password {
        errors.add("confirm_password", "Passwords do not match");
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            email: "alice@example.com".to_string(),
            password: "Secret123".to_string(),
            confirm_password: "Secret123".to_string(),
            username: "alice_01".to_string(),
            display_name: "Alice".to_string(),
        }
    }

    #[test]
    fn test_post_bounds() {
        assert!(validate_post("hello").is_ok());
        assert!(validate_post("   ").is_err());
        assert!(validate_post(&"x".repeat(MAX_POST_LENGTH)).is_ok());
        assert!(validate_post(&"x".repeat(MAX_POST_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_comment_length_counts_characters() {
        assert!(validate_comment(&"é".repeat(MAX_COMMENT_LENGTH)).is_ok());
        assert!(validate_comment(&"é".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_story_needs_media_or_text() {
        assert!(validate_story(None, None).is_err());
        assert!(validate_story(Some("https://cdn/x.png"), None).is_ok());
        assert!(validate_story(None, Some("hi")).is_ok());
        assert!(validate_story(None, Some(&"x".repeat(501))).is_err());
    }

    #[test]
    fn test_valid_signup() {
        assert!(validate_signup(&valid_form()).is_ok());
    }

    #[test]
    fn test_signup_field_errors() {
        let form = SignupForm {
            username: "al ice".to_string(),
            password: "lowercase1".to_string(),
            confirm_password: "different".to_string(),
            email: "not-an-email".to_string(),
            ..valid_form()
        };
        let errors = validate_signup(&form).unwrap_err();
        assert!(errors.get("username").unwrap().contains("letters"));
        assert!(errors.get("password").unwrap().contains("uppercase"));
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));
        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert_eq!(errors.get("display_name"), None);
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = validate_login("", "").unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }
}
