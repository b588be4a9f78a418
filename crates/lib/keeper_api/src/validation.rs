//! Request validation, run before any service is called.
//!
//! Each `validate_*` function returns the list of problems found; an empty
//! list means the request is acceptable.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, AppResult};
use crate::models::{CreateSecretRequest, LoginRequest, RegisterRequest};

static USER_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// Characters a password may contain besides ASCII letters and digits.
const PASSWORD_SPECIALS: &str = "@$!%*?&";

const MAX_TITLE_CHARS: usize = 255;

fn length_between(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

/// 5–30 chars of `[A-Za-z0-9_]`, starting with a letter.
pub fn is_valid_user_name(user_name: &str) -> bool {
    length_between(user_name, 5, 30) && USER_NAME_REGEX.is_match(user_name)
}

/// 5–30 chars from letters, digits and `@$!%*?&`, with at least one of each class.
pub fn is_valid_password(password: &str) -> bool {
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    allowed
        && length_between(password, 5, 30)
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// 1–30 Unicode letters.
pub fn is_valid_person_name(name: &str) -> bool {
    length_between(name, 1, 30) && name.chars().all(char::is_alphabetic)
}

pub fn validate_login(req: &LoginRequest) -> Vec<String> {
    let mut errors = Vec::new();
    if !is_valid_user_name(&req.user_name) {
        errors.push("user_name is invalid".to_string());
    }
    if !is_valid_password(&req.password) {
        errors.push("password is invalid".to_string());
    }
    errors
}

pub fn validate_register(req: &RegisterRequest) -> Vec<String> {
    let mut errors = Vec::new();
    if !is_valid_user_name(&req.user_name) {
        errors.push("user_name is invalid".to_string());
    }
    if !is_valid_password(&req.password) {
        errors.push("password is invalid".to_string());
    }
    if req.password_confirm != req.password {
        errors.push("password_confirm does not match password".to_string());
    }
    if !is_valid_person_name(&req.first_name) {
        errors.push("first_name is invalid".to_string());
    }
    if !is_valid_person_name(&req.last_name) {
        errors.push("last_name is invalid".to_string());
    }
    errors
}

pub fn validate_create_secret(req: &CreateSecretRequest) -> Vec<String> {
    let mut errors = Vec::new();
    if req.title.trim().is_empty() {
        errors.push("title is required".to_string());
    } else if req.title.chars().count() > MAX_TITLE_CHARS {
        errors.push(format!("title must be at most {MAX_TITLE_CHARS} characters"));
    }
    errors
}

/// Turn a list of problems into a 422.
pub fn ensure_valid(errors: Vec<String>) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use keeper_core::secrets::codec::SecretPayload;

    use super::*;

    fn register(user_name: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            user_name: user_name.into(),
            password: password.into(),
            password_confirm: confirm.into(),
            first_name: "Alice".into(),
            last_name: "Doe".into(),
        }
    }

    #[test]
    fn user_name_rules() {
        assert!(is_valid_user_name("alice_01"));
        assert!(is_valid_user_name("Abcde"));
        assert!(!is_valid_user_name("abcd"));
        assert!(!is_valid_user_name(&"a".repeat(31)));
        assert!(is_valid_user_name(&"a".repeat(30)));
        assert!(!is_valid_user_name("1alice"));
        assert!(!is_valid_user_name("_alice"));
        assert!(!is_valid_user_name("alice-01"));
        assert!(!is_valid_user_name("alice 01"));
    }

    #[test]
    fn password_rules() {
        assert!(is_valid_password("Secret1!"));
        assert!(is_valid_password("a1@bc"));
        assert!(!is_valid_password("a1@b"));
        assert!(!is_valid_password("password123"));
        assert!(!is_valid_password("Secret!!"));
        assert!(!is_valid_password("12345!"));
        assert!(!is_valid_password("Secret1#"));
        assert!(!is_valid_password(&format!("Secret1!{}", "a".repeat(23))));
    }

    #[test]
    fn person_name_rules() {
        assert!(is_valid_person_name("Alice"));
        assert!(is_valid_person_name("Élodie"));
        assert!(is_valid_person_name("Иван"));
        assert!(!is_valid_person_name(""));
        assert!(!is_valid_person_name("Al1ce"));
        assert!(!is_valid_person_name("Mary Ann"));
        assert!(!is_valid_person_name(&"ж".repeat(31)));
    }

    #[test]
    fn register_accepts_valid_request() {
        assert!(validate_register(&register("alice_01", "Secret1!", "Secret1!")).is_empty());
    }

    #[test]
    fn register_rejects_mismatched_confirmation() {
        let errors = validate_register(&register("alice_01", "Secret1!", "Secret2!"));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("password_confirm"));
    }

    #[test]
    fn register_collects_every_problem() {
        let mut req = register("1x", "short", "other");
        req.first_name = String::new();
        let errors = validate_register(&req);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn login_rules_match_registration() {
        let ok = LoginRequest {
            user_name: "alice_01".into(),
            password: "Secret1!".into(),
        };
        assert!(validate_login(&ok).is_empty());

        let bad = LoginRequest {
            user_name: "al".into(),
            password: "x".into(),
        };
        assert_eq!(validate_login(&bad).len(), 2);
    }

    #[test]
    fn secret_title_is_required() {
        let req = CreateSecretRequest {
            title: "   ".into(),
            data: SecretPayload::Text("x".into()),
        };
        assert_eq!(validate_create_secret(&req).len(), 1);
    }

    #[test]
    fn ensure_valid_maps_to_validation_error() {
        assert!(ensure_valid(Vec::new()).is_ok());
        let err = ensure_valid(vec!["a".into(), "b".into()]).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "a; b"));
    }
}
