use regex::Regex;
use std::sync::LazyLock;

use super::RegisterRequest;
use crate::domain::speaker::Language;

const MIN_NAME_CHARS: usize = 3;
const MAX_NAME_CHARS: usize = 50;
const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

// Sri Lankan mobile numbers, with or without the +94 / 0 prefix
static WHATSAPP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+94|0)?7[0-9]{8}$").expect("valid phone pattern"));

/// Registration input after trimming and validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRegistration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub whatsapp_number: String,
    pub language: Language,
}

/// Check every field, reporting the first failure
pub fn validate_registration(request: &RegisterRequest) -> Result<ValidatedRegistration, String> {
    let full_name = request.full_name.trim();
    let name_chars = full_name.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&name_chars) {
        return Err(format!(
            "Full name must be between {} and {} characters",
            MIN_NAME_CHARS, MAX_NAME_CHARS
        ));
    }

    let email = request.email.trim();
    if !EMAIL.is_match(email) {
        return Err("Email address is not valid".to_string());
    }

    if request.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        ));
    }

    let whatsapp_number: String = request
        .whatsapp_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if !WHATSAPP_NUMBER.is_match(&whatsapp_number) {
        return Err("WhatsApp number is not a valid Sri Lankan mobile number".to_string());
    }

    let language = request
        .language
        .parse::<Language>()
        .ok()
        .filter(Language::is_native_option)
        .ok_or_else(|| "Language must be Sinhala or Tamil".to_string())?;

    Ok(ValidatedRegistration {
        full_name: full_name.to_string(),
        email: email.to_string(),
        password: request.password.clone(),
        whatsapp_number,
        language,
    })
}
