use crate::utils::error::{Result, WhatsappError};

/// Calling codes for countries the deployment is expected to run in.
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("India", "91"),
    ("United States", "1"),
    ("United Kingdom", "44"),
    ("United Arab Emirates", "971"),
    ("Saudi Arabia", "966"),
    ("Singapore", "65"),
    ("Australia", "61"),
    ("Canada", "1"),
];

/// Prefixes treated as "already has a country code" when the number is long
/// enough past the prefix.
const KNOWN_PREFIXES: &[&str] = &["1", "44", "91", "971", "966", "65", "61", "86", "81"];

const DEFAULT_COUNTRY_CODE: &str = "91";

/// Calling code for a country name, falling back to India.
pub fn country_code_for(country: Option<&str>) -> &'static str {
    country
        .and_then(|name| {
            COUNTRY_CODES
                .iter()
                .find(|(c, _)| *c == name)
                .map(|(_, code)| *code)
        })
        .unwrap_or(DEFAULT_COUNTRY_CODE)
}

/// Normalize a raw phone string for the gateway: digits only, country code
/// prefixed, 10-15 digits total.
///
/// The "already has a country code" check is a heuristic: a known prefix plus
/// more than 8 further digits. Numbers that coincidentally start with a calling
/// code at other lengths can be misclassified; callers should treat the result
/// as best-effort.
pub fn normalize_phone(raw: &str, default_country: Option<&str>) -> Result<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(WhatsappError::ValidationError {
            message: "Invalid phone number format".to_string(),
        });
    }

    let default_code = country_code_for(default_country);

    let has_country_code = KNOWN_PREFIXES
        .iter()
        .any(|prefix| digits.starts_with(prefix) && digits.len() > prefix.len() + 8);

    let phone = if has_country_code {
        digits
    } else if digits.len() == 10 {
        format!("{}{}", default_code, digits)
    } else if digits.len() < 10 {
        return Err(WhatsappError::ValidationError {
            message: "Phone number is too short. Please provide a valid phone number with country code."
                .to_string(),
        });
    } else {
        digits
    };

    if phone.len() < 10 || phone.len() > 15 {
        return Err(WhatsappError::ValidationError {
            message:
                "Invalid phone number length. Phone number should be between 10-15 digits including country code."
                    .to_string(),
        });
    }

    Ok(phone)
}
