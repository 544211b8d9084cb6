//! # Validation Utilities
//!
//! Input validation helpers. Messages name the offending field in quotes,
//! e.g. `"email" must be a valid email`, and are shown to users verbatim.

/// Validate that a field was submitted at all.
pub fn validate_required<'a>(value: Option<&'a str>, field_name: &str) -> Result<&'a str, String> {
    value.ok_or_else(|| format!("\"{}\" is required", field_name))
}

/// Validate that a string is not empty.
///
/// Whitespace counts as content; only the empty string is rejected.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.is_empty() {
        Err(format!("\"{}\" is not allowed to be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format.
///
/// Accepts `local@domain` where the local part has no whitespace and the
/// domain has at least two dot-separated labels, each made of ASCII
/// alphanumerics and inner hyphens, with an alphabetic top-level label.
pub fn validate_email(email: &str, field_name: &str) -> Result<(), String> {
    validate_not_empty(email, field_name)?;

    if is_well_formed_email(email) {
        Ok(())
    } else {
        Err(format!("\"{}\" must be a valid email", field_name))
    }
}

fn is_well_formed_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    if local.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || domain.len() > 253 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}
