//! Form input checks applied before any provider call.

pub const MIN_PASSWORD_LEN: usize = 6;

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let mut parts = normalized.split('@');
    let local = parts.next()?;
    let domain = parts.next()?;
    if local.is_empty() || domain.is_empty() || parts.next().is_some() || normalized.contains(char::is_whitespace) {
        return None;
    }
    Some(normalized)
}

/// Validate login input, returning the normalized email and the password.
pub fn login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = normalize_email(email).ok_or("Enter a valid email address.")?;
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok((email, password.to_owned()))
}

/// Validate signup input, returning the trimmed name, normalized email and password.
pub fn signup_input(name: &str, email: &str, password: &str) -> Result<(String, String, String), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Enter your name.");
    }
    let email = normalize_email(email).ok_or("Enter a valid email address.")?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    Ok((name.to_owned(), email, password.to_owned()))
}

/// Display name derived from the local part of an email.
#[must_use]
pub fn name_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("friend")
        .to_owned()
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
