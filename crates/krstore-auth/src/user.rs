//! User types and the mock sign-in forms.

use crate::AuthError;
use serde::{Deserialize, Serialize};

/// A signed-in shopper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl User {
    /// Create a user.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Name shown in the header.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Sign in with email and password.
///
/// The password is required but never checked. The display name is the
/// local part of the email.
pub fn sign_in(email: &str, password: &str) -> Result<User, AuthError> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }

    let name = email.split('@').next().unwrap_or_default().to_string();
    Ok(User { name, email })
}

/// Create an account from the sign-up form.
pub fn sign_up(name: &str, email: &str, password: &str, confirm: &str) -> Result<User, AuthError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::MissingName);
    }
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    if password != confirm {
        return Err(AuthError::PasswordMismatch);
    }

    Ok(User::new(name, email))
}

fn validate_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::InvalidEmail(email.to_string()));
    }
    Ok(email.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_derives_name() {
        let user = sign_in("sokha@example.com", "secret").unwrap();
        assert_eq!(user.name, "sokha");
        assert_eq!(user.email, "sokha@example.com");
    }

    #[test]
    fn test_sign_in_validation() {
        assert!(matches!(sign_in("", "x"), Err(AuthError::InvalidEmail(_))));
        assert!(matches!(sign_in("no-at-sign", "x"), Err(AuthError::InvalidEmail(_))));
        assert!(matches!(sign_in("a@b.c", ""), Err(AuthError::MissingPassword)));
    }

    #[test]
    fn test_sign_up() {
        let user = sign_up(" Chan Dara ", "dara@example.com", "pw", "pw").unwrap();
        assert_eq!(user, User::new("Chan Dara", "dara@example.com"));

        assert!(matches!(
            sign_up("", "dara@example.com", "pw", "pw"),
            Err(AuthError::MissingName)
        ));
        assert!(matches!(
            sign_up("Dara", "dara@example.com", "pw", "other"),
            Err(AuthError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(User::new("", "x@y.z").display_name(), "x@y.z");
    }
}
