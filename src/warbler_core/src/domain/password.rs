use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

/// Shortest password the account stores accept.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Strength is the account store's call, not the form's: a weak password is
    /// a valid request that the store rejects.
    pub fn is_weak(&self) -> bool {
        self.0.expose_secret().chars().count() < MIN_PASSWORD_LENGTH
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Password, PasswordError> {
        Password::try_from(Secret::new(raw.to_string()))
    }

    #[test]
    fn empty_password_is_rejected() {
        assert_eq!(parse("").unwrap_err(), PasswordError::Empty);
    }

    #[test]
    fn weakness_is_measured_in_characters() {
        assert!(parse("12345").unwrap().is_weak());
        assert!(!parse("123456").unwrap().is_weak());
        assert!(parse("ééééé").unwrap().is_weak());
    }
}
