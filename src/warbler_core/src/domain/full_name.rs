use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_FULL_NAME_LENGTH: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("Full name must not be empty")]
    Empty,
    #[error("Full name must be at most {MAX_FULL_NAME_LENGTH} characters")]
    TooLong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FullName {
    type Error = FullNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(FullNameError::Empty);
        }
        if value.chars().count() > MAX_FULL_NAME_LENGTH {
            return Err(FullNameError::TooLong);
        }
        Ok(Self(value.to_owned()))
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_bounds_length() {
        assert_eq!(
            FullName::try_from(" Ada Lovelace ".to_string()).unwrap().as_str(),
            "Ada Lovelace"
        );
        assert_eq!(FullName::try_from("\t".to_string()), Err(FullNameError::Empty));
        assert_eq!(
            FullName::try_from("x".repeat(51)),
            Err(FullNameError::TooLong)
        );
    }
}
