use serde::Serialize;

use super::ValidationError;

/// Display name carried by a role profile. 2 to 100 characters, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let len = trimmed.chars().count();
        if !(2..=100).contains(&len) {
            return Err(ValidationError::InvalidName);
        }
        Ok(DisplayName(trimmed.to_owned()))
    }
}

impl TryFrom<&str> for DisplayName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        DisplayName::try_from(value.to_owned())
    }
}
