use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A validated, normalized email address.
///
/// Addresses are lowercased on parse so that uniqueness and lookups are
/// case-insensitive everywhere without the stores having to care.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();

        if normalized.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidEmail);
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(ValidationError::InvalidEmail);
        };

        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Email(normalized))
    }
}

impl TryFrom<&str> for Email {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Email::try_from(value.to_owned())
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
