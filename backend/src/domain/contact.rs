//! Emergency contacts owned by a user.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::validate_name;
use super::{PhoneNumber, UserId, UserValidationError};

/// Upper bound on live contacts per user.
pub const MAX_CONTACTS_PER_USER: usize = 10;

/// Name a user gives to one of their contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactName(String);

impl ContactName {
    /// Validate and construct a contact name: trimmed, 2 to 100 characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        validate_name(raw.as_ref()).map(Self)
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ContactName> for String {
    fn from(value: ContactName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ContactName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated input for a contact that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: ContactName,
    pub number: PhoneNumber,
}

/// Stored emergency contact.
///
/// ## Invariants
/// - Owned by exactly one user; never shared.
/// - At most [`MAX_CONTACTS_PER_USER`] live rows exist per owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: ContactName,
    pub number: PhoneNumber,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Mom")]
    #[case("  Dr. Okafor  ")]
    fn contact_names_are_trimmed(#[case] raw: &str) {
        let name = ContactName::new(raw).expect("valid name");
        assert_eq!(name.as_ref(), raw.trim());
    }

    #[rstest]
    #[case("M")]
    #[case("  ")]
    fn contact_names_need_two_characters(#[case] raw: &str) {
        assert!(ContactName::new(raw).is_err());
    }
}
