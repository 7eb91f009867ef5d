//! User identity and profile data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user model constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyDisplayName,
    DisplayNameTooShort { min: usize },
    DisplayNameTooLong { max: usize },
    EmptyPhoneNumber,
    PhoneNumberTooShort { min: usize },
    PhoneNumberTooLong { max: usize },
    PhoneNumberInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyDisplayName => write!(f, "name must not be empty"),
            Self::DisplayNameTooShort { min } => {
                write!(f, "name must be at least {min} characters")
            }
            Self::DisplayNameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
            Self::EmptyPhoneNumber => write!(f, "phone number must not be empty"),
            Self::PhoneNumberTooShort { min } => {
                write!(f, "phone number must be at least {min} characters")
            }
            Self::PhoneNumberTooLong { max } => {
                write!(f, "phone number must be at most {max} characters")
            }
            Self::PhoneNumberInvalidCharacters => write!(
                f,
                "phone number may only contain digits with an optional leading +",
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Minimum length of a person's name, counted in characters after trimming.
pub const NAME_MIN: usize = 2;
/// Maximum length of a person's name.
pub const NAME_MAX: usize = 100;

/// Trim and length-check a person's name.
pub(crate) fn validate_name(raw: &str) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyDisplayName);
    }
    let length = trimmed.chars().count();
    if length < NAME_MIN {
        return Err(UserValidationError::DisplayNameTooShort { min: NAME_MIN });
    }
    if length > NAME_MAX {
        return Err(UserValidationError::DisplayNameTooLong { max: NAME_MAX });
    }
    Ok(trimmed.to_owned())
}

/// Human readable name of an account holder.
///
/// Stored trimmed; 2 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        validate_name(display_name.as_ref()).map(Self)
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minimum length of a phone number entered by a user.
pub const PHONE_MIN: usize = 10;
/// Maximum length of a phone number entered by a user.
pub const PHONE_MAX: usize = 15;

static PHONE_INPUT_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_STORED_RE: OnceLock<Regex> = OnceLock::new();

fn phone_input_regex() -> &'static Regex {
    PHONE_INPUT_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9]+$")
            .unwrap_or_else(|error| panic!("phone input regex failed to compile: {error}"))
    })
}

fn phone_stored_regex() -> &'static Regex {
    PHONE_STORED_RE.get_or_init(|| {
        Regex::new(r"^\+?[0-9 ()\-.]+$")
            .unwrap_or_else(|error| panic!("phone stored regex failed to compile: {error}"))
    })
}

/// Phone number able to receive SMS.
///
/// ## Invariants
/// - Values built with [`PhoneNumber::new`] are trimmed, 10 to 15 characters,
///   and contain only digits after an optional leading `+`.
/// - Values read back from the store through [`PhoneNumber::from_stored`]
///   are only required to be non-empty phone characters; rows written before
///   the length rule existed still load.
///
/// # Examples
/// ```
/// use safety_backend::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new(" +15551234567 ").expect("valid phone");
/// assert_eq!(phone.as_ref(), "+15551234567");
/// assert!(PhoneNumber::new("123").is_err());
/// assert!(PhoneNumber::from_stored("+15550001").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate user input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyPhoneNumber);
        }
        let length = trimmed.chars().count();
        if length < PHONE_MIN {
            return Err(UserValidationError::PhoneNumberTooShort { min: PHONE_MIN });
        }
        if length > PHONE_MAX {
            return Err(UserValidationError::PhoneNumberTooLong { max: PHONE_MAX });
        }
        if !phone_input_regex().is_match(trimmed) {
            return Err(UserValidationError::PhoneNumberInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Accept a number previously persisted by the store.
    pub fn from_stored(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyPhoneNumber);
        }
        if !phone_stored_regex().is_match(trimmed) {
            return Err(UserValidationError::PhoneNumberInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_stored(value)
    }
}

/// Profile of an account holder, as seen by alert recipients.
///
/// ## Invariants
/// - `id` is a valid UUID.
/// - `name` and `phone` satisfy their own type invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    id: UserId,
    name: DisplayName,
    phone: PhoneNumber,
}

impl UserProfile {
    /// Build a profile from validated components.
    pub fn new(id: UserId, name: DisplayName, phone: PhoneNumber) -> Self {
        Self { id, name, phone }
    }

    /// Owning user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Name interpolated into alert messages.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Call-back number interpolated into alert messages.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }
}
