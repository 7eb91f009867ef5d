//! Authentication primitives: sign-up details and login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

use super::{DisplayName, PhoneNumber, UserValidationError};

/// Minimum password length accepted at sign-up.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email did not look like an address.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
    /// Password shorter than [`PASSWORD_MIN`].
    PasswordTooShort { min: usize },
    /// Name rule failed.
    Name(UserValidationError),
    /// Phone rule failed.
    Phone(UserValidationError),
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::Name(err) | Self::Phone(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AuthValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, AuthValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(AuthValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated sign-up form.
///
/// ## Invariants
/// - `name` is trimmed and 2 to 100 characters.
/// - `phone` satisfies the input phone rule.
/// - `password` is at least [`PASSWORD_MIN`] characters and keeps caller
///   whitespace.
///
/// # Examples
/// ```
/// use safety_backend::domain::SignupDetails;
///
/// let details = SignupDetails::try_from_parts(
///     "Priya",
///     "priya@example.com",
///     "+919876543210",
///     "secret1",
/// )
/// .expect("valid sign-up");
/// assert_eq!(details.email(), "priya@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    name: DisplayName,
    email: Email,
    phone: PhoneNumber,
    password: Zeroizing<String>,
}

impl SignupDetails {
    pub fn try_from_parts(
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let name = DisplayName::new(name).map_err(AuthValidationError::Name)?;
        let email = Email::new(email)?;
        let phone = PhoneNumber::new(phone).map_err(AuthValidationError::Phone)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            name,
            email,
            phone,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn email(&self) -> &str {
        self.email.as_ref()
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(AuthValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
