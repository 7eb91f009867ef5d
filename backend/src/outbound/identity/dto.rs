//! DTOs for the auth REST API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct SignupRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) data: SignupMetadataDto<'a>,
}

/// User metadata stored alongside the identity.
#[derive(Debug, Serialize)]
pub(super) struct SignupMetadataDto<'a> {
    pub(super) name: &'a str,
    pub(super) phone: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrantDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthUserDto {
    pub(super) id: String,
}

/// Sign-up answers with a bare user when confirmation is pending and with a
/// session wrapping the user otherwise; both shapes are accepted.
#[derive(Debug, Deserialize)]
pub(super) struct AuthResponseDto {
    #[serde(default)]
    pub(super) id: Option<String>,
    #[serde(default)]
    pub(super) user: Option<AuthUserDto>,
}

impl AuthResponseDto {
    pub(super) fn into_user_id(self) -> Option<String> {
        self.user.map(|user| user.id).or(self.id)
    }
}

/// Error bodies vary between API versions; any of these may carry the text.
#[derive(Debug, Default, Deserialize)]
pub(super) struct AuthErrorDto {
    #[serde(default)]
    pub(super) msg: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) error_description: Option<String>,
}

impl AuthErrorDto {
    pub(super) fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
    }
}
