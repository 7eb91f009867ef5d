//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure leaves as `invalid_request` with
//! `details: {field, code}` so clients can highlight the offending input.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{AuthValidationError, ChatContentError, Error, UserValidationError};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    Error::invalid_request(format!("{name} must be a valid UUID")).with_details(json!({
        "field": name,
        "value": value,
        "code": "invalid_uuid",
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Map a name or phone rule failure onto the field that carried it.
pub(crate) fn map_user_validation_error(field: FieldName, err: UserValidationError) -> Error {
    let code = match &err {
        UserValidationError::EmptyId | UserValidationError::InvalidId => "invalid_id",
        UserValidationError::EmptyDisplayName => "empty_name",
        UserValidationError::DisplayNameTooShort { .. } => "name_too_short",
        UserValidationError::DisplayNameTooLong { .. } => "name_too_long",
        UserValidationError::EmptyPhoneNumber => "empty_phone",
        UserValidationError::PhoneNumberTooShort { .. } => "phone_too_short",
        UserValidationError::PhoneNumberTooLong { .. } => "phone_too_long",
        UserValidationError::PhoneNumberInvalidCharacters => "invalid_phone",
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn map_auth_validation_error(err: AuthValidationError) -> Error {
    let message = err.to_string();
    match err {
        AuthValidationError::EmptyEmail => {
            field_error(FieldName::new("email"), "empty_email", message)
        }
        AuthValidationError::InvalidEmail => {
            field_error(FieldName::new("email"), "invalid_email", message)
        }
        AuthValidationError::EmptyPassword => {
            field_error(FieldName::new("password"), "empty_password", message)
        }
        AuthValidationError::PasswordTooShort { .. } => {
            field_error(FieldName::new("password"), "password_too_short", message)
        }
        AuthValidationError::Name(inner) => {
            map_user_validation_error(FieldName::new("name"), inner)
        }
        AuthValidationError::Phone(inner) => {
            map_user_validation_error(FieldName::new("phone"), inner)
        }
    }
}

pub(crate) fn map_chat_content_error(err: ChatContentError) -> Error {
    let code = match err {
        ChatContentError::Empty => "empty_message",
        ChatContentError::TooLong { .. } => "message_too_long",
    };
    field_error(FieldName::new("message"), code, err.to_string())
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error = match &err {
        JsonPayloadError::ContentType => Error::invalid_request("expected application/json body")
            .with_details(json!({ "code": "invalid_content_type" })),
        JsonPayloadError::Deserialize(inner) => {
            Error::invalid_request(format!("invalid request body: {inner}"))
                .with_details(json!({ "code": "invalid_json" }))
        }
        _ => Error::invalid_request(format!("invalid request body: {err}"))
            .with_details(json!({ "code": "invalid_body" })),
    };
    error.into()
}

/// JSON extractor config turning body errors into the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(json_error_handler)
}
