//! SMS gateway outbound adapters.
//!
//! This module provides a reqwest implementation of the `SmsGateway` port
//! against a Twilio-style REST API.

mod dto;
mod twilio;

pub use twilio::{
    DEFAULT_TWILIO_BASE_URL, TwilioCredentials, TwilioSmsGateway, TwilioSmsGatewayBuildError,
};
