//! DTOs for decoding Twilio-style message responses.

use serde::Deserialize;

use crate::domain::ports::SmsReceipt;

/// Status recorded when a 2xx body says nothing about the message.
pub(super) const UNKNOWN_STATUS: &str = "unknown";

/// Body of a successful `Messages.json` create call.
#[derive(Debug, Default, Deserialize)]
pub(super) struct MessageResourceDto {
    #[serde(default)]
    pub(super) sid: Option<String>,
    #[serde(default)]
    pub(super) status: Option<String>,
}

impl MessageResourceDto {
    /// Blank sids are treated as absent.
    pub(super) fn into_receipt(self) -> SmsReceipt {
        let message_sid = self
            .sid
            .map(|sid| sid.trim().to_owned())
            .filter(|sid| !sid.is_empty());
        SmsReceipt {
            message_sid,
            status: self
                .status
                .unwrap_or_else(|| UNKNOWN_STATUS.to_owned()),
        }
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) code: Option<i64>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl ErrorBodyDto {
    /// Human readable summary, e.g. `21211: The 'To' number is not valid`.
    pub(super) fn summary(&self) -> Option<String> {
        let message = self.message.as_deref()?.trim();
        if message.is_empty() {
            return None;
        }
        Some(match self.code {
            Some(code) => format!("{code}: {message}"),
            None => message.to_owned(),
        })
    }
}
