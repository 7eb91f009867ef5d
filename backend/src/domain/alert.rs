//! Alert log records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Number of alerts returned by the recent-alerts query.
pub const RECENT_ALERTS_LIMIT: usize = 5;

/// Recorded outcome of an alert.
///
/// Dispatch always writes [`AlertStatus::Sent`]; the other values exist so
/// rows written by other tools still decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Sent,
    Partial,
    Failed,
}

impl AlertStatus {
    /// Stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown alert status: {0}")]
pub struct UnknownAlertStatus(pub String);

impl FromStr for AlertStatus {
    type Err = UnknownAlertStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "partial" => Ok(Self::Partial),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownAlertStatus(other.to_owned())),
        }
    }
}

/// Alert entry to append to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlert {
    pub user_id: UserId,
    pub message: String,
    pub alert_time: DateTime<Utc>,
    pub status: AlertStatus,
}

/// Stored alert. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub message: String,
    pub alert_time: DateTime<Utc>,
    pub status: AlertStatus,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AlertStatus::Sent)]
    #[case(AlertStatus::Partial)]
    #[case(AlertStatus::Failed)]
    fn status_parses_its_stored_form(#[case] status: AlertStatus) {
        assert_eq!(status.as_str().parse::<AlertStatus>(), Ok(status));
    }

    #[rstest]
    fn unknown_status_is_rejected() {
        let err = "queued".parse::<AlertStatus>().expect_err("unknown");
        assert_eq!(err.to_string(), "unknown alert status: queued");
    }
}
