//! Deploy-time settings loaded via OrthoConfig.
//!
//! One struct per environment prefix. Every field is optional so a bare
//! development environment still boots; the server decides which fallbacks
//! are acceptable.

use std::ffi::OsString;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_SENDER_LABEL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const PROGRAM_NAME: &str = "safety-backend";

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load {prefix} settings: {message}")]
    Load {
        prefix: &'static str,
        message: String,
    },
    #[error("invalid {name}='{value}': {message}")]
    Invalid {
        name: &'static str,
        value: String,
        message: String,
    },
}

/// `TWILIO_*`: SMS gateway account.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TWILIO")]
pub struct TwilioSettings {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Sender number in E.164 form.
    pub phone_number: Option<String>,
    pub base_url: Option<String>,
    #[ortho_config(default = 10)]
    pub timeout_secs: u64,
}

/// Account credentials present in [`TwilioSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioAccount<'a> {
    pub account_sid: &'a str,
    pub auth_token: &'a str,
    pub phone_number: &'a str,
}

impl TwilioSettings {
    /// The account triple, or the names of the missing variables.
    pub fn account(&self) -> Result<TwilioAccount<'_>, Vec<&'static str>> {
        fn pick(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.trim().is_empty())
        }

        match (
            pick(&self.account_sid),
            pick(&self.auth_token),
            pick(&self.phone_number),
        ) {
            (Some(account_sid), Some(auth_token), Some(phone_number)) => Ok(TwilioAccount {
                account_sid,
                auth_token,
                phone_number,
            }),
            (sid, token, number) => Err([
                ("TWILIO_ACCOUNT_SID", sid.is_none()),
                ("TWILIO_AUTH_TOKEN", token.is_none()),
                ("TWILIO_PHONE_NUMBER", number.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `SUPABASE_*`: identity provider project.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUPABASE")]
pub struct SupabaseSettings {
    pub url: Option<String>,
    pub service_role_key: Option<String>,
    #[ortho_config(default = 10)]
    pub timeout_secs: u64,
}

impl SupabaseSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `DATABASE_*`: PostgreSQL store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DATABASE")]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub pool_max_size: Option<u32>,
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

/// `CHAT_COMPLETION_*`: assistant endpoint.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CHAT_COMPLETION")]
pub struct ChatCompletionSettings {
    pub url: Option<String>,
    pub token: Option<String>,
    #[ortho_config(default = 30)]
    pub timeout_secs: u64,
}

impl ChatCompletionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `SERVER_*`: listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    pub bind_addr: Option<String>,
}

impl ServerSettings {
    /// Parsed bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
            name: "SERVER_BIND_ADDR",
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }
}

/// `SOS_*`: alert wording.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SOS")]
pub struct SosSettings {
    /// App name appended to every alert.
    pub sender_label: Option<String>,
}

impl SosSettings {
    pub fn sender_label(&self) -> &str {
        self.sender_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_SENDER_LABEL)
    }
}

/// Every settings group the server reads at startup.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub twilio: TwilioSettings,
    pub supabase: SupabaseSettings,
    pub database: DatabaseSettings,
    pub chat_completion: ChatCompletionSettings,
    pub server: ServerSettings,
    pub sos: SosSettings,
}

fn load_error<E: std::fmt::Display>(prefix: &'static str) -> impl FnOnce(E) -> SettingsError {
    move |err| SettingsError::Load {
        prefix,
        message: err.to_string(),
    }
}

impl AppSettings {
    /// Load all groups from the environment and configuration files.
    ///
    /// Command-line flags are not consulted; groups share no flag namespace.
    pub fn load() -> Result<Self, SettingsError> {
        let args = || [OsString::from(PROGRAM_NAME)];
        Ok(Self {
            twilio: TwilioSettings::load_from_iter(args()).map_err(load_error("TWILIO"))?,
            supabase: SupabaseSettings::load_from_iter(args()).map_err(load_error("SUPABASE"))?,
            database: DatabaseSettings::load_from_iter(args()).map_err(load_error("DATABASE"))?,
            chat_completion: ChatCompletionSettings::load_from_iter(args())
                .map_err(load_error("CHAT_COMPLETION"))?,
            server: ServerSettings::load_from_iter(args()).map_err(load_error("SERVER"))?,
            sos: SosSettings::load_from_iter(args()).map_err(load_error("SOS"))?,
        })
    }
}
