//! Outbound adapter construction from deploy-time settings.
//!
//! Missing SMS credentials never stop startup: the dispatcher reports the
//! gateway as misconfigured on every trigger instead. Identity and completion
//! fall back to fixtures only in debug builds.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use reqwest::Url;
use tracing::{info, warn};
use zeroize::Zeroizing;

use safety_backend::domain::ports::{
    ChatCompletion, FixtureChatCompletion, FixtureIdentityProvider, IdentityProvider, SmsGateway,
    UnconfiguredSmsGateway,
};
use safety_backend::outbound::completion::HttpChatCompletion;
use safety_backend::outbound::identity::SupabaseIdentityProvider;
use safety_backend::outbound::sms::{DEFAULT_TWILIO_BASE_URL, TwilioCredentials, TwilioSmsGateway};
use safety_backend::settings::{
    AppSettings, ChatCompletionSettings, SupabaseSettings, TwilioSettings,
};

/// Driven adapters shared by every worker.
#[derive(Clone)]
pub struct OutboundAdapters {
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) completion: Arc<dyn ChatCompletion>,
    pub(crate) gateway: Arc<dyn SmsGateway>,
    pub(crate) sender_label: String,
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).wrap_err_with(|| format!("invalid {name}"))
}

fn build_gateway(settings: &TwilioSettings) -> Result<Arc<dyn SmsGateway>> {
    let account = match settings.account() {
        Ok(account) => account,
        Err(missing) => {
            let missing = missing.join(", ");
            warn!(%missing, "SMS gateway not configured; SOS dispatch will fail");
            return Ok(Arc::new(UnconfiguredSmsGateway::new(missing)));
        }
    };
    let base_url = parse_url(
        "TWILIO_BASE_URL",
        settings.base_url.as_deref().unwrap_or(DEFAULT_TWILIO_BASE_URL),
    )?;
    let gateway = TwilioSmsGateway::new(
        &base_url,
        TwilioCredentials {
            account_sid: account.account_sid.to_owned(),
            auth_token: Zeroizing::new(account.auth_token.to_owned()),
            from_number: account.phone_number.to_owned(),
        },
        settings.timeout(),
    )
    .wrap_err("failed to build SMS gateway")?;
    info!(base_url = %base_url, "SMS gateway configured");
    Ok(Arc::new(gateway))
}

fn build_identity(settings: &SupabaseSettings) -> Result<Arc<dyn IdentityProvider>> {
    match (settings.url.as_deref(), settings.service_role_key.as_deref()) {
        (Some(url), Some(key)) => {
            let url = parse_url("SUPABASE_URL", url)?;
            let key = Zeroizing::new(key.to_owned());
            let provider = SupabaseIdentityProvider::new(&url, key, settings.timeout())
                .wrap_err("failed to build identity provider")?;
            Ok(Arc::new(provider))
        }
        _ if cfg!(debug_assertions) => {
            warn!("SUPABASE_URL/SUPABASE_SERVICE_ROLE_KEY unset; using fixture identity provider");
            Ok(Arc::new(FixtureIdentityProvider))
        }
        _ => Err(eyre!(
            "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY are required in release builds"
        )),
    }
}

fn build_completion(settings: &ChatCompletionSettings) -> Result<Arc<dyn ChatCompletion>> {
    match settings.url.as_deref() {
        Some(url) => {
            let endpoint = parse_url("CHAT_COMPLETION_URL", url)?;
            let token = settings.token.clone().map(Zeroizing::new);
            let completion = HttpChatCompletion::new(endpoint, token, settings.timeout())
                .wrap_err("failed to build completion client")?;
            Ok(Arc::new(completion))
        }
        None if cfg!(debug_assertions) => {
            warn!("CHAT_COMPLETION_URL unset; using canned assistant replies");
            Ok(Arc::new(FixtureChatCompletion))
        }
        None => Err(eyre!("CHAT_COMPLETION_URL is required in release builds")),
    }
}

/// # Errors
///
/// Fails when a configured URL does not parse, a client cannot be built, or
/// a release build lacks identity or completion settings.
pub fn build_adapters(settings: &AppSettings) -> Result<OutboundAdapters> {
    Ok(OutboundAdapters {
        identity: build_identity(&settings.supabase)?,
        completion: build_completion(&settings.chat_completion)?,
        gateway: build_gateway(&settings.twilio)?,
        sender_label: settings.sos.sender_label().to_owned(),
    })
}
