//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they stay testable without a database or outbound HTTP.

use std::sync::Arc;

use crate::domain::ports::{
    AccountCommand, AlertsQuery, ChatCommand, ChatQuery, ContactsCommand, ContactsQuery,
    SosDispatch, UserProfileQuery,
};

/// Parameter object bundling every port the handlers call.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub account: Arc<dyn AccountCommand>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub contacts: Arc<dyn ContactsQuery>,
    pub contacts_command: Arc<dyn ContactsCommand>,
    pub alerts: Arc<dyn AlertsQuery>,
    pub sos: Arc<dyn SosDispatch>,
    pub chat: Arc<dyn ChatCommand>,
    pub chat_query: Arc<dyn ChatQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub account: Arc<dyn AccountCommand>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub contacts: Arc<dyn ContactsQuery>,
    pub contacts_command: Arc<dyn ContactsCommand>,
    pub alerts: Arc<dyn AlertsQuery>,
    pub sos: Arc<dyn SosDispatch>,
    pub chat: Arc<dyn ChatCommand>,
    pub chat_query: Arc<dyn ChatQuery>,
}

impl HttpState {
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use safety_backend::domain::ports::{
    ///     FixtureAccountCommand, FixtureAlertsQuery, FixtureChatCommand, FixtureChatQuery,
    ///     FixtureContactsCommand, FixtureContactsQuery, FixtureSosDispatch,
    ///     FixtureUserProfileQuery,
    /// };
    /// use safety_backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     account: Arc::new(FixtureAccountCommand),
    ///     profile: Arc::new(FixtureUserProfileQuery),
    ///     contacts: Arc::new(FixtureContactsQuery),
    ///     contacts_command: Arc::new(FixtureContactsCommand),
    ///     alerts: Arc::new(FixtureAlertsQuery),
    ///     sos: Arc::new(FixtureSosDispatch),
    ///     chat: Arc::new(FixtureChatCommand),
    ///     chat_query: Arc::new(FixtureChatQuery),
    /// });
    /// let _sos = state.sos.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            account,
            profile,
            contacts,
            contacts_command,
            alerts,
            sos,
            chat,
            chat_query,
        } = ports;
        Self {
            account,
            profile,
            contacts,
            contacts_command,
            alerts,
            sos,
            chat,
            chat_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
