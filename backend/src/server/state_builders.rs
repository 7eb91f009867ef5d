//! Builders wiring repositories, outbound adapters and domain services into
//! the HTTP state.

use std::sync::Arc;

use actix_web::web;

use safety_backend::domain::ports::{
    AlertRepository, ChatMessageRepository, ContactRepository, DispatchMetrics,
    FixtureAlertRepository, FixtureChatMessageRepository, FixtureContactRepository,
    FixtureUserProfileRepository, NoOpDispatchMetrics, UserProfileRepository,
};
use safety_backend::domain::{
    AccountService, AlertsQueryService, ChatService, ContactsService, SosDispatchService,
};
use safety_backend::inbound::http::state::{HttpState, HttpStatePorts};
use safety_backend::outbound::persistence::{
    DieselAlertRepository, DieselChatMessageRepository, DieselContactRepository,
    DieselUserProfileRepository,
};

use super::adapters::OutboundAdapters;

/// Store-facing repositories, either Diesel-backed or fixtures.
struct Repositories<P, C, A, M> {
    profiles: Arc<P>,
    contacts: Arc<C>,
    alerts: Arc<A>,
    messages: Arc<M>,
}

fn build_ports<P, C, A, M>(
    repos: Repositories<P, C, A, M>,
    adapters: &OutboundAdapters,
    metrics: Arc<dyn DispatchMetrics>,
) -> HttpStatePorts
where
    P: UserProfileRepository + 'static,
    C: ContactRepository + 'static,
    A: AlertRepository + 'static,
    M: ChatMessageRepository + 'static,
{
    let Repositories {
        profiles,
        contacts,
        alerts,
        messages,
    } = repos;

    let account = Arc::new(AccountService::new(
        profiles.clone(),
        adapters.identity.clone(),
    ));
    let contacts_service = Arc::new(ContactsService::new(contacts.clone()));
    let chat = Arc::new(ChatService::new(messages, adapters.completion.clone()));
    let sos = SosDispatchService::new(
        profiles,
        contacts,
        alerts.clone(),
        adapters.gateway.clone(),
    )
    .with_metrics(metrics)
    .with_sender_label(adapters.sender_label.clone());

    HttpStatePorts {
        account: account.clone(),
        profile: account,
        contacts: contacts_service.clone(),
        contacts_command: contacts_service,
        alerts: Arc::new(AlertsQueryService::new(alerts)),
        sos: Arc::new(sos),
        chat: chat.clone(),
        chat_query: chat,
    }
}

/// Build HTTP state, using Diesel repositories when a pool is configured.
pub(crate) fn build_http_state(
    config: &super::ServerConfig,
    metrics: Option<Arc<dyn DispatchMetrics>>,
) -> web::Data<HttpState> {
    let metrics = metrics.unwrap_or_else(|| Arc::new(NoOpDispatchMetrics));
    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Repositories {
                profiles: Arc::new(DieselUserProfileRepository::new(pool.clone())),
                contacts: Arc::new(DieselContactRepository::new(pool.clone())),
                alerts: Arc::new(DieselAlertRepository::new(pool.clone())),
                messages: Arc::new(DieselChatMessageRepository::new(pool.clone())),
            },
            &config.adapters,
            metrics,
        ),
        None => build_ports(
            Repositories {
                profiles: Arc::new(FixtureUserProfileRepository),
                contacts: Arc::new(FixtureContactRepository),
                alerts: Arc::new(FixtureAlertRepository),
                messages: Arc::new(FixtureChatMessageRepository),
            },
            &config.adapters,
            metrics,
        ),
    };
    web::Data::new(HttpState::new(ports))
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::cookie::{Key, SameSite};
    use rstest::rstest;
    use safety_backend::domain::ports::{
        FixtureChatCompletion, FixtureIdentityProvider, UnconfiguredSmsGateway,
    };
    use safety_backend::domain::{DEFAULT_SENDER_LABEL, ErrorCode, UserId};

    use super::super::ServerConfig;

    fn fixture_config() -> ServerConfig {
        ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            "127.0.0.1:0".parse().expect("addr"),
            OutboundAdapters {
                identity: Arc::new(FixtureIdentityProvider),
                completion: Arc::new(FixtureChatCompletion),
                gateway: Arc::new(UnconfiguredSmsGateway::new("TWILIO_AUTH_TOKEN")),
                sender_label: DEFAULT_SENDER_LABEL.to_owned(),
            },
        )
    }

    #[rstest]
    #[tokio::test]
    async fn unconfigured_gateway_fails_dispatch_as_internal_error() {
        let state = build_http_state(&fixture_config(), None);
        let user = UserId::random();

        let err = state.sos.dispatch(&user).await.expect_err("misconfigured");

        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_state_serves_chat() {
        let state = build_http_state(&fixture_config(), None);
        let user = UserId::random();
        let content = safety_backend::domain::ChatContent::new("hello").expect("content");

        let reply = state.chat.respond(&user, content).await.expect("reply");

        assert!(!reply.content.as_ref().is_empty());
    }
}
