//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (stores, gateways, metrics) expose typed errors generated by
//! [`define_port_error`]; driving ports return the transport agnostic
//! [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod alert_repository;
mod alerts_query;
mod chat_command;
mod chat_completion;
mod chat_message_repository;
mod chat_query;
mod contact_repository;
mod contacts_command;
mod contacts_query;
mod dispatch_metrics;
mod identity_provider;
mod sms_gateway;
mod sos_dispatch;
mod user_profile_query;
mod user_profile_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, FixtureAccountCommand};
#[cfg(test)]
pub use alert_repository::MockAlertRepository;
pub use alert_repository::{AlertRepository, AlertRepositoryError, FixtureAlertRepository};
#[cfg(test)]
pub use alerts_query::MockAlertsQuery;
pub use alerts_query::{AlertsQuery, FixtureAlertsQuery};
#[cfg(test)]
pub use chat_command::MockChatCommand;
pub use chat_command::{ChatCommand, FixtureChatCommand};
#[cfg(test)]
pub use chat_completion::MockChatCompletion;
pub use chat_completion::{
    ChatCompletion, ChatCompletionError, CompletionRequest, FixtureChatCompletion,
};
#[cfg(test)]
pub use chat_message_repository::MockChatMessageRepository;
pub use chat_message_repository::{
    ChatMessageRepository, ChatMessageRepositoryError, FixtureChatMessageRepository,
};
#[cfg(test)]
pub use chat_query::MockChatQuery;
pub use chat_query::{ChatQuery, FixtureChatQuery};
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError, FixtureContactRepository};
#[cfg(test)]
pub use contacts_command::MockContactsCommand;
pub use contacts_command::{ContactsCommand, FixtureContactsCommand};
#[cfg(test)]
pub use contacts_query::MockContactsQuery;
pub use contacts_query::{ContactsQuery, FixtureContactsQuery};
#[cfg(test)]
pub use dispatch_metrics::MockDispatchMetrics;
pub use dispatch_metrics::{
    DispatchMetricOutcome, DispatchMetrics, DispatchMetricsError, NoOpDispatchMetrics,
};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use sms_gateway::MockSmsGateway;
pub use sms_gateway::{
    FixtureSmsGateway, SmsGateway, SmsGatewayError, SmsMessage, SmsReceipt,
    UnconfiguredSmsGateway,
};
#[cfg(test)]
pub use sos_dispatch::MockSosDispatch;
pub use sos_dispatch::{FixtureSosDispatch, SosDispatch};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::{FixtureUserProfileQuery, UserProfileQuery};
#[cfg(test)]
pub use user_profile_repository::MockUserProfileRepository;
pub use user_profile_repository::{
    FixtureUserProfileRepository, UserProfileRepository, UserProfileRepositoryError,
};
