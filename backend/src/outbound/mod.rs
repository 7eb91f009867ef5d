//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **sms**: Twilio-style SMS gateway over reqwest
//! - **identity**: Supabase-style auth API over reqwest
//! - **completion**: conversational-completion HTTP endpoint
//! - **metrics**: Prometheus dispatch counters (feature-gated)
//!
//! Adapters translate between domain types and wire or row formats. They
//! contain no business logic.

pub mod completion;
pub(crate) mod http_support;
pub mod identity;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
pub mod sms;
