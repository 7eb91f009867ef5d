//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities for the personal-safety backend
//! (profiles, emergency contacts, alerts and chat turns) and the services
//! that operate on them through the ports in [`ports`]. Adapters live outside
//! this module; nothing here knows about HTTP, SQL or a specific gateway.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - UserProfile, Contact, AlertRecord, ChatMessage: persisted entities.
//! - SosDispatchService: the alert fan-out and delivery accounting core.
//! - ContactsService, AlertsQueryService, ChatService, AccountService:
//!   thin services behind the driving ports.

pub mod account_service;
pub mod alert;
pub mod alerts_service;
pub mod auth;
pub mod chat;
pub mod chat_service;
pub mod contact;
pub mod contacts_service;
pub mod error;
pub mod ports;
pub mod sos;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::alert::{AlertRecord, AlertStatus, NewAlert, RECENT_ALERTS_LIMIT, UnknownAlertStatus};
pub use self::alerts_service::AlertsQueryService;
pub use self::auth::{AuthValidationError, Email, LoginCredentials, PASSWORD_MIN, SignupDetails};
pub use self::chat::{
    CHAT_CONTENT_MAX, CHAT_HISTORY_LIMIT, ChatContent, ChatContentError, ChatMessage, ChatRole,
    NewChatMessage, UnknownChatRole,
};
pub use self::chat_service::ChatService;
pub use self::contact::{Contact, ContactName, MAX_CONTACTS_PER_USER, NewContact};
pub use self::contacts_service::ContactsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::sos::{
    ContactDelivery, DEFAULT_SENDER_LABEL, DeliveryOutcome, DispatchError, DispatchResult,
    SosDispatchService, compose_alert_message,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DisplayName, NAME_MAX, NAME_MIN, PHONE_MAX, PHONE_MIN, PhoneNumber, UserId, UserProfile,
    UserValidationError,
};
