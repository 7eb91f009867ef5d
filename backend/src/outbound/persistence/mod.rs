//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories only translate between Diesel rows and domain values; row
//! structs and the table DSL stay private to this module. Connections come
//! from a bounded `bb8` pool via `diesel-async`.
//!
//! ```ignore
//! use safety_backend::outbound::persistence::{DbPool, DieselContactRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/safety")).await?;
//! let contacts = DieselContactRepository::new(pool);
//! ```

mod diesel_alert_repository;
mod diesel_basic_error_mapping;
mod diesel_chat_message_repository;
mod diesel_contact_repository;
mod diesel_user_profile_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_alert_repository::DieselAlertRepository;
pub use diesel_chat_message_repository::DieselChatMessageRepository;
pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_user_profile_repository::DieselUserProfileRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
