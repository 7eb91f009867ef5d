//! HTTP inbound adapter exposing the REST API under `/api/v1`.

use actix_web::web;

pub mod alerts;
pub mod auth;
pub mod chat;
pub mod contacts;
pub mod error;
pub mod health;
pub mod profile;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod sos;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Mount every API handler; callers wrap this in the `/api/v1` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .service(auth::signup)
        .service(auth::login)
        .service(auth::logout)
        .service(profile::get_profile)
        .service(contacts::list_contacts)
        .service(contacts::add_contact)
        .service(contacts::delete_contact)
        .service(alerts::list_alerts)
        .service(sos::trigger_sos)
        .service(chat::list_messages)
        .service(chat::send_message);
}
