//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// One profile per identity-provider user.
    profiles (id) {
        id -> Uuid,
        name -> Varchar,
        phone -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Emergency contacts; a trigger caps each owner at ten rows.
    contacts (id) {
        id -> Uuid,
        user_id -> Uuid,
        contact_name -> Varchar,
        contact_number -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only SOS dispatch log.
    alerts (id) {
        id -> Uuid,
        user_id -> Uuid,
        alert_message -> Text,
        alert_time -> Timestamptz,
        status -> Varchar,
    }
}

diesel::table! {
    /// Append-only chat turns.
    chat_messages (id) {
        id -> Uuid,
        user_id -> Uuid,
        role -> Varchar,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(contacts -> profiles (user_id));
diesel::joinable!(alerts -> profiles (user_id));
diesel::joinable!(chat_messages -> profiles (user_id));

diesel::allow_tables_to_appear_in_same_query!(profiles, contacts, alerts, chat_messages);
