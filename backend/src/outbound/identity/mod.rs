//! Identity provider outbound adapter for a Supabase-style auth API.

mod dto;
mod supabase_auth;

pub use supabase_auth::SupabaseIdentityProvider;
