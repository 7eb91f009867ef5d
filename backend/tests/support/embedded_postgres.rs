//! Fresh, migrated databases on an embedded cluster.
//!
//! Creation goes through the `postgres` client so `CREATE DATABASE` runs
//! outside any transaction. The schema comes from the crate's own embedded
//! migrations so tests never drift from production.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use safety_backend::outbound::persistence::run_pending_migrations;
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::format_postgres_error;

/// Create a uniquely named database, migrate it, and return its URL.
pub fn provision_database(cluster: &TestCluster, runtime: &Runtime) -> Result<String, String> {
    let name = format!("test_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let mut admin =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = cluster.connection().database_url(&name);
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| err.to_string())?;
    Ok(url)
}
