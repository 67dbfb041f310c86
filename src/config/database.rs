//! Database configuration module for AturUang.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL.

use crate::entities::{Account, Expense};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` the parent directory is created first so a fresh
/// checkout can start without manual setup.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `expenses` and `accounts` tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut expense_table = schema.create_table_from_entity(Expense);
    let mut account_table = schema.create_table_from_entity(Account);

    expense_table.if_not_exists();
    account_table.if_not_exists();

    db.execute(builder.build(&expense_table)).await?;
    db.execute(builder.build(&account_table)).await?;

    Ok(())
}
