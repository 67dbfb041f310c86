//! Account entity - One end user of the bot and dashboard.
//!
//! Created (or updated) the first time the user runs `/setpassword`. Expenses
//! reference the platform id directly, so a user can log spending long before
//! an account row exists.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Platform-assigned user id (Discord snowflake as text)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Optional user-chosen login name, unique across accounts
    #[sea_orm(unique)]
    pub alias: Option<String>,
    /// Dashboard password, stored as entered
    #[serde(skip_serializing)]
    pub password: String,
    /// Name shown on the dashboard
    pub display_name: Option<String>,
    /// Dashboard theme, `"dark"` or `"light"`
    pub theme: String,
    /// When the account was created
    pub created_at: DateTimeUtc,
    /// When the account was last modified
    pub updated_at: DateTimeUtc,
}

/// `Account` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
