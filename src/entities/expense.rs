//! Expense entity - One logged spending event.
//!
//! Records are immutable once created; correction is delete-and-re-enter.
//! `raw_message` together with `created_at` identifies the batch a record
//! was produced in, which is what `/undo` removes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Opaque platform id of the owning account
    pub owner_id: String,
    /// Whole Rupiah, always positive
    pub amount: i64,
    /// Short label, may name a bundle of goods sharing one price
    pub item: String,
    /// One of the closed category vocabulary (see `core::vocabulary::Category`)
    pub category: String,
    /// Where the money was spent
    pub place: Option<String>,
    /// Who the user was with
    pub with_person: Option<String>,
    /// Mood reported by the model, stored verbatim
    pub mood: Option<String>,
    /// Emotional context or reason behind the spending
    pub story: Option<String>,
    /// Day the spending happened
    pub date: Date,
    /// The user's original text, or the photo sentinel
    pub raw_message: String,
    /// When the record was written
    pub created_at: DateTimeUtc,
}

/// `Expense` has no relationships; the owning account may not exist yet
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
