//! Expense persistence - create, query and delete expense records.
//!
//! Every function takes the injected `DatabaseConnection`, which is the only
//! storage handle in the process. Records are append-only; the only mutation
//! is deletion, and deleting is idempotent so a batch undo can race a single
//! undo without surfacing an error.

use crate::{
    core::extraction::NormalizedExpense,
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::{ConnectionTrait, QueryOrder, QuerySelect, Set, prelude::*};

/// Records of one user turn are written within this distance of each other.
pub const BATCH_WINDOW_MS: i64 = 2000;

/// Persists one normalized expense for `owner_id`.
///
/// Accepts a connection or an open transaction, so a whole batch can be
/// written atomically.
///
/// # Arguments
/// * `owner_id` - Platform id of the user
/// * `parsed` - The validated expense
/// * `raw_message` - Original text or the photo sentinel, shared by the whole batch
/// * `created_at` - Creation timestamp used for recency and batch grouping
pub async fn create_expense<C: ConnectionTrait>(
    db: &C,
    owner_id: &str,
    parsed: &NormalizedExpense,
    raw_message: &str,
    created_at: DateTime<Utc>,
) -> Result<expense::Model> {
    if parsed.amount <= 0 {
        return Err(Error::InvalidAmount {
            amount: parsed.amount,
        });
    }

    let model = expense::ActiveModel {
        owner_id: Set(owner_id.to_string()),
        amount: Set(parsed.amount),
        item: Set(parsed.item.clone()),
        category: Set(parsed.category.as_str().to_string()),
        place: Set(parsed.place.clone()),
        with_person: Set(parsed.with_person.clone()),
        mood: Set(parsed.mood.clone()),
        story: Set(parsed.story.clone()),
        date: Set(parsed.date),
        raw_message: Set(raw_message.to_string()),
        created_at: Set(created_at),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Deletes an expense by id. Returns whether a row was removed; a missing id
/// is not an error.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<bool> {
    let result = Expense::delete_by_id(expense_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Returns the records belonging to the same input event as `anchor`: same
/// owner, same raw message and `created_at` within ±[`BATCH_WINDOW_MS`].
///
/// Ordered oldest first. The anchor itself is included.
pub async fn find_batch(
    db: &DatabaseConnection,
    anchor: &expense::Model,
) -> Result<Vec<expense::Model>> {
    find_batch_by_key(db, &anchor.owner_id, &anchor.raw_message, anchor.created_at).await
}

async fn find_batch_by_key(
    db: &DatabaseConnection,
    owner_id: &str,
    raw_message: &str,
    anchor_created_at: DateTime<Utc>,
) -> Result<Vec<expense::Model>> {
    let window = Duration::milliseconds(BATCH_WINDOW_MS);
    let candidates = Expense::find()
        .filter(expense::Column::OwnerId.eq(owner_id))
        .filter(expense::Column::RawMessage.eq(raw_message))
        .order_by_asc(expense::Column::CreatedAt)
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await?;

    Ok(candidates
        .into_iter()
        .filter(|e| (e.created_at - anchor_created_at).abs() <= window)
        .collect())
}

/// Deletes every record in the batch identified by owner, raw message and an
/// anchor creation time. Returns the number of rows removed.
pub async fn delete_batch(
    db: &DatabaseConnection,
    owner_id: &str,
    raw_message: &str,
    anchor_created_at: DateTime<Utc>,
) -> Result<u64> {
    let ids: Vec<i64> = find_batch_by_key(db, owner_id, raw_message, anchor_created_at)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();

    if ids.is_empty() {
        return Ok(0);
    }

    let result = Expense::delete_many()
        .filter(expense::Column::Id.is_in(ids))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Records of `owner_id` whose spending date lies in `[start, end]`, newest first.
pub async fn find_in_range(
    db: &DatabaseConnection,
    owner_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::OwnerId.eq(owner_id))
        .filter(expense::Column::Date.between(start, end))
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sum of amounts for `owner_id` with spending date in `[start, end]`.
pub async fn total_in_range(
    db: &DatabaseConnection,
    owner_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<i64> {
    let records = find_in_range(db, owner_id, start, end).await?;
    Ok(records.iter().map(|e| e.amount).sum())
}

/// The `limit` most recently created records of `owner_id`.
pub async fn find_recent(
    db: &DatabaseConnection,
    owner_id: &str,
    limit: u64,
) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::OwnerId.eq(owner_id))
        .order_by_desc(expense::Column::CreatedAt)
        .order_by_desc(expense::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The most recently created record of `owner_id`, if any.
pub async fn find_latest(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Option<expense::Model>> {
    Ok(find_recent(db, owner_id, 1).await?.into_iter().next())
}
