//! Account business logic - password, alias, theme and dashboard login.
//!
//! Passwords are stored exactly as the user typed them. Either the platform id
//! or the alias can be used as the login identifier.

use crate::{
    entities::{Account, account},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Shortest password `/setpassword` accepts
pub const MIN_PASSWORD_LEN: usize = 4;

/// Theme given to new accounts
pub const DEFAULT_THEME: &str = "dark";

/// Creates the account on first use, otherwise replaces password and display name.
pub async fn set_password(
    db: &DatabaseConnection,
    account_id: &str,
    password: &str,
    display_name: Option<String>,
) -> Result<account::Model> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::InvalidPassword {
            reason: format!("must be at least {MIN_PASSWORD_LEN} characters"),
        });
    }

    let now = chrono::Utc::now();
    match Account::find_by_id(account_id.to_string()).one(db).await? {
        Some(existing) => {
            let mut active: account::ActiveModel = existing.into();
            active.password = Set(password.to_string());
            active.display_name = Set(display_name);
            active.updated_at = Set(now);
            active.update(db).await.map_err(Into::into)
        }
        None => {
            let active = account::ActiveModel {
                id: Set(account_id.to_string()),
                alias: Set(None),
                password: Set(password.to_string()),
                display_name: Set(display_name),
                theme: Set(DEFAULT_THEME.to_string()),
                created_at: Set(now),
                updated_at: Set(now),
            };
            active.insert(db).await.map_err(Into::into)
        }
    }
}

/// Normalizes an alias for storage and lookup: trimmed and lowercase.
#[must_use]
pub fn normalize_alias(alias: &str) -> String {
    alias.trim().to_lowercase()
}

/// Assigns a login alias to an existing account.
///
/// Aliases are unique across accounts, must be a single word and may not be
/// all digits. Platform ids are numeric, so an all-digit alias could later be
/// shadowed by a new account's id in [`find_by_identifier`].
pub async fn set_alias(
    db: &DatabaseConnection,
    account_id: &str,
    alias: &str,
) -> Result<account::Model> {
    let alias = normalize_alias(alias);
    if alias.is_empty() || alias.chars().any(char::is_whitespace) {
        return Err(Error::InvalidAlias {
            reason: "must be a single word".to_string(),
        });
    }
    if alias.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidAlias {
            reason: "must not be all digits".to_string(),
        });
    }

    let existing = Account::find_by_id(account_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::AccountNotFound {
            id: account_id.to_string(),
        })?;

    let holder = Account::find()
        .filter(account::Column::Alias.eq(alias.as_str()))
        .one(db)
        .await?;
    if holder.is_some_and(|h| h.id != account_id) {
        return Err(Error::AliasTaken { alias });
    }
    if alias != account_id
        && Account::find_by_id(alias.clone()).one(db).await?.is_some()
    {
        return Err(Error::AliasTaken { alias });
    }

    let mut active: account::ActiveModel = existing.into();
    active.alias = Set(Some(alias));
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Looks an account up by platform id first, then by alias.
pub async fn find_by_identifier(
    db: &DatabaseConnection,
    identifier: &str,
) -> Result<Option<account::Model>> {
    let identifier = identifier.trim();
    if let Some(found) = Account::find_by_id(identifier.to_string()).one(db).await? {
        return Ok(Some(found));
    }

    Account::find()
        .filter(account::Column::Alias.eq(normalize_alias(identifier)))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the account when `identifier` and `password` match, `None` otherwise.
pub async fn authenticate(
    db: &DatabaseConnection,
    identifier: &str,
    password: &str,
) -> Result<Option<account::Model>> {
    Ok(find_by_identifier(db, identifier)
        .await?
        .filter(|account| account.password == password))
}

/// Stores the dashboard theme preference.
pub async fn set_theme(
    db: &DatabaseConnection,
    identifier: &str,
    theme: &str,
) -> Result<account::Model> {
    let existing = find_by_identifier(db, identifier)
        .await?
        .ok_or_else(|| Error::AccountNotFound {
            id: identifier.to_string(),
        })?;

    let mut active: account::ActiveModel = existing.into();
    active.theme = Set(theme.trim().to_string());
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}
