//! Closed category and mood vocabularies.
//!
//! The prompt contract, the normalizer and every icon lookup go through these
//! enums, so adding a value is a compile-time visible change everywhere.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Meals
    Food,
    /// Coffee and coffee-shop drinks
    Coffee,
    /// Ride hailing, fuel, parking, delivery fees
    Transport,
    /// Clothes, gadgets and other goods
    Shopping,
    /// Movies, games, outings
    Entertainment,
    /// Utilities, subscriptions, phone credit
    Bills,
    /// Medicine and doctor visits
    Health,
    /// Supermarket and market groceries
    Groceries,
    /// Small snacks
    Snack,
    /// Non-coffee drinks
    Drink,
    /// Anything else
    Other,
}

impl Category {
    /// Every category, in prompt order
    pub const ALL: [Self; 11] = [
        Self::Food,
        Self::Coffee,
        Self::Transport,
        Self::Shopping,
        Self::Entertainment,
        Self::Bills,
        Self::Health,
        Self::Groceries,
        Self::Snack,
        Self::Drink,
        Self::Other,
    ];

    /// Wire name used in prompts and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Coffee => "coffee",
            Self::Transport => "transport",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Bills => "bills",
            Self::Health => "health",
            Self::Groceries => "groceries",
            Self::Snack => "snack",
            Self::Drink => "drink",
            Self::Other => "other",
        }
    }

    /// Icon shown next to a record
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Coffee => "☕",
            Self::Transport => "🚗",
            Self::Shopping => "🛍",
            Self::Entertainment => "🎮",
            Self::Bills => "📄",
            Self::Health => "💊",
            Self::Groceries => "🥬",
            Self::Snack => "🍿",
            Self::Drink => "🥤",
            Self::Other => "💸",
        }
    }

    /// Case-insensitive lookup of a wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == wanted)
    }

    /// Like [`Category::parse`] but routes unknown names to `Other`.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(Self::Other)
    }

    /// Icon for a stored category string; unknown values get the generic icon.
    #[must_use]
    pub fn icon_for(raw: &str) -> &'static str {
        Self::coerce(raw).emoji()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotional context the model may attach to a record.
///
/// This is a soft constraint: moods outside this list are stored verbatim and
/// simply have no icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    /// Happy
    Happy,
    /// Satisfied
    Satisfied,
    /// Excited
    Excited,
    /// Neutral
    Neutral,
    /// Reluctant
    Reluctant,
    /// Regret
    Regret,
    /// Guilty
    Guilty,
}

impl Mood {
    /// Every known mood, in prompt order
    pub const ALL: [Self; 7] = [
        Self::Happy,
        Self::Satisfied,
        Self::Excited,
        Self::Neutral,
        Self::Reluctant,
        Self::Regret,
        Self::Guilty,
    ];

    /// Wire name used in prompts and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Satisfied => "satisfied",
            Self::Excited => "excited",
            Self::Neutral => "neutral",
            Self::Reluctant => "reluctant",
            Self::Regret => "regret",
            Self::Guilty => "guilty",
        }
    }

    /// Icon shown next to a record
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Satisfied => "😌",
            Self::Excited => "🤩",
            Self::Neutral => "😐",
            Self::Reluctant => "😕",
            Self::Regret => "😔",
            Self::Guilty => "😣",
        }
    }

    /// Case-insensitive lookup of a wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase();
        Self::ALL.into_iter().find(|m| m.as_str() == wanted)
    }

    /// Icon for a stored mood; empty for absent or unknown moods.
    #[must_use]
    pub fn icon_for(raw: Option<&str>) -> &'static str {
        raw.and_then(Self::parse).map_or("", Self::emoji)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comma-separated wire names, for the prompt contract.
#[must_use]
pub fn category_list() -> String {
    Category::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-separated mood names, for the prompt contract.
#[must_use]
pub fn mood_list() -> String {
    Mood::ALL
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
