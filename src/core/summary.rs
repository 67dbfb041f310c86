//! Aggregation of expense records into period summaries.
//!
//! [`summarize`] is a pure function; callers select the date window first (see
//! [`crate::core::period`]). Group order is the order of first appearance;
//! reports re-sort by descending total with [`Summary::categories_by_total`].

use crate::{core::extraction::NormalizedExpense, entities::expense};
use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeStruct},
};

/// Anything that can be aggregated as a spending event
pub trait Spending {
    /// Whole Rupiah
    fn amount(&self) -> i64;
    /// Stored category name
    fn category(&self) -> &str;
    /// Mood, if one was recorded
    fn mood(&self) -> Option<&str>;
}

impl Spending for expense::Model {
    fn amount(&self) -> i64 {
        self.amount
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn mood(&self) -> Option<&str> {
        self.mood.as_deref()
    }
}

impl Spending for NormalizedExpense {
    fn amount(&self) -> i64 {
        self.amount
    }

    fn category(&self) -> &str {
        self.category.as_str()
    }

    fn mood(&self) -> Option<&str> {
        self.mood.as_deref()
    }
}

/// Total and count for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category name as stored
    pub category: String,
    /// Sum of amounts
    pub total: i64,
    /// Number of records
    pub count: u64,
}

/// Occurrences of one mood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodCount {
    /// Mood as stored
    pub mood: String,
    /// Number of records carrying it
    pub count: u64,
}

/// Aggregate over a set of records.
///
/// Serializes as `{total, count, byCategory: {cat: {total, count}}, byMood: {mood: n}}`
/// with map keys in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of all amounts
    pub total: i64,
    /// Number of records
    pub count: u64,
    /// Per-category totals in first-appearance order
    #[serde(serialize_with = "serialize_categories")]
    pub by_category: Vec<CategoryTotal>,
    /// Per-mood counts in first-appearance order; records without mood are skipped
    #[serde(serialize_with = "serialize_moods")]
    pub by_mood: Vec<MoodCount>,
}

impl Summary {
    /// Categories sorted by descending total. Ties keep first-appearance order.
    #[must_use]
    pub fn categories_by_total(&self) -> Vec<&CategoryTotal> {
        let mut sorted: Vec<&CategoryTotal> = self.by_category.iter().collect();
        sorted.sort_by(|a, b| b.total.cmp(&a.total));
        sorted
    }

    /// Share of `part` in this summary's total, or `None` when the total is zero.
    #[must_use]
    pub fn percentage_of_total(&self, part: i64) -> Option<i64> {
        percentage(part, self.total)
    }
}

/// `round(100 * part / total)`, undefined (`None`) when `total` is zero.
#[must_use]
pub fn percentage(part: i64, total: i64) -> Option<i64> {
    if total == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let pct = (100.0 * part as f64 / total as f64).round() as i64;
    Some(pct)
}

/// Sums and groups `records`.
#[must_use]
pub fn summarize<T: Spending>(records: &[T]) -> Summary {
    let mut summary = Summary::default();

    for record in records {
        let amount = record.amount();
        summary.total += amount;
        summary.count += 1;

        match summary
            .by_category
            .iter_mut()
            .find(|c| c.category == record.category())
        {
            Some(group) => {
                group.total += amount;
                group.count += 1;
            }
            None => summary.by_category.push(CategoryTotal {
                category: record.category().to_string(),
                total: amount,
                count: 1,
            }),
        }

        if let Some(mood) = record.mood() {
            match summary.by_mood.iter_mut().find(|m| m.mood == mood) {
                Some(entry) => entry.count += 1,
                None => summary.by_mood.push(MoodCount {
                    mood: mood.to_string(),
                    count: 1,
                }),
            }
        }
    }

    summary
}

struct TotalAndCount<'a>(&'a CategoryTotal);

impl Serialize for TotalAndCount<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CategoryTotal", 2)?;
        state.serialize_field("total", &self.0.total)?;
        state.serialize_field("count", &self.0.count)?;
        state.end()
    }
}

fn serialize_categories<S: Serializer>(
    groups: &[CategoryTotal],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(groups.len()))?;
    for group in groups {
        map.serialize_entry(&group.category, &TotalAndCount(group))?;
    }
    map.end()
}

fn serialize_moods<S: Serializer>(moods: &[MoodCount], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(moods.len()))?;
    for mood in moods {
        map.serialize_entry(&mood.mood, &mood.count)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    struct Entry {
        amount: i64,
        category: &'static str,
        mood: Option<&'static str>,
    }

    impl Spending for Entry {
        fn amount(&self) -> i64 {
            self.amount
        }
        fn category(&self) -> &str {
            self.category
        }
        fn mood(&self) -> Option<&str> {
            self.mood
        }
    }

    const fn entry(amount: i64, category: &'static str, mood: Option<&'static str>) -> Entry {
        Entry {
            amount,
            category,
            mood,
        }
    }

    #[test]
    fn test_summarize_three_categories() {
        let records = [
            entry(50000, "food", None),
            entry(25000, "coffee", None),
            entry(30000, "transport", None),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.total, 105_000);
        assert_eq!(summary.count, 3);
        assert_eq!(
            summary.by_category,
            vec![
                CategoryTotal {
                    category: "food".to_string(),
                    total: 50000,
                    count: 1
                },
                CategoryTotal {
                    category: "coffee".to_string(),
                    total: 25000,
                    count: 1
                },
                CategoryTotal {
                    category: "transport".to_string(),
                    total: 30000,
                    count: 1
                },
            ]
        );
        assert!(summary.by_mood.is_empty());
    }

    #[test]
    fn test_summarize_groups_repeated_categories() {
        let records = [
            entry(10000, "food", None),
            entry(5000, "snack", None),
            entry(15000, "food", None),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].category, "food");
        assert_eq!(summary.by_category[0].total, 25000);
        assert_eq!(summary.by_category[0].count, 2);
        assert!(!summary.by_category.iter().any(|c| c.category == "bills"));
    }

    #[test]
    fn test_mood_counts_skip_records_without_mood() {
        let records = [
            entry(10000, "food", Some("happy")),
            entry(20000, "coffee", None),
            entry(30000, "food", Some("happy")),
            entry(40000, "shopping", Some("guilty")),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.total, 100_000);
        assert_eq!(
            summary.by_mood,
            vec![
                MoodCount {
                    mood: "happy".to_string(),
                    count: 2
                },
                MoodCount {
                    mood: "guilty".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_categories_by_total_sorts_descending() {
        let records = [
            entry(25000, "coffee", None),
            entry(50000, "food", None),
            entry(30000, "transport", None),
        ];
        let summary = summarize(&records);
        let order: Vec<&str> = summary
            .categories_by_total()
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["food", "transport", "coffee"]);
    }

    #[test]
    fn test_empty_summary_has_no_percentage() {
        let summary = summarize::<Entry>(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.percentage_of_total(0), None);
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(percentage(50000, 105_000), Some(48));
        assert_eq!(percentage(25000, 105_000), Some(24));
        assert_eq!(percentage(30000, 105_000), Some(29));
        assert_eq!(percentage(1, 0), None);
    }

    #[test]
    fn test_summary_serializes_as_ordered_maps() {
        let records = [
            entry(50000, "food", Some("happy")),
            entry(25000, "coffee", None),
        ];
        let json = serde_json::to_string(&summarize(&records)).unwrap();
        assert_eq!(
            json,
            r#"{"total":75000,"count":2,"byCategory":{"food":{"total":50000,"count":1},"coffee":{"total":25000,"count":1}},"byMood":{"happy":1}}"#
        );
    }
}
