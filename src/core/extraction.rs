//! Normalization of model output into expense records.
//!
//! The model's reply is untrusted text. It may wrap the JSON in prose or code
//! fences, leave fields out, send numbers as strings or invent categories. This
//! module finds the JSON object, validates every field explicitly and either
//! returns a non-empty list of [`NormalizedExpense`] or a typed
//! [`ExtractionError`]. There is no partial success: one bad entry fails the
//! whole extraction.
//!
//! Policies:
//! - unknown categories are coerced to `other`
//! - amounts must be finite and positive; fractions round to whole Rupiah
//! - a missing or unparseable date falls back to the reference "today"
//! - `null`, absent and blank optional fields all become `None`

use crate::{core::vocabulary::Category, errors::ExtractionError};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// One validated expense, ready to persist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedExpense {
    /// Whole Rupiah, always positive
    pub amount: i64,
    /// Short label for what was bought
    pub item: String,
    /// Category from the closed vocabulary
    pub category: Category,
    /// Where it was bought
    pub place: Option<String>,
    /// Who the user was with
    pub with_person: Option<String>,
    /// Mood as reported by the model
    pub mood: Option<String>,
    /// Emotional context behind the spending
    pub story: Option<String>,
    /// Day the spending happened
    pub date: NaiveDate,
}

/// Result of reading a receipt photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptExtraction {
    /// Line items, including delivery/service fees as separate transport items
    pub expenses: Vec<NormalizedExpense>,
    /// Merchant printed on the receipt
    pub merchant: Option<String>,
    /// Grand total printed on the receipt
    pub total: Option<i64>,
}

/// Returns the first balanced `{...}` span in `raw`.
///
/// Braces inside JSON string literals are ignored, so `{"item": "a}b"}` is
/// returned whole. Returns `None` when there is no opening brace or the first
/// object never closes.
#[must_use]
pub fn locate_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in raw[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Normalizes the reply to a text extraction request.
///
/// `today` is the reference date that was sent to the model; it is also the
/// fallback for dates the model got wrong.
pub fn normalize(raw: &str, today: NaiveDate) -> Result<Vec<NormalizedExpense>, ExtractionError> {
    let object = parse_object(raw)?;
    read_expenses(&object, today)
}

/// Normalizes the reply to a receipt photo request.
///
/// Merchant and total are informational; an unusable total is dropped rather
/// than failing the extraction.
pub fn normalize_receipt(
    raw: &str,
    today: NaiveDate,
) -> Result<ReceiptExtraction, ExtractionError> {
    let object = parse_object(raw)?;
    let expenses = read_expenses(&object, today)?;
    let merchant = optional_text(&object, "merchant");
    let total = object
        .get("total")
        .filter(|v| !v.is_null())
        .and_then(|v| parse_amount(v).ok());

    Ok(ReceiptExtraction {
        expenses,
        merchant,
        total,
    })
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, ExtractionError> {
    let json = locate_json(raw)
        .ok_or_else(|| ExtractionError::MalformedOutput("no JSON in response".to_string()))?;

    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(ExtractionError::MalformedOutput(
            "JSON is not an object".to_string(),
        )),
        Err(e) => Err(ExtractionError::MalformedOutput(format!(
            "no JSON in response: {e}"
        ))),
    }
}

fn read_expenses(
    object: &Map<String, Value>,
    today: NaiveDate,
) -> Result<Vec<NormalizedExpense>, ExtractionError> {
    if let Some(reason) = optional_text(object, "error") {
        return Err(ExtractionError::MalformedOutput(reason));
    }

    let entries = match object.get("expenses") {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => {
            return Err(ExtractionError::MalformedOutput(
                "missing expenses array".to_string(),
            ));
        }
        Some(_) => {
            return Err(ExtractionError::MalformedOutput(
                "expenses is not an array".to_string(),
            ));
        }
    };

    if entries.is_empty() {
        return Err(ExtractionError::EmptyExtraction);
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| read_expense(index, entry, today))
        .collect()
}

fn read_expense(
    index: usize,
    entry: &Value,
    today: NaiveDate,
) -> Result<NormalizedExpense, ExtractionError> {
    let malformed = |what: &str| ExtractionError::MalformedOutput(format!("expense {index}: {what}"));

    let Value::Object(fields) = entry else {
        return Err(malformed("not an object"));
    };

    let amount = fields
        .get("amount")
        .ok_or_else(|| malformed("missing amount"))
        .and_then(|v| parse_amount(v).map_err(|reason| malformed(&reason)))?;

    let item = optional_text(fields, "item").ok_or_else(|| malformed("missing item"))?;

    let category = match fields.get("category") {
        Some(Value::String(raw)) if !raw.trim().is_empty() => Category::coerce(raw),
        _ => return Err(malformed("missing category")),
    };

    let date = fields
        .get("date")
        .and_then(Value::as_str)
        .and_then(parse_date)
        .unwrap_or(today);

    Ok(NormalizedExpense {
        amount,
        item,
        category,
        place: optional_text(fields, "place"),
        with_person: optional_text(fields, "withPerson"),
        mood: optional_text(fields, "mood"),
        story: optional_text(fields, "story"),
        date,
    })
}

/// Accepts JSON numbers and plain numeric strings; the value must round to a
/// positive whole Rupiah amount.
fn parse_amount(value: &Value) -> Result<i64, String> {
    let number = match value {
        Value::Number(n) => {
            if let Some(whole) = n.as_i64() {
                return if whole > 0 {
                    Ok(whole)
                } else {
                    Err(format!("amount must be positive, got {whole}"))
                };
            }
            n.as_f64().ok_or_else(|| format!("amount out of range: {n}"))?
        }
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("amount is not numeric: {s:?}"))?,
        other => return Err(format!("amount is not numeric: {other}")),
    };

    if !number.is_finite() {
        return Err("amount is not finite".to_string());
    }
    let rounded = number.round();
    // 2^53 keeps the f64 -> i64 conversion exact
    if rounded <= 0.0 || rounded > 9_007_199_254_740_992.0 {
        return Err(format!("amount must be positive, got {number}"));
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(rounded as i64)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    // Full ISO timestamps: keep the calendar part
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn optional_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}
