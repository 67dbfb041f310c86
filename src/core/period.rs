//! Report windows: today, this week (Monday start) and this month.

use chrono::{Datelike, Days, Months, NaiveDate};

/// A reporting window relative to a reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The reference day only
    Today,
    /// Monday through Sunday of the reference week
    Week,
    /// First through last day of the reference month
    Month,
}

impl Period {
    /// Inclusive `(first, last)` calendar days of the window containing `today`.
    #[must_use]
    pub fn range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Today => (today, today),
            Self::Week => {
                let since_monday = u64::from(today.weekday().num_days_from_monday());
                let start = today.checked_sub_days(Days::new(since_monday)).unwrap_or(today);
                let end = start.checked_add_days(Days::new(6)).unwrap_or(today);
                (start, end)
            }
            Self::Month => {
                let start = today.with_day(1).unwrap_or(today);
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(today);
                (start, end)
            }
        }
    }
}
