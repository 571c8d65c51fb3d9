use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An official holiday: one calendar day and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// Chronological copy of `holidays`. Same-date entries keep their input order.
pub fn sorted_by_date(holidays: &[Holiday]) -> Vec<Holiday> {
    let mut sorted = holidays.to_vec();
    sorted.sort_by_key(|h| h.date);
    sorted
}
