use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Holiday calendar entry: no business time is counted on this date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
}

impl Holiday {
    pub fn new(name: String, date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            date,
        }
    }
}

/// Fixed-date public holidays seeded into a freshly provisioned calendar,
/// as `(month, day, name)`.
pub const STANDARD_HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 1, "Jour de l'an"),
    (5, 1, "Fête du travail"),
    (7, 14, "Fête nationale"),
    (12, 25, "Noël"),
];

/// Expand [`STANDARD_HOLIDAYS`] into discrete holidays for each given year.
pub fn standard_holidays(years: &[i32]) -> Vec<Holiday> {
    years
        .iter()
        .flat_map(|year| {
            STANDARD_HOLIDAYS.iter().filter_map(move |(month, day, name)| {
                NaiveDate::from_ymd_opt(*year, *month, *day)
                    .map(|date| Holiday::new(name.to_string(), date))
            })
        })
        .collect()
}
