use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Day-month-year, the only date format the data file knows about
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// A single spending entry
///
/// The date is kept as a calendar value. It is written to the data file as
/// `DD-MM-YYYY` text and parsed back when loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    #[serde(with = "day_month_year")]
    pub date: NaiveDate,
    pub description: String,
    pub amount: i64,
}

impl Expense {
    pub fn new(id: u64, date: NaiveDate, description: String, amount: i64) -> Expense {
        Expense {
            id,
            date,
            description,
            amount,
        }
    }

    /// Calendar month of the expense, 1 to 12
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl Display for Expense {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {}",
            self.id,
            self.date_string(),
            self.description,
            self.amount
        )
    }
}

mod day_month_year {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|e| {
            de::Error::custom(format!("invalid date {:?}, expected DD-MM-YYYY: {}", text, e))
        })
    }
}
