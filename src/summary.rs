//! Aggregates over a list of expenses
use crate::models::Expense;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Sum of every amount
///
/// Amounts are `i64`, sums are `i128` so that no list of expenses can overflow.
pub fn total(expenses: &[Expense]) -> i128 {
    expenses.iter().map(|e| i128::from(e.amount)).sum()
}

/// Sum of the amounts spent in ```month``` (1 to 12), whatever the year
pub fn by_month(expenses: &[Expense], month: u32) -> i128 {
    expenses
        .iter()
        .filter(|e| e.month() == month)
        .map(|e| i128::from(e.amount))
        .sum()
}

pub fn month_name(month: u32) -> Option<&'static str> {
    match month {
        1..=12 => Some(MONTH_NAMES[month as usize - 1]),
        _ => None,
    }
}
