pub use expense::{Expense, DATE_FORMAT};

mod expense;
