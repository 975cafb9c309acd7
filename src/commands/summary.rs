use crate::store::Store;
use crate::summary::{by_month, month_name, total};
use crate::Error;

/// Summary command
///
/// Prints the total of all expenses, or only those of one month
pub fn execute(store: &Store, month: Option<u32>) -> Result<(), Error> {
    println!("{}", report(store, month)?);
    Ok(())
}

fn report(store: &Store, month: Option<u32>) -> Result<String, Error> {
    match month {
        None => Ok(format!("Total expenses: ${}", total(store.expenses()))),
        Some(month) => match month_name(month) {
            Some(name) => Ok(format!(
                "Total expenses for {}: ${}",
                name,
                by_month(store.expenses(), month)
            )),
            None => Err(Error::Usage(format!(
                "Invalid month {}, it should be between 1 and 12",
                month
            ))),
        },
    }
}
