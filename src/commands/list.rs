use prettytable::format;
use prettytable::Table;

use crate::store::Store;
use crate::Error;

/// List command
///
/// Prints every expense in the order they were added
pub fn execute(store: &Store) -> Result<(), Error> {
    if store.is_empty() {
        return Err(Error::NoExpenses);
    }
    println!();
    table(store).printstd();
    println!();
    Ok(())
}

fn table(store: &Store) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row!["ID", "Date", "Description", "Amount"]);
    for expense in store.expenses() {
        table.add_row(row![
            expense.id,
            expense.date_string(),
            expense.description,
            expense.amount
        ]);
    }
    table
}
