use crate::store::Store;
use crate::{CommonOpts, Error};

/// Add command
///
/// Records a new expense dated today (or ```--now```) and saves the store
pub fn execute(
    store: &mut Store,
    options: &CommonOpts,
    description: Option<String>,
    amount: Option<i64>,
) -> Result<(), Error> {
    let id = store.add(description, amount, options.now())?;
    store.save()?;
    println!("Expense added successfully. (ID: {})", id);
    Ok(())
}
