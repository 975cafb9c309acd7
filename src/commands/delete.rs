use crate::store::Store;
use crate::Error;
use tracing::warn;

/// Delete command
///
/// Success is reported even when no expense has that id. The data file is
/// written back in both cases. Negative ids never match an expense.
pub fn execute(store: &mut Store, id: Option<i64>) -> Result<(), Error> {
    let id = match id {
        Some(id) => id,
        None => {
            return Err(Error::InvalidInput(
                "Please provide an ID of the expense.".to_string(),
            ))
        }
    };
    let removed = u64::try_from(id).map_or(false, |id| store.remove(id));
    if !removed {
        warn!("Nothing to delete, expense {} does not exist", id);
    }
    store.save()?;
    println!("Expense {} deleted successfully.", id);
    Ok(())
}
