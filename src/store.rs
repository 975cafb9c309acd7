use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::models::Expense;
use crate::Error;

pub const DEFAULT_DATA_FILE: &str = "data.json";

/// The expenses recorded in one data file
///
/// The store is loaded once per command, changed in memory and written back
/// as a whole. Expenses keep the order in which they were added.
///
/// It provides methods for:
/// - Loading the expenses from disk (a missing file is an empty store)
/// - Adding a new expense with the next id
/// - Removing an expense by id
/// - Saving everything back to disk
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    expenses: Vec<Expense>,
}

impl Store {
    /// An empty store that will be saved to ```path```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store {
            path: path.into(),
            expenses: Vec::new(),
        }
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let mut store = Store::new(path);
        let contents = match fs::read(&store.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No data file at {:?}, starting empty", store.path);
                return Ok(store);
            }
            Err(e) => return Err(Error::io(&store.path, e)),
        };
        if !contents.iter().all(u8::is_ascii_whitespace) {
            store.expenses =
                serde_json::from_slice(&contents).map_err(|source| Error::DataCorrupt {
                    path: store.path.clone(),
                    source,
                })?;
        }
        debug!("Loaded {} expenses from {:?}", store.len(), store.path);
        Ok(store)
    }

    /// The id the next expense will get: one more than the id of the last
    /// expense, or 1 for an empty store
    ///
    /// Fails when the last id is already the largest one possible.
    pub fn next_id(&self) -> Result<u64, Error> {
        match self.expenses.last() {
            Some(last) => last.id.checked_add(1).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Expense {} has the largest possible id, no more expenses can be added.",
                    last.id
                ))
            }),
            None => Ok(1),
        }
    }

    /// Appends a new expense and returns its id
    ///
    /// Fails without touching the store when the description is missing or
    /// empty, or when there is no amount.
    pub fn add(
        &mut self,
        description: Option<String>,
        amount: Option<i64>,
        date: NaiveDate,
    ) -> Result<u64, Error> {
        let (description, amount) = match (description, amount) {
            (Some(description), Some(amount)) if !description.is_empty() => (description, amount),
            _ => {
                return Err(Error::InvalidInput(
                    "Please provide a description and an amount for the expense.".to_string(),
                ))
            }
        };
        let expense = Expense::new(self.next_id()?, date, description, amount);
        info!("Adding expense {}", expense);
        let id = expense.id;
        self.expenses.push(expense);
        Ok(id)
    }

    /// Removes the first expense with ```id```
    ///
    /// Returns whether an expense was removed. A missing id is not an error.
    pub fn remove(&mut self, id: u64) -> bool {
        match self.expenses.iter().position(|e| e.id == id) {
            Some(index) => {
                let expense = self.expenses.remove(index);
                info!("Removed expense {}", expense);
                true
            }
            None => {
                debug!("There is no expense with id {}", id);
                false
            }
        }
    }

    /// Writes every expense to the data file, replacing its contents
    ///
    /// The data is written to a temporary file next to the data file first and
    /// then renamed over it.
    pub fn save(&self) -> Result<(), Error> {
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        self.expenses
            .serialize(&mut serializer)
            .map_err(|e| Error::io(&self.path, e.into()))?;

        let temp_path = self.temporary_path();
        fs::write(&temp_path, &buffer).map_err(|e| Error::io(&temp_path, e))?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::io(&self.path, e));
        }
        debug!("Saved {} expenses to {:?}", self.len(), self.path);
        Ok(())
    }

    fn temporary_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn len(&self) -> usize {
        self.expenses.len()
    }
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary;
    use tempfile::TempDir;

    fn day(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup() -> (Store, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::load(temp_dir.path().join(DEFAULT_DATA_FILE)).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let (store, _temp_dir) = setup();
        assert!(store.is_empty());
        assert_eq!(store.next_id().unwrap(), 1);
    }

    #[test]
    fn blank_file_is_an_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();
        let store = Store::load(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.json");
        fs::write(&path, "[{\"id\": 1,").unwrap();
        assert!(matches!(
            Store::load(&path),
            Err(Error::DataCorrupt { .. })
        ));

        fs::write(&path, "{\"id\": 1}").unwrap();
        assert!(matches!(
            Store::load(&path),
            Err(Error::DataCorrupt { .. })
        ));
    }

    #[test]
    fn ids_increase_by_one() {
        let (mut store, _temp_dir) = setup();
        for i in 1..=5 {
            let id = store
                .add(Some(format!("item {}", i)), Some(i), day(1, 1, 2024))
                .unwrap();
            assert_eq!(id, i as u64);
        }
        assert_eq!(store.len(), 5);
        assert_eq!(store.next_id().unwrap(), 6);
    }

    #[test]
    fn next_id_follows_the_last_expense() {
        let (mut store, _temp_dir) = setup();
        store.add(Some("a".into()), Some(1), day(1, 1, 2024)).unwrap();
        store.add(Some("b".into()), Some(2), day(1, 1, 2024)).unwrap();
        store.add(Some("c".into()), Some(3), day(1, 1, 2024)).unwrap();

        // Removing from the middle does not change the next id
        assert!(store.remove(2));
        assert_eq!(store.next_id().unwrap(), 4);

        // Removing the last one makes its id available again
        assert!(store.remove(3));
        assert_eq!(store.next_id().unwrap(), 2);
    }

    #[test]
    fn no_id_after_the_largest_one() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_DATA_FILE);
        fs::write(
            &path,
            format!(
                "[{{\"id\": {}, \"date\": \"01-01-2024\", \"description\": \"Last\", \"amount\": 1}}]",
                u64::MAX
            ),
        )
        .unwrap();
        let mut store = Store::load(&path).unwrap();
        assert!(matches!(store.next_id(), Err(Error::InvalidInput(_))));
        assert!(matches!(
            store.add(Some("Coffee".into()), Some(5), day(2, 1, 2024)),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_requires_description_and_amount() {
        let (mut store, _temp_dir) = setup();
        let today = day(19, 10, 2026);
        assert!(matches!(
            store.add(None, Some(5), today),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            store.add(Some(String::new()), Some(5), today),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            store.add(Some("Coffee".into()), None, today),
            Err(Error::InvalidInput(_))
        ));
        assert!(store.is_empty());

        // Zero and negative amounts are fine
        assert_eq!(store.add(Some("Refund".into()), Some(-3), today).unwrap(), 1);
        assert_eq!(store.add(Some("Free".into()), Some(0), today).unwrap(), 2);
    }

    #[test]
    fn remove_missing_id_is_a_no_op() {
        let (mut store, _temp_dir) = setup();
        store.add(Some("Coffee".into()), Some(5), day(2, 3, 2024)).unwrap();
        let before = store.expenses().to_vec();
        assert!(!store.remove(99));
        assert_eq!(store.expenses(), &before[..]);
    }

    #[test]
    fn save_and_load() {
        let (mut store, _temp_dir) = setup();
        store.add(Some("Coffee".into()), Some(5), day(2, 3, 2024)).unwrap();
        store.add(Some("Lunch".into()), Some(12), day(9, 4, 2024)).unwrap();
        store.save().unwrap();

        let loaded = Store::load(store.path()).unwrap();
        assert_eq!(loaded.expenses(), store.expenses());
        assert_eq!(
            summary::total(loaded.expenses()),
            summary::total(store.expenses())
        );
        assert!(!store.temporary_path().exists());
    }

    #[test]
    fn saved_file_layout() {
        let (mut store, _temp_dir) = setup();
        store.add(Some("Coffee".into()), Some(5), day(2, 3, 2024)).unwrap();
        store.save().unwrap();
        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "[\n    {\n        \"id\": 1,\n        \"date\": \"02-03-2024\",\n        \"description\": \"Coffee\",\n        \"amount\": 5\n    }\n]"
        );
    }

    #[test]
    fn save_empty_store() {
        let (store, _temp_dir) = setup();
        store.save().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
        assert!(Store::load(store.path()).unwrap().is_empty());
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path().join("nope").join(DEFAULT_DATA_FILE));
        assert!(matches!(store.save(), Err(Error::Io { .. })));
    }
}
