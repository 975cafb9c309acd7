#[macro_use]
extern crate prettytable;

mod app;
pub mod commands;
mod error;
pub mod models;
pub mod store;
pub mod summary;

pub use app::{run_app, CommonOpts};
pub use error::Error;
pub use store::Store;
