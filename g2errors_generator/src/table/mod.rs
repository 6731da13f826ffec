//! Error-table loading: JSON object keyed by numeric error code

mod entry;
mod error;
mod loader;

pub use entry::{ErrorEntry, ErrorTable};
pub use error::TableError;
pub use loader::{load_table, parse_table};
