mod log_entry;
mod status;
mod transaction;

pub use log_entry::{LogEntry, LogEntryError, TIMESTAMP_FORMAT};
pub use status::{TransactionStatus, UnknownStatus};
pub use transaction::{Transaction, TransactionError};
