mod transaction_id;
mod upi_id;

pub use transaction_id::{TransactionId, TransactionIdError};
pub use upi_id::UpiId;
