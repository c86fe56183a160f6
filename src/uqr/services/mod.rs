mod status_poller;
mod status_source;
mod transaction_log;

pub use status_poller::{
    PollConfig, PollError, PollOutcome, StatusPoller, TerminalLogContext, DEFAULT_INTERVAL,
    DEFAULT_MAX_ATTEMPTS,
};
pub use status_source::{RandomStatusSource, ScriptedStatusSource, StatusSource};
pub use transaction_log::{LogError, TransactionLog, DEFAULT_LOG_PATH};
