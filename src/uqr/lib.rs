pub mod ids;
pub mod input;
pub mod models;
mod money;
pub mod qr;
mod result;
pub mod services;
pub mod session;
pub mod validator;

pub use money::{Money, MoneyError};
pub use result::Result;

use services::{PollConfig, RandomStatusSource, StatusPoller, TransactionLog};

use std::sync::Arc;

/// Builds a session that checks payments against the mock gateway and appends to `log`
pub fn build_session(log: Arc<TransactionLog>, config: PollConfig) -> session::Session {
    let source = Arc::new(RandomStatusSource::new());
    let poller = StatusPoller::new(source, log.clone(), config);

    return session::Session::new(log, poller);
}
