use crate::input::{PaymentForm, ValidationError};
use crate::models::Transaction;
use crate::qr::EncodingError;
use crate::services::{LogError, PollError, PollOutcome, StatusPoller, TransactionLog};

use std::sync::Arc;

use thiserror::Error;

use tokio_util::sync::CancellationToken;

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("QR code generation failed: {0}")]
    Encoding(#[from] EncodingError),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No transaction has been submitted in this session")]
    NoTransaction,

    #[error(transparent)]
    Poll(#[from] PollError),
}

/// State held for one user between form submissions.
///
/// Holds at most one transaction; each accepted submission replaces the previous one. Log write
/// failures never abort a flow, they are kept as warnings for the caller to show.
pub struct Session {
    log: Arc<TransactionLog>,
    poller: StatusPoller,
    transaction: Option<Transaction>,
    warnings: Vec<String>,
}

impl Session {
    pub fn new(log: Arc<TransactionLog>, poller: StatusPoller) -> Self {
        return Self {
            log,
            poller,
            transaction: None,
            warnings: vec![],
        };
    }

    /// Validates the form, renders the QR code and logs the new transaction.
    ///
    /// Nothing is logged or stored unless validation and encoding both succeed.
    pub fn submit(&mut self, form: &PaymentForm) -> Result<&Transaction, SubmitError> {
        log::debug!("Parsing payment form: {form:?}");
        let request = form.parse_request()?;

        let transaction = Transaction::create(request)?;
        log::debug!("Created transaction {}", transaction.id());

        if let Err(e) = self.log.log(
            Some(transaction.upi_id().as_str()),
            Some(transaction.amount()),
            transaction.id(),
            None,
        ) {
            self.warn_log_failure(&e);
        }

        return Ok(self.transaction.insert(transaction));
    }

    /// Polls the current transaction's status until it settles, polling gives up, or `cancel`
    /// fires.
    pub async fn await_settlement(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<PollOutcome, SessionError> {
        let transaction = self
            .transaction
            .as_mut()
            .ok_or(SessionError::NoTransaction)?;

        let result = self.poller.watch(transaction, cancel).await;

        return match result {
            Ok(outcome) => Ok(outcome),
            Err(PollError::Log { status, source, .. }) => {
                self.warn_log_failure(&source);
                Ok(PollOutcome::Settled(status))
            }
            Err(e) => Err(e.into()),
        };
    }

    pub fn transaction(&self) -> Option<&Transaction> {
        return self.transaction.as_ref();
    }

    /// Full log text for read-only display
    pub fn log_contents(&self) -> Result<String, LogError> {
        return self.log.contents();
    }

    /// Returns and clears the warnings gathered since the last call
    pub fn take_warnings(&mut self) -> Vec<String> {
        return std::mem::take(&mut self.warnings);
    }

    fn warn_log_failure(&mut self, e: &LogError) {
        log::warn!("{e}");
        self.warnings
            .push(format!("Transaction log could not be updated: {e}"));
    }
}
