use super::{LogError, StatusSource, TransactionLog};

use crate::ids::TransactionId;
use crate::models::{Transaction, TransactionError, TransactionStatus};

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use tokio_util::sync::CancellationToken;

pub const DEFAULT_MAX_ATTEMPTS: usize = 10;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum PollError {
    #[error("Status check failed for {0}: {1}")]
    Source(TransactionId, anyhow::Error),

    /// The check reached a terminal status but it could not be logged
    #[error("Status {status} for {tid} could not be logged: {source}")]
    Log {
        tid: TransactionId,
        status: TransactionStatus,
        source: LogError,
    },

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Which fields a terminal status line keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalLogContext {
    /// Identifier and amount left empty, matching existing logs
    #[default]
    StatusOnly,

    /// Identifier and amount repeated on the status line
    Full,
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub max_attempts: usize,
    pub interval: Duration,
    pub terminal_log_context: TerminalLogContext,
}

impl Default for PollConfig {
    fn default() -> Self {
        return Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
            terminal_log_context: TerminalLogContext::default(),
        };
    }
}

/// How a watch ended. Only `Settled` moves the transaction out of Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Settled(TransactionStatus),
    Exhausted { attempts: usize },
    Cancelled { attempts: usize },
}

pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    log: Arc<TransactionLog>,
    config: PollConfig,
}

impl StatusPoller {
    pub fn new(source: Arc<dyn StatusSource>, log: Arc<TransactionLog>, config: PollConfig) -> Self {
        return Self {
            source,
            log,
            config,
        };
    }

    /// One status check. A terminal answer is logged with identifier and amount omitted.
    pub async fn poll(&self, tid: &TransactionId) -> Result<TransactionStatus, PollError> {
        return self.poll_with_context(tid, None).await;
    }

    async fn poll_with_context(
        &self,
        tid: &TransactionId,
        transaction: Option<&Transaction>,
    ) -> Result<TransactionStatus, PollError> {
        let status = self
            .source
            .check(tid)
            .await
            .map_err(|e| PollError::Source(tid.clone(), e))?;

        log::debug!("Status check for {tid}: {status}");

        if status.is_terminal() {
            let upi_id = transaction.map(|t| t.upi_id().as_str());
            let amount = transaction.map(|t| t.amount());

            self.log
                .log(upi_id, amount, tid, Some(status))
                .map_err(|source| PollError::Log {
                    tid: tid.clone(),
                    status,
                    source,
                })?;
        }

        return Ok(status);
    }

    /// Checks until the transaction settles, the attempts run out, or `cancel` fires.
    ///
    /// Waits `interval` between checks. On a log failure the transaction is still settled before
    /// the error is returned.
    pub async fn watch(
        &self,
        transaction: &mut Transaction,
        cancel: &CancellationToken,
    ) -> Result<PollOutcome, PollError> {
        if transaction.status().is_terminal() {
            return Ok(PollOutcome::Settled(transaction.status()));
        }

        let context = match self.config.terminal_log_context {
            TerminalLogContext::StatusOnly => None,
            TerminalLogContext::Full => Some(&*transaction),
        };

        let mut attempts = 0;
        let mut settled = None;
        let mut log_error = None;

        while attempts < self.config.max_attempts {
            if cancel.is_cancelled() {
                log::debug!("Polling {} cancelled after {attempts} attempts", transaction.id());
                return Ok(PollOutcome::Cancelled { attempts });
            }

            attempts += 1;

            match self.poll_with_context(transaction.id(), context).await {
                Ok(status) if status.is_terminal() => {
                    settled = Some(status);
                    break;
                }
                Ok(_) => {}
                Err(PollError::Log { tid, status, source }) => {
                    settled = Some(status);
                    log_error = Some(PollError::Log { tid, status, source });
                    break;
                }
                Err(e) => return Err(e),
            }

            if attempts < self.config.max_attempts {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        log::debug!("Polling {} cancelled after {attempts} attempts", transaction.id());
                        return Ok(PollOutcome::Cancelled { attempts });
                    }
                    _ = tokio::time::sleep(self.config.interval) => {}
                }
            }
        }

        let status = match settled {
            Some(status) => status,
            None => {
                log::info!(
                    "No final status for {} after {attempts} attempts, leaving it Pending",
                    transaction.id()
                );
                return Ok(PollOutcome::Exhausted { attempts });
            }
        };

        transaction.settle(status)?;

        if let Some(e) = log_error {
            return Err(e);
        }

        return Ok(PollOutcome::Settled(status));
    }
}
