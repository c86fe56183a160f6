use super::TransactionStatus;

use crate::ids::{TransactionId, UpiId};
use crate::input::PaymentRequest;
use crate::qr::{self, EncodingError, QrImage};
use crate::Money;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Transaction {0} cannot move from {1} to {2}")]
    InvalidTransition(TransactionId, TransactionStatus, TransactionStatus),
}

/// One payment request and its QR code.
///
/// Status is a one-way state machine:
///
/// Pending
/// -> settle(Success): Success
/// -> settle(Failed): Failed
///
/// Success, Failed
/// -> _
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    upi_id: UpiId,
    amount: Money,
    status: TransactionStatus,
    qr: QrImage,
}

impl Transaction {
    /// Assigns a fresh transaction id and renders the QR code
    pub fn create(request: PaymentRequest) -> Result<Self, EncodingError> {
        return Self::with_id(TransactionId::generate(), request);
    }

    pub fn with_id(id: TransactionId, request: PaymentRequest) -> Result<Self, EncodingError> {
        let qr = qr::generate(&request.upi_id, request.amount, &id)?;

        return Ok(Self {
            id,
            upi_id: request.upi_id,
            amount: request.amount,
            status: TransactionStatus::Pending,
            qr,
        });
    }

    pub fn id(&self) -> &TransactionId {
        return &self.id;
    }

    pub fn upi_id(&self) -> &UpiId {
        return &self.upi_id;
    }

    pub fn amount(&self) -> Money {
        return self.amount;
    }

    pub fn status(&self) -> TransactionStatus {
        return self.status;
    }

    pub fn qr(&self) -> &QrImage {
        return &self.qr;
    }

    /// Records a status reported by the payment source.
    ///
    /// Pending is a no-op. Once terminal, only the same terminal status is accepted.
    pub fn settle(&mut self, status: TransactionStatus) -> Result<(), TransactionError> {
        if !status.is_terminal() || status == self.status {
            return Ok(());
        }

        if self.status.is_terminal() {
            return Err(TransactionError::InvalidTransition(
                self.id.clone(),
                self.status,
                status,
            ));
        }

        log::debug!("Transaction {} settled as {status}", self.id);
        self.status = status;

        return Ok(());
    }
}
