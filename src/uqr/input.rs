use crate::ids::UpiId;
use crate::money::MoneyError;
use crate::Money;

use thiserror::Error;

/// Raw values as typed into the payment form
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub upi_id: String,
    pub amount: String,
}

/// A payment form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub upi_id: UpiId,
    pub amount: Money,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("UPI ID and amount are required.")]
    MissingFields,

    #[error("Invalid UPI ID format.")]
    InvalidUpiId(String),

    #[error("Amount must be a number: {0}")]
    InvalidAmount(MoneyError),

    #[error("Amount must be a positive number.")]
    NonPositiveAmount(String),
}

impl PaymentForm {
    pub fn new(upi_id: impl Into<String>, amount: impl Into<String>) -> Self {
        return Self {
            upi_id: upi_id.into(),
            amount: amount.into(),
        };
    }

    /// Checks the fields in the order the form reports them: presence, identifier, amount.
    pub fn parse_request(&self) -> Result<PaymentRequest, ValidationError> {
        let upi_id = self.upi_id.trim();
        let amount = self.amount.trim();

        if upi_id.is_empty() || amount.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let upi_id =
            UpiId::parse(upi_id).ok_or_else(|| ValidationError::InvalidUpiId(upi_id.to_string()))?;

        if amount.starts_with('-') {
            return Err(ValidationError::NonPositiveAmount(amount.to_string()));
        }

        let amount_value = Money::parse(amount).map_err(ValidationError::InvalidAmount)?;

        if amount_value < Money::MIN_PAYMENT {
            return Err(ValidationError::NonPositiveAmount(amount.to_string()));
        }

        return Ok(PaymentRequest {
            upi_id,
            amount: amount_value,
        });
    }
}
