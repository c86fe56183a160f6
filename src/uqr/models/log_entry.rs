use super::{TransactionStatus, UnknownStatus};

use crate::ids::{TransactionId, TransactionIdError};
use crate::money::MoneyError;
use crate::Money;

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;

use thiserror::Error;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const UPI_ID_LABEL: &str = "UPI ID:";
const AMOUNT_LABEL: &str = "Amount:";
const CURRENCY_SUFFIX: &str = "INR";
const TID_LABEL: &str = "TID:";
const STATUS_LABEL: &str = "Status:";

/// Older logs wrote absent fields as `None`
const LEGACY_ABSENT: &str = "None";

#[derive(Error, Debug)]
pub enum LogEntryError {
    #[error("Log line is missing the {0} field")]
    MissingField(&'static str),

    #[error("Unexpected log field: {0:?}")]
    UnexpectedField(String),

    #[error("Invalid log timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Invalid log amount: {0}")]
    Amount(#[from] MoneyError),

    #[error("Invalid log transaction id: {0}")]
    TransactionId(#[from] TransactionIdError),

    #[error("Invalid log status: {0}")]
    Status(#[from] UnknownStatus),
}

/// One line of the transaction log.
///
/// Creation lines carry the identifier and amount; status lines may omit them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub upi_id: Option<String>,
    pub amount: Option<Money>,
    pub tid: TransactionId,
    pub status: Option<TransactionStatus>,
}

impl LogEntry {
    /// Builds an entry from the pipe separated, already trimmed fields of a log line
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> Result<Self, LogEntryError> {
        let mut fields = fields.into_iter().map(str::trim);

        let timestamp = fields.next().ok_or(LogEntryError::MissingField("timestamp"))?;
        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)?;

        let upi_id = labelled(fields.next(), UPI_ID_LABEL, "UPI ID")?;
        let upi_id = optional(upi_id).map(str::to_string);

        let amount = labelled(fields.next(), AMOUNT_LABEL, "amount")?;
        let amount = amount.strip_suffix(CURRENCY_SUFFIX).unwrap_or(amount);
        let amount = optional(amount).map(Money::parse).transpose()?;

        let tid: TransactionId = labelled(fields.next(), TID_LABEL, "TID")?.parse()?;

        let status: Option<TransactionStatus> = match fields.next() {
            None => None,
            Some(field) => Some(labelled(Some(field), STATUS_LABEL, "status")?.parse()?),
        };

        if let Some(extra) = fields.next() {
            return Err(LogEntryError::UnexpectedField(extra.to_string()));
        }

        return Ok(Self {
            timestamp,
            upi_id,
            amount,
            tid,
            status,
        });
    }
}

fn labelled<'a>(
    field: Option<&'a str>,
    label: &str,
    name: &'static str,
) -> Result<&'a str, LogEntryError> {
    let field = field.ok_or(LogEntryError::MissingField(name))?;

    return field
        .strip_prefix(label)
        .map(str::trim)
        .ok_or_else(|| LogEntryError::UnexpectedField(field.to_string()));
}

fn optional(value: &str) -> Option<&str> {
    let value = value.trim();

    if value.is_empty() || value == LEGACY_ABSENT {
        return None;
    }

    return Some(value);
}

impl FromStr for LogEntry {
    type Err = LogEntryError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        return Self::from_fields(line.trim_end_matches(['\r', '\n']).split('|'));
    }
}

/// `<timestamp> | UPI ID: <id> | Amount: <amount> INR | TID: <tid>[ | Status: <status>]`
impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let upi_id = self.upi_id.as_deref().unwrap_or_default();
        let amount = self.amount.map(|amount| amount.to_string()).unwrap_or_default();

        write!(
            f,
            "{} | {UPI_ID_LABEL} {upi_id} | {AMOUNT_LABEL} {amount} {CURRENCY_SUFFIX} | {TID_LABEL} {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.tid,
        )?;

        if let Some(status) = self.status {
            write!(f, " | {STATUS_LABEL} {status}")?;
        }

        return Ok(());
    }
}
