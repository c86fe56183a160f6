use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown transaction status: {0:?}")]
pub struct UnknownStatus(pub String);

/// Payment state of a transaction. Pending is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

impl TransactionStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Success, Self::Failed];

    pub fn is_terminal(&self) -> bool {
        return !matches!(self, Self::Pending);
    }

    pub fn as_str(&self) -> &'static str {
        return match self {
            Self::Pending => "Pending",
            Self::Success => "Success",
            Self::Failed => "Failed",
        };
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return f.write_str(self.as_str());
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()));
    }
}
