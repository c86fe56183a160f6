use std::{fmt, str::FromStr};

use thiserror::Error;

use uuid::Uuid;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid transaction id {0:?}: expected 12 lowercase hex characters")]
pub struct TransactionIdError(pub String);

/// 12 lowercase hex characters, taken from a random v4 UUID
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    pub const LEN: usize = 12;

    pub fn generate() -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(Self::LEN);

        return Self(id);
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl FromStr for TransactionId {
    type Err = TransactionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == Self::LEN
            && s.chars().all(|ch| matches!(ch, '0'..='9' | 'a'..='f'));

        if !well_formed {
            return Err(TransactionIdError(s.to_string()));
        }

        return Ok(Self(s.to_string()));
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn generate_shape() {
        for _ in 0..100 {
            let id = TransactionId::generate();

            assert_eq!(id.as_str().len(), TransactionId::LEN);
            assert!(id.as_str().chars().all(|ch| ch.is_ascii_hexdigit()));
            assert!(!id.as_str().contains('-'));
            assert_eq!(id.as_str().parse::<TransactionId>(), Ok(id.clone()));
        }
    }

    #[test]
    fn generate_unique() {
        let ids: HashSet<TransactionId> = (0..1000).map(|_| TransactionId::generate()).collect();

        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn from_str_rejects_malformed() {
        for input in ["", "abc", "0123456789abc", "0123456789AB", "0123-5678-ab", "0123456789ag"] {
            assert!(input.parse::<TransactionId>().is_err(), "accepted {input:?}");
        }
    }
}
