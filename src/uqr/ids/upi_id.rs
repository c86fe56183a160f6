use crate::validator;

use std::fmt;

/// Payee address that has passed [`validator::validate_upi_id`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpiId(String);

impl UpiId {
    pub fn parse(upi_id: &str) -> Option<Self> {
        if !validator::validate_upi_id(upi_id) {
            return None;
        }

        return Some(Self(upi_id.to_string()));
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Display for UpiId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}
