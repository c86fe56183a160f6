use uqr::models::{LogEntry, TIMESTAMP_FORMAT};
use uqr::Result;

use csv::Writer;

use serde::Serialize;

/// Flat CSV row for one log entry
#[derive(Serialize, Debug)]
pub struct LogEntryRecord {
    pub timestamp: String,
    pub upi_id: String,
    pub amount: String,
    pub tid: String,
    pub status: String,
}

impl From<&LogEntry> for LogEntryRecord {
    fn from(entry: &LogEntry) -> Self {
        return Self {
            timestamp: entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            upi_id: entry.upi_id.clone().unwrap_or_default(),
            amount: entry.amount.map(|amount| amount.to_string()).unwrap_or_default(),
            tid: entry.tid.to_string(),
            status: entry.status.map(|status| status.to_string()).unwrap_or_default(),
        };
    }
}

pub fn build_csv_writer() -> Writer<Vec<u8>> {
    return Writer::from_writer(vec![]);
}

pub fn write_to_string(writer: Writer<Vec<u8>>) -> Result<String> {
    let utf8 = writer.into_inner()?;
    let string = String::from_utf8(utf8)?;
    return Ok(string);
}
