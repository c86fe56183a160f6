use crate::ids::TransactionId;
use crate::models::{LogEntry, TransactionStatus};
use crate::Money;

use std::{
    fs::{self, OpenOptions},
    io::{self, ErrorKind, Write},
    path::PathBuf,
};

use chrono::{Local, SubsecRound};

use csv::{ReaderBuilder, Trim};

use parking_lot::Mutex;

use thiserror::Error;

pub const DEFAULT_LOG_PATH: &str = "transactions.log";

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Could not write transaction log {0:?}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("Could not read transaction log {0:?}: {1}")]
    Read(PathBuf, #[source] csv::Error),
}

/// Append-only text log of transaction events, one line per event.
///
/// Appends are serialized through a lock and each line goes out in a single write, so concurrent
/// sessions sharing one `TransactionLog` never interleave partial lines.
#[derive(Debug)]
pub struct TransactionLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TransactionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        return Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
    }

    /// Stamps the current local time, to the whole second the log line keeps, and appends the
    /// event
    pub fn log(
        &self,
        upi_id: Option<&str>,
        amount: Option<Money>,
        tid: &TransactionId,
        status: Option<TransactionStatus>,
    ) -> Result<LogEntry, LogError> {
        let entry = LogEntry {
            timestamp: Local::now().naive_local().trunc_subsecs(0),
            upi_id: upi_id.map(str::to_string),
            amount,
            tid: tid.clone(),
            status,
        };

        self.append(&entry)?;

        return Ok(entry);
    }

    /// Appends one line, creating the file and any missing parent directories
    pub fn append(&self, entry: &LogEntry) -> Result<(), LogError> {
        let line = format!("{entry}\n");
        let io_err = |e| LogError::Io(self.path.clone(), e);

        let _guard = self.write_lock.lock();

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;

        file.write_all(line.as_bytes()).map_err(io_err)?;

        log::debug!("Appended to {:?}: {}", self.path, line.trim_end());

        return Ok(());
    }

    /// Full log text for read-only display. A log that does not exist yet reads as empty.
    pub fn contents(&self) -> Result<String, LogError> {
        return match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(LogError::Io(self.path.clone(), e)),
        };
    }

    /// Parses every line of the log. Lines that do not parse are skipped with a warning.
    pub fn entries(&self) -> Result<Vec<LogEntry>, LogError> {
        let contents = self.contents()?;

        let mut rdr = ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(contents.as_bytes());

        let mut entries = vec![];

        for record in rdr.records() {
            let record = record.map_err(|e| LogError::Read(self.path.clone(), e))?;

            match LogEntry::from_fields(record.iter()) {
                Ok(entry) => entries.push(entry),
                Err(e) => log::warn!("Skipping log line {record:?}: {e}"),
            }
        }

        return Ok(entries);
    }
}
