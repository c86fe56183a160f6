use uqr::services::{
    PollConfig, TerminalLogContext, DEFAULT_LOG_PATH, DEFAULT_MAX_ATTEMPTS,
};

use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "upi-qr-generator")]
#[command(about = "Merchant UPI QR code generator", long_about = None)]
pub struct Cli {
    /// More log output on stderr: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a payment request, show its QR code and watch for the payment
    Generate(GenerateArgs),

    /// Print the transaction log
    Log(LogFileArg),

    /// Write the parsed transaction log to stdout as CSV
    Export(LogFileArg),
}

#[derive(Args, Debug)]
pub struct LogFileArg {
    /// Transaction log file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_PATH)]
    pub log_file: PathBuf,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Payee UPI ID, e.g. yourname@upi
    #[arg(long, value_name = "UPI_ID", default_value = "")]
    pub upi_id: String,

    /// Amount in INR
    #[arg(long, value_name = "AMOUNT", default_value = "", allow_hyphen_values = true)]
    pub amount: String,

    #[command(flatten)]
    pub log: LogFileArg,

    /// Also save the QR code as a PNG file
    #[arg(long, value_name = "FILE")]
    pub qr_out: Option<PathBuf>,

    /// Seconds to wait between status checks
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub interval_secs: u64,

    /// Status checks before giving up and leaving the payment Pending
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Keep the UPI ID and amount on status log lines
    #[arg(long)]
    pub full_context_log: bool,

    /// Do not check the payment status
    #[arg(long)]
    pub no_poll: bool,

    /// Print the transaction log afterwards
    #[arg(long)]
    pub show_log: bool,
}

impl GenerateArgs {
    pub fn poll_config(&self) -> PollConfig {
        let terminal_log_context = if self.full_context_log {
            TerminalLogContext::Full
        } else {
            TerminalLogContext::StatusOnly
        };

        return PollConfig {
            max_attempts: self.max_attempts,
            interval: Duration::from_secs(self.interval_secs),
            terminal_log_context,
        };
    }
}
