use uqr::models::{Transaction, TransactionStatus};

use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN_BOLD: &str = "\x1b[1;30;42m";
const RED_BOLD: &str = "\x1b[1;37;41m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";

/// Terminal output for the payment flow. Colours are only used when stdout is a terminal.
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new() -> Self {
        return Self {
            color: io::stdout().is_terminal(),
        };
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }

        return format!("{style}{text}{RESET}");
    }

    pub fn error(&self, message: &str) {
        println!("{}", self.paint(RED, &format!("Error: {message}")));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.paint(YELLOW, &format!("Warning: {message}")));
    }

    pub fn summary(&self, transaction: &Transaction) {
        println!("{}", self.paint(BOLD, "Transaction Details"));
        println!("UPI ID: {}", transaction.upi_id());
        println!("Amount: {} INR", transaction.amount());
        println!("Transaction ID: {}", transaction.id());
    }

    pub fn qr(&self, transaction: &Transaction) {
        println!();
        println!("{}", self.paint(BOLD, "QR Code for Payment"));
        println!("{}", transaction.qr().terminal());
        println!(
            "Scan with any UPI app to pay {} INR to {}",
            transaction.amount(),
            transaction.upi_id()
        );
    }

    /// Three distinct looks: plain markers without colour, coloured blocks with it
    pub fn status(&self, status: TransactionStatus) {
        let line = match (status, self.color) {
            (TransactionStatus::Success, true) => self.paint(GREEN_BOLD, " Status: Success "),
            (TransactionStatus::Failed, true) => self.paint(RED_BOLD, " Status: Failed "),
            (TransactionStatus::Pending, true) => self.paint(BOLD, "Status: Pending"),
            (TransactionStatus::Success, false) => "[+] Status: Success".to_string(),
            (TransactionStatus::Failed, false) => "[x] Status: Failed".to_string(),
            (TransactionStatus::Pending, false) => "[ ] Status: Pending".to_string(),
        };

        println!("{line}");
    }

    pub fn log_view(&self, contents: &str) {
        println!();
        println!("{}", self.paint(BOLD, "Transaction Log"));

        if contents.is_empty() {
            println!("(empty)");
        } else {
            print!("{contents}");
        }
    }
}
