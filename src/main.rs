mod args;
mod config;
mod render;
mod writer;

use args::{Cli, Command, GenerateArgs, LogFileArg};
use render::Renderer;
use writer::LogEntryRecord;

use uqr::input::PaymentForm;
use uqr::services::TransactionLog;
use uqr::session::{Session, SubmitError};
use uqr::Result;

use std::{fs, sync::Arc};

use anyhow::Context;

use clap::Parser;

use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result {
    let cli = Cli::parse();
    config::configure_app(cli.verbose)?;

    log::debug!("Application configured. Running {:?}", cli.command);

    match cli.command {
        Command::Generate(args) => generate(args).await?,
        Command::Log(args) => show_log(args)?,
        Command::Export(args) => export_to_std_out(args)?,
    }

    log::debug!("Application finished successfully!");

    Ok(())
}

/// Submit the form, show the result, and watch the payment status
async fn generate(args: GenerateArgs) -> Result {
    let renderer = Renderer::new();
    let log = Arc::new(TransactionLog::new(&args.log.log_file));
    let mut session = uqr::build_session(log, args.poll_config());

    let form = PaymentForm::new(&args.upi_id, &args.amount);

    let transaction = match session.submit(&form) {
        Ok(transaction) => transaction.clone(),
        Err(SubmitError::Validation(e)) => {
            log::debug!("Rejected payment form: {e:?}");
            renderer.error(&e.to_string());
            return Ok(());
        }
        Err(e) => Err(e)?,
    };

    renderer.summary(&transaction);
    render_warnings(&renderer, &mut session);

    if let Some(path) = &args.qr_out {
        let png = transaction.qr().png_bytes()?;
        fs::write(path, png).with_context(|| format!("Could not save QR code to {path:?}"))?;
        log::debug!("Saved QR code to {path:?}");
    }

    renderer.qr(&transaction);

    let status = if args.no_poll {
        transaction.status()
    } else {
        renderer.status(transaction.status());
        println!("Waiting for payment... (Ctrl-C to stop)");

        let cancel = CancellationToken::new();
        let ctrl_c = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

        let outcome = session.await_settlement(&cancel).await?;
        ctrl_c.abort();

        log::debug!("Polling finished: {outcome:?}");
        render_warnings(&renderer, &mut session);

        session
            .transaction()
            .map(|transaction| transaction.status())
            .unwrap_or(transaction.status())
    };

    renderer.status(status);

    if args.show_log {
        renderer.log_view(&session.log_contents()?);
    }

    Ok(())
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Could not listen for Ctrl-C: {e}");
        return;
    }

    log::debug!("Ctrl-C received, cancelling status checks");
    cancel.cancel();
}

fn render_warnings(renderer: &Renderer, session: &mut Session) {
    for warning in session.take_warnings() {
        renderer.warning(&warning);
    }
}

/// Read-only dump of the log file
fn show_log(args: LogFileArg) -> Result {
    let log = TransactionLog::new(args.log_file);
    let contents = log.contents()?;

    Renderer::new().log_view(&contents);

    Ok(())
}

/// Parse the log file and write its entries to stdout as CSV
fn export_to_std_out(args: LogFileArg) -> Result {
    let log = TransactionLog::new(args.log_file);
    let entries = log.entries()?;
    log::debug!("Parsed {} log entries", entries.len());

    let mut wtr = writer::build_csv_writer();

    for entry in entries.iter() {
        wtr.serialize(LogEntryRecord::from(entry))?;
    }

    let output = writer::write_to_string(wtr)?;
    print!("{}", output);

    Ok(())
}
