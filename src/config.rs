use uqr::Result;

use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Crates whose records follow `-v`; everything else stays at Warn
const APP_MODULES: [&str; 2] = ["uqr", "upi_qr_generator"];

/// Logs go to stderr. `RUST_LOG` overrides everything when set.
pub fn configure_app(verbosity: u8) -> Result {
    let level = level_for(verbosity);

    let logger = APP_MODULES
        .iter()
        .fold(SimpleLogger::new().with_level(LevelFilter::Warn), |logger, module| {
            logger.with_module_level(module, level)
        });

    logger.env().init()?;

    return Ok(());
}

fn level_for(verbosity: u8) -> LevelFilter {
    return match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
}
