mod cli;
mod config;
mod logger;
mod scanner;
mod supervisor;
mod urlfix;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use cli::Cli;
use config::Config;
use logger::Logger;

// exit codes: 0 normal completion, 1 usage or fatal error, 3 interrupted
// (the quit-signal convention, so callers can tell the cases apart)
const EXIT_FAILURE: i32 = 1;
const EXIT_INTERRUPT: i32 = 3;

/// Process name for log lines and error prefixes, taken from argv[0].
fn app_name() -> String {
    std::env::args_os()
        .next()
        .map(PathBuf::from)
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap exits 2 on usage errors by default; this wrapper keeps
            // help/version at 0 and usage errors at 1
            let code = if err.use_stderr() { EXIT_FAILURE } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let mut logger = Logger::new(app_name());
    logger.lower_threshold(cli.verbose);
    let logger = Arc::new(logger);

    let (config, config_path) = match Config::load() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{}: {err:#}", app_name());
            std::process::exit(EXIT_FAILURE);
        }
    };
    match config_path {
        Some(ref path) => logger.debug(&format!("loaded config from {}", path.display())),
        None => logger.debug("no config file found, using defaults"),
    }

    {
        // the scan loop blocks in read with no timeout; SIGINT is the one
        // way out before the primary process exits
        let logger = logger.clone();
        ctrlc::set_handler(move || {
            logger.info("interrupted");
            std::process::exit(EXIT_INTERRUPT);
        })
        .ok();
    }

    if let Err(err) = supervisor::run(&config, &logger) {
        eprintln!("{}: {err:#}", app_name());
        std::process::exit(EXIT_FAILURE);
    }
}
