use std::process;

use capillary::flags::Flags;
use capillary::shell::Shell;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `capillary=debug`.
const LOG_ENV: &str = "CAPILLARY_LOG";

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let flags = Flags::parse();
    init_logging(flags.debug);

    // diagnostics name the program the way it was invoked
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "capillary".to_string());

    let code = match Shell::launch(&program, &flags) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("{}: {}", program, e);
            1
        }
    };
    process::exit(code & 0xff);
}
