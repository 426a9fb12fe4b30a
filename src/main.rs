use std::process;

use es5check::cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args = Args::parse_args();
    let command = Command::from_args(args);

    process::exit(command.run());
}

/// Internal logging goes to stderr, filtered by `RUST_LOG`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("es5check=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
