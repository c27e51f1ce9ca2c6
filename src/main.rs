use std::env;
use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    process::exit(smitebuilds::cli::run_with_args(&args));
}
