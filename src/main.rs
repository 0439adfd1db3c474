//! Heph bootstrap - CMake build bootstrapper
//!
//! CLI entry point.

use heph_bootstrap::cli::parse_args;
use heph_bootstrap::driver::CmakeDriver;
use heph_bootstrap::error::{BootstrapError, BootstrapResult};
use heph_bootstrap::options::Flag;
use heph_bootstrap::{ui, Bootstrap};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&e, e.hint());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> BootstrapResult<()> {
    let parsed = parse_args(std::env::args().skip(1));

    // RUST_LOG wins; otherwise --verbose turns on debug output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if parsed.options.is_set(Flag::Verbose) {
            EnvFilter::new("heph_bootstrap=debug")
        } else {
            EnvFilter::new("heph_bootstrap=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let root = std::env::current_dir()
        .map_err(|e| BootstrapError::io("getting current directory", e))?;
    let driver = CmakeDriver::from_env();

    Bootstrap::new(root).run(parsed, &driver).await?;
    Ok(())
}
