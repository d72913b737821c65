//! xdg-desktop-portal-holo: serves the holo portal backend on the session bus
//! until its name is lost.

use std::process::ExitCode;

use holo_portal::{cli::Cli, portal::Portal, tracing_config};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::from_args() {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    if let Err(e) = tracing_config::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!("Starting xdg-desktop-portal-holo {}", env!("CARGO_PKG_VERSION"));

    match Portal::from_env().run(cli.replace).await {
        Ok(shutdown) => {
            info!("Shutting down: {shutdown:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
