//! soundboard-convert - migrate legacy soundboard files
//!
//! Usage:
//! ```bash
//! soundboard-convert -i old/memes.toml -o new/memes.json
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use soundboard_convert::{run, Args};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!(
        "Starting soundboard-convert v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match run(&args) {
        Ok(report) => {
            info!("✓ Wrote {} sounds to {}", report.total(), args.output.display());
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {:#}", e);
            Err(e)
        }
    }
}
