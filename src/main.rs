//! pulsenet viewer
//!
//! Usage: `pulsenet [SEED]`. Set `RUST_LOG` to adjust logging.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use pulsenet::{viewer, NetworkConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("pulsenet v{}", env!("CARGO_PKG_VERSION"));

    let mut config = NetworkConfig::default();
    if let Some(arg) = std::env::args().nth(1) {
        let seed = arg
            .parse::<u64>()
            .with_context(|| format!("invalid seed {arg:?}"))?;
        config = config.with_seed(seed);
    }

    viewer::run(config)?;
    Ok(())
}
