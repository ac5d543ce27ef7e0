//! KeyForge snapshot builder
//!
//! Collects every default expansion from the KeyForge API and writes
//! `keyforge_info.json`, `all_cards.json` and `all_houses.json` into the
//! current working directory. Set `RUST_LOG` to change verbosity.

use std::path::Path;

use keyforge_core::{default_expansions, write_snapshot, Collector};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        error!(error = %e, "snapshot run failed");
        return Err(e.into());
    }
    Ok(())
}

async fn run() -> keyforge_core::Result<()> {
    let collector = Collector::new()?;
    let snapshot = collector.collect(default_expansions()).await?;

    let written = write_snapshot(&snapshot, Path::new("."))?;
    info!(
        expansions = snapshot.expansions.len(),
        cards = snapshot.cards.len(),
        houses = snapshot.houses.len(),
        files = written.len(),
        "snapshot complete"
    );
    Ok(())
}
