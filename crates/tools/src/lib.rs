pub mod ascii;
pub mod config_file;
pub mod layout_file;
pub mod world;

use std::io;

use anyhow::{Context, Result};
use dungeon_core::{DungeonConfig, DungeonLayout, LayoutGenerator};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when `RUST_LOG` is unset.
pub fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "warn,dungeon_core=debug,tools=debug" } else { "warn" }
}

/// Installs a stderr subscriber so stdout stays free for layout output.
pub fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .init();
}

/// Runs the generator and rejects any layout that breaks a structural invariant.
pub fn generate_checked(config: DungeonConfig) -> Result<DungeonLayout> {
    let layout = LayoutGenerator::new(config).context("Invalid dungeon configuration")?.run();
    layout.check_invariants().context("Generated layout failed its invariant checks")?;
    Ok(layout)
}
