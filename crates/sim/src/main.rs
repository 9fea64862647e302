//! Demo driver: runs a short scripted hunt against the rules runtime.
//!
//! ```text
//! hunt-sim [DATA_DIR]
//! ```
//!
//! `DATA_DIR` may hold `rules.toml`, `monsters.ron` and `weapons.ron`;
//! missing files fall back to the built-in data.
mod scenario;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use hunt_content::ContentFactory;
use hunt_runtime::{DiceEvaluator, InMemoryDocumentStore, Runtime, RuntimeConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use scenario::{Scenario, ScenarioConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging()?;

    let factory = match std::env::args().nth(1) {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::builtin(),
    };
    let config = RuntimeConfig::default()
        .with_rules(factory.load_config()?)
        .with_env_overrides();
    let monsters = factory.load_monsters()?;
    let weapons = factory.load_weapons()?;

    let evaluator = match std::env::var("HUNT_SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => DiceEvaluator::seeded(seed),
        None => DiceEvaluator::new(),
    };
    let store = Arc::new(InMemoryDocumentStore::new());
    let runtime = Runtime::builder()
        .config(config)
        .evaluator(Arc::new(evaluator))
        .store(store.clone())
        .build();

    let scenario = ScenarioConfig::from_env();
    Scenario::new(runtime, store, &monsters, &weapons, scenario)?
        .run()
        .await
}

/// Setup logging to both stderr and a per-session file
fn setup_logging() -> Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    let session_log_dir = log_directory().join(format!("session_{timestamp}"));
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "sim.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    // Keep the file writer alive for the whole process.
    std::mem::forget(guard);

    tracing::info!(log = %session_log_dir.join("sim.log").display(), "logging initialized");
    Ok(())
}

fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "hunt")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("hunt").join("logs"))
}
