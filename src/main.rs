use std::sync::Arc;
use tracing::info;
use typedkv::{web, Config, Store, Sweeper};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (INFO by default, overridable via RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("typedkv starting...");

    let config = Config::from_env();
    let store = Arc::new(Store::with_capacity(config.initial_capacity));

    // The sweeper owns its own cadence; the store only knows how to sweep.
    let _sweeper = Sweeper::start(Arc::clone(&store), config.sweep_interval);

    web::run_web_server(&config.bind_addr, store).await
}
