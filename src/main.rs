use std::sync::Arc;

use lua_plugin_rpc::{bridge, config::Config, logging, methods};
use tokio::io::{stdin, stdout};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let registry = Arc::new(methods::build_registry());

    let shutdown = CancellationToken::new();
    bridge::shutdown::spawn_signal_listener(shutdown.clone());

    info!(
        namespace = registry.namespace(),
        methods = registry.len(),
        max_inflight = config.max_inflight,
        "plugin bridge starting"
    );

    bridge::run(stdin(), stdout(), registry, &config, shutdown).await?;
    Ok(())
}
