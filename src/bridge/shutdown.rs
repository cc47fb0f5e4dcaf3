//! Interrupt handling for cooperative shutdown
//!
//! The interrupt is surfaced as a cancellation token rather than work done in
//! signal context; the reader loop and the drain path both observe the token.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Cancel `shutdown` on the first interrupt. In-flight dispatches are not
/// aborted; whatever they queue before the drain sentinel is still written.
pub fn spawn_signal_listener(shutdown: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received, draining queued responses");
                shutdown.cancel();
            }
            Err(err) => {
                warn!(error = %err, "failed to install interrupt handler");
            }
        }
    })
}
