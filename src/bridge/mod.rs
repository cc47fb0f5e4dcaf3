//! The line-oriented RPC bridge core
//!
//! Wires the request reader, per-request dispatch tasks, and the single
//! response writer together: request lines in on one stream, one response
//! line out per request on the other, completion order unconstrained.

pub mod reader;
pub mod shutdown;
pub mod sink;

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::errors::BridgeError;
use crate::rpc::dispatch::Dispatcher;
use crate::rpc::registry::HandlerRegistry;

/// Run the bridge until the input stream ends, a read fault occurs, or
/// `shutdown` is cancelled. Responses queued before the drain sentinel are
/// flushed before this returns; responses queued by still-running dispatches
/// after it are dropped.
pub async fn run<R, W>(
    input: R,
    output: W,
    registry: Arc<HandlerRegistry>,
    config: &Config,
    shutdown: CancellationToken,
) -> Result<(), BridgeError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let dispatcher = Arc::new(Dispatcher::new(registry));
    let sink = sink::OutputSink::spawn(output);

    let reader_result = reader::run_reader(
        BufReader::new(input),
        dispatcher,
        sink.sender(),
        config.max_inflight,
        shutdown,
    )
    .await;
    let sink_result = sink.shutdown().await;

    reader_result.and(sink_result)
}
