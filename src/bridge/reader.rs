//! Reader loop for the request stream
//!
//! Reads one request line at a time and hands each to its own dispatch task;
//! the loop never waits for a dispatch to finish, so a slow request cannot
//! hold up the ones behind it. Admission is capped by a semaphore so request
//! floods cannot spawn tasks without bound.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::bridge::sink::ResponseSender;
use crate::errors::BridgeError;
use crate::rpc::dispatch::Dispatcher;

/// Read lines until end-of-stream, a read fault, or cancellation. Each line is
/// dispatched on its own task; its permit is held until the response has been
/// queued, bounding in-flight dispatches at `max_inflight`.
pub async fn run_reader<R>(
    input: R,
    dispatcher: Arc<Dispatcher>,
    responses: ResponseSender,
    max_inflight: usize,
    shutdown: CancellationToken,
) -> Result<(), BridgeError>
where
    R: AsyncBufRead + Unpin,
{
    let limit = Arc::new(Semaphore::new(max_inflight));
    let mut lines = input.lines();

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("shutdown requested, request reader stopping");
                return Ok(());
            }
            read = lines.next_line() => match read {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("request stream reached end of input");
                    return Ok(());
                }
                Err(err) => {
                    error!(error = %err, "request stream read failed");
                    return Err(BridgeError::Read(err));
                }
            },
        };

        let permit = tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("shutdown requested while waiting for dispatch capacity");
                return Ok(());
            }
            permit = limit.clone().acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => return Ok(()),
            },
        };

        let dispatcher = Arc::clone(&dispatcher);
        let responses = responses.clone();
        tokio::spawn(async move {
            let _permit = permit;
            let response = dispatcher.dispatch(&line).await;
            if !responses.send(response) {
                debug!("response sink already stopped, dropping response");
            }
        });
    }
}
