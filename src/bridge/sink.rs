//! Writer task for the response stream
//!
//! A single consumer serializes concurrent producers onto the output stream:
//! response lines are written and flushed strictly in enqueue order, and the
//! shutdown sentinel stops the task once everything queued before it has
//! drained. Stopped is terminal; the task never resumes.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::BridgeError;

/// A queued response line, or the sentinel that stops the writer.
#[derive(Debug)]
pub enum SinkMessage {
    Response(String),
    Shutdown,
}

/// Cloneable producer handle onto the output queue.
#[derive(Clone)]
pub struct ResponseSender {
    tx: mpsc::UnboundedSender<SinkMessage>,
}

impl ResponseSender {
    /// Queue one response line. Returns false once the sink has stopped; the
    /// line will never be written in that case.
    pub fn send(&self, line: String) -> bool {
        self.tx.send(SinkMessage::Response(line)).is_ok()
    }
}

pub struct OutputSink {
    tx: mpsc::UnboundedSender<SinkMessage>,
    task: JoinHandle<Result<(), BridgeError>>,
}

impl OutputSink {
    pub fn spawn<W>(writer: W) -> Self
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(sink_loop(writer, rx));
        Self { tx, task }
    }

    pub fn sender(&self) -> ResponseSender {
        ResponseSender {
            tx: self.tx.clone(),
        }
    }

    /// Queue the shutdown sentinel and wait for the writer to drain and stop.
    /// Everything queued before the sentinel is written first; anything queued
    /// after it is dropped.
    pub async fn shutdown(self) -> Result<(), BridgeError> {
        let _ = self.tx.send(SinkMessage::Shutdown);
        drop(self.tx);

        match self.task.await {
            Ok(result) => result,
            Err(err) => Err(BridgeError::SinkTask(err)),
        }
    }
}

async fn sink_loop<W>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<SinkMessage>,
) -> Result<(), BridgeError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = rx.recv().await {
        match message {
            SinkMessage::Response(line) => {
                writer
                    .write_all(line.as_bytes())
                    .await
                    .map_err(BridgeError::Write)?;
                writer.write_all(b"\n").await.map_err(BridgeError::Write)?;
                writer.flush().await.map_err(BridgeError::Write)?;
            }
            SinkMessage::Shutdown => {
                debug!("shutdown sentinel received, response writer stopping");
                break;
            }
        }
    }

    Ok(())
}
