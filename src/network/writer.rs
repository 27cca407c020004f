//! Writer task: drains the outbound queue through flood control.

use std::time::Duration;

use futures_util::SinkExt;
use slirc_wire::LineCodec;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;
use tokio_util::codec::FramedWrite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::flood::FloodControl;

/// Upper bound on flushing and shutting down the transport once the queue
/// has closed.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Write queued lines in order until cancelled or the queue closes.
///
/// A write failure cancels `cancel` so the reader tears the session down.
/// Cancellation also interrupts a write the peer is not draining; the
/// connection is abandoned in that case and nothing more is flushed.
pub(crate) async fn run<W>(
    writer: W,
    mut outbound: UnboundedReceiver<String>,
    mut flood: FloodControl,
    cancel: CancellationToken,
) where
    W: AsyncWrite + Unpin,
{
    let mut sink = FramedWrite::new(writer, LineCodec::new());

    loop {
        let line = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            line = outbound.recv() => match line {
                Some(line) => line,
                None => break,
            },
        };

        if let Some(delay) = flood.on_dequeue(Instant::now()) {
            trace!(delay_ms = delay.as_millis() as u64, "Pacing outbound line");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let sent = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Write interrupted by cancellation");
                break;
            }
            sent = sink.send(line.as_str()) => sent,
        };
        if let Err(err) = sent {
            warn!(error = %err, "Write failed");
            cancel.cancel();
            break;
        }
        trace!(line = %line, "Sent line");
    }

    // After cancellation the peer may have stopped reading; never wait on it.
    if !cancel.is_cancelled() {
        match tokio::time::timeout(CLOSE_TIMEOUT, SinkExt::<&str>::close(&mut sink)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => debug!(error = %err, "Error closing write half"),
            Err(_) => debug!("Timed out closing write half"),
        }
    }
    debug!("Writer stopped");
}
