//! Replaying recorded server traffic through a client

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tower_lsp::jsonrpc::Request;
use tracing::{debug, warn};

use crate::host::EditorHost;
use crate::lsp::LanguageClient;
use crate::lsp::dispatch::dispatch;

/// Counts collected while replaying
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub messages: usize,
    pub responses: usize,
    pub malformed: usize,
}

/// Feeds newline-delimited JSON-RPC messages to `client`, writing each
/// response as one JSON line to `output`.
pub async fn replay<H, S, R, W>(
    client: &mut LanguageClient<H, S>,
    input: R,
    output: &mut W,
) -> anyhow::Result<ReplaySummary>
where
    H: EditorHost,
    S: 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = ReplaySummary::default();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message: Request = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Skipping malformed message: {}", e);
                summary.malformed += 1;
                continue;
            }
        };

        debug!("Replaying {}", message.method());
        summary.messages += 1;

        if let Some(response) = dispatch(client, &message).await {
            let mut encoded = serde_json::to_vec(&response)?;
            encoded.push(b'\n');
            output.write_all(&encoded).await?;
            summary.responses += 1;
        }
    }

    output.flush().await?;
    Ok(summary)
}
