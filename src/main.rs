use std::path::PathBuf;

use clap::{Parser, Subcommand};
use editor_lsp_client::config;
use editor_lsp_client::host::HeadlessHost;
use editor_lsp_client::lsp::{ConnectionManager, LanguageClient};
use editor_lsp_client::replay::replay;
use tokio::io::BufReader;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "editor-lsp-client", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay newline-delimited JSON-RPC server messages against a headless editor
    Replay {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Width of the headless viewport in cells
        #[arg(long, default_value_t = 80)]
        columns: u16,

        /// Height of the headless viewport in cells
        #[arg(long, default_value_t = 24)]
        rows: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = editor_lsp_client::log::init()?;
    info!("Logging to {:?}", config::log_path());

    match cli.command {
        Command::Replay {
            file,
            columns,
            rows,
        } => {
            let mut client: LanguageClient<HeadlessHost, ()> = LanguageClient::with_host(
                ConnectionManager::default(),
                HeadlessHost::new(columns, rows),
            );
            let mut stdout = tokio::io::stdout();

            let summary = match file {
                Some(path) => {
                    let input = tokio::fs::File::open(&path).await?;
                    replay(&mut client, BufReader::new(input), &mut stdout).await?
                }
                None => {
                    let input = BufReader::new(tokio::io::stdin());
                    replay(&mut client, input, &mut stdout).await?
                }
            };

            info!(
                "Replayed {} messages ({} responses, {} malformed)",
                summary.messages, summary.responses, summary.malformed
            );
        }
    }

    Ok(())
}
