//! RelayChat terminal client entry point.
//!
//! # Usage
//!
//! ```bash
//! relaychat --url https://relay.example
//! RUST_LOG=relaychat_app=debug relaychat --log-file /tmp/relaychat.log
//! ```

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use clap::Parser;
use relaychat_app::{App, ClientConfig, Runtime};
use relaychat_client::{DEFAULT_AUTH_HEADER, DEFAULT_SERVER_URL, transport::WsTransport};
use relaychat_tui::TerminalDriver;
use tracing_subscriber::EnvFilter;

/// RelayChat terminal client
#[derive(Parser, Debug)]
#[command(name = "relaychat")]
#[command(about = "Terminal client for a RelayChat message relay")]
#[command(version)]
struct Args {
    /// Base URL of the socket.io relay
    #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
    url: String,

    /// Request header that carries the token
    #[arg(long, default_value = DEFAULT_AUTH_HEADER)]
    auth_header: String,

    /// File to write logs to (the terminal belongs to the UI)
    #[arg(long, default_value = "relaychat.log")]
    log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_file_logging(args: &Args) -> std::io::Result<()> {
    let log_file = OpenOptions::new().create(true).append(true).open(&args.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_file_logging(&args)?;

    tracing::info!(url = %args.url, "RelayChat client starting");

    let config = ClientConfig::new(args.url).with_auth_header(args.auth_header);
    let app = App::new(WsTransport::new(), config);
    let driver = TerminalDriver::new()?;

    let mut runtime = Runtime::new(driver, app);
    runtime.run().await?;

    tracing::info!("RelayChat client stopped");
    Ok(())
}
