//! Standalone runner: reads `HCC_*` variables and prints every new event.

use hcc_events::config::PollConfig;
use hcc_events::poller::Poller;
use hcc_events::types::Event;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hcc_events=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> hcc_events::error::Result<()> {
    let config = PollConfig::from_env()?;
    let (tx, mut rx) = tokio::sync::mpsc::channel::<Event>(64);
    let poller = Poller::new(config, tx)?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let printer = tokio::spawn(async move {
        eprintln!("Waiting for events...");
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(id = %event.id(), error = %e, "failed to render event"),
            }
        }
    });

    let result = poller.run(cancel).await;
    let _ = printer.await;
    result
}
