use anyhow::Result;

mod app;
mod clipboard;
mod features;
mod shared;
mod translation;
mod ui;
mod widgets;


#[tokio::main]
async fn main() -> Result<()> {
    // Flushes buffered log lines when dropped
    let _log_guard = shared::logging::init()?;
    tracing::info!("Starting quick-translate {}", env!("CARGO_PKG_VERSION"));

    // Initialize the application
    let mut app = app::App::new().await?;

    // Run the TUI
    app.run().await?;

    Ok(())
}
