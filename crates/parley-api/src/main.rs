//! Parley server entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, initializes the database and turn engine, then
//! serves the REST API and WebSocket endpoint until interrupted.

mod http;
mod state;

use std::path::PathBuf;

use clap::Parser;

use state::AppState;

#[derive(Parser)]
#[command(name = "parley", version, about = "Real-time AI conversation server")]
struct Cli {
    /// Bind address (overrides config.toml)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config.toml)
    #[arg(short, long)]
    port: Option<u16>,

    /// Data directory (defaults to $PARLEY_DATA_DIR or ~/.parley)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(long)]
    quiet: bool,

    /// Export traces via OpenTelemetry (stdout exporter)
    #[arg(long)]
    otel: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,parley=debug",
        _ => "trace",
    };

    if let Err(err) = parley_observe::tracing_setup::init_tracing(Some(filter), cli.otel) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    // Initialize application state (DB, config, turn engine)
    let state = AppState::init(cli.data_dir).await?;

    let host = cli.host.unwrap_or_else(|| state.config.host.clone());
    let port = cli.port.unwrap_or(state.config.port);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Parley listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!(
        "  {} WebSocket endpoint at {}",
        console::style("↔").bold(),
        console::style(format!("ws://{addr}/ws")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    parley_observe::tracing_setup::shutdown_tracing();
    println!("\n  Server stopped.");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
