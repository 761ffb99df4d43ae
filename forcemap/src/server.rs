//! Development server with hot reload.
//!
//! Renders the graph, watches the input file for changes, regenerates on
//! edit, and serves the output directory with live browser reload.

use std::path::{Path, PathBuf};

use axum::Router;
use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tower_http::services::ServeDir;
use tower_livereload::LiveReloadLayer;
use tracing::{error, info};

use crate::config::RenderConfig;
use crate::generator;

/// Start the development server
pub async fn serve(
    input: &Path,
    output: &Path,
    format: &str,
    port: u16,
    config: RenderConfig,
) -> anyhow::Result<()> {
    generator::generate(input, output, format, &config)?;
    info!(output = %output.display(), "generated initial output");

    // Channel for input change notifications
    let (tx, mut rx) = mpsc::channel::<()>(1);

    let tx_clone = tx.clone();
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            if event.kind.is_modify() || event.kind.is_create() {
                let _ = tx_clone.blocking_send(());
            }
        }
    })?;

    // Watch the input file's parent directory
    let watch_path = input
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    watcher.watch(&watch_path, RecursiveMode::NonRecursive)?;

    // Regeneration task
    let input_for_regen = input.to_path_buf();
    let output_for_regen = output.to_path_buf();
    let format_for_regen = format.to_string();
    let config_for_regen = config.clone();
    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            // Debounce: wait a bit for rapid changes to settle
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            while rx.try_recv().is_ok() {}

            match generator::generate(
                &input_for_regen,
                &output_for_regen,
                &format_for_regen,
                &config_for_regen,
            ) {
                Ok(()) => info!("regenerated output"),
                Err(e) => error!("error regenerating: {e}"),
            }
        }
    });

    // Reload the browser whenever the output directory changes
    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();
    let mut output_watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            if event.kind.is_modify() || event.kind.is_create() {
                reloader.reload();
            }
        }
    })?;
    output_watcher.watch(output, RecursiveMode::Recursive)?;

    let app = Router::new()
        .fallback_service(ServeDir::new(output))
        .layer(livereload);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("development server running at http://localhost:{port}");
    info!(input = %input.display(), "watching for changes");

    // Keep watchers alive
    let _watcher = watcher;
    let _output_watcher = output_watcher;

    axum::serve(listener, app).await?;

    Ok(())
}
