use std::process::ExitCode;

use rumbo_server::config::AppConfig;
use rumbo_server::export::{DocxExporter, ExportCapability, Logo};
use rumbo_server::web::{APP_VERSION, AppState, create_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Logo problems are not fatal
    let logo = match Logo::load(&config.logo_path) {
        Ok(Some(logo)) => Some(logo),
        Ok(None) => {
            tracing::info!(path = %config.logo_path.display(), "no logo found, exporting without one");
            None
        }
        Err(e) => {
            tracing::warn!(path = %config.logo_path.display(), error = %e, "ignoring unusable logo");
            None
        }
    };

    let exporter = DocxExporter::new(config.header_text.clone(), logo);
    let logo_loaded = exporter.has_logo();
    let export = ExportCapability::from_enabled(config.export_enabled);
    let state = AppState::new(exporter, export);

    let app = create_router(state, &config.static_dir.to_string_lossy());

    let addr = config.bind_addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        version = APP_VERSION,
        docx = export.is_available(),
        logo = logo_loaded,
        "listening on http://{addr}"
    );
    println!();
    println!("Open http://{addr} in your browser for the web interface.");
    println!();
    println!("Endpoints:");
    println!("  GET  /               - Segment form");
    println!("  POST /               - Render the submitted rows");
    println!("  POST /descargar      - Download the rendered segments as DOCX");
    println!("  POST /api/redaccion  - Render rows from JSON");
    println!("  GET  /_version       - Version and DOCX availability");
    println!("  GET  /health         - Health check");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
