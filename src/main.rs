// Main entry point - `serve` previews the site, `inspect` dumps a headless build
#[cfg(not(target_arch = "wasm32"))]
use chart_deck::{
    application::manifest_source::ManifestSource,
    infrastructure::config::{load_dashboard_config, DashboardConfig},
    infrastructure::file_manifest::FileManifestSource,
    infrastructure::http_manifest::HttpManifestSource,
    infrastructure::logging::init_logging,
    presentation::{inspect::inspect, router::site_router},
};

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str = "usage: chart-deck <serve | inspect [manifest]>";

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = load_dashboard_config()?;
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("serve") => serve(&config).await,
        Some("inspect") => {
            let location = args.next().unwrap_or_else(|| config.manifest.clone());
            let source = manifest_source(&location);
            let report = inspect(source.as_ref()).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn serve(config: &DashboardConfig) -> anyhow::Result<()> {
    let router = site_router(std::path::Path::new(&config.site_dir));
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, site = %config.site_dir, "serving dashboard");

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn manifest_source(location: &str) -> Box<dyn ManifestSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpManifestSource::new(location))
    } else {
        Box::new(FileManifestSource::new(location))
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
