//! Toolverse — catalog search and generative wellness/headline server.

use std::path::PathBuf;
use std::sync::Arc;

use toolverse_genai::{GenAIConfig, GeminiGateway};
use toolverse_search::Catalog;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("TOOLVERSE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn load_catalog(config: &toolverse_core::ToolverseConfig) -> anyhow::Result<Arc<Catalog>> {
    match &config.catalog_file {
        Some(path) => Ok(Arc::new(Catalog::from_json_file(path)?)),
        None => Ok(Catalog::builtin()),
    }
}

fn print_catalog(catalog: &Catalog) {
    for group in catalog.by_category() {
        println!("{}", group.category);
        for item in &group.items {
            println!("  {:<22} {}", item.id, item.navigation_target);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let data_dir = resolve_data_dir();
    let config = toolverse_core::ToolverseConfig::from_env(&data_dir)?;

    if args.len() > 1 {
        match args[1].as_str() {
            "--catalog" | "catalog" => {
                let catalog = load_catalog(&config)?;
                print_catalog(&catalog);
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("Toolverse — tool catalog search and generative features");
                println!();
                println!("Usage: toolverse [command]");
                println!();
                println!("Commands:");
                println!("  (none)     Start the server");
                println!("  catalog    Print the active catalog by category");
                println!("  help       Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'toolverse help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    info!("Data directory: {}", data_dir.display());

    let catalog = load_catalog(&config)?;
    info!("Catalog: {} items", catalog.len());

    let genai_config = GenAIConfig::load(&config.data_paths.genai_config_file);
    if !genai_config.has_api_key() {
        warn!("No generative API key configured; wellness and headlines will fail until one is set");
    }
    let gateway = Arc::new(GeminiGateway::from_config(
        reqwest::Client::new(),
        &genai_config,
    ));

    let port = config.port;
    let state = Arc::new(AppState::new(config, catalog, genai_config, gateway));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Toolverse server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_catalog_builtin_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = toolverse_core::ToolverseConfig::from_lookup(dir.path(), |_| None).unwrap();
        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.len(), Catalog::builtin().len());
        print_catalog(&catalog);

        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id":"tip-calculator","displayName":"Tip Calculator","description":"Split the bill.","navigationTarget":"/tip-calculator"}]"#,
        )
        .unwrap();
        let override_path = path.clone();
        let config = toolverse_core::ToolverseConfig::from_lookup(dir.path(), move |key| {
            (key == "TOOLVERSE_CATALOG").then(|| override_path.display().to_string())
        })
        .unwrap();
        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].navigation_target, "/tip-calculator");
    }
}
