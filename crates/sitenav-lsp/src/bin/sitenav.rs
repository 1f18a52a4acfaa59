//! Sitenav Binary Entry Point

use std::collections::HashSet;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sitenav_core::{NavigationConfig, NavigationEngine};
use sitenav_lsp::conversion::forest_to_jstree;
use sitenav_lsp::create_lsp_service;
use tower_lsp::Server;

#[derive(Parser)]
#[command(name = "sitenav", version, about = "Site navigation tree service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve JSON-RPC on stdin/stdout (default)
    Serve,
    /// Print the navigation tree for a page listing
    Render {
        /// Page listing JSON file
        listing: PathBuf,
        /// Navigation config (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override hierarchy.start_depth
        #[arg(long)]
        start_depth: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Render {
            listing,
            config,
            start_depth,
        } => render(listing, config, start_depth),
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    log::info!("sitenav server starting, listening on stdin/stdout");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = create_lsp_service();
    Server::new(stdin, stdout, socket).serve(service).await;
    Ok(())
}

fn render(
    listing: PathBuf,
    config: Option<PathBuf>,
    start_depth: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(path) => NavigationConfig::load(&path)?,
        None => NavigationConfig::default(),
    };
    if let Some(depth) = start_depth {
        config.hierarchy.start_depth = depth;
    }

    let content = std::fs::read_to_string(&listing)?;
    let mut engine = NavigationEngine::new(config);
    let mut diagnostics = engine.load_listing(serde_json::from_str(&content)?)?;

    let report = engine.render();
    diagnostics.extend(report.diagnostics);
    for diagnostic in &diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    let tree = forest_to_jstree(
        &report.forest,
        &engine.config().presentation,
        &HashSet::new(),
    );
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}
