use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use fashion_tryon_proxy::api::AppState;
use fashion_tryon_proxy::prompt::constructor::build_prompt;
use fashion_tryon_proxy::tryon::GenerationRequest;
use fashion_tryon_proxy::{Config, StockModelCatalog};

#[derive(Parser, Debug)]
#[command(name = "tryonctl", about = "CLI for the fashion try-on proxy", version)]
struct Cli {
    /// Override STOCK_CATALOG_PATH
    #[arg(global = true, long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Descriptors {
    /// female, male or diverse
    #[arg(long, default_value = "female")]
    model_type: String,
    /// standing, casual, walking, sitting or hands_in_pockets
    #[arg(long, default_value = "standing")]
    pose: String,
    /// studio_white, studio_grey, outdoor, urban or minimal
    #[arg(long, default_value = "studio_white")]
    background: String,
    /// commercial, editorial, casual or luxury
    #[arg(long, default_value = "commercial")]
    style: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the prompt built for the given descriptors
    Prompt {
        #[command(flatten)]
        descriptors: Descriptors,
    },
    /// List stock model catalog entries
    Catalog {
        /// Output raw JSON instead of lines
        #[arg(long)]
        json: bool,
    },
    /// Show which catalog entry a model type and pose resolve to
    Select {
        #[arg(long, default_value = "female")]
        model_type: String,
        #[arg(long, default_value = "standing")]
        pose: String,
        /// Output `{"key": ..., "url": ...}` instead of a tab-separated line
        #[arg(long)]
        json: bool,
    },
    /// Run a try-on generation against the configured provider
    Generate {
        /// Garment image file
        #[arg(long, value_name = "PATH")]
        garment: PathBuf,
        #[command(flatten)]
        descriptors: Descriptors,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut conf = Config::new();
    if let Some(path) = cli.catalog {
        conf.stock_catalog_path = Some(path);
    }

    match cli.command {
        Commands::Prompt { descriptors: d } => {
            println!("{}", build_prompt(&d.model_type, &d.pose, &d.background, &d.style));
            Ok(())
        }
        Commands::Catalog { json } => {
            let catalog = StockModelCatalog::load(conf.stock_catalog_path.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(catalog.entries())?);
            } else {
                for (key, url) in catalog.entries() {
                    println!("{}\t{}", key, url);
                }
            }
            Ok(())
        }
        Commands::Select { model_type, pose, json } => {
            let catalog = StockModelCatalog::load(conf.stock_catalog_path.as_deref())?;
            let selection = catalog.select(&model_type, &pose);
            if json {
                println!("{}", serde_json::to_string(&selection)?);
            } else {
                println!("{}\t{}", selection.key, selection.url);
            }
            Ok(())
        }
        Commands::Generate { garment, descriptors: d } => {
            let bytes = tokio::fs::read(&garment).await?;
            let mut request = GenerationRequest::new(bytes);
            request.garment_content_type = content_type_for(&garment).map(str::to_string);
            request.model_type = d.model_type;
            request.pose = d.pose;
            request.background = d.background;
            request.style = d.style;

            let state = Arc::new(AppState::from_config(conf)?);
            match state.service.generate(request).await {
                Ok(result) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn content_type_for(path: &std::path::Path) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}
