//! Foodime Models - download and describe TTS models from HuggingFace

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use foodime_core::{HfHubClient, ModelsConfig, TOKEN_ENV_VAR};

/// Foodime AI - TTS Model Manager
///
/// Examples:
///   foodime-models --list
///   foodime-models --create-info
///   foodime-models --download suno/bark-small
///   foodime-models --download-all --token hf_...
#[derive(Parser, Debug, Default)]
#[command(name = "foodime-models", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Hugging Face API token
    #[arg(long, env = TOKEN_ENV_VAR, hide_env_values = true)]
    pub token: Option<String>,

    /// List available models
    #[arg(long)]
    pub list: bool,

    /// Download specific model by ID
    #[arg(long, value_name = "MODEL_ID")]
    pub download: Option<String>,

    /// Download all recommended models
    #[arg(long)]
    pub download_all: bool,

    /// Create model info files
    #[arg(long)]
    pub create_info: bool,

    /// Root directory for models and generated info files
    #[arg(long, value_name = "PATH")]
    pub models_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "foodime_cli=debug,foodime_core=debug"
    } else {
        "foodime_cli=info,foodime_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &cli.config {
        Some(path) => ModelsConfig::from_file(path)?,
        None => ModelsConfig::default(),
    };
    if let Some(dir) = &cli.models_dir {
        config.models_dir = dir.clone();
    }

    let outcome = commands::run(&cli, config, HfHubClient::new)?;
    commands::print_outcome(&outcome);
    Ok(())
}
