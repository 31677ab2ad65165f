//! README and per-model config generation
//!
//! Files are rewritten in full on every call. Filesystem errors are returned to
//! the caller untouched.

use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::catalog::{self, ModelDescriptor};
use crate::config::ModelsConfig;
use crate::error::Result;

const README_HEADER: &str = "# Foodime AI - TTS Models

## Available Models

These models are selected for their similarity to ElevenLabs in terms of voice quality and features.

";

/// Metadata section of a per-model config document
#[derive(Debug, Serialize)]
struct ModelInfoDoc<'a> {
    description: &'a str,
    #[serde(rename = "type")]
    model_type: &'a str,
    size: &'a str,
    languages: &'a [&'a str],
    features: &'a [&'a str],
    quality: &'a str,
    files: &'a [&'a str],
}

/// Per-model config document, written as `configs/<name>.toml`
#[derive(Debug, Serialize)]
struct ModelConfigDoc<'a> {
    model_id: &'a str,
    voice_styles: &'a [&'a str],
    local_path: String,
    required_files: &'a [&'a str],
    // tables go last in TOML output
    info: ModelInfoDoc<'a>,
}

impl<'a> ModelConfigDoc<'a> {
    fn new(model: &'a ModelDescriptor, config: &ModelsConfig) -> Self {
        Self {
            model_id: model.id,
            voice_styles: model.voice_styles(),
            local_path: config.model_path(model.name()).display().to_string(),
            required_files: model.files,
            info: ModelInfoDoc {
                description: model.description,
                model_type: model.model_type,
                size: model.size,
                languages: model.languages,
                features: model.features,
                quality: model.quality,
                files: model.files,
            },
        }
    }
}

/// README section for one model
fn readme_section(model: &ModelDescriptor) -> String {
    format!(
        "### {}\n\
         - Source: {}\n\
         - Description: {}\n\
         - Size: {}\n\
         - Languages: {}\n\
         - Features: {}\n\
         - Quality: {}\n\
         - Voice Styles: {}\n\
         - Files: {}\n\n",
        model.name(),
        model.id,
        model.description,
        model.size,
        model.languages.join(", "),
        model.features.join(", "),
        model.quality,
        model.voice_styles().join(", "),
        model.files.join(", "),
    )
}

/// Write the aggregate README and one config document per catalog model.
/// Returns every path written.
pub fn create_model_info(config: &ModelsConfig) -> Result<Vec<PathBuf>> {
    write_model_info(config, catalog::all())
}

fn write_model_info(config: &ModelsConfig, models: &[ModelDescriptor]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.models_dir)?;

    let mut readme = String::from(README_HEADER);
    for model in models {
        readme.push_str(&readme_section(model));
    }
    let readme_path = config.models_dir.join("README.md");
    std::fs::write(&readme_path, readme)?;

    let configs_dir = config.configs_dir();
    std::fs::create_dir_all(&configs_dir)?;

    let mut written = vec![readme_path];
    for model in models {
        let doc = toml::to_string_pretty(&ModelConfigDoc::new(model, config))?;
        let path = configs_dir.join(format!("{}.toml", model.name()));
        std::fs::write(&path, doc)?;
        written.push(path);
    }

    info!(
        "Wrote model info for {} models to {:?}",
        models.len(),
        config.models_dir
    );
    Ok(written)
}
