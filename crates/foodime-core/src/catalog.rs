//! Static catalog of recommended TTS models
//!
//! The table is defined once in source and read many times; nothing in the
//! crate mutates it. Voice styles live in a separate table keyed by model id.

use std::fmt;

/// How the files of a model are pulled from the hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Fetch the whole repository, skipping files matched by the ignore patterns
    Snapshot,
    /// Fetch each declared file by name, probing alternative prefixes on failure
    PerFile,
}

/// Metadata for a single hub model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    /// Hub identifier, `namespace/name`
    pub id: &'static str,
    pub description: &'static str,
    pub model_type: &'static str,
    /// Declared download size, human readable
    pub size: &'static str,
    pub languages: &'static [&'static str],
    pub features: &'static [&'static str],
    pub quality: &'static str,
    /// Files expected in the hub repository, in download order
    pub files: &'static [&'static str],
    pub fetch: FetchStrategy,
}

impl ModelDescriptor {
    /// Short name used for local directories and config files
    pub fn name(&self) -> &'static str {
        self.id.rsplit('/').next().unwrap_or(self.id)
    }

    /// Voice style labels declared for this model
    pub fn voice_styles(&self) -> &'static [&'static str] {
        voice_styles(self.id)
    }
}

impl fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

static MODELS: &[ModelDescriptor] = &[ModelDescriptor {
    id: "suno/bark-small",
    description: "Small, fast version of Bark text-to-audio model",
    model_type: "transformer",
    size: "900MB",
    languages: &["en"],
    features: &["music", "effects", "emotion", "voice-cloning"],
    quality: "High",
    files: &[
        "bark",
        "tokenizer",
        "text_encoder",
        "fine_tune",
        "coarse_acoustics",
        "codec",
    ],
    // Bark's repository layout does not match the declared file names
    fetch: FetchStrategy::Snapshot,
}];

static VOICE_STYLES: &[(&str, &[&str])] = &[(
    "suno/bark-small",
    &[
        "neutral",
        "happy",
        "sad",
        "angry",
        "excited",
        "professional",
        "friendly",
        "whispering",
        "shouting",
        "news-anchor",
        "documentary",
        "movie-trailer",
    ],
)];

/// All recommended models, in declaration order
pub fn all() -> &'static [ModelDescriptor] {
    MODELS
}

/// Look up a model by its exact hub id
pub fn find(id: &str) -> Option<&'static ModelDescriptor> {
    MODELS.iter().find(|m| m.id == id)
}

/// Voice style labels for a model id; empty when none are declared
pub fn voice_styles(id: &str) -> &'static [&'static str] {
    VOICE_STYLES
        .iter()
        .find(|(model_id, _)| *model_id == id)
        .map(|(_, styles)| *styles)
        .unwrap_or_default()
}

/// Human-readable listing of the catalog
pub fn list_models() -> String {
    let mut out = String::from("\nAvailable TTS Models:\n\n");
    for model in all() {
        out.push_str(&format!("{}\n", model.id));
        out.push_str(&format!("   Description: {}\n", model.description));
        out.push_str(&format!("   Size: {}\n", model.size));
        out.push_str(&format!("   Languages: {}\n", model.languages.join(", ")));
        out.push_str(&format!("   Features: {}\n", model.features.join(", ")));
        out.push_str(&format!("   Quality: {}\n", model.quality));
        out.push_str(&format!(
            "   Voice Styles: {}\n",
            model.voice_styles().join(", ")
        ));
        out.push_str(&format!("   Files: {}\n\n", model.files.join(", ")));
    }
    out
}
