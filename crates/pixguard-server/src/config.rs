//! Server configuration

use pixguard_core::LabelSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Path to the serialized comment model artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Ordered label names matching the model's output positions.
    /// This is configuration kept in lockstep with how the model was
    /// trained, never inferred from the artifact at runtime.
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI/env overrides
        if let Some(model) = &cli.model {
            config.model_path = model.clone();
        }

        Ok(config)
    }

    /// Validate and build the canonical label set from configuration
    pub fn label_set(&self) -> pixguard_core::Result<LabelSet> {
        LabelSet::new(self.labels.clone())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            labels: default_labels(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./models/comment-model.json")
}

fn default_labels() -> Vec<String> {
    LabelSet::comment_defaults()
        .names()
        .to_vec()
}
