// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pipeline configuration.
//!
//! Layered as: built-in defaults, then an optional JSON file, then `HQC_MDD_*`
//! environment variables. Command-line flags are applied last by the binary.
//!
//! Environment:
//! - `HQC_MDD_NAMESPACE`: feature-model namespace (default `HQC_MDD`)
//! - `HQC_MDD_RENDERER_URL`: PlantUML server base URL
//! - `HQC_MDD_OUTPUT_FORMAT`: `svg` (default), `png` or `txt`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::render::{OutputFormat, RenderOptions, DEFAULT_RENDERER_BASE_URL};
use crate::transform::KeywordTable;

pub const DEFAULT_NAMESPACE: &str = "HQC_MDD";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub namespace: String,
    pub renderer_base_url: String,
    pub output_format: OutputFormat,
    pub show_tagged_values: bool,
    /// Per-category keyword lists that replace the built-in ones.
    pub keywords: BTreeMap<Category, Vec<String>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            renderer_base_url: DEFAULT_RENDERER_BASE_URL.to_owned(),
            output_format: OutputFormat::default(),
            show_tagged_values: true,
            keywords: BTreeMap::new(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Applies `HQC_MDD_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(namespace) = lookup("HQC_MDD_NAMESPACE") {
            self.namespace = namespace;
        }
        if let Some(url) = lookup("HQC_MDD_RENDERER_URL") {
            self.renderer_base_url = url;
        }
        if let Some(format) = lookup("HQC_MDD_OUTPUT_FORMAT") {
            self.output_format = format.parse().map_err(|_| ConfigError::Invalid {
                key: "HQC_MDD_OUTPUT_FORMAT",
                message: format!("unknown output format `{format}`"),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let namespace = self.namespace.trim();
        if namespace.is_empty() || namespace.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                key: "namespace",
                message: format!("`{}` must be a single non-empty word", self.namespace),
            });
        }
        if !(self.renderer_base_url.starts_with("http://")
            || self.renderer_base_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid {
                key: "renderer_base_url",
                message: format!("`{}` is not an http(s) URL", self.renderer_base_url),
            });
        }
        Ok(())
    }

    pub fn keyword_table(&self) -> KeywordTable {
        KeywordTable::builtin().with_overrides(self.keywords.clone())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_tagged_values: self.show_tagged_values,
            ..RenderOptions::default()
        }
    }
}
