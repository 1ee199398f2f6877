//! Engine configuration.
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! log_level = "debug"
//!
//! [render_target]
//! width = 1920
//! height = 1080
//! samples = 4
//! ```

use crate::error::{BuildifyError, Result};
use crate::renderer::RenderTarget;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Surface the installed renderer is initialized with.
    pub render_target: RenderTarget,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            render_target: RenderTarget::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback log filter directive.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Sets the render target size in pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.render_target.width = width;
        self.render_target.height = height;
        self
    }

    /// Sets the render target sample count.
    pub fn samples(mut self, samples: u32) -> Self {
        self.render_target.samples = samples;
        self
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| BuildifyError::io(path, e))?;
        Self::from_toml_str(&text)
    }
}
