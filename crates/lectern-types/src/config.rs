//! Runtime configuration, loaded from `lectern.toml`.
//!
//! Every section is optional; missing keys fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LecternError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LecternConfig {
    pub chrome: ChromeConfig,
    pub popover: PopoverConfig,
    pub outline: OutlineConfig,
}

/// Chrome visibility settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Keep the header bar revealed at all times (the page-style display
    /// mode leaves no room to hide it).
    pub always_reveal_header_bar: bool,
}

impl ChromeConfig {
    /// Read-only snapshot handed to the reveal decision.
    pub fn display_snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            always_reveal: self.always_reveal_header_bar,
        }
    }
}

/// Settings the reveal decision reads, captured at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub always_reveal: bool,
}

/// Contextual popover settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopoverConfig {
    /// Height assumed before the popover's first layout pass.
    pub estimated_height: f32,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            estimated_height: 200.0,
        }
    }
}

/// Outline traversal limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Deepest nesting level searched; deeper subtrees are skipped.
    pub max_depth: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl LecternConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: LecternConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let h = self.popover.estimated_height;
        if !h.is_finite() || h < 0.0 {
            return Err(LecternError::Config(format!(
                "popover.estimated_height must be a non-negative number, got {h}"
            )));
        }
        if self.outline.max_depth == 0 {
            return Err(LecternError::Config(
                "outline.max_depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
