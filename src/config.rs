// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Settings loaded from `antelope.toml` with environment overrides

use crate::projection::{ReferenceCatalog, ReferenceSystemEntry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, looked up in the working directory
pub const CONFIG_FILE: &str = "antelope.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: ModelSettings,
    pub logging: LoggingSettings,
    pub projection: ProjectionSettings,
}

/// Model tolerances used by patch reconstruction and cleanup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Absolute distance tolerance in model units
    pub absolute_tolerance: f64,
    /// Angle tolerance in degrees
    pub angle_tolerance: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            absolute_tolerance: 0.001,
            angle_tolerance: 1.0,
        }
    }
}

impl ModelSettings {
    pub fn angle_tolerance_radians(&self) -> f64 {
        self.angle_tolerance.to_radians()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    /// Parsed level; unknown names fall back to `info`
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    pub default_srid: i32,
    /// Extra definitions; these shadow built-in ones with the same SRID
    pub reference_systems: Vec<ReferenceSystemEntry>,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            default_srid: 4326,
            reference_systems: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(settings)
    }

    /// Load `path` (or `antelope.toml` if present), then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(CONFIG_FILE).exists() => Self::from_file(CONFIG_FILE)?,
            None => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Apply `ANTELOPE_*` overrides read through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(tolerance) = lookup("ANTELOPE_TOLERANCE") {
            self.model.absolute_tolerance = tolerance
                .parse()
                .with_context(|| format!("Invalid ANTELOPE_TOLERANCE: {}", tolerance))?;
        }

        if let Some(angle) = lookup("ANTELOPE_ANGLE_TOLERANCE") {
            self.model.angle_tolerance = angle
                .parse()
                .with_context(|| format!("Invalid ANTELOPE_ANGLE_TOLERANCE: {}", angle))?;
        }

        if let Some(level) = lookup("ANTELOPE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(srid) = lookup("ANTELOPE_DEFAULT_SRID") {
            self.projection.default_srid = srid
                .parse()
                .with_context(|| format!("Invalid ANTELOPE_DEFAULT_SRID: {}", srid))?;
        }

        Ok(())
    }

    /// Save settings to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Built-in catalog plus configured reference systems
    pub fn reference_catalog(&self) -> ReferenceCatalog {
        ReferenceCatalog::with_entries(&self.projection.reference_systems)
    }
}
