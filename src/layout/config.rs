// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Seqline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Every size the layout engine uses, in abstract units (pixels for an SVG renderer).
///
/// Loaded from JSON; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub margin: f64,
    pub title_height: f64,
    pub participant_min_width: f64,
    pub participant_height: f64,
    /// Estimated advance of one label character.
    pub char_width: f64,
    pub participant_padding: f64,
    pub participant_gap: f64,
    pub lifeline_top_gap: f64,
    pub message_height: f64,
    pub self_message_width: f64,
    pub self_message_height: f64,
    /// Vertical drop per delay step of `A->(N)B`.
    pub delay_unit: f64,
    pub blank_height: f64,
    pub error_height: f64,
    pub divider_height: f64,
    pub note_width: f64,
    pub note_min_height: f64,
    pub note_line_height: f64,
    pub note_gap: f64,
    pub fragment_header: f64,
    pub fragment_else_header: f64,
    pub fragment_padding: f64,
    pub fragment_margin: f64,
    pub activation_width: f64,
    /// Height of one `space` step.
    pub space_unit: f64,
    pub destroy_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            title_height: 40.0,
            participant_min_width: 80.0,
            participant_height: 40.0,
            char_width: 7.0,
            participant_padding: 10.0,
            participant_gap: 40.0,
            lifeline_top_gap: 20.0,
            message_height: 36.0,
            self_message_width: 40.0,
            self_message_height: 50.0,
            delay_unit: 10.0,
            blank_height: 16.0,
            error_height: 28.0,
            divider_height: 30.0,
            note_width: 100.0,
            note_min_height: 30.0,
            note_line_height: 16.0,
            note_gap: 10.0,
            fragment_header: 26.0,
            fragment_else_header: 22.0,
            fragment_padding: 8.0,
            fragment_margin: 12.0,
            activation_width: 10.0,
            space_unit: 10.0,
            destroy_height: 12.0,
        }
    }
}

impl LayoutConfig {
    fn fields(&self) -> [(&'static str, f64); 26] {
        [
            ("margin", self.margin),
            ("title_height", self.title_height),
            ("participant_min_width", self.participant_min_width),
            ("participant_height", self.participant_height),
            ("char_width", self.char_width),
            ("participant_padding", self.participant_padding),
            ("participant_gap", self.participant_gap),
            ("lifeline_top_gap", self.lifeline_top_gap),
            ("message_height", self.message_height),
            ("self_message_width", self.self_message_width),
            ("self_message_height", self.self_message_height),
            ("delay_unit", self.delay_unit),
            ("blank_height", self.blank_height),
            ("error_height", self.error_height),
            ("divider_height", self.divider_height),
            ("note_width", self.note_width),
            ("note_min_height", self.note_min_height),
            ("note_line_height", self.note_line_height),
            ("note_gap", self.note_gap),
            ("fragment_header", self.fragment_header),
            ("fragment_else_header", self.fragment_else_header),
            ("fragment_padding", self.fragment_padding),
            ("fragment_margin", self.fragment_margin),
            ("activation_width", self.activation_width),
            ("space_unit", self.space_unit),
            ("destroy_height", self.destroy_height),
        ]
    }

    /// All sizes must be finite and non-negative; message and participant heights must be
    /// positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid { field, reason: "must be a finite, non-negative number" });
            }
        }
        if self.message_height <= 0.0 {
            return Err(ConfigError::Invalid { field: "message_height", reason: "must be positive" });
        }
        if self.participant_height <= 0.0 {
            return Err(ConfigError::Invalid { field: "participant_height", reason: "must be positive" });
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)
            .map_err(|source| ConfigError::Json { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|source| ConfigError::Json { path: Some(path.to_path_buf()), source })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded layout config");
        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Json { path: Option<PathBuf>, source: serde_json::Error },
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path: Some(path), source } => write!(f, "json error at {path:?}: {source}"),
            Self::Json { path: None, source } => write!(f, "json error: {source}"),
            Self::Invalid { field, reason } => write!(f, "invalid layout config: {field} {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}
