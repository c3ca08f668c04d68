//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zicsv.
//! The Zicsv project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Export Configuration Module
//!
//! - [`ZiExportConfig`]: per-build options (`header`, `chunk`)
//! - [`ZiExportProfile`]: a reusable bundle of fields, build options and CSV
//!   dialect that can be stored as JSON or YAML
//!
//! ```yaml
//! fields:
//!   - id
//!   - title: Name
//! export:
//!   header: true
//!   chunk: 500
//! csv:
//!   delimiter: ";"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::field::ZiFieldSpec;
use crate::sink::ZiCsvOptions;

/// Page size used by `build_from_source` when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Options recognized by a single build call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiExportConfig {
    /// Emit the header row.
    pub header: bool,
    /// Page size requested from chunked sources.
    pub chunk: usize,
}

impl Default for ZiExportConfig {
    fn default() -> Self {
        ZiExportConfig {
            header: true,
            chunk: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ZiExportConfig {
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = chunk;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk == 0 {
            return Err(ZiError::validation("chunk size must be positive"));
        }
        Ok(())
    }

    /// Reads `{"header": bool, "chunk": n}`; missing keys keep their defaults.
    #[allow(non_snake_case)]
    pub fn from_json(value: &Value) -> Result<Self> {
        let config: ZiExportConfig = serde_json::from_value(value.clone())
            .map_err(|err| ZiError::validation(format!("invalid export config: {err}")))?;
        config.validate()?;
        Ok(config)
    }
}

/// Stored export definition: what to select, how to build, how to write.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiExportProfile {
    pub fields: ZiFieldSpec,
    pub export: ZiExportConfig,
    pub csv: ZiCsvOptions,
}

impl ZiExportProfile {
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(ZiError::validation("export profile selects no fields"));
        }
        self.export.validate()?;
        self.csv.validate()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let profile: ZiExportProfile = serde_json::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let profile: ZiExportProfile = serde_yaml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Loads a profile, choosing the format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Self::from_json_str(&text),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Self::from_yaml_str(&text),
            _ => Err(ZiError::validation(format!(
                "unable to detect profile format for {}",
                path.display()
            ))),
        }
    }
}
