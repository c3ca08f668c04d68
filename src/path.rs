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

//! Dotted-path access into record snapshots.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::errors::{Result, ZiError};

/// Parsed dotted path such as `main_category.id` or `tags.0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ZiFieldPath {
    raw: String,
    segments: Vec<String>,
}

impl ZiFieldPath {
    #[allow(non_snake_case)]
    pub fn parse(path: &str) -> Result<Self> {
        let raw = path.trim();
        if raw.is_empty() {
            return Err(ZiError::validation("field path may not be empty"));
        }

        let segments: Vec<String> = raw
            .split('.')
            .map(|segment| segment.trim().to_string())
            .collect();

        if segments.iter().any(String::is_empty) {
            return Err(ZiError::validation(format!(
                "field path '{raw}' contains an empty segment"
            )));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolves the path against a snapshot.
    ///
    /// A key equal to the whole dotted path wins over nested traversal.
    /// Numeric segments index arrays. Returns `None` when any segment is
    /// missing.
    #[allow(non_snake_case)]
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        if self.segments.len() > 1 {
            if let Some(value) = root.as_object().and_then(|map| map.get(&self.raw)) {
                return Some(value);
            }
        }

        let mut current = root;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Resolves the path, substituting `Value::Null` for missing data.
    pub fn resolve_or_null(&self, root: &Value) -> Value {
        self.resolve(root).cloned().unwrap_or(Value::Null)
    }
}

impl FromStr for ZiFieldPath {
    type Err = ZiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ZiFieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
