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

//! # Field Specification Module
//!
//! A field spec is the ordered list of columns an export produces. Each entry
//! pairs a source path with an optional display label:
//!
//! - the **header row** is built from the labels (the path when no label is set)
//! - the **data rows** are built by resolving each path against a record
//!
//! Specs can be built in code or parsed from configuration. In JSON or YAML an
//! entry is either a bare path, a `{"path": ..., "label": ...}` object holding
//! exactly those two keys, or a single-key `{"path": "label"}` rename. A lone
//! `{"path": "Label"}` is a rename of the field called `path`:
//!
//! ```yaml
//! - id
//! - title: Name
//! - path: original_price
//!   label: Retail Price
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::path::ZiFieldPath;

/// One output column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZiField {
    path: ZiFieldPath,
    label: Option<String>,
}

impl ZiField {
    /// Column whose header is the path itself.
    #[allow(non_snake_case)]
    pub fn new(path: &str) -> Result<Self> {
        Ok(Self {
            path: ZiFieldPath::parse(path)?,
            label: None,
        })
    }

    /// Column with an explicit display label.
    #[allow(non_snake_case)]
    pub fn labeled(path: &str, label: impl Into<String>) -> Result<Self> {
        Ok(Self {
            path: ZiFieldPath::parse(path)?,
            label: Some(label.into()),
        })
    }

    pub fn path(&self) -> &ZiFieldPath {
        &self.path
    }

    /// Header text for this column.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.path.as_str())
    }

    pub fn is_renamed(&self) -> bool {
        self.label.is_some()
    }
}

/// Configuration form of a single field entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZiFieldEntry {
    Path(String),
    Labeled(ZiLabeledEntry),
    Rename(BTreeMap<String, String>),
}

/// `{"path": ..., "label": ...}`; both keys are required and no others are allowed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZiLabeledEntry {
    pub path: String,
    pub label: String,
}

impl TryFrom<ZiFieldEntry> for ZiField {
    type Error = ZiError;

    fn try_from(entry: ZiFieldEntry) -> Result<Self> {
        match entry {
            ZiFieldEntry::Path(path) => ZiField::new(&path),
            ZiFieldEntry::Labeled(entry) => ZiField::labeled(&entry.path, entry.label),
            ZiFieldEntry::Rename(map) => {
                if map.len() != 1 {
                    return Err(ZiError::validation(format!(
                        "rename entries must hold exactly one 'path: label' pair, got {}",
                        map.len()
                    )));
                }
                let (path, label) = map.into_iter().next().ok_or_else(|| {
                    ZiError::internal("rename entry emptied during conversion")
                })?;
                ZiField::labeled(&path, label)
            }
        }
    }
}

impl From<ZiField> for ZiFieldEntry {
    fn from(field: ZiField) -> Self {
        let path = field.path.as_str().to_string();
        match field.label {
            Some(label) => ZiFieldEntry::Labeled(ZiLabeledEntry { path, label }),
            None => ZiFieldEntry::Path(path),
        }
    }
}

/// Ordered list of output columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ZiFieldEntry>", into = "Vec<ZiFieldEntry>")]
pub struct ZiFieldSpec {
    fields: Vec<ZiField>,
}

impl ZiFieldSpec {
    #[allow(non_snake_case)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a spec where every column is labeled by its path.
    pub fn from_paths<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = paths
            .into_iter()
            .map(|path| ZiField::new(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }

    /// Parses a spec from a JSON array of field entries.
    pub fn from_json(config: &Value) -> Result<Self> {
        if !config.is_array() {
            return Err(ZiError::validation("field spec must be an array"));
        }
        serde_json::from_value(config.clone())
            .map_err(|err| ZiError::validation(format!("invalid field spec: {err}")))
    }

    pub fn with_field(mut self, path: &str) -> Result<Self> {
        self.fields.push(ZiField::new(path)?);
        Ok(self)
    }

    pub fn with_labeled(mut self, path: &str, label: impl Into<String>) -> Result<Self> {
        self.fields.push(ZiField::labeled(path, label)?);
        Ok(self)
    }

    pub fn push(&mut self, field: ZiField) {
        self.fields.push(field);
    }

    /// Labels in declaration order, used for the header row.
    pub fn header_fields(&self) -> Vec<&str> {
        self.fields.iter().map(ZiField::label).collect()
    }

    /// Source paths in declaration order, used for data rows.
    pub fn data_fields(&self) -> Vec<&ZiFieldPath> {
        self.fields.iter().map(ZiField::path).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ZiField> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Vec<ZiFieldEntry>> for ZiFieldSpec {
    type Error = ZiError;

    fn try_from(entries: Vec<ZiFieldEntry>) -> Result<Self> {
        let fields = entries
            .into_iter()
            .map(ZiField::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }
}

impl From<ZiFieldSpec> for Vec<ZiFieldEntry> {
    fn from(spec: ZiFieldSpec) -> Self {
        spec.fields.into_iter().map(ZiFieldEntry::from).collect()
    }
}

impl FromIterator<ZiField> for ZiFieldSpec {
    fn from_iter<T: IntoIterator<Item = ZiField>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ZiFieldSpec {
    type Item = &'a ZiField;
    type IntoIter = std::slice::Iter<'a, ZiField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
