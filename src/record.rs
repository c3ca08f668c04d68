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

//! # Zicsv Record Module
//!
//! This module defines what can be exported. Every exportable value exposes a
//! *snapshot*: a key-addressable `serde_json::Value` that field paths are
//! resolved against.
//!
//! ## Record Kinds
//!
//! - **`serde_json::Value`**: objects and arrays are projected directly;
//!   scalars are wrapped into a one-element array
//! - **`serde_json::Map`**: projected as an object
//! - **[`ZiRecord`]**: identifier, payload and metadata, addressed as
//!   `id`, `payload.*` and `metadata.*`
//! - **[`ZiModel`]** types: typed models serialized through serde, so dates,
//!   enumerations and other rich fields reach the CSV in their canonical
//!   primitive form
//!
//! ## Usage Example
//!
//! ```rust
//! use serde::Serialize;
//! use zicsv::record::{ZiExportRecord, ZiModel};
//!
//! #[derive(Serialize)]
//! struct Product {
//!     id: u32,
//!     title: String,
//!     created_at: chrono::NaiveDate,
//! }
//!
//! impl ZiModel for Product {
//!     fn hidden(&self) -> &[&str] {
//!         &["created_at"]
//!     }
//! }
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Result;

/// Generic metadata map that may accompany a record.
pub type ZiMetadata = Map<String, Value>;

/// Capability shared by everything the exporter can project into rows.
///
/// The returned snapshot must be key-addressable (an object or an array);
/// implementations holding a scalar wrap it so that it resolves at path `0`.
pub trait ZiExportRecord {
    /// Produces the canonical, primitive-only view of the record.
    fn snapshot(&self) -> Result<Cow<'_, Value>>;
}

/// Typed model whose serde representation is its canonical snapshot.
///
/// Implementing this trait is enough to make a `Serialize` type exportable.
/// Attributes listed by [`ZiModel::hidden`] never appear in the snapshot,
/// which keeps them out of every export regardless of the field spec.
pub trait ZiModel: Serialize {
    /// Top-level attribute names removed from the snapshot.
    fn hidden(&self) -> &[&str] {
        &[]
    }
}

impl<M: ZiModel> ZiExportRecord for M {
    fn snapshot(&self) -> Result<Cow<'_, Value>> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            for key in self.hidden() {
                map.remove(*key);
            }
        }
        Ok(Cow::Owned(addressable(value)))
    }
}

impl ZiExportRecord for Value {
    fn snapshot(&self) -> Result<Cow<'_, Value>> {
        match self {
            Value::Object(_) | Value::Array(_) => Ok(Cow::Borrowed(self)),
            scalar => Ok(Cow::Owned(Value::Array(vec![scalar.clone()]))),
        }
    }
}

impl ZiExportRecord for Map<String, Value> {
    fn snapshot(&self) -> Result<Cow<'_, Value>> {
        Ok(Cow::Owned(Value::Object(self.clone())))
    }
}

/// Wraps scalars so that every snapshot can be indexed by a path.
fn addressable(value: Value) -> Value {
    match value {
        Value::Object(_) | Value::Array(_) => value,
        scalar => Value::Array(vec![scalar]),
    }
}

/// Loosely structured record with an identifier, payload and metadata.
///
/// The snapshot of a `ZiRecord` is `{"id": ..., "payload": ..., "metadata": ...}`,
/// so field paths look like `payload.title` or `metadata.source`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZiRecord {
    /// Optional stable identifier for the record.
    pub id: Option<String>,

    /// Primary payload carrying user content.
    pub payload: Value,

    /// Additional attributes such as scores, tags, or provenance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ZiMetadata>,
}

impl ZiRecord {
    /// Constructs a record with the given payload and optional identifier.
    #[allow(non_snake_case)]
    pub fn new(id: impl Into<Option<String>>, payload: Value) -> Self {
        ZiRecord {
            id: id.into(),
            payload,
            metadata: None,
        }
    }

    /// Attaches metadata to the record.
    #[allow(non_snake_case)]
    pub fn with_metadata(mut self, metadata: ZiMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns a mutable reference to the metadata map, creating it if necessary.
    pub fn metadata_mut(&mut self) -> &mut ZiMetadata {
        self.metadata.get_or_insert_with(ZiMetadata::new)
    }
}

impl ZiExportRecord for ZiRecord {
    fn snapshot(&self) -> Result<Cow<'_, Value>> {
        let mut root = Map::new();
        root.insert(
            "id".to_string(),
            self.id.clone().map(Value::String).unwrap_or(Value::Null),
        );
        root.insert("payload".to_string(), self.payload.clone());
        root.insert(
            "metadata".to_string(),
            self.metadata.clone().map(Value::Object).unwrap_or(Value::Null),
        );
        Ok(Cow::Owned(Value::Object(root)))
    }
}
