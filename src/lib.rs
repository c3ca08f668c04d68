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

//! # Zicsv Core Library
//!
//! Zicsv exports records to CSV. A field spec names the columns: each entry
//! pairs a dotted source path with an optional header label. Records are any
//! type that can produce a JSON snapshot, such as `serde_json::Value`,
//! [`ZiRecord`], or a `Serialize` model implementing [`ZiModel`].
//!
//! ## Module Overview
//!
//! - **record**: the export capability (`ZiExportRecord`) and record types
//! - **path**: dotted path parsing and resolution
//! - **field**: field specs, labels and their configuration forms
//! - **sink**: CSV row sinks and dialect options
//! - **source**: chunked record sources for paged exports
//! - **config**: per-build options and stored export profiles
//! - **export**: the exporter, its hooks and output access
//!
//! ## Feature Flags
//!
//! - `yaml`: loads export profiles from YAML (enabled by default)
//!
//! ## Quick Start
//!
//! ```rust
//! use zicsv::{ZiExporter, ZiExportConfig, ZiFieldSpec, ZiFlow};
//! use serde_json::json;
//!
//! let fields = ZiFieldSpec::from_json(&json!(["id", {"title": "Name"}, "price"]))?;
//!
//! let mut exporter = ZiExporter::new();
//! exporter.before_each(|product: &mut serde_json::Value| {
//!     Ok(ZiFlow::skip_if(product["price"].is_null()))
//! });
//! exporter.build(products, &fields, ZiExportConfig::default())?;
//!
//! let csv = exporter.output_string()?;
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, ZiError>`. A sink that refuses a row stops
//! the export with `ZiError::SinkWrite`; rows written before it stay in the
//! sink. Hook errors are returned exactly as the hook produced them.

#![allow(non_snake_case)]

pub mod errors;
pub mod record;
pub mod path;
pub mod field;
pub mod sink;
pub mod source;
pub mod config;
pub mod export;

pub use errors::{Result, ZiError};
pub use record::{ZiExportRecord, ZiMetadata, ZiModel, ZiRecord};
pub use path::ZiFieldPath;
pub use field::{ZiField, ZiFieldEntry, ZiFieldSpec, ZiLabeledEntry};
pub use sink::{
    ZiCompositePolicy, ZiCsvOptions, ZiCsvSink, ZiMemorySink, ZiQuoteStyle, ZiReadableSink,
    ZiRowSink, ZiTerminator, UTF8_BOM,
};
pub use source::{ZiChunkedSource, ZiJsonlSource, ZiPageHandler, ZiPagedSource, ZiVecSource};
pub use config::{ZiExportConfig, ZiExportProfile, DEFAULT_CHUNK_SIZE};
pub use export::{default_filename, ZiChunkHook, ZiExportStats, ZiExporter, ZiFlow, ZiRecordHook};
