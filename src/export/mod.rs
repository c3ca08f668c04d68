//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zicsv.
//! The Zicsv project belongs to the Dunimd project team.
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

//! # CSV Export Module
//!
//! The exporter turns records into CSV through a field spec: one header row
//! of labels followed by one row per record, with cells resolved from source
//! paths.
//!
//! ## Module Components
//!
//! - **Exporter** ([exporter.rs](exporter/index.html)): hooks, `build` and `build_from_source`
//! - **Output** ([output.rs](output/index.html)): reading back, parsing and saving the result
//!
//! ## Usage Patterns
//!
//! ### Exporting a Collection
//!
//! ```rust
//! use zicsv::{ZiExporter, ZiExportConfig, ZiFieldSpec};
//! use serde_json::json;
//!
//! let fields = ZiFieldSpec::new().with_field("id")?.with_labeled("title", "Name")?;
//! let mut exporter = ZiExporter::new();
//! exporter.build(vec![json!({"id": 1, "title": "Desk"})], &fields, ZiExportConfig::default())?;
//! assert_eq!(exporter.output_string()?, "id,Name\n1,Desk\n");
//! ```
//!
//! ### Exporting Page by Page
//!
//! ```rust
//! use zicsv::{ZiExporter, ZiExportConfig, ZiFlow, ZiPagedSource};
//!
//! let mut source = ZiPagedSource::new(|offset, limit| repository.page(offset, limit));
//! let mut exporter = ZiExporter::new();
//! exporter.before_each_chunk(|page| Ok(ZiFlow::skip_if(page.is_empty())));
//! exporter.build_from_source(&mut source, &fields, ZiExportConfig::default().with_chunk(500))?;
//! ```

pub mod exporter;
pub mod output;

pub use exporter::{ZiChunkHook, ZiExportStats, ZiExporter, ZiFlow, ZiRecordHook};
pub use output::default_filename;
