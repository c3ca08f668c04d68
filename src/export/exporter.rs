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

//! # Exporter Module
//!
//! [`ZiExporter`] projects records through a [`ZiFieldSpec`] into a row sink.
//!
//! ## Per-record flow
//!
//! 1. The before-each hook (if any) receives `&mut record`; returning
//!    [`ZiFlow::Skip`] drops the record
//! 2. The record is normalized to its snapshot
//! 3. Each source path is resolved against the snapshot; missing data becomes
//!    an empty cell
//! 4. The values are inserted as one row
//!
//! With [`ZiExporter::build_from_source`] the before-each-chunk hook runs
//! first for every page and may drop the whole page the same way.
//!
//! Skipping never stops an export. Only errors do: a sink refusing a row, a
//! failing source, or a hook returning `Err`, which is passed through as is.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{ZiExportConfig, ZiExportProfile};
use crate::errors::{Result, ZiError};
use crate::field::ZiFieldSpec;
use crate::path::ZiFieldPath;
use crate::record::ZiExportRecord;
use crate::sink::{ZiCsvSink, ZiMemorySink, ZiRowSink};
use crate::source::ZiChunkedSource;

/// Outcome of a hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZiFlow {
    /// Export the record or page.
    Continue,
    /// Leave the record or page out and carry on with the next one.
    Skip,
}

impl ZiFlow {
    pub fn skip_if(condition: bool) -> Self {
        if condition {
            ZiFlow::Skip
        } else {
            ZiFlow::Continue
        }
    }
}

/// Hook run on every record before it is projected.
pub type ZiRecordHook<R> = Box<dyn FnMut(&mut R) -> Result<ZiFlow>>;

/// Hook run on every page pulled from a chunked source.
pub type ZiChunkHook<R> = Box<dyn FnMut(&mut Vec<R>) -> Result<ZiFlow>>;

/// Counters accumulated over the lifetime of an exporter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZiExportStats {
    /// Header rows written.
    pub header_rows: usize,
    /// Data rows written.
    pub rows_written: usize,
    /// Records dropped by the before-each hook.
    pub records_skipped: usize,
    /// Pages received from chunked sources.
    pub pages_seen: usize,
    /// Pages dropped by the before-each-chunk hook.
    pub pages_skipped: usize,
}

/// CSV export session.
///
/// A session owns its sink; every build call appends to it, so several
/// collections can be exported into one document.
pub struct ZiExporter<R, S = ZiMemorySink> {
    sink: S,
    config: ZiExportConfig,
    before_each: Option<ZiRecordHook<R>>,
    before_each_chunk: Option<ZiChunkHook<R>>,
    stats: ZiExportStats,
}

impl<R: ZiExportRecord> ZiExporter<R, ZiMemorySink> {
    /// Exporter writing into an in-memory CSV buffer.
    #[allow(non_snake_case)]
    pub fn new() -> Self {
        Self::with_sink(ZiCsvSink::in_memory())
    }

    /// In-memory exporter using the profile's CSV dialect.
    pub fn from_profile(profile: &ZiExportProfile) -> Result<Self> {
        let sink = ZiCsvSink::with_options(Vec::new(), profile.csv.clone())?;
        let mut exporter = Self::with_sink(sink);
        exporter.config = profile.export;
        Ok(exporter)
    }
}

impl<R: ZiExportRecord> Default for ZiExporter<R, ZiMemorySink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ZiExportRecord, S: ZiRowSink> ZiExporter<R, S> {
    #[allow(non_snake_case)]
    pub fn with_sink(sink: S) -> Self {
        Self {
            sink,
            config: ZiExportConfig::default(),
            before_each: None,
            before_each_chunk: None,
            stats: ZiExportStats::default(),
        }
    }

    /// Registers the per-record hook, replacing any previous one.
    pub fn before_each<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&mut R) -> Result<ZiFlow> + 'static,
    {
        self.before_each = Some(Box::new(hook));
        self
    }

    /// Registers the per-page hook, replacing any previous one.
    pub fn before_each_chunk<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&mut Vec<R>) -> Result<ZiFlow> + 'static,
    {
        self.before_each_chunk = Some(Box::new(hook));
        self
    }

    /// Removes both hooks.
    pub fn clear_hooks(&mut self) -> &mut Self {
        self.before_each = None;
        self.before_each_chunk = None;
        self
    }

    /// Writes the header (unless disabled) and one row per record.
    pub fn build<I>(&mut self, records: I, fields: &ZiFieldSpec, config: ZiExportConfig) -> Result<&mut Self>
    where
        I: IntoIterator<Item = R>,
    {
        check_fields(fields)?;
        self.config = config;

        let before = self.stats.clone();
        self.write_header(fields)?;
        let paths = fields.data_fields();
        self.write_rows(records, &paths)?;
        self.sink.flush()?;

        log::info!(
            "csv export finished: {} rows written, {} records skipped",
            self.stats.rows_written - before.rows_written,
            self.stats.records_skipped - before.records_skipped
        );
        Ok(self)
    }

    /// Writes the header once, then pulls pages of `config.chunk` records
    /// from `source` until it is exhausted.
    pub fn build_from_source<Src>(
        &mut self,
        source: &mut Src,
        fields: &ZiFieldSpec,
        config: ZiExportConfig,
    ) -> Result<&mut Self>
    where
        Src: ZiChunkedSource<Item = R> + ?Sized,
    {
        check_fields(fields)?;
        config.validate()?;
        self.config = config;

        let before = self.stats.clone();
        self.write_header(fields)?;
        let paths = fields.data_fields();

        source.for_each_page(config.chunk, &mut |mut page: Vec<R>| {
            self.stats.pages_seen += 1;
            log::debug!(
                "exporting page {} ({} records, page size {})",
                self.stats.pages_seen - before.pages_seen,
                page.len(),
                config.chunk
            );
            if let Some(hook) = self.before_each_chunk.as_mut() {
                if hook(&mut page)? == ZiFlow::Skip {
                    self.stats.pages_skipped += 1;
                    log::debug!(
                        "page {} skipped by chunk hook ({} records)",
                        self.stats.pages_seen - before.pages_seen,
                        page.len()
                    );
                    return Ok(());
                }
            }
            self.write_rows(page, &paths)
        })?;
        self.sink.flush()?;

        log::info!(
            "csv export from source finished: {} pages, {} rows written, {} pages skipped",
            self.stats.pages_seen - before.pages_seen,
            self.stats.rows_written - before.rows_written,
            self.stats.pages_skipped - before.pages_skipped
        );
        Ok(self)
    }

    /// Configuration of the most recent build.
    pub fn config(&self) -> &ZiExportConfig {
        &self.config
    }

    pub fn stats(&self) -> &ZiExportStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink, e.g. to change its dialect before the first build.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn write_header(&mut self, fields: &ZiFieldSpec) -> Result<()> {
        if !self.config.header {
            return Ok(());
        }
        let header: Vec<Value> = fields
            .header_fields()
            .into_iter()
            .map(|label| Value::String(label.to_string()))
            .collect();
        self.insert(&header)?;
        self.stats.header_rows += 1;
        Ok(())
    }

    fn write_rows<I>(&mut self, records: I, paths: &[&ZiFieldPath]) -> Result<()>
    where
        I: IntoIterator<Item = R>,
    {
        for mut record in records {
            if let Some(hook) = self.before_each.as_mut() {
                if hook(&mut record)? == ZiFlow::Skip {
                    self.stats.records_skipped += 1;
                    log::debug!(
                        "record skipped by before-each hook ({} skipped so far)",
                        self.stats.records_skipped
                    );
                    continue;
                }
            }

            let snapshot = record.snapshot()?;
            let row: Vec<Value> = paths
                .iter()
                .map(|path| path.resolve_or_null(&snapshot))
                .collect();
            self.insert(&row)?;
            self.stats.rows_written += 1;
        }
        Ok(())
    }

    fn insert(&mut self, row: &[Value]) -> Result<()> {
        if let Err(err) = self.sink.insert_row(row) {
            log::warn!("csv export aborted: {err}");
            return Err(err);
        }
        Ok(())
    }
}

fn check_fields(fields: &ZiFieldSpec) -> Result<()> {
    if fields.is_empty() {
        return Err(ZiError::validation("field spec must select at least one field"));
    }
    Ok(())
}

impl<R, S: fmt::Debug> fmt::Debug for ZiExporter<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZiExporter")
            .field("sink", &self.sink)
            .field("config", &self.config)
            .field("before_each", &self.before_each.is_some())
            .field("before_each_chunk", &self.before_each_chunk.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}
