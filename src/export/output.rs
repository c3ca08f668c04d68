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

//! # Output Access Module
//!
//! Read-back helpers for exporters whose sink keeps its output: raw bytes,
//! a parsed table, JSON rows, and saving to disk.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::{Result, ZiError};
use crate::export::exporter::ZiExporter;
use crate::record::ZiExportRecord;
use crate::sink::{ZiReadableSink, UTF8_BOM};

/// Timestamped file name used by [`ZiExporter::save`] when none is given.
pub fn default_filename() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H%M%S.csv").to_string()
}

impl<R: ZiExportRecord, S: ZiReadableSink> ZiExporter<R, S> {
    /// Everything written so far, header included, exactly as emitted.
    pub fn output(&mut self) -> Result<Vec<u8>> {
        self.sink_mut().contents()
    }

    /// Output decoded as UTF-8.
    pub fn output_string(&mut self) -> Result<String> {
        String::from_utf8(self.output()?)
            .map_err(|err| ZiError::internal(format!("csv output is not valid UTF-8: {err}")))
    }

    /// Parses the output back into records using the sink's dialect.
    ///
    /// The header row, when written, is the first record.
    pub fn reader(&mut self) -> Result<csv::Reader<Cursor<Vec<u8>>>> {
        let mut bytes = self.output()?;
        // The csv reader always drops one leading BOM. Without a sink BOM,
        // a leading U+FEFF belongs to the first cell and must survive.
        if !self.sink().csv_options().bom && bytes.starts_with(UTF8_BOM) {
            bytes.splice(0..0, UTF8_BOM.iter().copied());
        }
        let builder = self.sink().csv_options().reader_builder();
        Ok(builder.from_reader(Cursor::new(bytes)))
    }

    pub fn rows(&mut self) -> Result<Vec<Vec<String>>> {
        let mut reader = self.reader()?;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    /// Rows as a JSON array of string arrays.
    pub fn to_json(&mut self) -> Result<Value> {
        Ok(serde_json::to_value(self.rows()?)?)
    }

    /// Writes the output to `dir/filename` and returns the final path.
    ///
    /// The bytes go to a hidden temp file first and are renamed into place,
    /// so readers never observe a half-written export.
    pub fn save(&mut self, dir: impl AsRef<Path>, filename: Option<&str>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let filename = match filename {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            Some(_) => return Err(ZiError::validation("file name must not be blank")),
            None => default_filename(),
        };

        let bytes = self.output()?;
        fs::create_dir_all(dir)?;
        let path = dir.join(&filename);
        let temp_path = temp_path(&path);
        if let Err(err) = fs::write(&temp_path, &bytes).and_then(|_| fs::rename(&temp_path, &path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }

        log::info!("saved {} bytes of csv to {}", bytes.len(), path.display());
        Ok(path)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(".{}.tmp", stem))
}
