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

//! # Row Sink Module
//!
//! Row sinks accept ordered lists of scalar-or-null values and turn them into
//! CSV bytes. Quoting and escaping are delegated to the `csv` crate; this
//! module only decides how JSON scalars become cells and where the bytes go.
//!
//! ## Components
//!
//! - [`ZiRowSink`]: the contract the exporter writes through
//! - [`ZiReadableSink`]: sinks that can hand their accumulated output back
//! - [`ZiCsvSink`]: CSV sink over any `Write` target, readable when the target
//!   is an in-memory buffer or a file
//! - [`ZiCsvOptions`]: delimiter, quote, terminator and value policies
//!
//! Options are fixed once the first row has been written. Changing them
//! afterwards is rejected instead of producing a file with mixed dialects.

use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ZiError};

/// UTF-8 byte order mark written ahead of the first row when enabled.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Destination for exported rows.
pub trait ZiRowSink {
    /// Appends one row. Fails with [`ZiError::SinkWrite`] when the row is refused.
    fn insert_row(&mut self, row: &[Value]) -> Result<()>;

    /// Flushes buffered bytes to the underlying target.
    fn flush(&mut self) -> Result<()>;

    /// Number of rows accepted so far, header rows included.
    fn rows_written(&self) -> usize;
}

/// Sink whose accumulated output can be read back.
pub trait ZiReadableSink: ZiRowSink {
    /// Returns every byte written so far without consuming the sink.
    fn contents(&mut self) -> Result<Vec<u8>>;

    /// Dialect used to write the contents, needed to parse them again.
    fn csv_options(&self) -> &ZiCsvOptions;
}

/// Record terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiTerminator {
    Lf,
    Crlf,
}

/// When cells are wrapped in quotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZiQuoteStyle {
    Necessary,
    Always,
    NonNumeric,
    Never,
}

/// Handling of arrays and objects that reach a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZiCompositePolicy {
    /// Refuse the row with a sink write error.
    Reject,
    /// Write the compact JSON text of the value.
    Json,
}

/// CSV dialect and value policies for [`ZiCsvSink`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiCsvOptions {
    #[serde(with = "ascii_byte")]
    pub delimiter: u8,
    #[serde(with = "ascii_byte")]
    pub quote: u8,
    pub terminator: ZiTerminator,
    pub quote_style: ZiQuoteStyle,
    pub composites: ZiCompositePolicy,
    /// Prefix the output with a UTF-8 byte order mark.
    pub bom: bool,
}

impl Default for ZiCsvOptions {
    fn default() -> Self {
        ZiCsvOptions {
            delimiter: b',',
            quote: b'"',
            terminator: ZiTerminator::Lf,
            quote_style: ZiQuoteStyle::Necessary,
            composites: ZiCompositePolicy::Reject,
            bom: false,
        }
    }
}

impl ZiCsvOptions {
    pub fn validate(&self) -> Result<()> {
        for (name, byte) in [("delimiter", self.delimiter), ("quote", self.quote)] {
            if !(byte.is_ascii_graphic() || byte == b' ' || byte == b'\t') {
                return Err(ZiError::validation(format!(
                    "{name} must be a printable ASCII character or tab"
                )));
            }
        }
        if self.delimiter == self.quote {
            return Err(ZiError::validation("delimiter and quote must differ"));
        }
        Ok(())
    }

    pub fn writer_builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(false)
            .flexible(true)
            .terminator(match self.terminator {
                ZiTerminator::Lf => csv::Terminator::Any(b'\n'),
                ZiTerminator::Crlf => csv::Terminator::CRLF,
            })
            .quote_style(match self.quote_style {
                ZiQuoteStyle::Necessary => csv::QuoteStyle::Necessary,
                ZiQuoteStyle::Always => csv::QuoteStyle::Always,
                ZiQuoteStyle::NonNumeric => csv::QuoteStyle::NonNumeric,
                ZiQuoteStyle::Never => csv::QuoteStyle::Never,
            });
        builder
    }

    /// Reader matching this dialect. Every line, header included, is a record.
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(false)
            .flexible(true);
        builder
    }
}

/// CSV row sink over any `Write` target.
#[derive(Debug)]
pub struct ZiCsvSink<W: Write> {
    inner: W,
    options: ZiCsvOptions,
    rows_written: usize,
    buffer: Vec<u8>,
}

/// In-memory CSV sink, the exporter's default.
pub type ZiMemorySink = ZiCsvSink<Vec<u8>>;

impl ZiCsvSink<Vec<u8>> {
    #[allow(non_snake_case)]
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }
}

impl ZiCsvSink<File> {
    /// Creates (or truncates) `path` and writes rows straight into it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;
        Ok(Self::new(file))
    }
}

impl<W: Write> ZiCsvSink<W> {
    #[allow(non_snake_case)]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            options: ZiCsvOptions::default(),
            rows_written: 0,
            buffer: Vec::new(),
        }
    }

    pub fn with_options(inner: W, options: ZiCsvOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            ..Self::new(inner)
        })
    }

    pub fn options(&self) -> &ZiCsvOptions {
        &self.options
    }

    /// Replaces the dialect. Only allowed before the first row.
    pub fn set_options(&mut self, options: ZiCsvOptions) -> Result<()> {
        if self.rows_written > 0 {
            return Err(ZiError::validation(
                "sink options are locked after the first row is written",
            ));
        }
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn set_delimiter(&mut self, delimiter: u8) -> Result<()> {
        let options = ZiCsvOptions {
            delimiter,
            ..self.options.clone()
        };
        self.set_options(options)
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn render<'a>(&self, row: usize, column: usize, value: &'a Value) -> Result<Cow<'a, str>> {
        match value {
            Value::Null => Ok(Cow::Borrowed("")),
            Value::Bool(flag) => Ok(Cow::Borrowed(if *flag { "true" } else { "false" })),
            Value::Number(number) => Ok(Cow::Owned(number.to_string())),
            Value::String(text) => Ok(Cow::Borrowed(text.as_str())),
            Value::Array(_) | Value::Object(_) => match self.options.composites {
                ZiCompositePolicy::Json => Ok(Cow::Owned(value.to_string())),
                ZiCompositePolicy::Reject => Err(ZiError::sink_write(
                    row,
                    format!("column {column} holds a composite value"),
                )),
            },
        }
    }
}

impl<W: Write> ZiRowSink for ZiCsvSink<W> {
    fn insert_row(&mut self, row: &[Value]) -> Result<()> {
        let index = self.rows_written;
        let cells = row
            .iter()
            .enumerate()
            .map(|(column, value)| self.render(index, column, value))
            .collect::<Result<Vec<_>>>()?;

        self.buffer.clear();
        if index == 0 && self.options.bom {
            self.buffer.extend_from_slice(UTF8_BOM);
        }
        {
            let mut writer = self.options.writer_builder().from_writer(&mut self.buffer);
            writer
                .write_record(cells.iter().map(|cell| cell.as_bytes()))
                .map_err(|err| ZiError::sink_write(index, err.to_string()))?;
            writer
                .flush()
                .map_err(|err| ZiError::sink_write(index, err.to_string()))?;
        }

        self.inner
            .write_all(&self.buffer)
            .map_err(|err| ZiError::sink_write(index, err.to_string()))?;
        self.rows_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    fn rows_written(&self) -> usize {
        self.rows_written
    }
}

impl ZiReadableSink for ZiCsvSink<Vec<u8>> {
    fn contents(&mut self) -> Result<Vec<u8>> {
        Ok(self.inner.clone())
    }

    fn csv_options(&self) -> &ZiCsvOptions {
        &self.options
    }
}

impl ZiReadableSink for ZiCsvSink<File> {
    fn contents(&mut self) -> Result<Vec<u8>> {
        self.inner.flush()?;
        let position = self.inner.stream_position()?;
        self.inner.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::new();
        self.inner.read_to_end(&mut bytes)?;
        self.inner.seek(SeekFrom::Start(position))?;
        Ok(bytes)
    }

    fn csv_options(&self) -> &ZiCsvOptions {
        &self.options
    }
}

/// Serde adapter storing single-byte CSV characters as one-character strings.
mod ascii_byte {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(byte: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&char::from(*byte).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let text = String::deserialize(deserializer)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii() => Ok(ch as u8),
            _ => Err(D::Error::custom(format!(
                "expected a single ASCII character, got '{text}'"
            ))),
        }
    }
}
