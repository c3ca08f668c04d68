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

#[path = "../common/mod.rs"]
mod common;

use std::fs;
use std::io::{self, Write};

use common::{lines, products, PRODUCT_FIELDS};
use serde_json::{json, Value};
use zicsv::{
    ZiCompositePolicy, ZiCsvOptions, ZiCsvSink, ZiError, ZiExportConfig, ZiExportProfile,
    ZiExporter, ZiFieldSpec, ZiQuoteStyle, ZiRowSink, ZiTerminator,
};

/// Writer that accepts a fixed number of writes and then fails.
#[derive(Debug, Default)]
struct FlakyWriter {
    written: Vec<u8>,
    writes: usize,
    fail_on: usize,
}

impl FlakyWriter {
    fn failing_on(write: usize) -> Self {
        Self {
            fail_on: write,
            ..Self::default()
        }
    }
}

impl Write for FlakyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        if self.writes == self.fail_on {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_custom_delimiter() {
    let fields = ZiFieldSpec::from_paths(PRODUCT_FIELDS).unwrap();
    let mut exporter = ZiExporter::new();
    exporter.sink_mut().set_delimiter(b';').unwrap();
    exporter
        .build(products(10), &fields, ZiExportConfig::default())
        .unwrap();

    let csv = exporter.output_string().unwrap();
    let lines = lines(&csv);
    assert_eq!(lines[0], "id;title;price;original_price");
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[2].split(';').count(), PRODUCT_FIELDS.len());

    let rows = exporter.rows().unwrap();
    assert_eq!(rows[2], ["2", "Product 2", "7.0", "9.0"]);
}

#[test]
fn test_delimiter_locked_after_export() {
    let fields = ZiFieldSpec::from_paths(["id"]).unwrap();
    let mut exporter = ZiExporter::new();
    exporter
        .build(products(1), &fields, ZiExportConfig::default())
        .unwrap();
    assert!(exporter.sink_mut().set_delimiter(b';').is_err());
}

#[test]
fn test_file_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.csv");
    let fields = ZiFieldSpec::from_paths(PRODUCT_FIELDS).unwrap();

    let mut exporter = ZiExporter::with_sink(ZiCsvSink::from_path(&path).unwrap());
    exporter
        .build(products(10), &fields, ZiExportConfig::default())
        .unwrap();

    let csv = exporter.output_string().unwrap();
    let lines = lines(&csv);
    assert_eq!(lines[0], "id,title,price,original_price");
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[2].split(',').count(), PRODUCT_FIELDS.len());

    // reading back leaves the file position at the end
    exporter
        .build(products(1), &fields, ZiExportConfig::default().with_header(false))
        .unwrap();
    drop(exporter);
    let on_disk = fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk.lines().count(), 12);
    assert!(on_disk.ends_with("1,Product 1,5.5,7.0\n"));
}

#[test]
fn test_sink_failure_stops_export_and_keeps_partial_output() {
    let fields = ZiFieldSpec::from_paths(["id"]).unwrap();
    let mut exporter = ZiExporter::with_sink(ZiCsvSink::new(FlakyWriter::failing_on(4)));
    let err = exporter
        .build(products(10), &fields, ZiExportConfig::default())
        .unwrap_err();

    match &err {
        ZiError::SinkWrite { row, message } => {
            assert_eq!(*row, 3);
            assert!(message.contains("disk full"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_sink_write());
    assert_eq!(exporter.stats().rows_written, 2);
    assert_eq!(exporter.sink().rows_written(), 3);
    assert_eq!(exporter.sink().get_ref().written, b"id\n1\n2\n");
}

#[test]
fn test_composite_cells_are_refused_unless_json() {
    let fields = ZiFieldSpec::from_paths(["id", "tags"]).unwrap();
    let records = vec![
        json!({"id": 1, "tags": "plain"}),
        json!({"id": 2, "tags": ["a", "b"]}),
        json!({"id": 3, "tags": "never reached"}),
    ];

    let mut exporter = ZiExporter::new();
    let err = exporter
        .build(records.clone(), &fields, ZiExportConfig::default())
        .unwrap_err();
    assert!(err.is_sink_write());
    assert_eq!(exporter.output_string().unwrap(), "id,tags\n1,plain\n");

    let options = ZiCsvOptions {
        composites: ZiCompositePolicy::Json,
        ..ZiCsvOptions::default()
    };
    let mut exporter = ZiExporter::with_sink(ZiCsvSink::with_options(Vec::new(), options).unwrap());
    exporter
        .build(records, &fields, ZiExportConfig::default())
        .unwrap();
    let rows = exporter.rows().unwrap();
    assert_eq!(rows[2], ["2", "[\"a\",\"b\"]"]);
}

#[test]
fn test_profile_dialect() {
    let profile = ZiExportProfile::from_json_str(
        r#"{
            "fields": ["id", {"path": "name", "label": "Full Name"}],
            "export": {"header": true},
            "csv": {"delimiter": "\t", "quote_style": "always", "terminator": "crlf"}
        }"#,
    )
    .unwrap();
    assert_eq!(profile.csv.quote_style, ZiQuoteStyle::Always);
    assert_eq!(profile.csv.terminator, ZiTerminator::Crlf);

    let mut exporter = ZiExporter::from_profile(&profile).unwrap();
    let config = *exporter.config();
    exporter
        .build(vec![json!({"id": 1, "name": "Ada"})], &profile.fields, config)
        .unwrap();

    assert_eq!(
        exporter.output_string().unwrap(),
        "\"id\"\t\"Full Name\"\r\n\"1\"\t\"Ada\"\r\n"
    );
    assert_eq!(exporter.rows().unwrap()[1], ["1", "Ada"]);
}

#[test]
fn test_save_writes_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let fields = ZiFieldSpec::from_paths(["id"]).unwrap();
    let mut exporter = ZiExporter::new();
    exporter
        .build(vec![json!({"id": 1}), json!({"id": 2})], &fields, ZiExportConfig::default())
        .unwrap();

    let path = exporter.save(dir.path().join("out"), Some("ids.csv")).unwrap();
    assert_eq!(path, dir.path().join("out").join("ids.csv"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "id\n1\n2\n");

    let names: Vec<String> = fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["ids.csv"]);
}

#[test]
fn test_save_uses_timestamped_default_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter: ZiExporter<Value> = ZiExporter::new();
    exporter
        .build(Vec::new(), &ZiFieldSpec::from_paths(["id"]).unwrap(), ZiExportConfig::default())
        .unwrap();

    let path = exporter.save(dir.path(), None).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with(".csv"));
    assert!(chrono::NaiveDateTime::parse_from_str(&name, "%Y-%m-%d_%H%M%S.csv").is_ok());
    assert_eq!(fs::read_to_string(&path).unwrap(), "id\n");
}
