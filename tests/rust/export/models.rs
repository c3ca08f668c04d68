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

use common::{categories, lines, production_date, products, ProductType};
use serde_json::{json, Map, Value};
use zicsv::{ZiExportConfig, ZiExportRecord, ZiExporter, ZiFieldSpec, ZiRecord};

#[test]
fn test_serialize_casting() {
    let fields = ZiFieldSpec::from_paths(["id", "production_date", "type"]).unwrap();
    let mut exporter = ZiExporter::new();
    exporter
        .build(products(5), &fields, ZiExportConfig::default())
        .unwrap();

    let rows = exporter.rows().unwrap();
    assert_eq!(rows[1][1], production_date().format("%Y-%m-%d").to_string());
    let kind: ProductType = serde_json::from_value(json!(rows[1][2])).unwrap();
    assert_eq!(kind, ProductType::Physical);
    assert_eq!(rows[3][2], "digital");
}

#[test]
fn test_hidden_attributes_never_export() {
    let fields = ZiFieldSpec::from_paths(["id", "created_at", "updated_at"]).unwrap();
    let mut exporter = ZiExporter::new();
    exporter
        .build(products(2), &fields, ZiExportConfig::default())
        .unwrap();

    let csv = exporter.output_string().unwrap();
    assert_eq!(lines(&csv), ["id,created_at,updated_at", "1,,", "2,,"]);

    let snapshot = products(1)[0].snapshot().unwrap().into_owned();
    assert!(snapshot.get("created_at").is_none());
    assert!(snapshot.get("custom_field").is_none());
    assert_eq!(snapshot["type"], json!("physical"));
}

#[test]
fn test_case_sensitive_relation_names() {
    let fields = ZiFieldSpec::from_json(&json!([
        "id",
        "title",
        {"main_category.id": "Parent Category ID"}
    ]))
    .unwrap();
    let mut exporter = ZiExporter::new();
    exporter
        .build(categories(5), &fields, ZiExportConfig::default())
        .unwrap();

    let csv = exporter.output_string().unwrap();
    let lines = lines(&csv);
    assert_eq!(lines[0], "id,title,Parent Category ID");
    let second: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(second.len(), 3);
    assert_eq!(second[2], "1");
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_nested_hidden_keys_only_apply_at_top_level() {
    let fields = ZiFieldSpec::from_paths(["status", "main_category.status"]).unwrap();
    let mut exporter = ZiExporter::new();
    exporter
        .build(categories(1), &fields, ZiExportConfig::default().with_header(false))
        .unwrap();
    assert_eq!(exporter.output_string().unwrap(), ",active\n");
}

#[test]
fn test_generic_records_expose_payload_and_metadata() {
    let mut metadata = Map::new();
    metadata.insert("source".to_string(), json!("crm"));
    let records = vec![
        ZiRecord::new(Some("a-1".to_string()), json!({"title": "Desk", "stock": 3}))
            .with_metadata(metadata),
        ZiRecord::new(None, json!({"title": "Lamp"})),
    ];

    let fields = ZiFieldSpec::new()
        .with_field("id")
        .unwrap()
        .with_labeled("payload.title", "Title")
        .unwrap()
        .with_field("payload.stock")
        .unwrap()
        .with_labeled("metadata.source", "Source")
        .unwrap();
    let mut exporter = ZiExporter::new();
    exporter
        .build(records, &fields, ZiExportConfig::default())
        .unwrap();

    assert_eq!(
        exporter.output_string().unwrap(),
        "id,Title,payload.stock,Source\na-1,Desk,3,crm\n,Lamp,,\n"
    );
}

#[test]
fn test_maps_and_dotted_keys() {
    let mut row = Map::new();
    row.insert("user.name".to_string(), json!("literal"));
    row.insert("user".to_string(), json!({"name": "nested"}));

    let fields = ZiFieldSpec::from_paths(["user.name"]).unwrap();
    let mut exporter = ZiExporter::new();
    exporter
        .build(vec![row], &fields, ZiExportConfig::default().with_header(false))
        .unwrap();
    assert_eq!(exporter.output_string().unwrap(), "literal\n");
}

#[test]
fn test_scalar_records_resolve_at_index_zero() {
    let fields = ZiFieldSpec::from_paths(["0", "1"]).unwrap();
    let mut exporter = ZiExporter::new();
    exporter
        .build(
            vec![json!("alpha"), json!(7), Value::Null],
            &fields,
            ZiExportConfig::default().with_header(false),
        )
        .unwrap();
    assert_eq!(exporter.output_string().unwrap(), "alpha,\n7,\n,\n");
}
