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

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use zicsv::ZiModel;

pub const PRODUCT_FIELDS: [&str; 4] = ["id", "title", "price", "original_price"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Digital,
    Physical,
    Service,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub production_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ProductType,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u32>>,
}

impl ZiModel for Product {
    fn hidden(&self) -> &[&str] {
        &["updated_at", "created_at"]
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Category {
    pub id: u32,
    pub parent_id: u32,
    pub title: String,
    pub image_path: String,
    pub order_index: u32,
    pub status: String,
    pub created_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category: Option<Box<Category>>,
}

impl ZiModel for Category {
    fn hidden(&self) -> &[&str] {
        &["image_path", "order_index", "status", "created_at"]
    }
}

pub fn production_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
}

pub fn timestamp() -> NaiveDateTime {
    production_date().and_hms_opt(9, 30, 0).unwrap()
}

pub fn product(id: u32) -> Product {
    let kind = match id % 3 {
        0 => ProductType::Digital,
        1 => ProductType::Physical,
        _ => ProductType::Service,
    };
    Product {
        id,
        title: format!("Product {id}"),
        price: 4.0 + f64::from(id) * 1.5,
        original_price: Some(5.0 + f64::from(id) * 2.0),
        production_date: production_date(),
        kind,
        created_at: timestamp(),
        updated_at: timestamp(),
        custom_field: None,
        formatted_property: None,
        categories: None,
    }
}

/// Products with ids `1..=count`.
pub fn products(count: u32) -> Vec<Product> {
    (1..=count).map(product).collect()
}

fn category_row(id: u32) -> Category {
    Category {
        id,
        parent_id: 1,
        title: format!("Category {id}"),
        image_path: format!("/img/{id}.png"),
        order_index: id,
        status: "active".to_string(),
        created_at: timestamp(),
        main_category: None,
    }
}

/// Categories with ids `1..=count`, each with its parent (always #1) loaded.
pub fn categories(count: u32) -> Vec<Category> {
    (1..=count)
        .map(|id| Category {
            main_category: Some(Box::new(category_row(1))),
            ..category_row(id)
        })
        .collect()
}

/// Plain JSON rows, as produced by a query without a model layer.
pub fn people(count: u32) -> Vec<Value> {
    (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "address": format!("{id} Harbour Street"),
                "firstName": format!("Person{id}"),
            })
        })
        .collect()
}

pub fn lines(csv: &str) -> Vec<&str> {
    csv.trim_end().split('\n').collect()
}
