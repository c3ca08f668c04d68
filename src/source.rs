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

//! # Chunked Source Module
//!
//! Chunked sources hand records to the exporter one page at a time, so large
//! result sets never have to be materialized at once.
//!
//! - [`ZiVecSource`]: pages an owned collection; every export sees all records
//! - [`ZiPagedSource`]: drives an offset/limit fetcher such as a database query
//! - [`ZiJsonlSource`]: streams JSON Lines from any buffered reader
//!
//! Page size is advisory. The final page is usually shorter, and a source is
//! free to deliver fewer records than requested.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{Result, ZiError};

/// Handler invoked once per page, in source order.
pub type ZiPageHandler<'a, R> = dyn FnMut(Vec<R>) -> Result<()> + 'a;

/// Paginated record provider driven by the exporter.
pub trait ZiChunkedSource {
    type Item;

    /// Calls `handler` for each page of at most `page_size` records until the
    /// source is exhausted. Errors returned by the handler stop the iteration
    /// and are returned unchanged.
    fn for_each_page(&mut self, page_size: usize, handler: &mut ZiPageHandler<'_, Self::Item>)
        -> Result<()>;
}

fn check_page_size(page_size: usize) -> Result<()> {
    if page_size == 0 {
        return Err(ZiError::validation("page size must be positive"));
    }
    Ok(())
}

/// Pages over an owned collection, cloning each page.
#[derive(Clone, Debug, Default)]
pub struct ZiVecSource<R> {
    records: Vec<R>,
}

impl<R: Clone> ZiVecSource<R> {
    #[allow(non_snake_case)]
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: Clone> From<Vec<R>> for ZiVecSource<R> {
    fn from(records: Vec<R>) -> Self {
        Self::new(records)
    }
}

impl<R: Clone> ZiChunkedSource for ZiVecSource<R> {
    type Item = R;

    fn for_each_page(&mut self, page_size: usize, handler: &mut ZiPageHandler<'_, R>) -> Result<()> {
        check_page_size(page_size)?;
        for page in self.records.chunks(page_size) {
            handler(page.to_vec())?;
        }
        Ok(())
    }
}

/// Offset/limit pagination over a fetch function.
///
/// `fetch(offset, limit)` is called with growing offsets. Iteration ends on an
/// empty page or after a page shorter than `limit`.
pub struct ZiPagedSource<R, F>
where
    F: FnMut(usize, usize) -> Result<Vec<R>>,
{
    fetch: F,
    _record: PhantomData<fn() -> R>,
}

impl<R, F> ZiPagedSource<R, F>
where
    F: FnMut(usize, usize) -> Result<Vec<R>>,
{
    #[allow(non_snake_case)]
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            _record: PhantomData,
        }
    }
}

impl<R, F> ZiChunkedSource for ZiPagedSource<R, F>
where
    F: FnMut(usize, usize) -> Result<Vec<R>>,
{
    type Item = R;

    fn for_each_page(&mut self, page_size: usize, handler: &mut ZiPageHandler<'_, R>) -> Result<()> {
        check_page_size(page_size)?;
        let mut offset = 0;
        loop {
            let page = (self.fetch)(offset, page_size)?;
            let count = page.len();
            if count == 0 {
                break;
            }
            offset += count;
            log::debug!("fetched page at offset {} with {} records", offset - count, count);
            handler(page)?;
            if count < page_size {
                break;
            }
        }
        Ok(())
    }
}

/// Streams JSON Lines, one record per non-blank line.
///
/// The reader is consumed by the first export; later exports see no records.
pub struct ZiJsonlSource<B: BufRead, R = Value> {
    reader: B,
    line: usize,
    _record: PhantomData<fn() -> R>,
}

impl<B: BufRead, R: DeserializeOwned> ZiJsonlSource<B, R> {
    #[allow(non_snake_case)]
    pub fn new(reader: B) -> Self {
        Self {
            reader,
            line: 0,
            _record: PhantomData,
        }
    }

    fn next_record(&mut self) -> Result<Option<R>> {
        let mut text = String::new();
        loop {
            text.clear();
            if self.reader.read_line(&mut text)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            if text.trim().is_empty() {
                continue;
            }
            return serde_json::from_str(&text).map(Some).map_err(|err| {
                ZiError::source(format!("jsonl line {}: {err}", self.line))
            });
        }
    }
}

impl<R: DeserializeOwned> ZiJsonlSource<BufReader<File>, R> {
    /// Opens a JSON Lines file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<B: BufRead, R: DeserializeOwned> ZiChunkedSource for ZiJsonlSource<B, R> {
    type Item = R;

    fn for_each_page(&mut self, page_size: usize, handler: &mut ZiPageHandler<'_, R>) -> Result<()> {
        check_page_size(page_size)?;
        let mut page = Vec::with_capacity(page_size);
        while let Some(record) = self.next_record()? {
            page.push(record);
            if page.len() == page_size {
                handler(std::mem::replace(&mut page, Vec::with_capacity(page_size)))?;
            }
        }
        if !page.is_empty() {
            handler(page)?;
        }
        Ok(())
    }
}
