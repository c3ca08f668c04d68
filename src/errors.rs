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

//! # Zicsv Error Module
//!
//! This module defines the error type shared by every Zicsv component.
//!
//! ## Error Categories
//!
//! - **SinkWrite**: A row sink refused a row; the export stops at that row
//! - **Hook**: Raised by user hooks and passed through without wrapping
//! - **Source**: A chunked source failed to produce a page
//! - **Validation**: Invalid configuration or field specifications
//! - **Io**: Filesystem errors outside of row writes
//! - **Serde**: Serialization/deserialization errors
//! - **Internal**: Unexpected internal failures
//!
//! ## Usage
//!
//! ```rust
//! use zicsv::errors::{Result, ZiError};
//!
//! fn check_chunk(chunk: usize) -> Result<usize> {
//!     if chunk == 0 {
//!         return Err(ZiError::validation("chunk size must be positive"));
//!     }
//!     Ok(chunk)
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Zicsv.
pub type Result<T> = std::result::Result<T, ZiError>;

/// Canonical error enumeration for Zicsv.
#[derive(Debug, Error, Serialize, Deserialize, PartialEq)]
pub enum ZiError {
    /// A row sink rejected the row at `row` (zero-based, header included).
    #[error("sink rejected row {row}: {message}")]
    SinkWrite { row: usize, message: String },

    /// Failure raised from a before-each or before-each-chunk hook.
    #[error("hook error: {0}")]
    Hook(String),

    /// A chunked source could not produce the next page.
    #[error("source error: {message}")]
    Source { message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for ZiError {
    fn from(err: io::Error) -> Self {
        ZiError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ZiError {
    fn from(err: serde_json::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl From<csv::Error> for ZiError {
    fn from(err: csv::Error) -> Self {
        ZiError::Io(format!("csv error: {err}"))
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for ZiError {
    fn from(err: serde_yaml::Error) -> Self {
        ZiError::Serde(err.to_string())
    }
}

impl ZiError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        ZiError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct sink write errors.
    pub fn sink_write(row: usize, message: impl Into<String>) -> Self {
        ZiError::SinkWrite {
            row,
            message: message.into(),
        }
    }

    /// Helper for hooks that need to abort an export.
    pub fn hook<T: Into<String>>(message: T) -> Self {
        ZiError::Hook(message.into())
    }

    /// Helper to construct source errors.
    pub fn source<T: Into<String>>(message: T) -> Self {
        ZiError::Source {
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        ZiError::Internal(message.into())
    }

    /// Returns true when the error came from a sink refusing a row.
    pub fn is_sink_write(&self) -> bool {
        matches!(self, ZiError::SinkWrite { .. })
    }
}
