// Cello Editors - Syntax support for Cello design languages
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the syntax support layer.
//!
//! Syntax errors in a document are never Rust errors: they are reported as
//! [`Diagnostic`](crate::Diagnostic) data. [`SyntaxError`] only covers misuse
//! of the API itself.

use thiserror::Error;

/// Syntax support error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// The language identifier or file extension is not supported.
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// A configuration value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The validation worker has terminated and accepts no more input.
    #[error("Validation worker closed")]
    WorkerClosed,
}

/// Result type for syntax support operations.
pub type SyntaxResult<T> = Result<T, SyntaxError>;

impl From<serde_json::Error> for SyntaxError {
    fn from(err: serde_json::Error) -> Self {
        SyntaxError::InvalidConfig(err.to_string())
    }
}
