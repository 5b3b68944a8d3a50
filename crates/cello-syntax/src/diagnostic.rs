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

//! Diagnostic types.
//!
//! A [`Diagnostic`] is the unit of feedback shown to the user. Its serialized
//! form is the annotation shape browser editing surfaces consume:
//!
//! ```json
//! { "row": 0, "column": 8, "text": "mismatched input '<EOF>' ...", "type": "error" }
//! ```

use crate::constants::{LINE_NUMBER_OFFSET, POSITION_ZERO};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for diagnostics.
///
/// Validation only produces [`Severity::Error`]; the other levels exist for
/// hosts that merge in their own annotations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note
    Info,
    /// Might be an issue
    Warning,
    /// Definitely an issue
    #[default]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A syntax problem at a position in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 0-based line index.
    pub row: usize,
    /// 0-based character offset within the line.
    pub column: usize,
    /// Human-readable message.
    #[serde(rename = "text")]
    pub message: String,
    /// Severity level.
    #[serde(rename = "type", default)]
    pub severity: Severity,
}

impl Diagnostic {
    /// Create an error at an already 0-based row and column.
    pub fn error(row: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            column,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Create an error from a parser report, whose line is 1-based.
    ///
    /// This is the one place the line-to-row conversion happens.
    pub fn from_parser_report(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::error(line.saturating_sub(LINE_NUMBER_OFFSET), column, message)
    }

    /// Create a document-level error at (0, 0).
    pub fn at_document_start(message: impl Into<String>) -> Self {
        Self::error(POSITION_ZERO, POSITION_ZERO, message)
    }

    /// Replace the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// 1-based line number, as shown to users.
    pub fn line(&self) -> usize {
        self.row + LINE_NUMBER_OFFSET
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.line(),
            self.column,
            self.severity,
            self.message
        )
    }
}
