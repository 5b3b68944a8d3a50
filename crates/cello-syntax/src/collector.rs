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

//! Error sink that turns parser reports into diagnostics.

use crate::diagnostic::Diagnostic;
use cello_grammar::ErrorListener;

/// Accumulates one [`Diagnostic`] per syntax error, in report order.
///
/// Reports are never deduplicated: two errors at the same position stay two
/// entries.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one syntax error reported at a 1-based line.
    pub fn on_syntax_error(&mut self, line: usize, column: usize, message: &str) {
        self.diagnostics
            .push(Diagnostic::from_parser_report(line, column, message));
    }

    /// Diagnostics in the order they were reported.
    pub fn collected(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consume the collector.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl ErrorListener for DiagnosticCollector {
    fn syntax_error(&mut self, line: usize, column: usize, message: &str) {
        self.on_syntax_error(line, column, message);
    }
}
