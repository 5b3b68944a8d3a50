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

//! Error listener capability.
//!
//! Parsers never raise on a syntax error. They report each one, in document
//! order, to every registered [`ErrorListener`] and carry on.

/// Receives syntax errors detected during a parse pass.
pub trait ErrorListener {
    /// Called once per detected syntax error.
    ///
    /// `line` is 1-based, `column` is the 0-based character offset within
    /// that line.
    fn syntax_error(&mut self, line: usize, column: usize, message: &str);
}

impl<T: ErrorListener + ?Sized> ErrorListener for &mut T {
    fn syntax_error(&mut self, line: usize, column: usize, message: &str) {
        (**self).syntax_error(line, column, message);
    }
}

/// The listener every parser starts with: forwards reports to the log.
///
/// Callers that collect errors themselves remove it with
/// `remove_error_listeners` before attaching their own sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleErrorListener;

impl ErrorListener for ConsoleErrorListener {
    fn syntax_error(&mut self, line: usize, column: usize, message: &str) {
        tracing::warn!("line {}:{} {}", line, column, message);
    }
}
