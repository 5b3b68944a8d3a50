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

//! Source positions and byte spans.
//!
//! Positions follow the convention error listeners expect: lines are
//! 1-based, columns are 0-based character offsets within the line.
//!
//! # Examples
//!
//! ```
//! use cello_grammar::{SourcePos, Span};
//!
//! let pos = SourcePos::new(3, 5);
//! assert_eq!(pos.line(), 3);
//! assert_eq!(pos.column(), 5);
//!
//! let span = Span::new(4, 10);
//! assert_eq!(span.len(), 6);
//! assert!(span.contains(4));
//! assert!(!span.contains(10));
//! ```

use std::fmt;

/// A position in source code (line and column).
///
/// Lines start at 1, columns start at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePos {
    line: usize,
    column: usize,
}

impl SourcePos {
    /// Creates a new source position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position of the first character of a document (line 1, column 0).
    #[inline]
    pub const fn start() -> Self {
        Self { line: 1, column: 0 }
    }

    /// Returns the line number (1-based).
    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the column number (0-based).
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Advances the position by one column.
    #[inline]
    pub fn advance_col(&mut self) {
        self.column += 1;
    }

    /// Moves to the start of the next line.
    #[inline]
    pub fn next_line(&mut self) {
        self.line += 1;
        self.column = 0;
    }
}

impl Default for SourcePos {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a new span. `end` is clamped so it never precedes `start`.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        let end = if end < start { start } else { end };
        Self { start, end }
    }

    /// Creates a zero-width span at `offset`.
    #[inline]
    pub const fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Start offset (inclusive).
    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive).
    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for zero-width spans.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `offset` lies inside the span.
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Returns `true` if the two spans share at least one byte.
    #[inline]
    pub const fn overlaps(&self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
