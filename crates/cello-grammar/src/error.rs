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

//! Error types for lexing and parsing.
//!
//! Two families exist:
//!
//! - [`LexError`]: a fault raised by a lexer mid-stream. Parsers turn these
//!   into ordinary syntax error reports; highlighters stop at the first one.
//! - [`GrammarError`]: a fault of the recognizer machinery itself (resource
//!   limits, cancellation). These abort a parse pass.

use crate::span::{SourcePos, Span};
use thiserror::Error;

/// A fault raised while lexing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    /// No lexer rule matches the input at this position.
    #[error("token recognition error at: '{text}'")]
    UnrecognizedInput {
        text: String,
        span: Span,
        pos: SourcePos,
    },

    /// A `/*` comment runs to end of input.
    #[error("token recognition error at: '{text}'")]
    UnterminatedComment {
        text: String,
        span: Span,
        pos: SourcePos,
    },
}

impl LexError {
    /// Position (line and column) where the fault starts.
    #[inline]
    pub fn position(&self) -> SourcePos {
        match self {
            LexError::UnrecognizedInput { pos, .. } | LexError::UnterminatedComment { pos, .. } => {
                *pos
            }
        }
    }

    /// Byte range of the input the lexer skipped.
    #[inline]
    pub fn span(&self) -> Span {
        match self {
            LexError::UnrecognizedInput { span, .. }
            | LexError::UnterminatedComment { span, .. } => *span,
        }
    }
}

/// A fault of the recognizer itself, outside the normal error-listener path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrammarError {
    /// Rule nesting exceeded the configured maximum.
    #[error("{pos}: nesting depth {depth} exceeds maximum {max}")]
    NestingTooDeep {
        depth: usize,
        max: usize,
        pos: SourcePos,
    },

    /// The document produced more tokens than allowed.
    #[error("token count {count} exceeds maximum {max}")]
    TooManyTokens { count: usize, max: usize },

    /// The pass was cancelled through its [`CancelFlag`](crate::CancelFlag).
    #[error("parse cancelled")]
    Cancelled,
}

impl GrammarError {
    /// Returns `true` if this error is a resource limit violation.
    #[inline]
    pub fn is_resource_limit(&self) -> bool {
        matches!(
            self,
            GrammarError::NestingTooDeep { .. } | GrammarError::TooManyTokens { .. }
        )
    }
}

/// Result type for parser entry rules.
pub type GrammarResult<T> = Result<T, GrammarError>;
