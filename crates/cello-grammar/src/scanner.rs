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

//! Character cursor shared by both lexers.

use crate::error::LexError;
use crate::span::{SourcePos, Span};
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    source: &'a str,
    offset: usize,
    pos: SourcePos,
}

/// Where the token being scanned started.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mark {
    offset: usize,
    pos: SourcePos,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            pos: SourcePos::start(),
        }
    }

    pub(crate) fn source(&self) -> &'a str {
        self.source
    }

    pub(crate) fn mark(&self) -> Mark {
        Mark {
            offset: self.offset,
            pos: self.pos,
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.pos.next_line();
        } else {
            self.pos.advance_col();
        }
        Some(ch)
    }

    pub(crate) fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.bump().is_none() {
                break;
            }
        }
    }

    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.bump();
        }
    }

    /// Text scanned since `mark`.
    pub(crate) fn text_since(&self, mark: Mark) -> &'a str {
        &self.source[mark.offset..self.offset]
    }

    pub(crate) fn token<K: TokenKind>(&self, kind: K, mark: Mark) -> Token<K> {
        Token::new(kind, Span::new(mark.offset, self.offset), mark.pos)
    }

    pub(crate) fn unrecognized(&self, mark: Mark) -> LexError {
        LexError::UnrecognizedInput {
            text: self.text_since(mark).to_string(),
            span: Span::new(mark.offset, self.offset),
            pos: mark.pos,
        }
    }

    pub(crate) fn unterminated_comment(&self, mark: Mark) -> LexError {
        LexError::UnterminatedComment {
            text: self.text_since(mark).to_string(),
            span: Span::new(mark.offset, self.offset),
            pos: mark.pos,
        }
    }

    /// Consume a `/* ... */` comment starting at the cursor.
    ///
    /// Returns `false` if the comment is unterminated; the cursor is then at
    /// end of input.
    pub(crate) fn block_comment(&mut self) -> bool {
        self.bump_n(2);
        loop {
            if self.starts_with("*/") {
                self.bump_n(2);
                return true;
            }
            if self.bump().is_none() {
                return false;
            }
        }
    }

    /// Consume a number: digits, optional fraction, optional exponent.
    ///
    /// Returns `true` if a fraction or exponent was present.
    pub(crate) fn number(&mut self, allow_exponent: bool) -> bool {
        let mut real = false;
        self.eat_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            real = true;
            self.bump();
            self.eat_while(|c| c.is_ascii_digit());
        }
        if allow_exponent && matches!(self.peek(), Some('e' | 'E')) {
            let rest = &self.rest()[1..];
            let digits = rest.strip_prefix(['+', '-']).unwrap_or(rest);
            if digits.starts_with(|c: char| c.is_ascii_digit()) {
                real = true;
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                self.eat_while(|c| c.is_ascii_digit());
            }
        }
        real
    }
}

pub(crate) fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub(crate) fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
