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

//! Lexer for the signal temporal logic property language.

use super::token::StlToken;
use crate::error::LexError;
use crate::scanner::{is_ident_continue, Scanner};
use crate::token::{Token, TokenSource};

/// Pull-based lexer over an STL property.
///
/// Function names such as `sqrt` become function tokens only when the
/// opening parenthesis follows immediately; otherwise they are variables.
#[derive(Debug, Clone)]
pub struct StlLexer<'a> {
    scanner: Scanner<'a>,
    done: bool,
}

impl<'a> StlLexer<'a> {
    /// Create a lexer positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
            done: false,
        }
    }
}

impl<'a> Iterator for StlLexer<'a> {
    type Item = Result<Token<StlToken>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let s = &mut self.scanner;
        let mark = s.mark();

        let Some(ch) = s.peek() else {
            self.done = true;
            return Some(Ok(s.token(StlToken::Eof, mark)));
        };

        let kind = match ch {
            c if c.is_whitespace() => {
                s.eat_while(char::is_whitespace);
                StlToken::Ws
            }
            '/' if s.peek_second() == Some('/') => {
                s.eat_while(|c| c != '\n');
                StlToken::SlComment
            }
            c if c.is_ascii_alphabetic() => {
                s.eat_while(is_ident_continue);
                let word = s.text_since(mark);
                match StlToken::function(word) {
                    Some(function) if s.peek() == Some('(') => {
                        s.bump();
                        function
                    }
                    _ => StlToken::word(word),
                }
            }
            c if c.is_ascii_digit() => {
                s.number(true);
                StlToken::Rational
            }
            _ => {
                let two: String = s.rest().chars().take(2).collect();
                if let Some(op) = StlToken::operator(&two).filter(|_| two.chars().count() == 2) {
                    s.bump_n(2);
                    op
                } else if let Some(op) = StlToken::operator(&ch.to_string()) {
                    s.bump();
                    op
                } else {
                    s.bump();
                    return Some(Err(s.unrecognized(mark)));
                }
            }
        };

        Some(Ok(s.token(kind, mark)))
    }
}

impl<'a> TokenSource<'a> for StlLexer<'a> {
    type Kind = StlToken;

    fn source(&self) -> &'a str {
        self.scanner.source()
    }
}
