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

//! Lexer for the circuit-composition language.

use super::token::EugeneToken;
use crate::error::LexError;
use crate::scanner::{is_ident_continue, is_ident_start, Scanner};
use crate::token::{Token, TokenSource};

/// Pull-based lexer over an Eugene document.
///
/// ```
/// use cello_grammar::eugene::{EugeneLexer, EugeneToken};
/// use cello_grammar::TokenKind;
///
/// let kinds: Vec<EugeneToken> = EugeneLexer::new("A before B")
///     .filter_map(Result::ok)
///     .map(|t| t.kind)
///     .filter(|k| !k.is_hidden())
///     .collect();
/// assert_eq!(
///     kinds,
///     vec![EugeneToken::Id, EugeneToken::Before, EugeneToken::Id, EugeneToken::Eof]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct EugeneLexer<'a> {
    scanner: Scanner<'a>,
    done: bool,
}

impl<'a> EugeneLexer<'a> {
    /// Create a lexer positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
            done: false,
        }
    }
}

impl<'a> Iterator for EugeneLexer<'a> {
    type Item = Result<Token<EugeneToken>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let s = &mut self.scanner;
        let mark = s.mark();

        let Some(ch) = s.peek() else {
            self.done = true;
            return Some(Ok(s.token(EugeneToken::Eof, mark)));
        };

        let kind = match ch {
            c if c.is_whitespace() => {
                s.eat_while(char::is_whitespace);
                EugeneToken::Ws
            }
            '/' if s.peek_second() == Some('/') => {
                s.eat_while(|c| c != '\n');
                EugeneToken::SlComment
            }
            '/' if s.peek_second() == Some('*') => {
                if !s.block_comment() {
                    return Some(Err(s.unterminated_comment(mark)));
                }
                EugeneToken::MlComment
            }
            c if is_ident_start(c) => {
                s.eat_while(is_ident_continue);
                EugeneToken::keyword(s.text_since(mark)).unwrap_or(EugeneToken::Id)
            }
            c if c.is_ascii_digit() => {
                if s.number(false) {
                    EugeneToken::Real
                } else {
                    EugeneToken::Int
                }
            }
            '(' | ')' | '[' | ']' | ',' | ';' => {
                s.bump();
                match ch {
                    '(' => EugeneToken::LParen,
                    ')' => EugeneToken::RParen,
                    '[' => EugeneToken::LBracket,
                    ']' => EugeneToken::RBracket,
                    ',' => EugeneToken::Comma,
                    _ => EugeneToken::Semi,
                }
            }
            _ => {
                s.bump();
                return Some(Err(s.unrecognized(mark)));
            }
        };

        Some(Ok(s.token(kind, mark)))
    }
}

impl<'a> TokenSource<'a> for EugeneLexer<'a> {
    type Kind = EugeneToken;

    fn source(&self) -> &'a str {
        self.scanner.source()
    }
}
