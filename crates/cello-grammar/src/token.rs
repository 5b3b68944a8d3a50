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

//! Tokens, token kinds and the buffered token stream parsers consume.

use crate::error::{GrammarError, GrammarResult, LexError};
use crate::limits::Limits;
use crate::span::{SourcePos, Span};
use std::fmt;
use std::hash::Hash;

/// The closed set of raw token kinds a language's lexer can emit.
///
/// Kinds are named the way grammar tooling names them: tokens defined by a
/// fixed spelling have a [`literal`](Self::literal) (`'before'`, `'&&'`),
/// the rest have a [`symbolic_name`](Self::symbolic_name) (`ID`, `RATIONAL`).
pub trait TokenKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every kind the lexer can emit, including hidden kinds and `EOF`.
    const ALL: &'static [Self];

    /// The end-of-input marker.
    const EOF: Self;

    /// Fixed spelling of the token, if it has one.
    fn literal(self) -> Option<&'static str>;

    /// Symbolic name for tokens without a fixed spelling.
    fn symbolic_name(self) -> Option<&'static str>;

    /// Hidden tokens (whitespace, comments) are highlighted but never parsed.
    fn is_hidden(self) -> bool;

    /// Returns `true` if `text` spells this token.
    fn matches_literal(self, text: &str) -> bool {
        self.literal() == Some(text)
    }

    /// Resolves a literal spelling to its kind.
    fn from_literal(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.matches_literal(text))
    }

    /// Resolves a symbolic name to its kind.
    fn from_symbolic_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.symbolic_name() == Some(name))
    }

    /// Human-readable form used in error messages.
    fn describe(self) -> String {
        if self == Self::EOF {
            return "<EOF>".to_string();
        }
        match (self.literal(), self.symbolic_name()) {
            (Some(literal), _) => format!("'{}'", literal),
            (None, Some(name)) => name.to_string(),
            (None, None) => format!("{:?}", self),
        }
    }
}

/// A lexed token. The text is recovered from the source through `span`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<K> {
    /// Raw kind.
    pub kind: K,
    /// Byte range in the source.
    pub span: Span,
    /// Line and column of the first character.
    pub pos: SourcePos,
}

impl<K: TokenKind> Token<K> {
    /// Create a new token.
    pub fn new(kind: K, span: Span, pos: SourcePos) -> Self {
        Self { kind, span, pos }
    }

    /// The token's text within `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.start()..self.span.end()).unwrap_or("")
    }

    /// Returns `true` for the end-of-input marker.
    pub fn is_eof(&self) -> bool {
        self.kind == K::EOF
    }
}

/// A lexer: a pull-based sequence of tokens over one source text.
///
/// Lexers yield `Err` for input no rule matches and then resume after the
/// offending input, so consumers may choose to keep pulling or to stop.
/// The last item is always an `EOF` token.
pub trait TokenSource<'a>: Iterator<Item = Result<Token<Self::Kind>, LexError>> {
    /// Token kinds of this language.
    type Kind: TokenKind;

    /// The full text being lexed.
    fn source(&self) -> &'a str;
}

/// The buffered, parser-facing view of a lexer's output.
///
/// Hidden tokens are dropped and lexer faults are set aside so the parser can
/// report them through its listeners in document order.
#[derive(Debug, Clone)]
pub struct TokenStream<'a, K: TokenKind> {
    source: &'a str,
    tokens: Vec<Token<K>>,
    lex_errors: Vec<LexError>,
}

impl<'a, K: TokenKind> TokenStream<'a, K> {
    /// Drain `lexer` into a token stream without a token budget.
    pub fn new<L>(lexer: L) -> Self
    where
        L: TokenSource<'a, Kind = K>,
    {
        let source = lexer.source();
        let mut tokens = Vec::new();
        let mut lex_errors = Vec::new();

        for item in lexer {
            match item {
                Ok(token) if token.kind.is_hidden() => {}
                Ok(token) => tokens.push(token),
                Err(err) => lex_errors.push(err),
            }
        }

        Self::finish(source, tokens, lex_errors)
    }

    /// Drain `lexer` into a token stream, stopping once the visible tokens
    /// and lexer faults seen so far exceed `limits.max_tokens`.
    ///
    /// `EOF` does not count against the budget.
    pub fn with_limits<L>(lexer: L, limits: &Limits) -> GrammarResult<Self>
    where
        L: TokenSource<'a, Kind = K>,
    {
        let source = lexer.source();
        let mut tokens = Vec::new();
        let mut lex_errors = Vec::new();
        let mut count: usize = 0;

        for item in lexer {
            match item {
                Ok(token) if token.kind.is_hidden() => continue,
                Ok(token) if token.is_eof() => {
                    tokens.push(token);
                    continue;
                }
                Ok(token) => tokens.push(token),
                Err(err) => lex_errors.push(err),
            }
            count += 1;
            if count > limits.max_tokens {
                return Err(GrammarError::TooManyTokens {
                    count,
                    max: limits.max_tokens,
                });
            }
        }

        Ok(Self::finish(source, tokens, lex_errors))
    }

    fn finish(source: &'a str, mut tokens: Vec<Token<K>>, lex_errors: Vec<LexError>) -> Self {
        if tokens.last().map_or(true, |token| !token.is_eof()) {
            let end = source.len();
            tokens.push(Token::new(K::EOF, Span::point(end), end_position(source)));
        }

        Self {
            source,
            tokens,
            lex_errors,
        }
    }

    /// The source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// All visible tokens, ending with `EOF`.
    pub fn tokens(&self) -> &[Token<K>] {
        &self.tokens
    }

    /// Lexer faults encountered while filling the stream.
    pub fn lex_errors(&self) -> &[LexError] {
        &self.lex_errors
    }

    /// Number of visible tokens, including `EOF`.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A stream always holds at least the `EOF` token.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at `index`, or the trailing `EOF` when out of range.
    pub fn get(&self, index: usize) -> Token<K> {
        let last = self.tokens.len() - 1;
        self.tokens[index.min(last)]
    }

    /// The text of `token`.
    pub fn text(&self, token: &Token<K>) -> &'a str {
        token.text(self.source)
    }
}

/// Line and column just past the last character of `source`.
pub(crate) fn end_position(source: &str) -> SourcePos {
    let mut pos = SourcePos::start();
    for ch in source.chars() {
        if ch == '\n' {
            pos.next_line();
        } else {
            pos.advance_col();
        }
    }
    pos
}
