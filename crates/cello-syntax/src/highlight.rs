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

//! Classified token stream for syntax highlighting.
//!
//! The adapter never fails: a lexer fault ends the stream with one token of
//! the default class covering the rest of the requested range.

use crate::token_class::TokenClassTable;
use cello_grammar::{TokenKind, TokenSource};
use std::ops::Range;

/// A highlighted slice of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedToken<'a> {
    /// Semantic class (`keyword.control`, `identifier`, ...).
    pub semantic_class: &'static str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Length in bytes.
    pub length: usize,
    /// The covered text.
    pub text: &'a str,
}

impl<'a> ClassifiedToken<'a> {
    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Pulls raw tokens from a lexer and classifies those overlapping a range.
///
/// Tokens straddling the range boundaries are clipped to it. The stream can
/// be replayed from the start with [`restart`](Self::restart).
///
/// ```
/// use cello_grammar::eugene::EugeneLexer;
/// use cello_syntax::{eugene_table, TokenStreamAdapter};
///
/// let text = "A before B";
/// let classes: Vec<&str> = TokenStreamAdapter::new(eugene_table(), EugeneLexer::new(text), 0..text.len())
///     .map(|token| token.semantic_class)
///     .collect();
/// assert_eq!(classes, vec!["identifier", "text", "keyword.control", "text", "identifier"]);
/// ```
pub struct TokenStreamAdapter<'t, 'a, L: TokenSource<'a> + Clone> {
    table: &'t TokenClassTable<L::Kind>,
    initial: L,
    lexer: L,
    source: &'a str,
    range: Range<usize>,
    done: bool,
}

impl<'t, 'a, L: TokenSource<'a> + Clone> TokenStreamAdapter<'t, 'a, L> {
    /// Create an adapter over a freshly constructed lexer.
    ///
    /// `range` is clamped to the source text.
    pub fn new(table: &'t TokenClassTable<L::Kind>, lexer: L, range: Range<usize>) -> Self {
        let source = lexer.source();
        let end = range.end.min(source.len());
        let start = range.start.min(end);
        Self {
            table,
            initial: lexer.clone(),
            lexer,
            source,
            range: start..end,
            done: false,
        }
    }

    /// Rewind to the beginning of the document.
    pub fn restart(&mut self) {
        self.lexer = self.initial.clone();
        self.done = false;
    }

    /// The clamped range this adapter covers.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    fn clipped(&self, class: &'static str, start: usize, end: usize) -> Option<ClassifiedToken<'a>> {
        let start = start.max(self.range.start);
        let end = end.min(self.range.end);
        if start >= end {
            return None;
        }
        let text = self.source.get(start..end)?;
        Some(ClassifiedToken {
            semantic_class: class,
            start,
            length: end - start,
            text,
        })
    }
}

impl<'t, 'a, L: TokenSource<'a> + Clone> Iterator for TokenStreamAdapter<'t, 'a, L> {
    type Item = ClassifiedToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.lexer.next() {
                Some(Ok(token)) => {
                    if token.is_eof() || token.span.start() >= self.range.end {
                        self.done = true;
                        return None;
                    }
                    if token.span.end() <= self.range.start {
                        continue;
                    }
                    let class = self.table.classify(token.kind);
                    if let Some(classified) =
                        self.clipped(class, token.span.start(), token.span.end())
                    {
                        return Some(classified);
                    }
                }
                Some(Err(err)) => {
                    self.done = true;
                    tracing::debug!("highlighting stopped at lexer fault: {}", err);
                    return self.clipped(
                        self.table.default_class(),
                        err.span().start(),
                        self.range.end,
                    );
                }
                None => self.done = true,
            }
        }
        None
    }
}

/// Classify every token of `lexer` over its whole source.
pub fn classify_all<'t, 'a, L>(table: &'t TokenClassTable<L::Kind>, lexer: L) -> Vec<ClassifiedToken<'a>>
where
    L: TokenSource<'a> + Clone,
    L::Kind: TokenKind,
{
    let len = lexer.source().len();
    TokenStreamAdapter::new(table, lexer, 0..len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_class::{classes, eugene_table, stl_table};
    use cello_grammar::eugene::EugeneLexer;
    use cello_grammar::stl::StlLexer;

    #[test]
    fn test_whole_document() {
        let tokens = classify_all(stl_table(), StlLexer::new("G[0,5](x > 3)"));
        assert_eq!(tokens[0].semantic_class, classes::KEYWORD_CONTROL);
        assert_eq!(tokens[0].text, "G");
        let covered: usize = tokens.iter().map(|t| t.length).sum();
        assert_eq!(covered, "G[0,5](x > 3)".len());
    }

    #[test]
    fn test_range_clips_tokens() {
        let text = "CONTAINS pTac";
        let tokens: Vec<_> =
            TokenStreamAdapter::new(eugene_table(), EugeneLexer::new(text), 4..11).collect();
        assert_eq!(tokens[0].text, "AINS");
        assert_eq!(tokens[0].semantic_class, classes::KEYWORD_CONTROL);
        assert_eq!(tokens.last().map(|t| t.text), Some("pT"));
        assert_eq!(tokens.last().map(|t| t.end()), Some(11));
    }

    #[test]
    fn test_lexer_fault_ends_stream_with_default_class() {
        let text = "A $ before B";
        let tokens: Vec<_> =
            TokenStreamAdapter::new(eugene_table(), EugeneLexer::new(text), 0..text.len()).collect();
        let last = tokens.last().copied().unwrap();
        assert_eq!(last.semantic_class, "text");
        assert_eq!(last.start, 2);
        assert_eq!(last.end(), text.len());
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_restart_replays() {
        let text = "A before B";
        let mut adapter = TokenStreamAdapter::new(eugene_table(), EugeneLexer::new(text), 0..text.len());
        let first: Vec<_> = adapter.by_ref().collect();
        adapter.restart();
        let second: Vec<_> = adapter.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_range_out_of_bounds_is_clamped() {
        let text = "A";
        let adapter = TokenStreamAdapter::new(eugene_table(), EugeneLexer::new(text), 5..50);
        assert_eq!(adapter.range(), 1..1);
        assert_eq!(adapter.count(), 0);
    }

    #[test]
    fn test_empty_range() {
        let text = "A before B";
        let adapter = TokenStreamAdapter::new(eugene_table(), EugeneLexer::new(text), 3..3);
        assert_eq!(adapter.count(), 0);
    }
}
