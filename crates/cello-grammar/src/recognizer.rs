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

//! Token cursor, error reporting and recovery shared by both parsers.
//!
//! Recovery follows the usual single-token discipline: after a report the
//! recognizer is in recovery mode and stays silent until it matches a token,
//! so one missing operand produces exactly one report instead of a cascade.

use crate::cancel::CancelFlag;
use crate::error::{GrammarError, GrammarResult};
use crate::limits::Limits;
use crate::listener::{ConsoleErrorListener, ErrorListener};
use crate::span::SourcePos;
use crate::token::{Token, TokenKind, TokenStream};

pub(crate) struct Recognizer<'a, 'l, K: TokenKind> {
    tokens: TokenStream<'a, K>,
    index: usize,
    listeners: Vec<Box<dyn ErrorListener + 'l>>,
    error_recovery: bool,
    flushed_lex_errors: usize,
    reported: usize,
    depth: usize,
    limits: Limits,
    cancel: CancelFlag,
}

impl<'a, 'l, K: TokenKind> Recognizer<'a, 'l, K> {
    pub(crate) fn new(tokens: TokenStream<'a, K>) -> Self {
        Self {
            tokens,
            index: 0,
            listeners: vec![Box::new(ConsoleErrorListener) as Box<dyn ErrorListener + 'l>],
            error_recovery: false,
            flushed_lex_errors: 0,
            reported: 0,
            depth: 0,
            limits: Limits::default(),
            cancel: CancelFlag::new(),
        }
    }

    pub(crate) fn add_listener(&mut self, listener: Box<dyn ErrorListener + 'l>) {
        self.listeners.push(listener);
    }

    pub(crate) fn remove_listeners(&mut self) {
        self.listeners.clear();
    }

    pub(crate) fn set_limits(&mut self, limits: Limits) {
        self.limits = limits;
    }

    pub(crate) fn set_cancel_flag(&mut self, cancel: CancelFlag) {
        self.cancel = cancel;
    }

    pub(crate) fn reported(&self) -> usize {
        self.reported
    }

    // ==================== Cursor ====================

    pub(crate) fn current(&self) -> Token<K> {
        self.tokens.get(self.index)
    }

    pub(crate) fn kind(&self) -> K {
        self.current().kind
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn kind_at(&self, index: usize) -> K {
        self.tokens.get(index).kind
    }

    pub(crate) fn at(&self, kind: K) -> bool {
        self.kind() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[K]) -> bool {
        kinds.contains(&self.kind())
    }

    /// Consume the current token without touching recovery state.
    pub(crate) fn consume(&mut self) -> Token<K> {
        let token = self.current();
        if !token.is_eof() {
            self.index += 1;
        }
        token
    }

    /// Consume the current token as a successful match.
    pub(crate) fn matched(&mut self) -> Token<K> {
        self.error_recovery = false;
        self.consume()
    }

    /// Match `kind` or report what was expected instead.
    pub(crate) fn expect(&mut self, kind: K) -> Option<Token<K>> {
        if self.at(kind) {
            Some(self.matched())
        } else {
            self.mismatch(&kind.describe());
            None
        }
    }

    /// Match a closing token, or report it as missing. Never consumes on failure.
    pub(crate) fn expect_closing(&mut self, kind: K) -> Option<Token<K>> {
        if self.at(kind) {
            Some(self.matched())
        } else {
            self.missing(&kind.describe());
            None
        }
    }

    // ==================== Reporting ====================

    /// Report the current token as not fitting here. Does not consume.
    pub(crate) fn mismatch(&mut self, expected: &str) {
        let token = self.current();
        let message = format!(
            "mismatched input {} expecting {}",
            self.render(&token),
            expected
        );
        self.report(&token, &message);
    }

    /// Report that `expected` should have appeared before the current token.
    pub(crate) fn missing(&mut self, expected: &str) {
        let token = self.current();
        let message = format!("missing {} at {}", expected, self.render(&token));
        self.report(&token, &message);
    }

    /// Report the current token as superfluous and skip it.
    pub(crate) fn extraneous(&mut self, expected: &str) {
        let token = self.current();
        let message = format!(
            "extraneous input {} expecting {}",
            self.render(&token),
            expected
        );
        self.report(&token, &message);
        self.consume();
    }

    /// Render a set of alternatives the way error messages list them.
    pub(crate) fn expecting(kinds: &[K]) -> String {
        match kinds {
            [single] => single.describe(),
            _ => {
                let names: Vec<String> = kinds.iter().map(|kind| kind.describe()).collect();
                format!("{{{}}}", names.join(", "))
            }
        }
    }

    fn report(&mut self, token: &Token<K>, message: &str) {
        if self.error_recovery {
            return;
        }
        self.error_recovery = true;
        self.flush_lex_errors_through(token.span.start());
        self.notify(token.pos, message);
    }

    fn notify(&mut self, pos: SourcePos, message: &str) {
        self.reported += 1;
        for listener in &mut self.listeners {
            (**listener).syntax_error(pos.line(), pos.column(), message);
        }
    }

    /// Report lexer faults that start at or before `offset`.
    fn flush_lex_errors_through(&mut self, offset: usize) {
        while let Some(err) = self.tokens.lex_errors().get(self.flushed_lex_errors).cloned() {
            if err.span().start() > offset {
                break;
            }
            self.flushed_lex_errors += 1;
            self.notify(err.position(), &err.to_string());
        }
    }

    /// Report any lexer faults not yet flushed. Called when an entry rule ends.
    pub(crate) fn finish(&mut self) {
        self.flush_lex_errors_through(usize::MAX);
    }

    fn render(&self, token: &Token<K>) -> String {
        if token.is_eof() {
            return "'<EOF>'".to_string();
        }
        let text = self
            .tokens
            .text(token)
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t");
        format!("'{}'", text)
    }

    // ==================== Limits ====================

    /// Called on every rule entry.
    pub(crate) fn enter(&mut self) -> GrammarResult<()> {
        if self.cancel.is_cancelled() {
            return Err(GrammarError::Cancelled);
        }
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(GrammarError::NestingTooDeep {
                depth: self.depth,
                max: self.limits.max_nesting_depth,
                pos: self.current().pos,
            });
        }
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn check_token_budget(&self) -> GrammarResult<()> {
        // EOF does not count against the budget, lexer faults do
        let count = self.tokens.len().saturating_sub(1) + self.tokens.lex_errors().len();
        if count > self.limits.max_tokens {
            return Err(GrammarError::TooManyTokens {
                count,
                max: self.limits.max_tokens,
            });
        }
        Ok(())
    }
}
