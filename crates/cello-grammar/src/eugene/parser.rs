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

//! Recursive-descent recognizer for the circuit-composition language.
//!
//! ```text
//! document   := (rule separator?)* EOF            separator := ',' | ';' | AND
//! rule       := term (OR term)*
//! term       := NOT? relation | '(' rule ')'
//! relation   := unaryKw operand
//!             | nullaryKw
//!             | operand countKw INT
//!             | operand binaryKw operand
//! operand    := ID | '[' INT ']'
//! ```

use super::token::EugeneToken;
use crate::cancel::CancelFlag;
use crate::error::GrammarResult;
use crate::limits::Limits;
use crate::listener::ErrorListener;
use crate::recognizer::Recognizer;
use crate::token::{TokenKind, TokenStream};

type Rec<'a, 'l> = Recognizer<'a, 'l, EugeneToken>;

/// Parser for Eugene rule documents.
///
/// The parser only recognizes; it reports syntax errors to its listeners and
/// builds no tree.
///
/// ```
/// use cello_grammar::eugene::{EugeneLexer, EugeneParser};
/// use cello_grammar::TokenStream;
///
/// let mut parser = EugeneParser::new(TokenStream::new(EugeneLexer::new("A before B")));
/// parser.remove_error_listeners();
/// parser.document().unwrap();
/// assert_eq!(parser.syntax_error_count(), 0);
/// ```
pub struct EugeneParser<'a, 'l> {
    rec: Rec<'a, 'l>,
}

impl<'a, 'l> EugeneParser<'a, 'l> {
    /// Create a parser over `tokens` with the console listener attached.
    pub fn new(tokens: TokenStream<'a, EugeneToken>) -> Self {
        Self {
            rec: Recognizer::new(tokens),
        }
    }

    /// Register an additional error listener.
    pub fn add_error_listener(&mut self, listener: impl ErrorListener + 'l) {
        self.rec.add_listener(Box::new(listener));
    }

    /// Detach every listener, including the default console one.
    pub fn remove_error_listeners(&mut self) {
        self.rec.remove_listeners();
    }

    /// Replace the resource limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.rec.set_limits(limits);
        self
    }

    /// Abort with [`GrammarError::Cancelled`](crate::GrammarError::Cancelled)
    /// once `cancel` is raised.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.rec.set_cancel_flag(cancel);
        self
    }

    /// Number of errors reported so far, lexer faults included.
    pub fn syntax_error_count(&self) -> usize {
        self.rec.reported()
    }

    /// Entry rule: parse a full document.
    pub fn document(&mut self) -> GrammarResult<()> {
        let rec = &mut self.rec;
        rec.check_token_budget()?;
        rec.enter()?;

        while !rec.at(EugeneToken::Eof) {
            if starts_term(rec.kind()) {
                rule(rec)?;
                if rec.at_any(&[EugeneToken::Comma, EugeneToken::Semi, EugeneToken::And]) {
                    rec.matched();
                }
            } else {
                rec.extraneous(&term_start_set());
            }
        }
        rec.expect(EugeneToken::Eof);

        rec.exit();
        rec.finish();
        Ok(())
    }
}

fn starts_term(kind: EugeneToken) -> bool {
    matches!(
        kind,
        EugeneToken::Not | EugeneToken::LParen | EugeneToken::Id | EugeneToken::LBracket
    ) || kind.is_unary_relation()
        || kind.is_nullary_relation()
}

fn term_start_set() -> String {
    let kinds: Vec<EugeneToken> = EugeneToken::ALL
        .iter()
        .copied()
        .filter(|kind| starts_term(*kind))
        .collect();
    Rec::expecting(&kinds)
}

fn relation_keyword_set() -> String {
    let kinds: Vec<EugeneToken> = EugeneToken::ALL
        .iter()
        .copied()
        .filter(|kind| kind.is_count_relation() || kind.is_binary_relation())
        .collect();
    Rec::expecting(&kinds)
}

fn rule(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    term(rec)?;
    while rec.at(EugeneToken::Or) {
        rec.matched();
        term(rec)?;
    }
    rec.exit();
    Ok(())
}

fn term(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    if rec.at(EugeneToken::LParen) {
        rec.matched();
        rule(rec)?;
        rec.expect_closing(EugeneToken::RParen);
    } else {
        if rec.at(EugeneToken::Not) {
            rec.matched();
        }
        relation(rec)?;
    }
    rec.exit();
    Ok(())
}

fn relation(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    let kind = rec.kind();
    if kind.is_unary_relation() {
        rec.matched();
        operand(rec)?;
    } else if kind.is_nullary_relation() {
        rec.matched();
    } else if matches!(kind, EugeneToken::Id | EugeneToken::LBracket) {
        operand(rec)?;
        let keyword = rec.kind();
        if keyword.is_count_relation() {
            rec.matched();
            rec.expect(EugeneToken::Int);
        } else if keyword.is_binary_relation() {
            rec.matched();
            operand(rec)?;
        } else {
            rec.mismatch(&relation_keyword_set());
        }
    } else {
        rec.mismatch(&term_start_set());
    }
    rec.exit();
    Ok(())
}

fn operand(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    match rec.kind() {
        EugeneToken::Id => {
            rec.matched();
        }
        EugeneToken::LBracket => {
            rec.matched();
            rec.expect(EugeneToken::Int);
            rec.expect_closing(EugeneToken::RBracket);
        }
        _ => rec.mismatch(&Rec::expecting(&[EugeneToken::Id, EugeneToken::LBracket])),
    }
    rec.exit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eugene::EugeneLexer;

    #[derive(Default)]
    struct Recording(Vec<(usize, usize, String)>);

    impl ErrorListener for Recording {
        fn syntax_error(&mut self, line: usize, column: usize, message: &str) {
            self.0.push((line, column, message.to_string()));
        }
    }

    fn errors(source: &str) -> Vec<(usize, usize, String)> {
        let mut recording = Recording::default();
        {
            let mut parser = EugeneParser::new(TokenStream::new(EugeneLexer::new(source)));
            parser.remove_error_listeners();
            parser.add_error_listener(&mut recording);
            parser.document().unwrap();
        }
        recording.0
    }

    #[test]
    fn test_valid_relations() {
        assert!(errors("A before B").is_empty());
        assert!(errors("CONTAINS pTac").is_empty());
        assert!(errors("ALL_FORWARD").is_empty());
        assert!(errors("gfp EXACTLY 2").is_empty());
        assert!(errors("[0] nextto [1]").is_empty());
    }

    #[test]
    fn test_missing_operand_reports_once() {
        let errs = errors("A before");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].0, 1);
        assert_eq!(errs[0].1, 8);
        assert_eq!(errs[0].2, "mismatched input '<EOF>' expecting {ID, '['}");
    }

    #[test]
    fn test_missing_closing_paren() {
        let errs = errors("(A before B");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].2, "missing ')' at '<EOF>'");
    }

    #[test]
    fn test_stray_token_is_extraneous() {
        let errs = errors(") A before B");
        assert_eq!(errs.len(), 1);
        assert!(errs[0].2.starts_with("extraneous input ')' expecting {"));
    }

    #[test]
    fn test_count_relation_needs_int() {
        let errs = errors("gfp EXACTLY 2.5");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].2, "mismatched input '2.5' expecting INT");
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!("{}A before B{}", "(".repeat(50), ")".repeat(50));
        let mut parser = EugeneParser::new(TokenStream::new(EugeneLexer::new(&source)))
            .with_limits(Limits {
                max_nesting_depth: 10,
                ..Limits::default()
            });
        parser.remove_error_listeners();
        let err = parser.document().unwrap_err();
        assert!(err.is_resource_limit());
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let mut parser =
            EugeneParser::new(TokenStream::new(EugeneLexer::new("A before B"))).with_cancel_flag(cancel);
        parser.remove_error_listeners();
        assert_eq!(parser.document(), Err(crate::GrammarError::Cancelled));
    }
}
