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

//! Recursive-descent recognizer for signal temporal logic properties.
//!
//! # Grammar
//!
//! ```text
//! property     := implication EOF
//! implication  := disjunction ('=>' disjunction)*
//! disjunction  := conjunction ('||' conjunction)*
//! conjunction  := until ('&&' until)*
//! until        := unary ('U' interval unary)*
//! unary        := '!' unary | ('G'|'F') interval unary | '(' implication ')'
//!               | BOOLEAN | predicate
//! predicate    := expr ('<'|'<='|'>'|'>='|'=') expr
//! interval     := '[' expr ',' expr ']'
//! expr         := term (('+'|'-') term)*
//! term         := factor (('*'|'/') factor)*
//! factor       := '-' factor | atom ('^' factor)?
//! atom         := RATIONAL | VARIABLE | fn expr ')'
//!               | ('max'|'min') '(' expr ',' expr ')' | '(' expr ')'
//! ```
//!
//! # Parenthesis lookahead
//!
//! A `(` where a property may start is ambiguous: `(x > 3)` is a
//! parenthesized property, `(x + 1) > 3` a parenthesized expression. The
//! parser finds the matching `)` and looks at the token after it. A
//! relational or arithmetic operator there means an expression.

use super::token::StlToken;
use crate::cancel::CancelFlag;
use crate::error::GrammarResult;
use crate::limits::Limits;
use crate::listener::ErrorListener;
use crate::recognizer::Recognizer;
use crate::token::{TokenKind, TokenStream};

type Rec<'a, 'l> = Recognizer<'a, 'l, StlToken>;

const RELATIONAL: &[StlToken] = &[
    StlToken::Lt,
    StlToken::Le,
    StlToken::Gt,
    StlToken::Ge,
    StlToken::Eq,
];

const ATOM_START: &[StlToken] = &[
    StlToken::Rational,
    StlToken::Variable,
    StlToken::Sqrt,
    StlToken::Log,
    StlToken::Ln,
    StlToken::Abs,
    StlToken::Der,
    StlToken::Integral,
    StlToken::Max,
    StlToken::Min,
    StlToken::LParen,
];

const PROPERTY_START: &[StlToken] = &[
    StlToken::Bang,
    StlToken::Globally,
    StlToken::Finally,
    StlToken::LParen,
    StlToken::Boolean,
    StlToken::Minus,
    StlToken::Rational,
    StlToken::Variable,
    StlToken::Sqrt,
    StlToken::Log,
    StlToken::Ln,
    StlToken::Abs,
    StlToken::Der,
    StlToken::Integral,
    StlToken::Max,
    StlToken::Min,
];

/// Parser for STL properties.
///
/// ```
/// use cello_grammar::stl::{StlLexer, StlParser};
/// use cello_grammar::TokenStream;
///
/// let mut parser = StlParser::new(TokenStream::new(StlLexer::new("G[0,5](x > 3)")));
/// parser.remove_error_listeners();
/// parser.property().unwrap();
/// assert_eq!(parser.syntax_error_count(), 0);
/// ```
pub struct StlParser<'a, 'l> {
    rec: Rec<'a, 'l>,
}

impl<'a, 'l> StlParser<'a, 'l> {
    /// Create a parser over `tokens` with the console listener attached.
    pub fn new(tokens: TokenStream<'a, StlToken>) -> Self {
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

    /// Entry rule: parse one property followed by end of input.
    pub fn property(&mut self) -> GrammarResult<()> {
        let rec = &mut self.rec;
        rec.check_token_budget()?;
        rec.enter()?;

        implication(rec)?;
        while !rec.at(StlToken::Eof) {
            rec.extraneous(&StlToken::Eof.describe());
        }
        rec.expect(StlToken::Eof);

        rec.exit();
        rec.finish();
        Ok(())
    }
}

fn implication(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    disjunction(rec)?;
    while rec.at(StlToken::Implies) {
        rec.matched();
        disjunction(rec)?;
    }
    rec.exit();
    Ok(())
}

fn disjunction(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    conjunction(rec)?;
    while rec.at(StlToken::OrOr) {
        rec.matched();
        conjunction(rec)?;
    }
    rec.exit();
    Ok(())
}

fn conjunction(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    until(rec)?;
    while rec.at(StlToken::AndAnd) {
        rec.matched();
        until(rec)?;
    }
    rec.exit();
    Ok(())
}

fn until(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    unary(rec)?;
    while rec.at(StlToken::Until) {
        rec.matched();
        interval(rec)?;
        unary(rec)?;
    }
    rec.exit();
    Ok(())
}

fn unary(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    match rec.kind() {
        StlToken::Bang => {
            rec.matched();
            unary(rec)?;
        }
        StlToken::Globally | StlToken::Finally => {
            rec.matched();
            interval(rec)?;
            unary(rec)?;
        }
        StlToken::LParen if !paren_opens_expression(rec) => {
            rec.matched();
            implication(rec)?;
            rec.expect_closing(StlToken::RParen);
        }
        StlToken::Boolean => {
            rec.matched();
        }
        kind if kind == StlToken::Minus || ATOM_START.contains(&kind) => {
            predicate(rec)?;
        }
        _ => rec.mismatch(&Rec::expecting(PROPERTY_START)),
    }
    rec.exit();
    Ok(())
}

/// Decide whether the `(` at the cursor opens an arithmetic expression.
fn paren_opens_expression(rec: &Rec<'_, '_>) -> bool {
    let mut depth = 0usize;
    let mut index = rec.index();
    loop {
        let kind = rec.kind_at(index);
        if kind == StlToken::Eof {
            return false;
        }
        if kind == StlToken::LParen || kind.is_function() {
            depth += 1;
        } else if kind == StlToken::RParen {
            depth -= 1;
            if depth == 0 {
                let after = rec.kind_at(index + 1);
                return after.is_relational() || after.is_arithmetic();
            }
        }
        index += 1;
    }
}

fn predicate(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    expr(rec)?;
    if rec.at_any(RELATIONAL) {
        rec.matched();
        expr(rec)?;
    } else {
        rec.mismatch(&Rec::expecting(RELATIONAL));
    }
    rec.exit();
    Ok(())
}

fn interval(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    rec.expect(StlToken::LBracket);
    expr(rec)?;
    rec.expect(StlToken::Comma);
    expr(rec)?;
    rec.expect_closing(StlToken::RBracket);
    rec.exit();
    Ok(())
}

fn expr(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    term(rec)?;
    while rec.at_any(&[StlToken::Plus, StlToken::Minus]) {
        rec.matched();
        term(rec)?;
    }
    rec.exit();
    Ok(())
}

fn term(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    factor(rec)?;
    while rec.at_any(&[StlToken::Star, StlToken::Slash]) {
        rec.matched();
        factor(rec)?;
    }
    rec.exit();
    Ok(())
}

fn factor(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    if rec.at(StlToken::Minus) {
        rec.matched();
        factor(rec)?;
    } else {
        atom(rec)?;
        if rec.at(StlToken::Caret) {
            rec.matched();
            factor(rec)?;
        }
    }
    rec.exit();
    Ok(())
}

fn atom(rec: &mut Rec<'_, '_>) -> GrammarResult<()> {
    rec.enter()?;
    let kind = rec.kind();
    match kind {
        StlToken::Rational | StlToken::Variable => {
            rec.matched();
        }
        _ if kind.is_function() => {
            rec.matched();
            expr(rec)?;
            rec.expect_closing(StlToken::RParen);
        }
        StlToken::Max | StlToken::Min => {
            rec.matched();
            rec.expect(StlToken::LParen);
            expr(rec)?;
            rec.expect(StlToken::Comma);
            expr(rec)?;
            rec.expect_closing(StlToken::RParen);
        }
        StlToken::LParen => {
            rec.matched();
            expr(rec)?;
            rec.expect_closing(StlToken::RParen);
        }
        _ => rec.mismatch(&Rec::expecting(ATOM_START)),
    }
    rec.exit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stl::StlLexer;

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
            let mut parser = StlParser::new(TokenStream::new(StlLexer::new(source)));
            parser.remove_error_listeners();
            parser.add_error_listener(&mut recording);
            parser.property().unwrap();
        }
        recording.0
    }

    #[test]
    fn test_valid_properties() {
        for source in [
            "G[0,5](x > 3)",
            "F[0, 10] gfp >= 2.5e3",
            "(x + 1) * 2 > y",
            "!(a < b) => G[1,2](c = 0)",
            "(x > 1) U[0, 3] (y < 2)",
            "sqrt(x) + abs(-y) <= max(a, b) ^ 2",
            "true && false || true",
            "((x > 1))",
        ] {
            assert!(errors(source).is_empty(), "unexpected errors for {:?}", source);
        }
    }

    #[test]
    fn test_missing_right_operand() {
        let errs = errors("G[0,5](x >)");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].0, 1);
        assert_eq!(errs[0].1, 10);
        assert!(errs[0].2.starts_with("mismatched input ')' expecting {"));
    }

    #[test]
    fn test_missing_relation() {
        let errs = errors("x");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].2, "mismatched input '<EOF>' expecting {'<', '<=', '>', '>=', '='}");
    }

    #[test]
    fn test_trailing_garbage_reported_once() {
        let errs = errors("x > 3 y z");
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].2, "extraneous input 'y' expecting <EOF>");
    }

    #[test]
    fn test_lexer_fault_reported_in_order() {
        let errs = errors("x > 3 & y > 2");
        assert_eq!(errs[0].2, "token recognition error at: '&'");
        assert_eq!(errs[0].1, 6);
    }

    #[test]
    fn test_empty_input() {
        let errs = errors("");
        assert_eq!(errs.len(), 1);
        assert!(errs[0].2.starts_with("mismatched input '<EOF>'"));
    }
}
