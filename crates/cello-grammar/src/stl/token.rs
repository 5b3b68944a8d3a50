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

//! Raw token kinds of the signal temporal logic property language.

use crate::token::TokenKind;

/// Every token the STL lexer can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StlToken {
    // Temporal operators
    Globally,
    Finally,
    Until,
    // Logical operators
    Implies,
    AndAnd,
    OrOr,
    Bang,
    // Arithmetic operators
    Caret,
    Star,
    Slash,
    Plus,
    Minus,
    // Relational operators
    Le,
    Lt,
    Ge,
    Gt,
    Eq,
    // Other operators
    Hash,
    At,
    Underscore,
    ShiftLeft,
    ShiftRight,
    // Brackets
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    // Punctuation
    Comma,
    Semi,
    Dot,
    Colon,
    // Functions, lexed together with their opening parenthesis
    Sqrt,
    Log,
    Ln,
    Abs,
    Der,
    Integral,
    Max,
    Min,
    // Symbols
    Boolean,
    Variable,
    Rational,
    SlComment,
    Ws,
    Eof,
}

use StlToken::*;

const LITERALS: &[(StlToken, &str)] = &[
    (Globally, "G"),
    (Finally, "F"),
    (Until, "U"),
    (Implies, "=>"),
    (AndAnd, "&&"),
    (OrOr, "||"),
    (Bang, "!"),
    (Caret, "^"),
    (Star, "*"),
    (Slash, "/"),
    (Plus, "+"),
    (Minus, "-"),
    (Le, "<="),
    (Lt, "<"),
    (Ge, ">="),
    (Gt, ">"),
    (Eq, "="),
    (Hash, "#"),
    (At, "@"),
    (Underscore, "_"),
    (ShiftLeft, "<<"),
    (ShiftRight, ">>"),
    (LParen, "("),
    (RParen, ")"),
    (LBrace, "{"),
    (RBrace, "}"),
    (LBracket, "["),
    (RBracket, "]"),
    (Comma, ","),
    (Semi, ";"),
    (Dot, "."),
    (Colon, ":"),
    (Sqrt, "sqrt("),
    (Log, "log("),
    (Ln, "ln("),
    (Abs, "abs("),
    (Der, "der("),
    (Integral, "int("),
    (Max, "max"),
    (Min, "min"),
];

impl StlToken {
    /// Resolve an operator or punctuation spelling, longest first.
    pub(crate) fn operator(text: &str) -> Option<Self> {
        LITERALS
            .iter()
            .find(|(kind, spelling)| *spelling == text && !kind.is_word())
            .map(|(kind, _)| *kind)
    }

    /// Resolve an identifier-like word: `G`, `max`, `true`, or a variable.
    pub(crate) fn word(text: &str) -> Self {
        match text {
            "G" => Globally,
            "F" => Finally,
            "U" => Until,
            "max" => Max,
            "min" => Min,
            "true" | "false" => Boolean,
            _ => Variable,
        }
    }

    /// Resolve a function name that is immediately followed by `(`.
    pub(crate) fn function(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(Sqrt),
            "log" => Some(Log),
            "ln" => Some(Ln),
            "abs" => Some(Abs),
            "der" => Some(Der),
            "int" => Some(Integral),
            _ => None,
        }
    }

    fn is_word(self) -> bool {
        matches!(
            self,
            Globally | Finally | Until | Sqrt | Log | Ln | Abs | Der | Integral | Max | Min
        )
    }

    /// `<`, `<=`, `>`, `>=` and `=`.
    pub fn is_relational(self) -> bool {
        matches!(self, Lt | Le | Gt | Ge | Eq)
    }

    /// `+`, `-`, `*`, `/` and `^`.
    pub fn is_arithmetic(self) -> bool {
        matches!(self, Plus | Minus | Star | Slash | Caret)
    }

    /// Function tokens that carry their own opening parenthesis.
    pub fn is_function(self) -> bool {
        matches!(self, Sqrt | Log | Ln | Abs | Der | Integral)
    }
}

impl TokenKind for StlToken {
    const ALL: &'static [Self] = &[
        Globally, Finally, Until, Implies, AndAnd, OrOr, Bang, Caret, Star, Slash, Plus, Minus,
        Le, Lt, Ge, Gt, Eq, Hash, At, Underscore, ShiftLeft, ShiftRight, LParen, RParen, LBrace,
        RBrace, LBracket, RBracket, Comma, Semi, Dot, Colon, Sqrt, Log, Ln, Abs, Der, Integral,
        Max, Min, Boolean, Variable, Rational, SlComment, Ws, Eof,
    ];

    const EOF: Self = Eof;

    fn literal(self) -> Option<&'static str> {
        LITERALS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, spelling)| *spelling)
    }

    fn symbolic_name(self) -> Option<&'static str> {
        match self {
            Boolean => Some("BOOLEAN"),
            Variable => Some("VARIABLE"),
            Rational => Some("RATIONAL"),
            SlComment => Some("SL_COMMENT"),
            Ws => Some("WS"),
            Eof => Some("EOF"),
            _ => None,
        }
    }

    fn is_hidden(self) -> bool {
        matches!(self, Ws | SlComment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_lookup() {
        assert_eq!(StlToken::operator("=>"), Some(Implies));
        assert_eq!(StlToken::operator("<="), Some(Le));
        assert_eq!(StlToken::operator("G"), None);
        assert_eq!(StlToken::operator("&"), None);
    }

    #[test]
    fn test_words() {
        assert_eq!(StlToken::word("G"), Globally);
        assert_eq!(StlToken::word("true"), Boolean);
        assert_eq!(StlToken::word("gfp"), Variable);
        assert_eq!(StlToken::word("g"), Variable);
    }

    #[test]
    fn test_function_literals_include_paren() {
        assert_eq!(Sqrt.literal(), Some("sqrt("));
        assert_eq!(StlToken::from_literal("int("), Some(Integral));
        assert_eq!(StlToken::function("exp"), None);
    }

    #[test]
    fn test_every_kind_is_named() {
        for kind in StlToken::ALL {
            assert!(kind.literal().is_some() || kind.symbolic_name().is_some());
        }
    }

    #[test]
    fn test_operator_classes() {
        assert!(Ge.is_relational());
        assert!(Caret.is_arithmetic());
        assert!(!Implies.is_relational());
        assert!(!Max.is_function());
    }
}
