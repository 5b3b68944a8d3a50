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

//! Raw token kinds of the circuit-composition language.

use crate::token::TokenKind;

/// Every token the Eugene lexer can emit.
///
/// Keywords are accepted either all upper case (`BEFORE`) or all lower case
/// (`before`); both spellings produce the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EugeneToken {
    // Counting relations
    Contains,
    Exactly,
    NotExactly,
    MoreThan,
    LessThan,
    NotMoreThan,
    NotLessThan,
    SameCount,
    // Positional relations
    StartsWith,
    Before,
    AlwaysNextTo,
    NextTo,
    After,
    SomeBefore,
    AllBefore,
    SomeAfter,
    AllAfter,
    EndsWith,
    // Orientation relations
    Forward,
    Reverse,
    SameOrientation,
    AllForward,
    AllReverse,
    AllSameOrientation,
    // Interactions
    Represses,
    Induces,
    Drives,
    Binds,
    // Logic
    Not,
    Or,
    And,
    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semi,
    // Symbols
    Id,
    Int,
    Real,
    SlComment,
    MlComment,
    Ws,
    Eof,
}

use EugeneToken::*;

const KEYWORDS: &[(EugeneToken, &str)] = &[
    (Contains, "CONTAINS"),
    (Exactly, "EXACTLY"),
    (NotExactly, "NOTEXACTLY"),
    (MoreThan, "MORETHAN"),
    (LessThan, "LESSTHAN"),
    (NotMoreThan, "NOTMORETHAN"),
    (NotLessThan, "NOTLESSTHAN"),
    (SameCount, "SAME_COUNT"),
    (StartsWith, "STARTSWITH"),
    (Before, "BEFORE"),
    (AlwaysNextTo, "ALWAYS_NEXTTO"),
    (NextTo, "NEXTTO"),
    (After, "AFTER"),
    (SomeBefore, "SOME_BEFORE"),
    (AllBefore, "ALL_BEFORE"),
    (SomeAfter, "SOME_AFTER"),
    (AllAfter, "ALL_AFTER"),
    (EndsWith, "ENDSWITH"),
    (Forward, "FORWARD"),
    (Reverse, "REVERSE"),
    (SameOrientation, "SAME_ORIENTATION"),
    (AllForward, "ALL_FORWARD"),
    (AllReverse, "ALL_REVERSE"),
    (AllSameOrientation, "ALL_SAME_ORIENTATION"),
    (Represses, "REPRESSES"),
    (Induces, "INDUCES"),
    (Drives, "DRIVES"),
    (Binds, "BINDS"),
    (Not, "NOT"),
    (Or, "OR"),
    (And, "AND"),
];

impl EugeneToken {
    /// Look up a keyword by its spelling.
    pub fn keyword(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(_, spelling)| spelling_matches(spelling, text))
            .map(|(kind, _)| *kind)
    }

    /// Returns `true` for relational and logical keywords.
    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|(kind, _)| *kind == self)
    }

    /// Relations taking a single operand: `CONTAINS p`.
    pub fn is_unary_relation(self) -> bool {
        matches!(self, Contains | StartsWith | EndsWith | Forward | Reverse)
    }

    /// Relations over the whole design: `ALL_FORWARD`.
    pub fn is_nullary_relation(self) -> bool {
        matches!(self, AllForward | AllReverse | AllSameOrientation)
    }

    /// Relations between an operand and a count: `p EXACTLY 2`.
    pub fn is_count_relation(self) -> bool {
        matches!(
            self,
            Exactly | NotExactly | MoreThan | LessThan | NotMoreThan | NotLessThan
        )
    }

    /// Relations between two operands: `a BEFORE b`.
    pub fn is_binary_relation(self) -> bool {
        matches!(
            self,
            SameCount
                | Before
                | AlwaysNextTo
                | NextTo
                | After
                | SomeBefore
                | AllBefore
                | SomeAfter
                | AllAfter
                | SameOrientation
                | Represses
                | Induces
                | Drives
                | Binds
        )
    }
}

fn spelling_matches(upper: &str, text: &str) -> bool {
    text == upper
        || (upper.eq_ignore_ascii_case(text) && !text.bytes().any(|b| b.is_ascii_uppercase()))
}

impl TokenKind for EugeneToken {
    const ALL: &'static [Self] = &[
        Contains,
        Exactly,
        NotExactly,
        MoreThan,
        LessThan,
        NotMoreThan,
        NotLessThan,
        SameCount,
        StartsWith,
        Before,
        AlwaysNextTo,
        NextTo,
        After,
        SomeBefore,
        AllBefore,
        SomeAfter,
        AllAfter,
        EndsWith,
        Forward,
        Reverse,
        SameOrientation,
        AllForward,
        AllReverse,
        AllSameOrientation,
        Represses,
        Induces,
        Drives,
        Binds,
        Not,
        Or,
        And,
        LParen,
        RParen,
        LBracket,
        RBracket,
        Comma,
        Semi,
        Id,
        Int,
        Real,
        SlComment,
        MlComment,
        Ws,
        Eof,
    ];

    const EOF: Self = Eof;

    fn literal(self) -> Option<&'static str> {
        match self {
            LParen => Some("("),
            RParen => Some(")"),
            LBracket => Some("["),
            RBracket => Some("]"),
            Comma => Some(","),
            Semi => Some(";"),
            _ => KEYWORDS
                .iter()
                .find(|(kind, _)| *kind == self)
                .map(|(_, spelling)| *spelling),
        }
    }

    fn symbolic_name(self) -> Option<&'static str> {
        match self {
            Id => Some("ID"),
            Int => Some("INT"),
            Real => Some("REAL"),
            SlComment => Some("SL_COMMENT"),
            MlComment => Some("ML_COMMENT"),
            Ws => Some("WS"),
            Eof => Some("EOF"),
            _ => None,
        }
    }

    fn is_hidden(self) -> bool {
        matches!(self, Ws | SlComment | MlComment)
    }

    fn matches_literal(self, text: &str) -> bool {
        match self.literal() {
            Some(spelling) if self.is_keyword() => spelling_matches(spelling, text),
            Some(spelling) => spelling == text,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_both_cases() {
        assert_eq!(EugeneToken::keyword("BEFORE"), Some(Before));
        assert_eq!(EugeneToken::keyword("before"), Some(Before));
        assert_eq!(EugeneToken::keyword("Before"), None);
        assert_eq!(EugeneToken::keyword("same_count"), Some(SameCount));
    }

    #[test]
    fn test_from_literal_resolves_lower_case() {
        assert_eq!(EugeneToken::from_literal("represses"), Some(Represses));
        assert_eq!(EugeneToken::from_literal("("), Some(LParen));
        assert_eq!(EugeneToken::from_literal("nope"), None);
    }

    #[test]
    fn test_relation_classes_are_disjoint() {
        for kind in EugeneToken::ALL {
            let classes = [
                kind.is_unary_relation(),
                kind.is_nullary_relation(),
                kind.is_count_relation(),
                kind.is_binary_relation(),
            ];
            assert!(classes.iter().filter(|c| **c).count() <= 1, "{:?}", kind);
        }
    }

    #[test]
    fn test_every_relation_keyword_has_a_class() {
        for (kind, _) in KEYWORDS {
            if matches!(kind, Not | Or | And) {
                continue;
            }
            assert!(
                kind.is_unary_relation()
                    || kind.is_nullary_relation()
                    || kind.is_count_relation()
                    || kind.is_binary_relation(),
                "{:?} has no relation class",
                kind
            );
        }
    }

    #[test]
    fn test_every_kind_is_named() {
        for kind in EugeneToken::ALL {
            assert!(kind.literal().is_some() || kind.symbolic_name().is_some());
        }
    }
}
