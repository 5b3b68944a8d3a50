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

//! Static mapping from raw token kinds to semantic highlight classes.
//!
//! A table is built once per language from two lists, the way editor mode
//! files describe highlighting: fixed spellings (`'before'`, `'&&'`) and
//! symbolic token names (`ID`, `RATIONAL`). Kinds mentioned in neither map
//! to [`DEFAULT_SEMANTIC_CLASS`], so [`TokenClassTable::classify`] is total.

use crate::constants::DEFAULT_SEMANTIC_CLASS;
use cello_grammar::eugene::EugeneToken;
use cello_grammar::stl::StlToken;
use cello_grammar::TokenKind;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Semantic class names understood by editor themes.
pub mod classes {
    pub const KEYWORD_CONTROL: &str = "keyword.control";
    pub const KEYWORD_OPERATOR: &str = "keyword.operator";
    pub const CONSTANT_LANGUAGE: &str = "constant.language";
    pub const CONSTANT_NUMERIC: &str = "constant.numeric";
    pub const IDENTIFIER: &str = "identifier";
    pub const COMMENT_LINE: &str = "comment.line";
    pub const COMMENT_BLOCK: &str = "comment.block";
    pub const PAREN_LPAREN: &str = "paren.lparen";
    pub const PAREN_RPAREN: &str = "paren.rparen";
    pub const PUNCTUATION_OPERATOR: &str = "punctuation.operator";
    pub const SUPPORT_FUNCTION: &str = "support.function";
    pub const TEXT: &str = super::DEFAULT_SEMANTIC_CLASS;
}

/// One row of a table: a raw kind and its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClassEntry<K> {
    pub kind: K,
    pub semantic_class: &'static str,
}

/// Immutable kind-to-class mapping for one language.
#[derive(Debug, Clone)]
pub struct TokenClassTable<K: TokenKind> {
    classes: HashMap<K, &'static str>,
    unresolved: Vec<&'static str>,
}

impl<K: TokenKind> TokenClassTable<K> {
    /// Start building a table.
    pub fn builder() -> TokenClassTableBuilder<K> {
        TokenClassTableBuilder {
            classes: HashMap::new(),
            unresolved: Vec::new(),
        }
    }

    /// The semantic class of `kind`; never fails.
    pub fn classify(&self, kind: K) -> &'static str {
        self.classes
            .get(&kind)
            .copied()
            .unwrap_or(DEFAULT_SEMANTIC_CLASS)
    }

    /// The class used for unmapped kinds.
    pub fn default_class(&self) -> &'static str {
        DEFAULT_SEMANTIC_CLASS
    }

    /// One entry per kind the lexer can emit, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = TokenClassEntry<K>> + '_ {
        K::ALL.iter().map(move |&kind| TokenClassEntry {
            kind,
            semantic_class: self.classify(kind),
        })
    }

    /// Spellings and names given to the builder that match no token kind.
    pub fn unresolved(&self) -> &[&'static str] {
        &self.unresolved
    }
}

/// Builder for [`TokenClassTable`]. The first class given to a kind wins.
pub struct TokenClassTableBuilder<K: TokenKind> {
    classes: HashMap<K, &'static str>,
    unresolved: Vec<&'static str>,
}

impl<K: TokenKind> TokenClassTableBuilder<K> {
    /// Map tokens with fixed spellings to `class`.
    pub fn literals(mut self, class: &'static str, spellings: &[&'static str]) -> Self {
        for &spelling in spellings {
            match K::from_literal(spelling) {
                Some(kind) => {
                    self.classes.entry(kind).or_insert(class);
                }
                None => self.unresolved.push(spelling),
            }
        }
        self
    }

    /// Map tokens with a symbolic name to `class`.
    pub fn symbols(mut self, class: &'static str, names: &[&'static str]) -> Self {
        for &name in names {
            match K::from_symbolic_name(name) {
                Some(kind) => {
                    self.classes.entry(kind).or_insert(class);
                }
                None => self.unresolved.push(name),
            }
        }
        self
    }

    /// Finish the table.
    pub fn build(self) -> TokenClassTable<K> {
        for spelling in &self.unresolved {
            tracing::warn!("token class mapping names unknown token {:?}", spelling);
        }
        TokenClassTable {
            classes: self.classes,
            unresolved: self.unresolved,
        }
    }
}

/// Object-safe view of a table, used where the token kind is erased.
pub trait ClassLookup: Send + Sync {
    /// Class of the kind whose display name is `name` (`'before'`, `ID`).
    /// Unknown names get the default class.
    fn classify_name(&self, name: &str) -> &'static str;

    /// `(display name, class)` for every kind, in declaration order.
    fn named_entries(&self) -> Vec<(String, &'static str)>;

    /// Every distinct class the table can produce, default included.
    fn semantic_classes(&self) -> Vec<&'static str>;
}

impl<K: TokenKind> ClassLookup for TokenClassTable<K> {
    fn classify_name(&self, name: &str) -> &'static str {
        K::ALL
            .iter()
            .find(|kind| kind.describe() == name)
            .map(|&kind| self.classify(kind))
            .unwrap_or(DEFAULT_SEMANTIC_CLASS)
    }

    fn named_entries(&self) -> Vec<(String, &'static str)> {
        self.entries()
            .map(|entry| (entry.kind.describe(), entry.semantic_class))
            .collect()
    }

    fn semantic_classes(&self) -> Vec<&'static str> {
        let mut set: BTreeSet<&'static str> = self.classes.values().copied().collect();
        set.insert(DEFAULT_SEMANTIC_CLASS);
        set.into_iter().collect()
    }
}

/// The table for the circuit-composition language.
pub fn eugene_table() -> &'static TokenClassTable<EugeneToken> {
    static TABLE: OnceLock<TokenClassTable<EugeneToken>> = OnceLock::new();
    TABLE.get_or_init(|| {
        TokenClassTable::builder()
            .literals(
                classes::KEYWORD_CONTROL,
                &[
                    "CONTAINS",
                    "EXACTLY",
                    "NOTEXACTLY",
                    "MORETHAN",
                    "LESSTHAN",
                    "NOTMORETHAN",
                    "NOTLESSTHAN",
                    "SAME_COUNT",
                    "STARTSWITH",
                    "BEFORE",
                    "ALWAYS_NEXTTO",
                    "NEXTTO",
                    "AFTER",
                    "SOME_BEFORE",
                    "ALL_BEFORE",
                    "SOME_AFTER",
                    "ALL_AFTER",
                    "ENDSWITH",
                    "FORWARD",
                    "REVERSE",
                    "SAME_ORIENTATION",
                    "ALL_FORWARD",
                    "ALL_REVERSE",
                    "ALL_SAME_ORIENTATION",
                    "REPRESSES",
                    "INDUCES",
                    "DRIVES",
                    "BINDS",
                ],
            )
            .literals(classes::CONSTANT_LANGUAGE, &["NOT", "OR", "AND"])
            .literals(classes::PAREN_LPAREN, &["(", "["])
            .literals(classes::PAREN_RPAREN, &[")", "]"])
            .literals(classes::PUNCTUATION_OPERATOR, &[",", ";"])
            .symbols(classes::IDENTIFIER, &["ID"])
            .symbols(classes::CONSTANT_NUMERIC, &["INT", "REAL"])
            .symbols(classes::COMMENT_LINE, &["SL_COMMENT"])
            .symbols(classes::COMMENT_BLOCK, &["ML_COMMENT"])
            .build()
    })
}

/// The table for the property language.
pub fn stl_table() -> &'static TokenClassTable<StlToken> {
    static TABLE: OnceLock<TokenClassTable<StlToken>> = OnceLock::new();
    TABLE.get_or_init(|| {
        TokenClassTable::builder()
            .literals(classes::KEYWORD_CONTROL, &["G", "F", "U"])
            .literals(
                classes::KEYWORD_OPERATOR,
                &[
                    "=>", "_", "&&", "||", "<<", ">>", "#", "=", "!", "^", "*", "/", "+", "-",
                    "<=", "<", ">=", ">", "@",
                ],
            )
            .literals(classes::PAREN_LPAREN, &["(", "{", "["])
            .literals(classes::PAREN_RPAREN, &[")", "}", "]"])
            .literals(classes::PUNCTUATION_OPERATOR, &[",", ";", ".", ":"])
            .literals(
                classes::SUPPORT_FUNCTION,
                &["sqrt(", "log(", "ln(", "abs(", "der(", "int(", "max", "min"],
            )
            .symbols(classes::CONSTANT_LANGUAGE, &["BOOLEAN"])
            .symbols(classes::IDENTIFIER, &["VARIABLE"])
            .symbols(classes::CONSTANT_NUMERIC, &["RATIONAL"])
            .symbols(classes::COMMENT_LINE, &["SL_COMMENT"])
            .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eugene_keywords() {
        let table = eugene_table();
        assert_eq!(table.classify(EugeneToken::Before), classes::KEYWORD_CONTROL);
        assert_eq!(table.classify(EugeneToken::Represses), classes::KEYWORD_CONTROL);
        assert_eq!(table.classify(EugeneToken::Not), classes::CONSTANT_LANGUAGE);
        assert_eq!(table.classify(EugeneToken::Int), classes::CONSTANT_NUMERIC);
        assert_eq!(table.classify(EugeneToken::Real), classes::CONSTANT_NUMERIC);
        assert_eq!(table.classify(EugeneToken::MlComment), classes::COMMENT_BLOCK);
    }

    #[test]
    fn test_stl_operators() {
        let table = stl_table();
        assert_eq!(table.classify(StlToken::Globally), classes::KEYWORD_CONTROL);
        assert_eq!(table.classify(StlToken::AndAnd), classes::KEYWORD_OPERATOR);
        assert_eq!(table.classify(StlToken::Sqrt), classes::SUPPORT_FUNCTION);
        assert_eq!(table.classify(StlToken::Boolean), classes::CONSTANT_LANGUAGE);
        assert_eq!(table.classify(StlToken::Rational), classes::CONSTANT_NUMERIC);
    }

    #[test]
    fn test_unmapped_kinds_use_default() {
        assert_eq!(eugene_table().classify(EugeneToken::Ws), "text");
        assert_eq!(stl_table().classify(StlToken::Eof), "text");
    }

    #[test]
    fn test_tables_resolve_every_spelling() {
        assert!(eugene_table().unresolved().is_empty());
        assert!(stl_table().unresolved().is_empty());
    }

    #[test]
    fn test_first_mapping_wins() {
        let table = TokenClassTable::<EugeneToken>::builder()
            .literals("first", &["BEFORE"])
            .literals("second", &["before"])
            .build();
        assert_eq!(table.classify(EugeneToken::Before), "first");
    }

    #[test]
    fn test_unknown_spelling_is_recorded() {
        let table = TokenClassTable::<StlToken>::builder()
            .literals(classes::KEYWORD_OPERATOR, &["-("])
            .build();
        assert_eq!(table.unresolved(), &["-("]);
    }

    #[test]
    fn test_lookup_by_display_name() {
        let table = eugene_table();
        assert_eq!(table.classify_name("'BEFORE'"), classes::KEYWORD_CONTROL);
        assert_eq!(table.classify_name("ID"), classes::IDENTIFIER);
        assert_eq!(table.classify_name("nonsense"), "text");
        assert!(table.semantic_classes().contains(&"text"));
        assert_eq!(table.named_entries().len(), EugeneToken::ALL.len());
    }
}
