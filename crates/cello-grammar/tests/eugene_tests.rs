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

//! Integration tests for the Eugene lexer and parser.

use cello_grammar::eugene::{EugeneLexer, EugeneParser, EugeneToken};
use cello_grammar::{
    CancelFlag, ErrorListener, GrammarError, Limits, SourcePos, TokenKind, TokenStream,
};
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Collected(Vec<(usize, usize, String)>);

impl ErrorListener for Collected {
    fn syntax_error(&mut self, line: usize, column: usize, message: &str) {
        self.0.push((line, column, message.to_string()));
    }
}

fn parse(source: &str) -> Result<Vec<(usize, usize, String)>, GrammarError> {
    let mut collected = Collected::default();
    {
        let mut parser = EugeneParser::new(TokenStream::new(EugeneLexer::new(source)));
        parser.remove_error_listeners();
        parser.add_error_listener(&mut collected);
        parser.document()?;
    }
    Ok(collected.0)
}

// ============================================================================
// Valid documents
// ============================================================================

#[test]
fn test_rule_list_with_separators() {
    let source = "\
// promoter placement
CONTAINS pTac,
pTac BEFORE gfp;
gfp EXACTLY 1 AND NOT rfp MORETHAN 0
/* orientation */
ALL_FORWARD";
    assert_eq!(parse(source).unwrap(), vec![]);
}

#[test]
fn test_disjunction_and_grouping() {
    assert_eq!(
        parse("(A before B OR A after B) OR NOT CONTAINS C").unwrap(),
        vec![]
    );
}

#[test]
fn test_positional_operands() {
    assert_eq!(parse("STARTSWITH [0]").unwrap(), vec![]);
    assert_eq!(parse("[0] BEFORE [3]").unwrap(), vec![]);
}

#[test]
fn test_interaction_keywords() {
    for keyword in ["represses", "INDUCES", "drives", "BINDS"] {
        let source = format!("LacI {} pTac", keyword);
        assert_eq!(parse(&source).unwrap(), vec![], "{}", source);
    }
}

#[test]
fn test_empty_document() {
    assert_eq!(parse("").unwrap(), vec![]);
    assert_eq!(parse("  // only a comment\n").unwrap(), vec![]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_operand_single_report() {
    let errors = parse("A before").unwrap();
    assert_eq!(errors.len(), 1);
    assert!(!errors[0].2.is_empty());
}

#[test]
fn test_error_on_second_line() {
    let errors = parse("A before B\nC after").unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!((errors[0].0, errors[0].1), (2, 7));
}

#[test]
fn test_recognition_error_reported_with_parse_errors_in_order() {
    let errors = parse("A before $ B\nC after").unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].2, "token recognition error at: '$'");
    assert_eq!((errors[0].0, errors[0].1), (1, 9));
    assert_eq!(errors[1].0, 2);
}

#[test]
fn test_trailing_recognition_error_is_flushed() {
    let errors = parse("A before B #").unwrap();
    assert_eq!(errors, vec![(1, 11, "token recognition error at: '#'".to_string())]);
}

#[test]
fn test_unterminated_comment() {
    let errors = parse("A before B /* open").unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].2, "token recognition error at: '/* open'");
}

#[test]
fn test_duplicate_errors_are_kept() {
    let errors = parse("A before\n;B after").unwrap();
    assert_eq!(errors.len(), 2);
}

// ============================================================================
// Limits and cancellation
// ============================================================================

#[test]
fn test_token_limit() {
    let mut parser = EugeneParser::new(TokenStream::new(EugeneLexer::new("A before B")))
        .with_limits(Limits {
            max_tokens: 2,
            ..Limits::default()
        });
    parser.remove_error_listeners();
    assert_eq!(
        parser.document(),
        Err(GrammarError::TooManyTokens { count: 3, max: 2 })
    );
}

#[test]
fn test_token_limit_counts_lexer_faults() {
    let mut parser = EugeneParser::new(TokenStream::new(EugeneLexer::new("A $ $ $")))
        .with_limits(Limits {
            max_tokens: 3,
            ..Limits::default()
        });
    parser.remove_error_listeners();
    assert_eq!(
        parser.document(),
        Err(GrammarError::TooManyTokens { count: 4, max: 3 })
    );
}

#[test]
fn test_budgeted_stream_stops_on_fault_flood() {
    let source = "$".repeat(200_000);
    let limits = Limits {
        max_tokens: 1000,
        ..Limits::default()
    };
    assert!(matches!(
        TokenStream::with_limits(EugeneLexer::new(&source), &limits),
        Err(GrammarError::TooManyTokens { max: 1000, .. })
    ));
}

#[test]
fn test_default_depth_is_enough_for_ordinary_nesting() {
    let source = format!("{}A before B{}", "(".repeat(40), ")".repeat(40));
    assert_eq!(parse(&source).unwrap(), vec![]);
}

#[test]
fn test_deep_nesting_aborts() {
    let source = format!("{}A before B{}", "(".repeat(500), ")".repeat(500));
    assert!(matches!(
        parse(&source),
        Err(GrammarError::NestingTooDeep { .. })
    ));
}

#[test]
fn test_cancellation() {
    let cancel = CancelFlag::new();
    let mut parser = EugeneParser::new(TokenStream::new(EugeneLexer::new("A before B")))
        .with_cancel_flag(cancel.clone());
    parser.remove_error_listeners();
    cancel.cancel();
    assert_eq!(parser.document(), Err(GrammarError::Cancelled));
}

// ============================================================================
// Token stream
// ============================================================================

#[test]
fn test_stream_drops_hidden_tokens() {
    let stream = TokenStream::new(EugeneLexer::new("A /* x */ before // y\n B"));
    let kinds: Vec<_> = stream.tokens().iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![EugeneToken::Id, EugeneToken::Before, EugeneToken::Id, EugeneToken::Eof]
    );
    assert_eq!(stream.tokens()[2].pos, SourcePos::new(2, 1));
}

#[test]
fn test_describe_names() {
    assert_eq!(EugeneToken::Before.describe(), "'BEFORE'");
    assert_eq!(EugeneToken::Id.describe(), "ID");
    assert_eq!(EugeneToken::Eof.describe(), "<EOF>");
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_parse_never_panics(source in ".*") {
        let _ = parse(&source);
    }

    #[test]
    fn prop_lexer_covers_input(source in "[a-zA-Z0-9_ \n(),;\\[\\]$/*.]{0,80}") {
        let mut next = 0;
        for item in EugeneLexer::new(&source) {
            let span = match item {
                Ok(token) => token.span,
                Err(err) => err.span(),
            };
            prop_assert_eq!(span.start(), next);
            next = span.end();
        }
        prop_assert_eq!(next, source.len());
    }

    #[test]
    fn prop_parse_is_deterministic(source in "[a-zA-Z ()\\[\\]0-9,;]{0,60}") {
        prop_assert_eq!(parse(&source), parse(&source));
    }

    #[test]
    fn prop_generated_relations_are_valid(
        left in "[a-z][a-zA-Z0-9]{0,6}",
        right in "[a-z][a-zA-Z0-9]{0,6}",
        keyword in prop::sample::select(vec!["before", "AFTER", "nextto", "SAME_ORIENTATION", "drives"]),
    ) {
        prop_assume!(EugeneToken::keyword(&left).is_none() && EugeneToken::keyword(&right).is_none());
        let source = format!("{} {} {}", left, keyword, right);
        prop_assert_eq!(parse(&source).unwrap(), vec![]);
    }
}
