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

//! Semantic token encoding for `textDocument/semanticTokens/full`.
//!
//! Highlight classes are mapped onto a small legend of standard LSP token
//! types. Classes without a counterpart (brackets, punctuation, plain text)
//! are left to the client's own grammar.

use cello_syntax::{classes, ClassifiedToken};
use tower_lsp::lsp_types::{SemanticToken, SemanticTokenType, SemanticTokensLegend};

/// Token types in legend order; indices into this list go on the wire.
pub fn token_types() -> Vec<SemanticTokenType> {
    vec![
        SemanticTokenType::KEYWORD,
        SemanticTokenType::OPERATOR,
        SemanticTokenType::NUMBER,
        SemanticTokenType::VARIABLE,
        SemanticTokenType::COMMENT,
        SemanticTokenType::FUNCTION,
    ]
}

/// The legend advertised in the server capabilities.
pub fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: token_types(),
        token_modifiers: vec![],
    }
}

/// Legend index for a highlight class, if it has one.
pub fn token_type_index(semantic_class: &str) -> Option<u32> {
    match semantic_class {
        classes::KEYWORD_CONTROL | classes::CONSTANT_LANGUAGE => Some(0),
        classes::KEYWORD_OPERATOR => Some(1),
        classes::CONSTANT_NUMERIC => Some(2),
        classes::IDENTIFIER => Some(3),
        classes::COMMENT_LINE | classes::COMMENT_BLOCK => Some(4),
        classes::SUPPORT_FUNCTION => Some(5),
        _ => None,
    }
}

/// Byte offsets of line starts, for converting offsets to LSP positions.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, line_starts }
    }

    /// Zero-based line and UTF-16 character of byte `offset`.
    ///
    /// Offsets past the end map to the end of the text; offsets inside a
    /// character map to its start.
    pub fn position(&self, offset: usize) -> (u32, u32) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let character = self.text[self.line_starts[line]..offset]
            .encode_utf16()
            .count();
        (line as u32, character as u32)
    }
}

/// Encode classified tokens as LSP relative semantic tokens.
///
/// Tokens spanning several lines are split per line. Tokens must arrive in
/// document order, as a highlight stream yields them.
pub fn encode<'a>(
    text: &str,
    tokens: impl IntoIterator<Item = ClassifiedToken<'a>>,
) -> Vec<SemanticToken> {
    let index = LineIndex::new(text);
    let mut encoded = Vec::new();
    let mut previous = (0u32, 0u32);

    for token in tokens {
        let Some(token_type) = token_type_index(token.semantic_class) else {
            continue;
        };

        let mut offset = token.start;
        for piece in token.text.split('\n') {
            let visible = piece.strip_suffix('\r').unwrap_or(piece);
            let length = visible.encode_utf16().count() as u32;
            if length > 0 {
                let (line, character) = index.position(offset);
                let delta_line = line - previous.0;
                let delta_start = if delta_line == 0 {
                    character - previous.1
                } else {
                    character
                };
                encoded.push(SemanticToken {
                    delta_line,
                    delta_start,
                    length,
                    token_type,
                    token_modifiers_bitset: 0,
                });
                previous = (line, character);
            }
            offset += piece.len() + 1;
        }
    }

    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use cello_syntax::{profile_for, LanguageId};

    fn encode_all(language: LanguageId, text: &str) -> Vec<SemanticToken> {
        encode(text, profile_for(language).highlight(text, 0..text.len()))
    }

    fn token(delta_line: u32, delta_start: u32, length: u32, token_type: u32) -> SemanticToken {
        SemanticToken {
            delta_line,
            delta_start,
            length,
            token_type,
            token_modifiers_bitset: 0,
        }
    }

    #[test]
    fn test_every_index_is_in_legend() {
        let len = token_types().len() as u32;
        for class in [
            classes::KEYWORD_CONTROL,
            classes::KEYWORD_OPERATOR,
            classes::CONSTANT_LANGUAGE,
            classes::CONSTANT_NUMERIC,
            classes::IDENTIFIER,
            classes::COMMENT_LINE,
            classes::COMMENT_BLOCK,
            classes::SUPPORT_FUNCTION,
        ] {
            assert!(token_type_index(class).unwrap() < len);
        }
        assert_eq!(token_type_index(classes::PAREN_LPAREN), None);
        assert_eq!(token_type_index(classes::TEXT), None);
    }

    #[test]
    fn test_single_line_deltas() {
        assert_eq!(
            encode_all(LanguageId::Eugene, "A before B"),
            vec![token(0, 0, 1, 3), token(0, 2, 6, 0), token(0, 7, 1, 3)]
        );
    }

    #[test]
    fn test_line_deltas_reset_start() {
        assert_eq!(
            encode_all(LanguageId::Eugene, "A\n  CONTAINS p"),
            vec![token(0, 0, 1, 3), token(1, 2, 8, 0), token(0, 9, 1, 3)]
        );
    }

    #[test]
    fn test_block_comment_split_per_line() {
        assert_eq!(
            encode_all(LanguageId::Eugene, "/* a\nbc */"),
            vec![token(0, 0, 4, 4), token(1, 0, 5, 4)]
        );
    }

    #[test]
    fn test_utf16_positions() {
        let index = LineIndex::new("é x\n𝔸y");
        assert_eq!(index.position(3), (0, 2));
        assert_eq!(index.position(9), (1, 2));
        // Inside a character
        assert_eq!(index.position(1), (0, 0));
        assert_eq!(index.position(100), (1, 3));
    }
}
