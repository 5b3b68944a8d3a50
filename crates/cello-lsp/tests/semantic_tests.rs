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

//! Properties of semantic token encoding over arbitrary documents.

use cello_lsp::semantic::{encode, token_types};
use cello_syntax::{profile_for, LanguageId};
use proptest::prelude::*;

/// Absolute `(line, character, length)` of every encoded token.
fn absolute(language: LanguageId, text: &str) -> Vec<(u32, u32, u32, u32)> {
    let tokens = encode(text, profile_for(language).highlight(text, 0..text.len()));
    let mut line = 0;
    let mut start = 0;
    tokens
        .into_iter()
        .map(|token| {
            if token.delta_line > 0 {
                line += token.delta_line;
                start = token.delta_start;
            } else {
                start += token.delta_start;
            }
            (line, start, token.length, token.token_type)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_tokens_stay_inside_their_line(text in "[ -~\n\tλ𝔸]{0,80}") {
        let lines: Vec<&str> = text.split('\n').collect();
        for language in LanguageId::ALL {
            for (line, start, length, token_type) in absolute(language, &text) {
                prop_assert!((line as usize) < lines.len());
                let width = lines[line as usize].encode_utf16().count() as u32;
                prop_assert!(length > 0);
                prop_assert!(start + length <= width);
                prop_assert!((token_type as usize) < token_types().len());
            }
        }
    }

    #[test]
    fn prop_tokens_do_not_overlap(text in "[a-zA-Z0-9 ()\\[\\],;<>=+*/\n]{0,80}") {
        for language in LanguageId::ALL {
            let tokens = absolute(language, &text);
            for pair in tokens.windows(2) {
                let (line_a, start_a, length_a, _) = pair[0];
                let (line_b, start_b, _, _) = pair[1];
                prop_assert!(line_b > line_a || start_b >= start_a + length_a);
            }
        }
    }
}
