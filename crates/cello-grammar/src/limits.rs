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

//! Resource limits for parsing.

/// Default maximum rule nesting depth.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Default maximum number of tokens per document.
pub const DEFAULT_MAX_TOKENS: usize = 1_000_000;

/// Configurable limits for a parse pass.
///
/// These bound the stack depth and work done by a single pass so that a
/// pathological document cannot stall or overflow the thread running it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum rule nesting depth (default: 256).
    pub max_nesting_depth: usize,
    /// Maximum number of visible tokens plus lexer faults (default: 1M).
    pub max_tokens: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_nesting_depth: usize::MAX,
            max_tokens: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_nesting_depth, 256);
        assert_eq!(limits.max_tokens, 1_000_000);
    }

    #[test]
    fn test_unlimited() {
        let limits = Limits::unlimited();
        assert_eq!(limits.max_nesting_depth, usize::MAX);
        assert_eq!(limits.max_tokens, usize::MAX);
    }
}
