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

//! Constants and magic number definitions.
//!
//! # Organization
//!
//! - **Performance Tuning**: debounce delay
//! - **Resource Limits**: document size, nesting depth, token count
//! - **Positions**: line and column conventions

// ============================================================================
// Performance Tuning
// ============================================================================

/// Debounce delay before a changed document is validated (in milliseconds).
///
/// **Rationale**: 200ms coalesces the keystrokes of continuous typing into a
/// single validation pass while staying below the threshold at which
/// feedback starts to feel delayed.
///
/// **Trade-offs**:
/// - Lower values (50-100ms): quicker markers, more parse passes
/// - Higher values (300-500ms): fewer passes, visible lag
pub const DEBOUNCE_MS: u64 = 200;

// ============================================================================
// Resource Limits
// ============================================================================

/// Bytes per megabyte (1024 * 1024).
pub const BYTES_PER_MEGABYTE: usize = 1024 * 1024;

/// Default maximum document size in bytes (16 MiB).
///
/// **Rationale**: rule files and property files are small, typically a few
/// kilobytes. Anything beyond 16 MiB is not a hand-written design and is
/// answered with a single diagnostic instead of a full parse.
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 16 * BYTES_PER_MEGABYTE;

/// Default maximum rule nesting depth (256).
///
/// Bounds the recursion of the recursive-descent parsers so that deeply
/// parenthesized input cannot overflow the validation thread's stack.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = cello_grammar::DEFAULT_MAX_NESTING_DEPTH;

/// Default maximum number of tokens per document (1,000,000).
pub const DEFAULT_MAX_TOKENS: usize = cello_grammar::DEFAULT_MAX_TOKENS;

// ============================================================================
// Positions
// ============================================================================

/// Line numbering offset between parser reports and diagnostics.
///
/// Parsers report 1-based lines; diagnostics carry 0-based rows.
///
/// **Usage**: `row = line - LINE_NUMBER_OFFSET`
pub const LINE_NUMBER_OFFSET: usize = 1;

/// Zero-based position start index, used for document-level diagnostics.
pub const POSITION_ZERO: usize = 0;

/// Semantic class for token kinds with no explicit mapping.
pub const DEFAULT_SEMANTIC_CLASS: &str = "text";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_conversions() {
        assert_eq!(BYTES_PER_MEGABYTE, 1048576);
        assert_eq!(DEFAULT_MAX_DOCUMENT_SIZE, 16777216);
    }

    #[test]
    fn test_reasonable_limits() {
        assert!(DEBOUNCE_MS >= 50, "Debounce too short, will cause excessive CPU");
        assert!(DEBOUNCE_MS <= 500, "Debounce too long, will feel laggy");
        assert!(DEFAULT_MAX_NESTING_DEPTH >= 64);
        assert!(DEFAULT_MAX_TOKENS >= 100_000);
    }

    #[test]
    fn test_position_constants() {
        assert_eq!(LINE_NUMBER_OFFSET, 1, "diagnostics are 0-based, parsers 1-based");
        assert_eq!(POSITION_ZERO, 0);
        assert!(!DEFAULT_SEMANTIC_CLASS.is_empty());
    }
}
