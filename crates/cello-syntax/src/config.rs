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

//! Configuration for validation passes and the background worker.

use crate::constants::{
    DEBOUNCE_MS, DEFAULT_MAX_DOCUMENT_SIZE, DEFAULT_MAX_NESTING_DEPTH, DEFAULT_MAX_TOKENS,
};
use crate::error::{SyntaxError, SyntaxResult};
use cello_grammar::Limits;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound accepted for `debounce_ms` (10 seconds).
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Upper bound accepted for `max_nesting_depth`.
///
/// Parsing recurses once per rule entry, on blocking-pool threads with the
/// default 2 MiB stack. The deepest allowed pass must fit in that stack.
const MAX_NESTING_DEPTH_CEILING: usize = 1024;

/// Settings shared by the validation engine and worker.
///
/// Every field has a default, so partial option objects are accepted:
///
/// ```
/// use cello_syntax::SyntaxConfig;
///
/// let config = SyntaxConfig::from_json(serde_json::json!({ "debounceMs": 50 })).unwrap();
/// assert_eq!(config.debounce_ms, 50);
/// assert_eq!(config.max_nesting_depth, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConfig {
    /// Quiet period after the last change before a pass starts (default: 200).
    #[serde(alias = "debounceMs")]
    pub debounce_ms: u64,

    /// Documents larger than this many bytes are not parsed (default: 16 MiB).
    #[serde(alias = "maxDocumentSize")]
    pub max_document_size: usize,

    /// Maximum rule nesting depth (default: 256).
    #[serde(alias = "maxNestingDepth")]
    pub max_nesting_depth: usize,

    /// Maximum number of tokens per document (default: 1M).
    #[serde(alias = "maxTokens")]
    pub max_tokens: usize,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl SyntaxConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> SyntaxConfigBuilder {
        SyntaxConfigBuilder::new()
    }

    /// Deserialize from a JSON value such as LSP `initializationOptions`.
    ///
    /// `null` yields the defaults. The result is validated.
    pub fn from_json(value: serde_json::Value) -> SyntaxResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> SyntaxResult<()> {
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(SyntaxError::InvalidConfig(format!(
                "debounce_ms {} exceeds maximum {}",
                self.debounce_ms, MAX_DEBOUNCE_MS
            )));
        }
        if self.max_document_size == 0 {
            return Err(SyntaxError::InvalidConfig(
                "max_document_size must be greater than zero".to_string(),
            ));
        }
        if self.max_nesting_depth == 0 {
            return Err(SyntaxError::InvalidConfig(
                "max_nesting_depth must be greater than zero".to_string(),
            ));
        }
        if self.max_nesting_depth > MAX_NESTING_DEPTH_CEILING {
            return Err(SyntaxError::InvalidConfig(format!(
                "max_nesting_depth {} exceeds maximum {}",
                self.max_nesting_depth, MAX_NESTING_DEPTH_CEILING
            )));
        }
        if self.max_tokens == 0 {
            return Err(SyntaxError::InvalidConfig(
                "max_tokens must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The debounce delay as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parser limits derived from this configuration.
    pub fn limits(&self) -> Limits {
        Limits {
            max_nesting_depth: self.max_nesting_depth,
            max_tokens: self.max_tokens,
        }
    }
}

/// Builder for [`SyntaxConfig`].
#[derive(Debug, Default)]
pub struct SyntaxConfigBuilder {
    config: SyntaxConfig,
}

impl SyntaxConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the debounce delay in milliseconds.
    pub fn debounce_ms(mut self, millis: u64) -> Self {
        self.config.debounce_ms = millis;
        self
    }

    /// Set the maximum document size in bytes.
    pub fn max_document_size(mut self, bytes: usize) -> Self {
        self.config.max_document_size = bytes;
        self
    }

    /// Set the maximum rule nesting depth.
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.max_nesting_depth = depth;
        self
    }

    /// Set the maximum token count.
    pub fn max_tokens(mut self, tokens: usize) -> Self {
        self.config.max_tokens = tokens;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> SyntaxResult<SyntaxConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
