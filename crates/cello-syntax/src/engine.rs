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

//! One full validation pass: lex, parse, collect.
//!
//! The engine holds no mutable state. Each call builds a fresh lexer, parser
//! and [`DiagnosticCollector`], so identical text always yields identical
//! diagnostics.
//!
//! Faults of the parsing machinery itself (resource limits, panics) never
//! escape: they become a single diagnostic at the start of the document.

use crate::collector::DiagnosticCollector;
use crate::config::SyntaxConfig;
use crate::diagnostic::Diagnostic;
use crate::profile::{profile_for, LanguageId, LanguageProfile};
use cello_grammar::{CancelFlag, GrammarError, Limits};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

/// One document snapshot submitted for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    /// Full document text.
    pub text: String,
    /// Monotonically increasing per worker; newer requests have larger ids.
    pub request_id: u64,
}

impl ValidationRequest {
    pub fn new(text: impl Into<String>, request_id: u64) -> Self {
        Self {
            text: text.into(),
            request_id,
        }
    }
}

/// The diagnostics of one completed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Id of the request this pass validated.
    pub request_id: u64,
    /// Diagnostics in document order.
    pub diagnostics: Vec<Diagnostic>,
}

/// The pass was cancelled before it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("validation pass cancelled")]
pub struct Cancelled;

/// Runs validation passes for one language.
#[derive(Clone)]
pub struct ValidationEngine {
    profile: Arc<dyn LanguageProfile>,
    limits: Limits,
    max_document_size: usize,
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("language", &self.profile.language())
            .field("limits", &self.limits)
            .field("max_document_size", &self.max_document_size)
            .finish()
    }
}

impl ValidationEngine {
    /// Create an engine with the default configuration.
    pub fn new(language: LanguageId) -> Self {
        Self::with_config(language, &SyntaxConfig::default())
    }

    /// Create an engine with limits taken from `config`.
    pub fn with_config(language: LanguageId, config: &SyntaxConfig) -> Self {
        Self::from_profile(profile_for(language), config)
    }

    /// Create an engine around any profile.
    pub fn from_profile(profile: Arc<dyn LanguageProfile>, config: &SyntaxConfig) -> Self {
        Self {
            profile,
            limits: config.limits(),
            max_document_size: config.max_document_size,
        }
    }

    /// The language this engine validates.
    pub fn language(&self) -> LanguageId {
        self.profile.language()
    }

    /// The profile this engine validates with.
    pub fn profile(&self) -> &Arc<dyn LanguageProfile> {
        &self.profile
    }

    /// Validate `text` and return its diagnostics in document order.
    pub fn validate(&self, text: &str) -> Vec<Diagnostic> {
        // A fresh flag nobody else holds cannot be raised
        self.run(text, &CancelFlag::new()).unwrap_or_default()
    }

    /// Validate a request, aborting early once `cancel` is raised.
    pub fn validate_request(
        &self,
        request: &ValidationRequest,
        cancel: &CancelFlag,
    ) -> Result<ValidationOutcome, Cancelled> {
        let diagnostics = self.run(&request.text, cancel)?;
        Ok(ValidationOutcome {
            request_id: request.request_id,
            diagnostics,
        })
    }

    fn run(&self, text: &str, cancel: &CancelFlag) -> Result<Vec<Diagnostic>, Cancelled> {
        let language = self.profile.language();

        if text.len() > self.max_document_size {
            tracing::warn!(
                "{} document of {} bytes exceeds maximum {}, not validated",
                language,
                text.len(),
                self.max_document_size
            );
            return Ok(vec![Diagnostic::at_document_start(format!(
                "document too large: {} bytes exceeds maximum {}",
                text.len(),
                self.max_document_size
            ))]);
        }

        tracing::debug!("{} validation started ({} bytes)", language, text.len());

        let profile = &self.profile;
        let limits = self.limits;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut collector = DiagnosticCollector::new();
            let parsed = profile.validate(text, &mut collector, limits, cancel);
            (parsed, collector)
        }));

        let diagnostics = match result {
            Ok((Ok(()), collector)) => collector.into_diagnostics(),
            Ok((Err(GrammarError::Cancelled), _)) => {
                tracing::debug!("{} validation cancelled", language);
                return Err(Cancelled);
            }
            Ok((Err(err), _)) => {
                tracing::warn!("{} validation aborted: {}", language, err);
                vec![Diagnostic::at_document_start(err.to_string())]
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!("{} parser fault: {}", language, message);
                vec![Diagnostic::at_document_start(message)]
            }
        };

        tracing::debug!(
            "{} validation finished with {} diagnostic(s)",
            language,
            diagnostics.len()
        );
        Ok(diagnostics)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("internal parser error: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("internal parser error: {}", message)
    } else {
        "internal parser error".to_string()
    }
}

/// Validate `text` as `language` with the default configuration.
pub fn validate(language: LanguageId, text: &str) -> Vec<Diagnostic> {
    ValidationEngine::new(language).validate(text)
}
