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

//! Editor syntax support for the Cello design languages.
//!
//! This crate sits between an editor host and the recognizers of
//! [`cello_grammar`]. It provides:
//!
//! - **Highlighting**: [`TokenClassTable`] maps raw token kinds to semantic
//!   classes and [`TokenStreamAdapter`] turns a lexer into a stream of
//!   [`ClassifiedToken`]s over a byte range.
//! - **Validation**: [`ValidationEngine`] runs one full parse and collects
//!   every syntax error as a [`Diagnostic`] with a 0-based row.
//! - **Background checking**: [`ValidationWorker`] debounces edits and
//!   validates off the editing thread, reporting [`WorkerEvent`]s.
//! - **Per-document binding**: [`ModeController`] ties a document's
//!   [`EditingSurface`] to a worker and keeps its annotations current.
//!
//! ```
//! use cello_syntax::{validate, LanguageId};
//!
//! assert!(validate(LanguageId::Stl, "G[0,5](x > 3)").is_empty());
//!
//! let diagnostics = validate(LanguageId::Eugene, "A before");
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].row, 0);
//! ```

mod collector;
mod config;
pub mod constants;
mod controller;
mod diagnostic;
mod engine;
mod error;
mod highlight;
mod profile;
mod token_class;
mod worker;

pub use collector::DiagnosticCollector;
pub use config::{SyntaxConfig, SyntaxConfigBuilder};
pub use controller::{EditingSurface, ModeController};
pub use diagnostic::{Diagnostic, Severity};
pub use engine::{validate, Cancelled, ValidationEngine, ValidationOutcome, ValidationRequest};
pub use error::{SyntaxError, SyntaxResult};
pub use highlight::{classify_all, ClassifiedToken, TokenStreamAdapter};
pub use profile::{profile_for, EugeneProfile, LanguageId, LanguageProfile, StlProfile};
pub use token_class::{
    classes, eugene_table, stl_table, ClassLookup, TokenClassEntry, TokenClassTable,
    TokenClassTableBuilder,
};
pub use worker::{ValidationWorker, WorkerEvent, WorkerStats};
