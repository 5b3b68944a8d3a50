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

//! Language Server Protocol implementation for the Cello design languages.
//!
//! Serves the circuit-composition language (Eugene, `.eug`) and signal
//! temporal logic properties (`.stl`) to any LSP-compatible editor.
//!
//! # Features
//!
//! - **Diagnostics**: syntax errors published after typing pauses, computed
//!   off the request path by one validation worker per document
//! - **Semantic Highlighting**: `textDocument/semanticTokens/full`
//! - **Batch checking**: `cello-lsp check FILE...` for scripts and CI
//!
//! # Configuration
//!
//! `initializationOptions` are read as a [`SyntaxConfig`](cello_syntax::SyntaxConfig):
//!
//! ```json
//! { "debounceMs": 300, "maxDocumentSize": 1048576 }
//! ```
//!
//! Invalid options are logged and the defaults are used.
//!
//! # Usage
//!
//! ```no_run
//! use cello_lsp::CelloLanguageServer;
//! use tower_lsp::{LspService, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let stdin = tokio::io::stdin();
//!     let stdout = tokio::io::stdout();
//!
//!     let (service, socket) = LspService::new(CelloLanguageServer::new);
//!
//!     Server::new(stdin, stdout, socket).serve(service).await;
//! }
//! ```

mod backend;
pub mod check;
pub mod semantic;
mod surface;

pub use backend::{detect_language, CelloLanguageServer};
pub use surface::{to_lsp_diagnostic, LspSurface, Publication};

/// Crate version, reported in `serverInfo`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `source` of every published diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "cello";
