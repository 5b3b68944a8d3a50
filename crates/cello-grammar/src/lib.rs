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

//! Lexers and parsers for the Cello design languages.
//!
//! Two languages are supported:
//!
//! - [`eugene`]: the circuit-composition rule language (`A before B`,
//!   `CONTAINS pTac`).
//! - [`stl`]: signal temporal logic properties (`G[0,5](x > 3)`).
//!
//! Both follow the same contract. A lexer is a pull-based iterator of
//! [`Token`]s over the source text. A [`TokenStream`] buffers it for a
//! parser. A parser exposes one entry rule and reports every syntax error to
//! its registered [`ErrorListener`]s instead of failing:
//!
//! ```
//! use cello_grammar::eugene::{EugeneLexer, EugeneParser};
//! use cello_grammar::{ErrorListener, TokenStream};
//!
//! #[derive(Default)]
//! struct Errors(Vec<String>);
//!
//! impl ErrorListener for Errors {
//!     fn syntax_error(&mut self, line: usize, column: usize, message: &str) {
//!         self.0.push(format!("{}:{} {}", line, column, message));
//!     }
//! }
//!
//! let mut errors = Errors::default();
//! let mut parser = EugeneParser::new(TokenStream::new(EugeneLexer::new("A before")));
//! parser.remove_error_listeners();
//! parser.add_error_listener(&mut errors);
//! parser.document().unwrap();
//! drop(parser);
//!
//! assert_eq!(errors.0, vec!["1:8 mismatched input '<EOF>' expecting {ID, '['}"]);
//! ```
//!
//! A parse pass only fails (with a [`GrammarError`]) when a resource
//! [`Limits`] bound is exceeded or its [`CancelFlag`] is raised.

mod cancel;
mod error;
pub mod eugene;
mod limits;
mod listener;
mod recognizer;
mod scanner;
mod span;
pub mod stl;
mod token;

pub use cancel::CancelFlag;
pub use error::{GrammarError, GrammarResult, LexError};
pub use limits::{Limits, DEFAULT_MAX_NESTING_DEPTH, DEFAULT_MAX_TOKENS};
pub use listener::{ConsoleErrorListener, ErrorListener};
pub use span::{SourcePos, Span};
pub use token::{Token, TokenKind, TokenSource, TokenStream};
