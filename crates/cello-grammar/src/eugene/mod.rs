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

//! Eugene, the circuit-composition rule language.
//!
//! A document is a list of rules such as `CONTAINS pTac`, `A before B` or
//! `NOT gfp EXACTLY 2 OR ALL_FORWARD`, separated by commas, semicolons or
//! `AND`.

mod lexer;
mod parser;
mod token;

pub use lexer::EugeneLexer;
pub use parser::EugeneParser;
pub use token::EugeneToken;
