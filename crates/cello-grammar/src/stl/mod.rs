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

//! Signal temporal logic, the property language.
//!
//! Properties combine predicates over signals (`gfp > 3`) with temporal
//! operators bounded by time intervals: `G[0,5](x > 3)`,
//! `F[0,10] y < 2`, `(a > 1) U[0,3] (b < 2)`.

mod lexer;
mod parser;
mod token;

pub use lexer::StlLexer;
pub use parser::StlParser;
pub use token::StlToken;
