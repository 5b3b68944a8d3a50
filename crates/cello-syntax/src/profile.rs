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

//! Language identifiers and per-language capability profiles.
//!
//! A [`LanguageProfile`] bundles everything the core needs from one DSL:
//! its token class table, a highlighter and a validating parse pass. The
//! mode controller and the validation engine are written once against this
//! trait.

use crate::error::SyntaxError;
use crate::highlight::{ClassifiedToken, TokenStreamAdapter};
use crate::token_class::{eugene_table, stl_table, ClassLookup};
use cello_grammar::eugene::{EugeneLexer, EugeneParser};
use cello_grammar::stl::{StlLexer, StlParser};
use cello_grammar::{CancelFlag, ErrorListener, GrammarResult, Limits, TokenStream};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// A supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    /// Eugene, the circuit-composition language.
    Eugene,
    /// Signal temporal logic, the property language.
    Stl,
}

impl LanguageId {
    /// Every supported language.
    pub const ALL: [LanguageId; 2] = [LanguageId::Eugene, LanguageId::Stl];

    /// The identifier editors use (`eugene`, `stl`).
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageId::Eugene => "eugene",
            LanguageId::Stl => "stl",
        }
    }

    /// File extensions associated with the language, without the dot.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            LanguageId::Eugene => &["eug", "eugene"],
            LanguageId::Stl => &["stl"],
        }
    }

    /// Resolve a file extension (with or without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.');
        Self::ALL.into_iter().find(|language| {
            language
                .extensions()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
    }

    /// Resolve the language of a file from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageId {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SyntaxError::UnknownLanguage(s.to_string()))
    }
}

/// What the core needs from one language.
pub trait LanguageProfile: Send + Sync {
    /// Which language this is.
    fn language(&self) -> LanguageId;

    /// The language's token class table.
    fn table(&self) -> &dyn ClassLookup;

    /// Classified tokens of `text` overlapping `range`.
    fn highlight<'a>(
        &self,
        text: &'a str,
        range: Range<usize>,
    ) -> Box<dyn Iterator<Item = ClassifiedToken<'a>> + 'a>;

    /// Run the entry rule over `text`, reporting only to `listener`.
    fn validate(
        &self,
        text: &str,
        listener: &mut dyn ErrorListener,
        limits: Limits,
        cancel: &CancelFlag,
    ) -> GrammarResult<()>;
}

/// Profile of the circuit-composition language.
#[derive(Debug, Clone, Copy, Default)]
pub struct EugeneProfile;

impl LanguageProfile for EugeneProfile {
    fn language(&self) -> LanguageId {
        LanguageId::Eugene
    }

    fn table(&self) -> &dyn ClassLookup {
        eugene_table()
    }

    fn highlight<'a>(
        &self,
        text: &'a str,
        range: Range<usize>,
    ) -> Box<dyn Iterator<Item = ClassifiedToken<'a>> + 'a> {
        Box::new(TokenStreamAdapter::new(
            eugene_table(),
            EugeneLexer::new(text),
            range,
        ))
    }

    fn validate(
        &self,
        text: &str,
        listener: &mut dyn ErrorListener,
        limits: Limits,
        cancel: &CancelFlag,
    ) -> GrammarResult<()> {
        let tokens = TokenStream::with_limits(EugeneLexer::new(text), &limits)?;
        let mut parser = EugeneParser::new(tokens)
            .with_limits(limits)
            .with_cancel_flag(cancel.clone());
        parser.remove_error_listeners();
        parser.add_error_listener(listener);
        parser.document()
    }
}

/// Profile of the property language.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlProfile;

impl LanguageProfile for StlProfile {
    fn language(&self) -> LanguageId {
        LanguageId::Stl
    }

    fn table(&self) -> &dyn ClassLookup {
        stl_table()
    }

    fn highlight<'a>(
        &self,
        text: &'a str,
        range: Range<usize>,
    ) -> Box<dyn Iterator<Item = ClassifiedToken<'a>> + 'a> {
        Box::new(TokenStreamAdapter::new(stl_table(), StlLexer::new(text), range))
    }

    fn validate(
        &self,
        text: &str,
        listener: &mut dyn ErrorListener,
        limits: Limits,
        cancel: &CancelFlag,
    ) -> GrammarResult<()> {
        let tokens = TokenStream::with_limits(StlLexer::new(text), &limits)?;
        let mut parser = StlParser::new(tokens)
            .with_limits(limits)
            .with_cancel_flag(cancel.clone());
        parser.remove_error_listeners();
        parser.add_error_listener(listener);
        parser.property()
    }
}

/// The shared profile for `language`.
pub fn profile_for(language: LanguageId) -> Arc<dyn LanguageProfile> {
    static EUGENE: OnceLock<Arc<dyn LanguageProfile>> = OnceLock::new();
    static STL: OnceLock<Arc<dyn LanguageProfile>> = OnceLock::new();
    match language {
        LanguageId::Eugene => EUGENE.get_or_init(|| Arc::new(EugeneProfile)).clone(),
        LanguageId::Stl => STL.get_or_init(|| Arc::new(StlProfile)).clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::DiagnosticCollector;

    #[test]
    fn test_parse_language_ids() {
        assert_eq!("eugene".parse::<LanguageId>().unwrap(), LanguageId::Eugene);
        assert_eq!("STL".parse::<LanguageId>().unwrap(), LanguageId::Stl);
        assert_eq!(
            "cobol".parse::<LanguageId>(),
            Err(SyntaxError::UnknownLanguage("cobol".to_string()))
        );
    }

    #[test]
    fn test_extensions() {
        assert_eq!(LanguageId::from_extension(".eug"), Some(LanguageId::Eugene));
        assert_eq!(LanguageId::from_extension("eugene"), Some(LanguageId::Eugene));
        assert_eq!(LanguageId::from_extension("STL"), Some(LanguageId::Stl));
        assert_eq!(LanguageId::from_extension("txt"), None);
        assert_eq!(
            LanguageId::from_path(Path::new("designs/and_gate.eug")),
            Some(LanguageId::Eugene)
        );
        assert_eq!(LanguageId::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&LanguageId::Stl).unwrap(), "\"stl\"");
        assert_eq!(LanguageId::Eugene.to_string(), "eugene");
    }

    #[test]
    fn test_profiles_report_their_language() {
        for language in LanguageId::ALL {
            assert_eq!(profile_for(language).language(), language);
        }
    }

    #[test]
    fn test_profile_is_shared() {
        assert!(Arc::ptr_eq(
            &profile_for(LanguageId::Stl),
            &profile_for(LanguageId::Stl)
        ));
    }

    #[test]
    fn test_validate_reports_only_to_listener() {
        let mut collector = DiagnosticCollector::new();
        profile_for(LanguageId::Eugene)
            .validate("A before", &mut collector, Limits::default(), &CancelFlag::new())
            .unwrap();
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_highlight_through_profile() {
        let profile = profile_for(LanguageId::Stl);
        let classes: Vec<_> = profile
            .highlight("G[0,1] x > 0", 0..1)
            .map(|t| t.semantic_class)
            .collect();
        assert_eq!(classes, vec!["keyword.control"]);
        assert_eq!(profile.table().classify_name("'G'"), "keyword.control");
    }
}
