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

//! The editing surface of one open document.

use crate::semantic::LineIndex;
use crate::DIAGNOSTIC_SOURCE;
use cello_syntax::{Diagnostic, EditingSurface, Severity};
use tokio::sync::mpsc;
use tower_lsp::lsp_types::{self, DiagnosticSeverity, Position, Range, Url};
use tracing::debug;

/// Diagnostics to publish for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    pub uri: Url,
    pub diagnostics: Vec<lsp_types::Diagnostic>,
}

/// Document text plus an outbox for annotation changes.
///
/// Every annotation change becomes one [`Publication`]. All documents share
/// the same outbox, drained by a single publisher, so publications reach the
/// client in the order they were applied.
#[derive(Debug)]
pub struct LspSurface {
    uri: Url,
    text: String,
    outbox: mpsc::UnboundedSender<Publication>,
}

impl LspSurface {
    pub fn new(uri: Url, text: String, outbox: mpsc::UnboundedSender<Publication>) -> Self {
        Self { uri, text, outbox }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the document text.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn publish_against(&self, text: &str, diagnostics: &[Diagnostic]) {
        let index = LineIndex::new(text);
        let converted = diagnostics
            .iter()
            .map(|diagnostic| to_lsp_diagnostic(text, &index, diagnostic))
            .collect();
        self.publish(converted);
    }

    fn publish(&self, diagnostics: Vec<lsp_types::Diagnostic>) {
        let publication = Publication {
            uri: self.uri.clone(),
            diagnostics,
        };
        if self.outbox.send(publication).is_err() {
            debug!("Publisher gone, dropping diagnostics for {}", self.uri);
        }
    }
}

impl EditingSurface for LspSurface {
    fn current_text(&self) -> String {
        self.text.clone()
    }

    fn set_annotations(&mut self, diagnostics: &[Diagnostic]) {
        self.publish_against(&self.text, diagnostics);
    }

    fn set_annotations_for(&mut self, diagnostics: &[Diagnostic], snapshot: &str) {
        self.publish_against(snapshot, diagnostics);
    }

    fn clear_annotations(&mut self) {
        self.publish(Vec::new());
    }
}

/// Convert a diagnostic to LSP form.
///
/// The range covers the character at the reported position, or is empty at
/// the end of a line.
pub fn to_lsp_diagnostic(
    text: &str,
    index: &LineIndex<'_>,
    diagnostic: &Diagnostic,
) -> lsp_types::Diagnostic {
    let last_row = index.position(text.len()).0 as usize;
    let (row, column) = if diagnostic.row > last_row {
        (last_row, usize::MAX)
    } else {
        (diagnostic.row, diagnostic.column)
    };
    let line = text.split('\n').nth(row).unwrap_or("");
    let (start, width) = match line.char_indices().nth(column) {
        Some((byte, ch)) if ch != '\r' => (byte, ch.len_utf16() as u32),
        Some((byte, _)) => (byte, 0),
        None => (line.len(), 0),
    };
    let character = line[..start].encode_utf16().count() as u32;
    let row = row as u32;

    lsp_types::Diagnostic {
        range: Range {
            start: Position::new(row, character),
            end: Position::new(row, character + width),
        },
        severity: Some(match diagnostic.severity {
            Severity::Error => DiagnosticSeverity::ERROR,
            Severity::Warning => DiagnosticSeverity::WARNING,
            Severity::Info => DiagnosticSeverity::INFORMATION,
        }),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: diagnostic.message.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(text: &str, diagnostic: Diagnostic) -> lsp_types::Diagnostic {
        to_lsp_diagnostic(text, &LineIndex::new(text), &diagnostic)
    }

    #[test]
    fn test_range_covers_reported_character() {
        let converted = convert("A before\nC )", Diagnostic::error(1, 2, "extraneous input ')'"));
        assert_eq!(converted.range.start, Position::new(1, 2));
        assert_eq!(converted.range.end, Position::new(1, 3));
        assert_eq!(converted.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(converted.source.as_deref(), Some("cello"));
    }

    #[test]
    fn test_end_of_input_is_empty_range() {
        let converted = convert("A before", Diagnostic::error(0, 8, "missing operand"));
        assert_eq!(converted.range.start, Position::new(0, 8));
        assert_eq!(converted.range.end, Position::new(0, 8));
    }

    #[test]
    fn test_columns_become_utf16() {
        let converted = convert("𝔸 $", Diagnostic::error(0, 2, "token recognition error at: '$'"));
        assert_eq!(converted.range.start, Position::new(0, 3));
    }

    #[test]
    fn test_row_past_end_is_clamped() {
        let converted = convert("x", Diagnostic::error(5, 0, "late"));
        assert_eq!(converted.range.start, Position::new(0, 1));
    }

    #[tokio::test]
    async fn test_annotation_changes_are_published() {
        let (outbox, mut publications) = mpsc::unbounded_channel();
        let uri = Url::parse("file:///tmp/rules.eug").unwrap();
        let mut surface = LspSurface::new(uri.clone(), "A before".to_string(), outbox);

        surface.set_annotations(&[Diagnostic::error(0, 8, "bad")]);
        surface.clear_annotations();

        let first = publications.recv().await.unwrap();
        assert_eq!(first.uri, uri);
        assert_eq!(first.diagnostics.len(), 1);
        assert!(publications.recv().await.unwrap().diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_positions_resolve_against_validated_snapshot() {
        let (outbox, mut publications) = mpsc::unbounded_channel();
        let uri = Url::parse("file:///tmp/rules.eug").unwrap();
        // The user kept typing after the pass started
        let mut surface = LspSurface::new(uri, "𝔸𝔸 x".to_string(), outbox);

        surface.set_annotations_for(
            &[
                Diagnostic::error(0, 2, "token recognition error at: '$'"),
                Diagnostic::error(1, 0, "bad"),
            ],
            "é $\nC",
        );

        let published = publications.recv().await.unwrap();
        assert_eq!(published.diagnostics[0].range.start, Position::new(0, 2));
        assert_eq!(published.diagnostics[0].range.end, Position::new(0, 3));
        assert_eq!(published.diagnostics[1].range.start, Position::new(1, 0));
        assert_eq!(published.diagnostics[1].range.end, Position::new(1, 1));
    }
}
