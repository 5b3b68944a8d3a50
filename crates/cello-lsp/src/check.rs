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

//! Batch validation of files from the command line.

use cello_syntax::{Diagnostic, LanguageId, SyntaxConfig, ValidationEngine};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors of the `check` command.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot tell the language of {}; pass --language", .0.display())]
    UnknownLanguage(PathBuf),

    #[error("cannot write report: {0}")]
    Output(#[from] std::io::Error),

    #[error("cannot encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Diagnostics of one checked file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: LanguageId,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// One `path:line:column: severity: message` line per diagnostic.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.diagnostics
            .iter()
            .map(move |diagnostic| format!("{}:{}", self.path.display(), diagnostic))
    }
}

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Validate one file. `language` overrides detection by extension.
pub fn check_file(
    path: &Path,
    language: Option<LanguageId>,
    config: &SyntaxConfig,
) -> Result<FileReport, CheckError> {
    let language = language
        .or_else(|| LanguageId::from_path(path))
        .ok_or_else(|| CheckError::UnknownLanguage(path.to_path_buf()))?;
    let text = std::fs::read_to_string(path).map_err(|source| CheckError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let diagnostics = ValidationEngine::with_config(language, config).validate(&text);
    tracing::debug!(
        "{}: {} diagnostic(s)",
        path.display(),
        diagnostics.len()
    );
    Ok(FileReport {
        path: path.to_path_buf(),
        language,
        diagnostics,
    })
}

/// Validate `files` and write the report to `out`.
///
/// Returns the total number of diagnostics.
pub fn run(
    files: &[PathBuf],
    language: Option<LanguageId>,
    config: &SyntaxConfig,
    format: ReportFormat,
    out: &mut impl Write,
) -> Result<usize, CheckError> {
    let reports = files
        .iter()
        .map(|path| check_file(path, language, config))
        .collect::<Result<Vec<_>, _>>()?;

    match format {
        ReportFormat::Text => {
            for report in &reports {
                for line in report.lines() {
                    writeln!(out, "{}", line)?;
                }
            }
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        }
    }

    Ok(reports.iter().map(|report| report.diagnostics.len()).sum())
}
