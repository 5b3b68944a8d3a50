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

//! Cello Language Server binary.
//!
//! # Usage
//!
//! ```bash
//! # Run the language server (stdio transport)
//! cello-lsp
//!
//! # Check files, exiting non-zero on any diagnostic
//! cello-lsp check rules.eug properties.stl
//!
//! # With debug logging
//! RUST_LOG=debug cello-lsp
//! ```

use cello_lsp::check::{self, ReportFormat};
use cello_lsp::CelloLanguageServer;
use cello_syntax::{LanguageId, SyntaxConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

/// Language server and checker for the Cello design languages
#[derive(Parser)]
#[command(name = "cello-lsp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the language server over stdio (default)
    Serve,

    /// Validate files and print their diagnostics
    Check {
        /// Files to check
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Language of every file, instead of detecting it by extension
        #[arg(short, long, value_name = "eugene|stl")]
        language: Option<LanguageId>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logging goes to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cello_lsp=info,cello_syntax=info,tower_lsp=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => {
            serve().await;
            ExitCode::SUCCESS
        }
        Command::Check {
            files,
            language,
            json,
        } => {
            let format = if json {
                ReportFormat::Json
            } else {
                ReportFormat::Text
            };
            let mut stdout = std::io::stdout().lock();
            match check::run(&files, language, &SyntaxConfig::default(), format, &mut stdout) {
                Ok(0) => ExitCode::SUCCESS,
                Ok(_) => ExitCode::FAILURE,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

async fn serve() {
    tracing::info!("Starting Cello Language Server v{}", cello_lsp::VERSION);

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(CelloLanguageServer::new);

    Server::new(stdin, stdout, socket).serve(service).await;
}
