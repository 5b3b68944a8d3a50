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

//! LSP backend implementation.
//!
//! Every open document gets its own task owning a [`ModeController`] bound
//! to an [`LspSurface`]. Protocol handlers only forward text to that task;
//! debouncing and validation happen in the controller's worker. Annotation
//! changes flow back through one shared outbox to a single publisher task,
//! which calls `publish_diagnostics` in the order the changes were applied.

use crate::semantic;
use crate::surface::{LspSurface, Publication};
use cello_syntax::{profile_for, LanguageId, ModeController, SyntaxConfig};
use dashmap::DashMap;
use std::path::Path;
use tokio::sync::{mpsc, RwLock};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, info, warn};

/// Message from a protocol handler to a document task.
#[derive(Debug)]
enum DocumentCommand {
    Changed(String),
    Close,
}

/// Server-side state of one open document.
#[derive(Debug)]
struct OpenDocument {
    language: LanguageId,
    text: String,
    commands: mpsc::UnboundedSender<DocumentCommand>,
}

/// Cello Language Server backend.
pub struct CelloLanguageServer {
    /// Configuration, replaced by `initializationOptions`.
    config: RwLock<SyntaxConfig>,
    /// Open Eugene and STL documents.
    documents: DashMap<Url, OpenDocument>,
    /// Outbox of the diagnostics publisher.
    outbox: mpsc::UnboundedSender<Publication>,
}

impl CelloLanguageServer {
    /// Create a server with the default configuration.
    ///
    /// Must be called within a tokio runtime; the diagnostics publisher is
    /// spawned here.
    pub fn new(client: Client) -> Self {
        Self::with_config(client, SyntaxConfig::default())
    }

    /// Create a server with `config` until the client sends its own options.
    pub fn with_config(client: Client, config: SyntaxConfig) -> Self {
        Self {
            config: RwLock::new(config),
            documents: DashMap::new(),
            outbox: spawn_publisher(client),
        }
    }

    /// Current configuration.
    pub async fn config(&self) -> SyntaxConfig {
        self.config.read().await.clone()
    }

    /// Number of documents being validated.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Language of an open document.
    pub fn document_language(&self, uri: &Url) -> Option<LanguageId> {
        self.documents.get(uri).map(|document| document.language)
    }

    async fn open(&self, uri: Url, language: LanguageId, text: String) {
        let config = self.config().await;
        let (commands, receiver) = mpsc::unbounded_channel();
        let surface = LspSurface::new(uri.clone(), text.clone(), self.outbox.clone());
        tokio::spawn(run_document(language, surface, config, receiver));

        let previous = self.documents.insert(
            uri,
            OpenDocument {
                language,
                text,
                commands,
            },
        );
        if let Some(previous) = previous {
            let _ = previous.commands.send(DocumentCommand::Close);
        }
    }
}

fn spawn_publisher(client: Client) -> mpsc::UnboundedSender<Publication> {
    let (outbox, mut publications) = mpsc::unbounded_channel::<Publication>();
    tokio::spawn(async move {
        while let Some(publication) = publications.recv().await {
            debug!(
                "Publishing {} diagnostic(s) for {}",
                publication.diagnostics.len(),
                publication.uri
            );
            client
                .publish_diagnostics(publication.uri, publication.diagnostics, None)
                .await;
        }
    });
    outbox
}

/// Drive one document until it closes.
async fn run_document(
    language: LanguageId,
    surface: LspSurface,
    config: SyntaxConfig,
    mut commands: mpsc::UnboundedReceiver<DocumentCommand>,
) {
    let uri = surface.uri().clone();
    let mut controller = ModeController::attach(language, surface, &config);
    controller.document_changed();

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(DocumentCommand::Changed(text)) => {
                    controller.session_mut().set_text(text);
                    controller.document_changed();
                }
                Some(DocumentCommand::Close) | None => break,
            },
            event = controller.next_event() => {
                if event.is_none() {
                    warn!("Validation of {} stopped unexpectedly", uri);
                    break;
                }
            }
        }
    }

    controller.close().await;
    debug!("Document task for {} finished", uri);
}

/// Language of a document, from its language id or else its file extension.
pub fn detect_language(language_id: &str, uri: &Url) -> Option<LanguageId> {
    language_id
        .parse()
        .ok()
        .or_else(|| LanguageId::from_path(Path::new(uri.path())))
}

#[tower_lsp::async_trait]
impl LanguageServer for CelloLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Cello Language Server initializing");

        if let Some(options) = params.initialization_options {
            match SyntaxConfig::from_json(options) {
                Ok(config) => {
                    debug!("Using client configuration {:?}", config);
                    *self.config.write().await = config;
                }
                Err(err) => warn!("Ignoring initialization options: {}", err),
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        will_save: None,
                        will_save_wait_until: None,
                        save: None,
                    },
                )),
                semantic_tokens_provider: Some(
                    SemanticTokensServerCapabilities::SemanticTokensOptions(
                        SemanticTokensOptions {
                            work_done_progress_options: Default::default(),
                            legend: semantic::legend(),
                            range: Some(false),
                            full: Some(SemanticTokensFullOptions::Bool(true)),
                        },
                    ),
                ),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "cello-lsp".to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("Cello Language Server initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Cello Language Server shutting down");
        for document in self.documents.iter() {
            let _ = document.commands.send(DocumentCommand::Close);
        }
        self.documents.clear();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        let Some(language) = detect_language(&document.language_id, &document.uri) else {
            info!(
                "Ignoring {} with language id '{}'",
                document.uri, document.language_id
            );
            return;
        };

        info!(
            "Document opened: {} ({}, {} bytes)",
            document.uri,
            language,
            document.text.len()
        );
        self.open(document.uri, language, document.text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let Some(change) = params.content_changes.into_iter().last() else {
            warn!("Document change event for {} had no content changes", uri);
            return;
        };

        match self.documents.get_mut(&uri) {
            Some(mut document) => {
                debug!("Document {} changed ({} bytes)", uri, change.text.len());
                document.text = change.text.clone();
                if document
                    .commands
                    .send(DocumentCommand::Changed(change.text))
                    .is_err()
                {
                    warn!("Document task for {} is gone", uri);
                }
            }
            None => debug!("Change for untracked document {}", uri),
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document closed: {}", uri);
        if let Some((_, document)) = self.documents.remove(&uri) {
            // The document task clears the diagnostics as it shuts down
            let _ = document.commands.send(DocumentCommand::Close);
        }
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let uri = params.text_document.uri;
        let Some((language, text)) = self
            .documents
            .get(&uri)
            .map(|document| (document.language, document.text.clone()))
        else {
            debug!("Semantic tokens requested for untracked document {}", uri);
            return Ok(None);
        };

        let tokens = profile_for(language).highlight(&text, 0..text.len());
        let data = semantic::encode(&text, tokens);
        debug!("Encoded {} semantic token(s) for {}", data.len(), uri);
        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
            result_id: None,
            data,
        })))
    }
}
