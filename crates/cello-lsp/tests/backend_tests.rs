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

//! Protocol handler tests against the server backend.

use cello_lsp::CelloLanguageServer;
use cello_syntax::LanguageId;
use serde_json::json;
use tower_lsp::lsp_types::*;
use tower_lsp::{LanguageServer, LspService};

macro_rules! test_server {
    () => {{
        let (service, _socket) = LspService::new(CelloLanguageServer::new);
        service
    }};
}

fn open_params(path: &str, language_id: &str, text: &str) -> DidOpenTextDocumentParams {
    DidOpenTextDocumentParams {
        text_document: TextDocumentItem::new(
            Url::parse(&format!("file://{}", path)).unwrap(),
            language_id.to_string(),
            1,
            text.to_string(),
        ),
    }
}

fn semantic_params(uri: &Url) -> SemanticTokensParams {
    SemanticTokensParams {
        work_done_progress_params: Default::default(),
        partial_result_params: Default::default(),
        text_document: TextDocumentIdentifier::new(uri.clone()),
    }
}

#[tokio::test]
async fn test_initialize_capabilities() {
    let service = test_server!();
    let server = service.inner();

    let result = server.initialize(InitializeParams::default()).await.unwrap();
    let Some(TextDocumentSyncCapability::Options(sync)) = result.capabilities.text_document_sync
    else {
        panic!("expected text document sync options");
    };
    assert_eq!(sync.open_close, Some(true));
    assert_eq!(sync.change, Some(TextDocumentSyncKind::FULL));
    assert!(result.capabilities.semantic_tokens_provider.is_some());
    assert_eq!(result.server_info.unwrap().name, "cello-lsp");
}

#[tokio::test]
async fn test_initialization_options_configure_server() {
    let service = test_server!();
    let server = service.inner();

    let params = InitializeParams {
        initialization_options: Some(json!({ "debounceMs": 50 })),
        ..Default::default()
    };
    server.initialize(params).await.unwrap();
    assert_eq!(server.config().await.debounce_ms, 50);
}

#[tokio::test]
async fn test_invalid_initialization_options_fall_back() {
    let service = test_server!();
    let server = service.inner();

    let params = InitializeParams {
        initialization_options: Some(json!({ "debounceMs": "soon" })),
        ..Default::default()
    };
    assert!(server.initialize(params).await.is_ok());
    assert_eq!(server.config().await.debounce_ms, 200);
}

#[tokio::test]
async fn test_open_change_close() {
    let service = test_server!();
    let server = service.inner();

    let params = open_params("/tmp/rules.eug", "eugene", "A before");
    let uri = params.text_document.uri.clone();
    server.did_open(params).await;
    assert_eq!(server.document_language(&uri), Some(LanguageId::Eugene));

    server
        .did_change(DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier::new(uri.clone(), 2),
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "A before B".to_string(),
            }],
        })
        .await;

    let tokens = server
        .semantic_tokens_full(semantic_params(&uri))
        .await
        .unwrap();
    match tokens {
        Some(SemanticTokensResult::Tokens(tokens)) => assert_eq!(tokens.data.len(), 3),
        other => panic!("unexpected semantic tokens {:?}", other),
    }

    server
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier::new(uri.clone()),
        })
        .await;
    assert_eq!(server.document_count(), 0);
}

#[tokio::test]
async fn test_language_from_extension() {
    let service = test_server!();
    let server = service.inner();

    let params = open_params("/tmp/goal.stl", "plaintext", "G[0,5](x > 3)");
    let uri = params.text_document.uri.clone();
    server.did_open(params).await;
    assert_eq!(server.document_language(&uri), Some(LanguageId::Stl));
}

#[tokio::test]
async fn test_other_languages_are_ignored() {
    let service = test_server!();
    let server = service.inner();

    let params = open_params("/tmp/readme.md", "markdown", "# notes");
    let uri = params.text_document.uri.clone();
    server.did_open(params).await;
    assert_eq!(server.document_count(), 0);
    assert!(server
        .semantic_tokens_full(semantic_params(&uri))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_shutdown_closes_documents() {
    let service = test_server!();
    let server = service.inner();

    server
        .did_open(open_params("/tmp/a.eug", "eugene", "A before B"))
        .await;
    server
        .did_open(open_params("/tmp/b.stl", "stl", "x > 1"))
        .await;
    assert_eq!(server.document_count(), 2);

    server.shutdown().await.unwrap();
    assert_eq!(server.document_count(), 0);
}
