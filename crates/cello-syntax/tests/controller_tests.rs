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

//! A document session driven through the mode controller.

use cello_syntax::{
    Diagnostic, EditingSurface, LanguageId, ModeController, SyntaxConfig, WorkerEvent,
};
use std::time::Duration;
use tokio::time::{sleep, timeout};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct Session {
    text: String,
    annotations: Vec<Diagnostic>,
    set_calls: usize,
    clear_calls: usize,
}

impl EditingSurface for Session {
    fn current_text(&self) -> String {
        self.text.clone()
    }

    fn set_annotations(&mut self, diagnostics: &[Diagnostic]) {
        self.annotations = diagnostics.to_vec();
        self.set_calls += 1;
    }

    fn clear_annotations(&mut self) {
        self.annotations.clear();
        self.clear_calls += 1;
    }
}

fn config() -> SyntaxConfig {
    SyntaxConfig::builder().debounce_ms(20).build().unwrap()
}

fn edit(controller: &mut ModeController<Session>, text: &str) {
    controller.session_mut().text = text.to_string();
    controller.document_changed();
}

#[tokio::test]
async fn test_annotations_follow_edits() {
    let mut controller = ModeController::attach(LanguageId::Eugene, Session::default(), &config());
    assert_eq!(controller.language(), LanguageId::Eugene);

    edit(&mut controller, "A before");
    let event = timeout(WAIT, controller.next_event()).await.unwrap();
    assert!(matches!(event, Some(WorkerEvent::Annotate { request_id: 1, .. })));
    assert_eq!(controller.session().annotations.len(), 1);
    assert_eq!(controller.session().annotations[0].row, 0);

    edit(&mut controller, "A before B");
    timeout(WAIT, controller.next_event()).await.unwrap();
    // The new batch replaced the old one
    assert!(controller.session().annotations.is_empty());
    assert!(controller.annotations().is_empty());
    assert_eq!(controller.session().set_calls, 2);

    let session = controller.close().await;
    assert!(session.annotations.is_empty());
    assert!(session.clear_calls >= 1);
}

#[tokio::test]
async fn test_poll_events_applies_ready_batches() {
    let mut controller = ModeController::attach(LanguageId::Stl, Session::default(), &config());
    edit(&mut controller, "G[0,5](x >)");

    let applied = timeout(WAIT, async {
        loop {
            let applied = controller.poll_events();
            if applied > 0 {
                return applied;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    assert_eq!(applied, 1);
    assert!(!controller.session().annotations.is_empty());
    controller.close().await;
}

#[tokio::test]
async fn test_close_clears_and_stops_worker() {
    let mut controller = ModeController::attach(LanguageId::Eugene, Session::default(), &config());
    edit(&mut controller, "A before");
    timeout(WAIT, controller.next_event()).await.unwrap();
    assert_eq!(controller.session().annotations.len(), 1);

    let session = timeout(WAIT, controller.close()).await.unwrap();
    assert!(session.annotations.is_empty());
}

#[tokio::test]
async fn test_highlight_by_language() {
    let eugene = ModeController::attach(LanguageId::Eugene, Session::default(), &config());
    let stl = ModeController::attach(LanguageId::Stl, Session::default(), &config());

    let text = "G[0,5](x > 3)";
    let first: Vec<_> = stl.highlight(text, 0..1).collect();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].semantic_class, "keyword.control");

    // In the circuit language the same letter is just an identifier
    let first: Vec<_> = eugene.highlight(text, 0..1).collect();
    assert_eq!(first[0].semantic_class, "identifier");

    eugene.close().await;
    stl.close().await;
}
