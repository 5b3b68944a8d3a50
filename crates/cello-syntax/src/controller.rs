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

//! Per-document façade binding highlighting and validation to a session.

use crate::config::SyntaxConfig;
use crate::diagnostic::Diagnostic;
use crate::engine::ValidationEngine;
use crate::highlight::ClassifiedToken;
use crate::profile::{profile_for, LanguageId, LanguageProfile};
use crate::worker::{ValidationWorker, WorkerEvent, WorkerStats};
use std::ops::Range;
use std::sync::Arc;
use tracing::debug;

/// The host's view of one open document.
pub trait EditingSurface {
    /// Full current text of the document.
    fn current_text(&self) -> String;

    /// Replace every annotation with `diagnostics`.
    fn set_annotations(&mut self, diagnostics: &[Diagnostic]);

    /// Replace every annotation with `diagnostics` computed from `snapshot`.
    ///
    /// Positions in `diagnostics` refer to `snapshot`, which may be older
    /// than [`current_text`](Self::current_text). Surfaces that resolve
    /// positions against the text override this.
    fn set_annotations_for(&mut self, diagnostics: &[Diagnostic], snapshot: &str) {
        let _ = snapshot;
        self.set_annotations(diagnostics);
    }

    /// Remove every annotation.
    fn clear_annotations(&mut self);
}

/// Binds one document, in one language, to a validation worker.
///
/// The controller forwards change notifications to the worker and applies
/// the worker's events to the surface. A batch older than the last one
/// applied is dropped, so the surface always shows the most recent
/// completed pass.
pub struct ModeController<S: EditingSurface> {
    profile: Arc<dyn LanguageProfile>,
    worker: Option<ValidationWorker>,
    surface: S,
    annotations: Vec<Diagnostic>,
    last_applied: u64,
}

impl<S: EditingSurface> ModeController<S> {
    /// Bind `surface` to a new worker for `language`.
    ///
    /// Must be called within a tokio runtime.
    pub fn attach(language: LanguageId, surface: S, config: &SyntaxConfig) -> Self {
        let profile = profile_for(language);
        let engine = ValidationEngine::from_profile(Arc::clone(&profile), config);
        let worker = ValidationWorker::spawn(engine, config.debounce());
        Self {
            profile,
            worker: Some(worker),
            surface,
            annotations: Vec::new(),
            last_applied: 0,
        }
    }

    /// The document's language.
    pub fn language(&self) -> LanguageId {
        self.profile.language()
    }

    /// The diagnostics currently shown.
    pub fn annotations(&self) -> &[Diagnostic] {
        &self.annotations
    }

    pub fn session(&self) -> &S {
        &self.surface
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Worker counters, if the worker is still attached.
    pub fn worker_stats(&self) -> Option<WorkerStats> {
        self.worker.as_ref().map(ValidationWorker::stats)
    }

    /// Returns `true` until the worker has terminated.
    pub fn is_active(&self) -> bool {
        self.worker.is_some()
    }

    /// The document changed: send its full text to the worker.
    pub fn document_changed(&mut self) {
        let Some(worker) = &self.worker else {
            debug!("{} document changed after termination", self.language());
            return;
        };
        let text = self.surface.current_text();
        if worker.notify_text_changed(text).is_err() {
            debug!("{} worker already closed", self.language());
        }
    }

    /// Apply one worker event to the surface.
    ///
    /// Returns `false` if the event was stale and ignored.
    pub fn apply(&mut self, event: WorkerEvent) -> bool {
        match event {
            WorkerEvent::Annotate {
                request_id,
                diagnostics,
                source,
            } => {
                if request_id <= self.last_applied {
                    debug!(
                        "Dropping stale diagnostics batch {} (latest applied {})",
                        request_id, self.last_applied
                    );
                    return false;
                }
                self.last_applied = request_id;
                self.annotations = diagnostics;
                match source {
                    Some(snapshot) => {
                        self.surface.set_annotations_for(&self.annotations, &snapshot)
                    }
                    None => self.surface.set_annotations(&self.annotations),
                }
                true
            }
            WorkerEvent::Terminated => {
                self.worker = None;
                self.annotations.clear();
                self.surface.clear_annotations();
                true
            }
        }
    }

    /// Apply every event already waiting, without blocking.
    ///
    /// Returns the number of events applied.
    pub fn poll_events(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.worker.as_mut().and_then(ValidationWorker::try_next_event) {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next worker event, apply it and return it.
    ///
    /// Returns `None` once the worker has terminated.
    pub async fn next_event(&mut self) -> Option<WorkerEvent> {
        let event = self.worker.as_mut()?.next_event().await?;
        self.apply(event.clone());
        Some(event)
    }

    /// Classified tokens of `text` overlapping `range`.
    pub fn highlight<'a>(
        &self,
        text: &'a str,
        range: Range<usize>,
    ) -> Box<dyn Iterator<Item = ClassifiedToken<'a>> + 'a> {
        self.profile.highlight(text, range)
    }

    /// The document closed: stop the worker, clear annotations and hand the
    /// surface back.
    pub async fn close(mut self) -> S {
        if let Some(worker) = self.worker.as_ref() {
            worker.terminate();
        }
        let mut cleared = false;
        while self.worker.is_some() {
            match self.next_event().await {
                Some(WorkerEvent::Terminated) => cleared = true,
                Some(_) => {}
                None => break,
            }
        }
        self.worker = None;
        if !cleared {
            self.annotations.clear();
            self.surface.clear_annotations();
        }
        self.surface
    }
}
