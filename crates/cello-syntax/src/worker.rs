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

//! Background validation worker.
//!
//! Each worker is a tokio task that owns one [`ValidationEngine`] and talks
//! to its owner only through channels. Its states:
//!
//! - **Idle**: no text pending. A change arms the debounce timer.
//! - **Pending**: a change arrived less than one debounce period ago. Every
//!   further change replaces the pending text and re-arms the timer, so only
//!   the latest text is ever validated.
//! - **Validating**: the timer fired. The pass runs on the blocking pool
//!   under a [`CancelFlag`]; changes arriving meanwhile become the next
//!   pending text. Each completed pass emits one [`WorkerEvent::Annotate`]
//!   stamped with an increasing request id.
//! - **Terminated**: after [`ValidationWorker::terminate`], a closed command
//!   channel, or a fault of the worker itself. Any pass in flight is
//!   cancelled, [`WorkerEvent::Terminated`] is emitted exactly once and no
//!   event follows it.

use crate::diagnostic::Diagnostic;
use crate::engine::{ValidationEngine, ValidationOutcome, ValidationRequest};
use crate::error::{SyntaxError, SyntaxResult};
use cello_grammar::CancelFlag;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

/// Something the worker reports to its owner.
///
/// The serialized form is tagged by `kind`. `errors` and `diagnostics` are
/// accepted as synonyms of `annotate`, `terminated` of `terminate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WorkerEvent {
    /// Diagnostics of a completed pass; they replace any shown before.
    #[serde(rename = "annotate", alias = "errors", alias = "diagnostics")]
    Annotate {
        request_id: u64,
        diagnostics: Vec<Diagnostic>,
        /// The text the pass validated. Diagnostic positions refer to it.
        #[serde(skip)]
        source: Option<Arc<str>>,
    },
    /// The worker stopped; annotations should be cleared.
    #[serde(rename = "terminate", alias = "terminated")]
    Terminated,
}

#[derive(Debug)]
enum Command {
    TextChanged(String),
    Terminate,
}

#[derive(Debug, Default)]
struct Counters {
    changes_received: AtomicU64,
    passes_run: AtomicU64,
    passes_cancelled: AtomicU64,
}

/// Worker activity counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerStats {
    /// Change notifications received.
    pub changes_received: u64,
    /// Validation passes that completed.
    pub passes_run: u64,
    /// Validation passes cancelled while in flight.
    pub passes_cancelled: u64,
}

/// Handle to a background validation task.
///
/// Dropping the handle terminates the task.
#[derive(Debug)]
pub struct ValidationWorker {
    commands: mpsc::UnboundedSender<Command>,
    events: mpsc::UnboundedReceiver<WorkerEvent>,
    counters: Arc<Counters>,
    task: JoinHandle<()>,
}

impl ValidationWorker {
    /// Spawn a worker on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, like [`tokio::spawn`].
    pub fn spawn(engine: ValidationEngine, debounce: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());

        info!(
            "Starting {} validation worker (debounce {:?})",
            engine.language(),
            debounce
        );
        let task = tokio::spawn(run(
            engine,
            debounce,
            command_rx,
            event_tx,
            Arc::clone(&counters),
        ));

        Self {
            commands: command_tx,
            events: event_rx,
            counters,
            task,
        }
    }

    /// Submit the full current text. Validation happens once changes stop
    /// arriving for one debounce period.
    ///
    /// Returns [`SyntaxError::WorkerClosed`] once the worker has terminated.
    pub fn notify_text_changed(&self, text: impl Into<String>) -> SyntaxResult<()> {
        self.commands
            .send(Command::TextChanged(text.into()))
            .map_err(|_| SyntaxError::WorkerClosed)
    }

    /// Stop the worker. Idempotent.
    pub fn terminate(&self) {
        // The task may already be gone, in which case there is nothing to stop
        let _ = self.commands.send(Command::Terminate);
    }

    /// Wait for the next event. `None` once `Terminated` has been received.
    pub async fn next_event(&mut self) -> Option<WorkerEvent> {
        self.events.recv().await
    }

    /// Take the next event if one is ready.
    pub fn try_next_event(&mut self) -> Option<WorkerEvent> {
        self.events.try_recv().ok()
    }

    /// Returns `true` once the worker task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Snapshot of the activity counters.
    pub fn stats(&self) -> WorkerStats {
        WorkerStats {
            changes_received: self.counters.changes_received.load(Ordering::Relaxed),
            passes_run: self.counters.passes_run.load(Ordering::Relaxed),
            passes_cancelled: self.counters.passes_cancelled.load(Ordering::Relaxed),
        }
    }
}

impl Drop for ValidationWorker {
    fn drop(&mut self) {
        self.terminate();
    }
}

struct Pending {
    text: String,
    deadline: Instant,
}

enum PassEnd {
    Completed(ValidationOutcome),
    Cancelled,
    Terminated,
    Fault,
}

async fn run(
    engine: ValidationEngine,
    debounce: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<WorkerEvent>,
    counters: Arc<Counters>,
) {
    let language = engine.language();
    let mut pending: Option<Pending> = None;
    let mut last_request_id = 0u64;

    loop {
        let deadline = pending.as_ref().map(|p| p.deadline);
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::TextChanged(text)) => {
                    counters.changes_received.fetch_add(1, Ordering::Relaxed);
                    pending = Some(Pending { text, deadline: Instant::now() + debounce });
                }
                Some(Command::Terminate) | None => break,
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                let Some(Pending { text, .. }) = pending.take() else {
                    continue;
                };
                last_request_id += 1;
                let snapshot: Arc<str> = Arc::from(text.as_str());
                let request = ValidationRequest::new(text, last_request_id);

                match validate(&engine, request, &mut commands, &mut pending, debounce, &counters).await {
                    PassEnd::Completed(outcome) => {
                        counters.passes_run.fetch_add(1, Ordering::Relaxed);
                        let event = WorkerEvent::Annotate {
                            request_id: outcome.request_id,
                            diagnostics: outcome.diagnostics,
                            source: Some(snapshot),
                        };
                        if events.send(event).is_err() {
                            debug!("{} worker owner went away", language);
                            return;
                        }
                    }
                    PassEnd::Cancelled => {
                        counters.passes_cancelled.fetch_add(1, Ordering::Relaxed);
                    }
                    PassEnd::Terminated => {
                        counters.passes_cancelled.fetch_add(1, Ordering::Relaxed);
                        break;
                    }
                    PassEnd::Fault => break,
                }
            }
        }
    }

    commands.close();
    info!("{} validation worker terminated", language);
    let _ = events.send(WorkerEvent::Terminated);
}

/// Run one pass on the blocking pool while still listening for commands.
async fn validate(
    engine: &ValidationEngine,
    request: ValidationRequest,
    commands: &mut mpsc::UnboundedReceiver<Command>,
    pending: &mut Option<Pending>,
    debounce: Duration,
    counters: &Counters,
) -> PassEnd {
    let cancel = CancelFlag::new();
    let mut pass = {
        let engine = engine.clone();
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || engine.validate_request(&request, &cancel))
    };

    loop {
        tokio::select! {
            joined = &mut pass => {
                return match joined {
                    Ok(Ok(outcome)) => PassEnd::Completed(outcome),
                    Ok(Err(_)) => PassEnd::Cancelled,
                    Err(err) => {
                        warn!("{} validation pass failed: {}", engine.language(), err);
                        PassEnd::Fault
                    }
                };
            }
            command = commands.recv() => match command {
                Some(Command::TextChanged(text)) => {
                    counters.changes_received.fetch_add(1, Ordering::Relaxed);
                    *pending = Some(Pending { text, deadline: Instant::now() + debounce });
                }
                Some(Command::Terminate) | None => {
                    cancel.cancel();
                    return PassEnd::Terminated;
                }
            },
        }
    }
}
