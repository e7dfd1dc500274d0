//! # Debounced Autosave
//!
//! Every successful edit marks the course dirty and (re)starts a quiet-period
//! timer. When the timer elapses without another edit, the latest snapshot is
//! handed to the [`PersistenceSink`]; rapid edits coalesce into one write
//! carrying only the final state.
//!
//! ```text
//!   mark_changed      mark_changed            timer elapses
//!  Saved ─────▶ Saving ──────▶ Saving (restart) ─────────▶ persist ─▶ Saved
//!                  │                                          │
//!                  └──── save_now: cancel timer, persist ─────┘
//! ```
//!
//! A failed write leaves the state at `Saving` and keeps the snapshot; the
//! next edit's timer or a manual save retries it.
//!
//! The sink is called without holding the scheduler's lock, so edits and
//! state queries never wait on a slow write. [`TokioDelayedTask`] runs the
//! flush on tokio's blocking pool. Outside a runtime it arms nothing and the
//! snapshot waits for [`AutoSaveScheduler::save_now`].

use crate::model::Course;
use crate::persistence::{Ack, PersistError, PersistenceSink};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Cancellable delayed callback
pub trait DelayedTask: Send {
    /// Run `task` after `delay`, replacing anything already scheduled
    fn schedule(&mut self, delay: Duration, task: Box<dyn FnOnce() + Send + 'static>);

    /// Drop the scheduled callback, if any. Safe to call repeatedly.
    fn cancel(&mut self);
}

/// [`DelayedTask`] backed by a spawned tokio task.
///
/// The callback runs via `spawn_blocking` so a sink doing file I/O does not
/// stall a runtime worker. When called outside a tokio runtime nothing is
/// scheduled.
#[derive(Debug, Default)]
pub struct TokioDelayedTask {
    handle: Option<JoinHandle<()>>,
}

impl TokioDelayedTask {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DelayedTask for TokioDelayedTask {
    fn schedule(&mut self, delay: Duration, task: Box<dyn FnOnce() + Send + 'static>) {
        self.cancel();
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                self.handle = Some(runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Err(e) = tokio::task::spawn_blocking(task).await {
                        warn!(error = %e, "autosave flush did not complete");
                    }
                }));
            }
            Err(_) => warn!("no tokio runtime, autosave deferred until the next manual save"),
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for TokioDelayedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Saved,
    Saving,
}

#[derive(Debug)]
struct Shared {
    state: SaveState,
    /// Latest unsaved snapshot
    pending: Option<Course>,
    /// Bumped on every change; a timer only flushes the generation it was armed for
    generation: u64,
    last_ack: Option<Ack>,
    last_error: Option<PersistError>,
}

/// Debounces persistence of course snapshots
pub struct AutoSaveScheduler<T: DelayedTask = TokioDelayedTask> {
    shared: Arc<Mutex<Shared>>,
    /// Serializes sink calls so an older snapshot never lands after a newer one
    writer: Arc<Mutex<()>>,
    sink: Arc<dyn PersistenceSink>,
    timer: T,
    debounce: Duration,
}

impl AutoSaveScheduler<TokioDelayedTask> {
    pub fn new(sink: Arc<dyn PersistenceSink>, debounce: Duration) -> Self {
        Self::with_timer(sink, debounce, TokioDelayedTask::new())
    }
}

impl<T: DelayedTask> AutoSaveScheduler<T> {
    pub fn with_timer(sink: Arc<dyn PersistenceSink>, debounce: Duration, timer: T) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                state: SaveState::Saved,
                pending: None,
                generation: 0,
                last_ack: None,
                last_error: None,
            })),
            writer: Arc::new(Mutex::new(())),
            sink,
            timer,
            debounce,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn state(&self) -> SaveState {
        lock(&self.shared).state
    }

    pub fn last_ack(&self) -> Option<Ack> {
        lock(&self.shared).last_ack.clone()
    }

    pub fn last_error(&self) -> Option<PersistError> {
        lock(&self.shared).last_error.clone()
    }

    /// Record a new snapshot and restart the quiet-period timer
    pub fn mark_changed(&mut self, course: &Course) {
        let generation = {
            let mut shared = lock(&self.shared);
            shared.state = SaveState::Saving;
            shared.pending = Some(course.clone());
            shared.generation += 1;
            shared.generation
        };

        let shared = Arc::clone(&self.shared);
        let writer = Arc::clone(&self.writer);
        let sink = Arc::clone(&self.sink);
        self.timer.schedule(
            self.debounce,
            Box::new(move || {
                let _write = lock(&writer);
                let course = {
                    let mut guard = lock(&shared);
                    if guard.generation != generation {
                        debug!(generation, "stale autosave timer, skipping");
                        return;
                    }
                    guard.pending.take()
                };
                if let Some(course) = course {
                    // Result is recorded in the shared state
                    let _ = persist(&shared, sink.as_ref(), generation, course);
                }
            }),
        );
        debug!(generation, debounce_ms = self.debounce.as_millis() as u64, "autosave scheduled");
    }

    /// Persist `course` immediately, cancelling any pending timer
    pub fn save_now(&mut self, course: &Course) -> Result<Ack, PersistError> {
        self.timer.cancel();

        let _write = lock(&self.writer);
        let generation = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.pending = None;
            shared.generation
        };
        persist(&self.shared, self.sink.as_ref(), generation, course.clone())
    }

    /// Drop any pending autosave without persisting
    pub fn cancel(&mut self) {
        self.timer.cancel();
        let mut shared = lock(&self.shared);
        shared.generation += 1;
    }
}

/// Write `course` for `generation`. The lock is only taken to record the
/// outcome; a change that arrived mid-write keeps the state at `Saving`.
fn persist(
    shared: &Mutex<Shared>,
    sink: &dyn PersistenceSink,
    generation: u64,
    course: Course,
) -> Result<Ack, PersistError> {
    let result = sink.persist(&course);

    let mut shared = lock(shared);
    let superseded = shared.generation != generation;
    match result {
        Ok(ack) => {
            info!(revision = ack.revision, "autosave persisted course");
            if !superseded {
                shared.state = SaveState::Saved;
            }
            shared.last_ack = Some(ack.clone());
            shared.last_error = None;
            Ok(ack)
        }
        Err(e) => {
            warn!(error = %e, "failed to persist course, keeping changes in memory");
            if !superseded {
                shared.state = SaveState::Saving;
                shared.pending = Some(course);
            }
            shared.last_error = Some(e.clone());
            Err(e)
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
