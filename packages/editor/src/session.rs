//! # Edit Session Management
//!
//! One editor session over one course.
//!
//! A `CourseSession` owns the current course value and routes every UI
//! intent through the mutation and move engines. Successful intents
//! replace the course, bump the version and feed the autosave scheduler.
//! Failed intents leave the course untouched and are reported to the
//! [`Notifier`].

use crate::autosave::{AutoSaveScheduler, DelayedTask, SaveState, TokioDelayedTask};
use crate::config::EditorConfig;
use crate::model::Course;
use crate::moves::{DragState, DropTarget, MoveEngine};
use crate::mutations::Mutation;
use crate::notifier::{Notice, Notifier};
use crate::paths::{DragKind, NodePath};
use crate::persistence::{Ack, PersistenceSink};
use crate::validator;
use crate::EditorError;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct CourseSession<T: DelayedTask = TokioDelayedTask> {
    course: Course,

    /// Increments on each applied change
    version: u64,

    config: EditorConfig,
    moves: MoveEngine,
    autosave: AutoSaveScheduler<T>,
    notifier: Arc<dyn Notifier>,
}

impl CourseSession<TokioDelayedTask> {
    /// Create a session with a tokio-driven autosave timer.
    ///
    /// Outside a tokio runtime edits still apply, but nothing autosaves;
    /// changes persist on [`save_now`](Self::save_now) or
    /// [`publish`](Self::publish).
    pub fn new(
        course: Course,
        config: EditorConfig,
        sink: Arc<dyn PersistenceSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let autosave = AutoSaveScheduler::new(sink, config.debounce());
        Self::with_autosave(course, config, autosave, notifier)
    }
}

impl<T: DelayedTask> CourseSession<T> {
    pub fn with_autosave(
        course: Course,
        config: EditorConfig,
        autosave: AutoSaveScheduler<T>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            course,
            version: 0,
            config,
            moves: MoveEngine::new(),
            autosave,
            notifier,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn save_state(&self) -> SaveState {
        self.autosave.state()
    }

    pub fn drag_state(&self) -> &DragState {
        self.moves.state()
    }

    pub fn autosave(&self) -> &AutoSaveScheduler<T> {
        &self.autosave
    }

    /// Apply an editing intent. Returns the id of the created node for add intents.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Option<String>, EditorError> {
        match mutation.apply(&self.course, &self.config.defaults) {
            Ok(applied) => {
                debug!(mutation = mutation.name(), version = self.version + 1, "mutation applied");
                self.commit(applied.course);
                Ok(applied.created_id)
            }
            Err(e) => Err(self.reject(e.into())),
        }
    }

    /// Start dragging a node. Ignored (returns `false`) while another drag is active.
    pub fn begin_drag(&mut self, kind: DragKind, source: NodePath) -> Result<bool, EditorError> {
        self.moves
            .begin_drag(kind, source)
            .map_err(|e| self.reject(e.into()))
    }

    /// Release the dragged node. The drag always ends, whatever the outcome.
    ///
    /// Returns `true` if the course changed.
    pub fn drop(&mut self, target: &DropTarget) -> Result<bool, EditorError> {
        match self.moves.drop(&self.course, target) {
            Ok(Some(course)) => {
                debug!(?target, version = self.version + 1, "drop applied");
                self.commit(course);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => Err(self.reject(e.into())),
        }
    }

    pub fn end_drag(&mut self) {
        self.moves.end_drag();
    }

    /// Persist the current course now, cancelling any pending autosave
    pub fn save_now(&mut self) -> Result<Ack, EditorError> {
        self.autosave
            .save_now(&self.course)
            .map_err(|e| self.reject(e.into()))
    }

    /// Validate the course and, if it passes, persist it immediately.
    ///
    /// A validation failure aborts before anything is written.
    pub fn publish(&mut self) -> Result<Ack, EditorError> {
        if let Err(e) = validator::validate(&self.course) {
            return Err(self.reject(e.into()));
        }

        let ack = self.save_now()?;
        info!(course_id = %self.course.id, revision = ack.revision, "course published");
        Ok(ack)
    }

    fn commit(&mut self, course: Course) {
        self.course = course;
        self.version += 1;
        self.autosave.mark_changed(&self.course);
    }

    fn reject(&self, error: EditorError) -> EditorError {
        warn!(error = %error, "intent rejected");
        let notice = if error.is_recoverable() {
            Notice::warning(error.to_string())
        } else {
            Notice::error(error.to_string())
        };
        self.notifier.notify(&notice);
        error
    }
}
