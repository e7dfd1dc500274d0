//! # Coursekit Editor
//!
//! Editing engine behind the course builder: a three-level ordered tree
//! (Module → Unit → Lesson) with attachments on lessons.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ session: UI intents → engines → new Course  │
//! └─────────────────────────────────────────────┘
//!        ↓                ↓                ↓
//! ┌─────────────┐  ┌─────────────┐  ┌─────────────┐
//! │ mutations   │  │ moves       │  │ validator   │
//! │ attachments │  │ drag state  │  │ (publish)   │
//! └─────────────┘  └─────────────┘  └─────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────┐
//! │ autosave: debounce → PersistenceSink        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Course value is source of truth**: persisted JSON is a snapshot of it
//! 2. **Pure operations**: every edit returns a new course, the input is untouched
//! 3. **Loud failures**: a missing target is `NotFound`, never a silent no-op
//! 4. **Order is meaning**: sibling order only changes through reorder/move
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coursekit_editor::{Course, CourseSession, EditorConfig, Mutation};
//!
//! let mut session = CourseSession::new(course, EditorConfig::default(), sink, notifier);
//!
//! let module_id = session.apply(Mutation::AddModule)?.unwrap();
//! session.apply(Mutation::AddUnit { module_id })?;
//!
//! // Validate and persist
//! session.publish()?;
//! ```

mod attachments;
mod autosave;
mod config;
mod errors;
pub mod fields;
mod model;
mod moves;
mod mutations;
mod notifier;
mod paths;
mod persistence;
mod session;
mod validator;

pub use attachments::{add_attachment, remove_attachment, AttachmentMeta};
pub use autosave::{AutoSaveScheduler, DelayedTask, SaveState, TokioDelayedTask};
pub use config::{EditorConfig, NodeDefaults, DEFAULT_CONFIG_NAME};
pub use errors::EditorError;
pub use model::{Attachment, Course, EntityKind, Identified, Lesson, LessonType, Module, Unit};
pub use moves::{move_across_parent, reorder_same_parent, DragState, DropTarget, MoveEngine};
pub use mutations::{
    add_lesson, add_lesson_with, add_module, add_module_with, add_unit, add_unit_with,
    delete_lesson, delete_module, delete_unit, update_course_field, update_lesson_field,
    update_module_field, update_unit_field, Applied, Mutation, MutationError,
};
pub use notifier::{Notice, NoticeLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use paths::{ContainerPath, DragKind, NodePath};
pub use persistence::{Ack, JsonFileSink, MemorySink, PersistError, PersistenceSink};
pub use session::CourseSession;
pub use validator::{validate, FailurePath, FailureReason, ValidationFailed};
