//! # Drag-and-Drop Moves
//!
//! Same-parent reorder and cross-parent move, driven by an explicit drag
//! state machine.
//!
//! ```text
//!            begin_drag              end_drag / drop
//!   Idle ──────────────▶ Dragging ─────────────────▶ Idle
//!                         │    ▲
//!                         └────┘ begin_drag (ignored, first drag wins)
//! ```
//!
//! ## Move Semantics
//!
//! ### Reorder
//! - Source and target must share a container
//! - The node is removed at the source index and re-inserted at the target index
//!
//! ### Cross-parent move
//! - Units move between modules, lessons between units; modules never cross-move
//! - The node is always appended at the end of the target container
//! - The total count of that node kind is unchanged

use crate::model::{Course, Identified};
use crate::mutations::MutationError;
use crate::paths::{self, ContainerPath, DragKind, NodePath};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { kind: DragKind, source: NodePath },
}

/// Where a dragged node was released
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "path", rename_all = "camelCase")]
pub enum DropTarget {
    /// Onto another node
    Sibling(NodePath),
    /// Onto a container (module or unit header)
    Container(ContainerPath),
    /// Outside any valid target
    Outside,
}

/// Move a node within its own container
pub fn reorder_same_parent(
    course: &Course,
    kind: DragKind,
    source: &NodePath,
    target: &NodePath,
) -> Result<Course, MutationError> {
    kind.check_container(&source.container)?;
    kind.check_container(&target.container)?;

    if source.container != target.container {
        return Err(MutationError::InvalidMove(format!(
            "{} and {} do not share a parent",
            source, target
        )));
    }

    let mut next = course.clone();
    match kind {
        DragKind::Module => reorder(&mut next.modules, source.index, target.index)?,
        DragKind::Unit => reorder(
            paths::units_at(&mut next, &source.container)?,
            source.index,
            target.index,
        )?,
        DragKind::Lesson => reorder(
            paths::lessons_at(&mut next, &source.container)?,
            source.index,
            target.index,
        )?,
    }

    debug!(%kind, from = %source, to = target.index, "reordered");
    Ok(next)
}

/// Move a unit or lesson to the end of another container of the same level
pub fn move_across_parent(
    course: &Course,
    kind: DragKind,
    source: &NodePath,
    target_parent: &ContainerPath,
) -> Result<Course, MutationError> {
    if kind == DragKind::Module {
        return Err(MutationError::InvalidMove(
            "modules can only be reordered".to_string(),
        ));
    }
    kind.check_container(&source.container)?;
    kind.check_container(target_parent)?;

    if source.container == *target_parent {
        return Err(MutationError::InvalidMove(format!(
            "{} is already in {}",
            source, target_parent
        )));
    }

    let mut next = course.clone();
    if kind == DragKind::Unit {
        let unit = paths::take_at(paths::units_at(&mut next, &source.container)?, source.index)?;
        append_unique(paths::units_at(&mut next, target_parent)?, unit)?;
    } else {
        let lessons = paths::lessons_at(&mut next, &source.container)?;
        let lesson = paths::take_at(lessons, source.index)?;
        append_unique(paths::lessons_at(&mut next, target_parent)?, lesson)?;
    }

    debug!(%kind, from = %source, to = %target_parent, "moved across parents");
    Ok(next)
}

fn reorder<T: Identified>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), MutationError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(MutationError::not_found(T::KIND, format!("#{}", index)));
        }
    }

    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

fn append_unique<T: Identified>(items: &mut Vec<T>, item: T) -> Result<(), MutationError> {
    if items.iter().any(|existing| existing.id() == item.id()) {
        return Err(MutationError::InvalidMove(format!(
            "target already holds a {} with id {}",
            T::KIND,
            item.id()
        )));
    }
    items.push(item);
    Ok(())
}

/// Drag state machine wrapped around the move operations
#[derive(Debug, Default)]
pub struct MoveEngine {
    state: DragState,
}

impl MoveEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start a drag. Returns `false` if a drag is already active, in which
    /// case the earlier drag stays in effect and the new request is not
    /// checked at all.
    pub fn begin_drag(&mut self, kind: DragKind, source: NodePath) -> Result<bool, MutationError> {
        if let DragState::Dragging { kind: active, source: active_source } = &self.state {
            debug!(%active, source = %active_source, "drag already active, ignoring begin_drag");
            return Ok(false);
        }

        kind.check_container(&source.container)?;
        debug!(%kind, %source, "drag started");
        self.state = DragState::Dragging { kind, source };
        Ok(true)
    }

    /// Return to `Idle` regardless of outcome
    pub fn end_drag(&mut self) {
        if self.is_dragging() {
            debug!("drag ended");
        }
        self.state = DragState::Idle;
    }

    pub fn reorder_same_parent(
        &self,
        course: &Course,
        kind: DragKind,
        source: &NodePath,
        target: &NodePath,
    ) -> Result<Course, MutationError> {
        self.ensure_active(kind, source)?;
        reorder_same_parent(course, kind, source, target)
    }

    pub fn move_across_parent(
        &self,
        course: &Course,
        kind: DragKind,
        source: &NodePath,
        target_parent: &ContainerPath,
    ) -> Result<Course, MutationError> {
        self.ensure_active(kind, source)?;
        move_across_parent(course, kind, source, target_parent)
    }

    /// Resolve a drop against the active drag and end the drag.
    ///
    /// Returns `Ok(None)` when the drop changes nothing (outside any target,
    /// onto the dragged node itself, or onto its own container).
    pub fn drop(
        &mut self,
        course: &Course,
        target: &DropTarget,
    ) -> Result<Option<Course>, MutationError> {
        let outcome = self.resolve_drop(course, target);
        self.end_drag();
        outcome
    }

    fn resolve_drop(
        &self,
        course: &Course,
        target: &DropTarget,
    ) -> Result<Option<Course>, MutationError> {
        let (kind, source) = match &self.state {
            DragState::Idle => {
                return Err(MutationError::InvalidMove("no drag in progress".to_string()))
            }
            DragState::Dragging { kind, source } => (*kind, source),
        };

        match target {
            DropTarget::Outside => Ok(None),
            DropTarget::Sibling(path) if path == source => Ok(None),
            DropTarget::Sibling(path) if path.container == source.container => {
                reorder_same_parent(course, kind, source, path).map(Some)
            }
            DropTarget::Sibling(path) => {
                move_across_parent(course, kind, source, &path.container).map(Some)
            }
            DropTarget::Container(container) if *container == source.container => Ok(None),
            DropTarget::Container(container) => {
                move_across_parent(course, kind, source, container).map(Some)
            }
        }
    }

    fn ensure_active(&self, kind: DragKind, source: &NodePath) -> Result<(), MutationError> {
        match &self.state {
            DragState::Idle => Err(MutationError::InvalidMove("no drag in progress".to_string())),
            DragState::Dragging { kind: active, .. } if *active != kind => {
                Err(MutationError::InvalidMove(format!(
                    "active drag is a {}, not a {}",
                    active, kind
                )))
            }
            DragState::Dragging { source: active, .. } if active != source => {
                Err(MutationError::InvalidMove(format!(
                    "{} is not the node being dragged ({})",
                    source, active
                )))
            }
            DragState::Dragging { .. } => Ok(()),
        }
    }
}
