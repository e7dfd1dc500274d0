//! # Tree Addressing
//!
//! Typed paths into the course tree plus the lens helpers that resolve them
//! to mutable children. All operations go through these helpers so that a
//! missing node is always reported as [`MutationError::NotFound`].
//!
//! - [`ContainerPath`] names an ordered child array
//! - [`NodePath`] names one node by its position in a container

use crate::model::{Course, EntityKind, Identified, Lesson, Module, Unit};
use crate::mutations::MutationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered child collection in the tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ContainerPath {
    /// `course.modules`
    Course,
    /// `module.units`
    Module { module_id: String },
    /// `unit.lessons`
    Unit { module_id: String, unit_id: String },
}

impl ContainerPath {
    pub fn module(module_id: impl Into<String>) -> Self {
        ContainerPath::Module {
            module_id: module_id.into(),
        }
    }

    pub fn unit(module_id: impl Into<String>, unit_id: impl Into<String>) -> Self {
        ContainerPath::Unit {
            module_id: module_id.into(),
            unit_id: unit_id.into(),
        }
    }

    /// Kind of node this container holds
    pub fn child_kind(&self) -> DragKind {
        match self {
            ContainerPath::Course => DragKind::Module,
            ContainerPath::Module { .. } => DragKind::Unit,
            ContainerPath::Unit { .. } => DragKind::Lesson,
        }
    }

    pub fn at(self, index: usize) -> NodePath {
        NodePath {
            container: self,
            index,
        }
    }
}

impl fmt::Display for ContainerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerPath::Course => write!(f, "course"),
            ContainerPath::Module { module_id } => write!(f, "module {}", module_id),
            ContainerPath::Unit { module_id, unit_id } => {
                write!(f, "unit {}/{}", module_id, unit_id)
            }
        }
    }
}

/// One node, addressed by its position within a container
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath {
    pub container: ContainerPath,
    pub index: usize,
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.container, self.index)
    }
}

/// Node kinds that can be dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Module,
    Unit,
    Lesson,
}

impl DragKind {
    pub fn entity(&self) -> EntityKind {
        match self {
            DragKind::Module => EntityKind::Module,
            DragKind::Unit => EntityKind::Unit,
            DragKind::Lesson => EntityKind::Lesson,
        }
    }

    /// Fail unless `container` holds nodes of this kind
    pub fn check_container(&self, container: &ContainerPath) -> Result<(), MutationError> {
        if container.child_kind() == *self {
            Ok(())
        } else {
            Err(MutationError::InvalidMove(format!(
                "{} cannot live in {}",
                self.entity(),
                container
            )))
        }
    }
}

impl fmt::Display for DragKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.entity(), f)
    }
}

pub(crate) fn find<'a, T: Identified>(items: &'a [T], id: &str) -> Result<&'a T, MutationError> {
    items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| MutationError::not_found(T::KIND, id))
}

pub(crate) fn find_mut<'a, T: Identified>(
    items: &'a mut [T],
    id: &str,
) -> Result<&'a mut T, MutationError> {
    items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| MutationError::not_found(T::KIND, id))
}

/// Remove a node by id, keeping the order of the remaining siblings
pub(crate) fn remove<T: Identified>(items: &mut Vec<T>, id: &str) -> Result<T, MutationError> {
    let pos = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| MutationError::not_found(T::KIND, id))?;
    Ok(items.remove(pos))
}

/// Remove a node by position
pub(crate) fn take_at<T: Identified>(items: &mut Vec<T>, index: usize) -> Result<T, MutationError> {
    if index < items.len() {
        Ok(items.remove(index))
    } else {
        Err(MutationError::not_found(T::KIND, format!("#{}", index)))
    }
}

/// Generate an id that no sibling already uses
pub(crate) fn fresh_id<T: Identified>(siblings: &[T]) -> String {
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if siblings.iter().all(|s| s.id() != id) {
            return id;
        }
    }
}

pub(crate) fn module_mut<'a>(
    course: &'a mut Course,
    module_id: &str,
) -> Result<&'a mut Module, MutationError> {
    find_mut(&mut course.modules, module_id)
}

pub(crate) fn unit_mut<'a>(
    course: &'a mut Course,
    module_id: &str,
    unit_id: &str,
) -> Result<&'a mut Unit, MutationError> {
    find_mut(&mut module_mut(course, module_id)?.units, unit_id)
}

pub(crate) fn lesson_mut<'a>(
    course: &'a mut Course,
    module_id: &str,
    unit_id: &str,
    lesson_id: &str,
) -> Result<&'a mut Lesson, MutationError> {
    find_mut(&mut unit_mut(course, module_id, unit_id)?.lessons, lesson_id)
}

pub(crate) fn lesson<'a>(
    course: &'a Course,
    module_id: &str,
    unit_id: &str,
    lesson_id: &str,
) -> Result<&'a Lesson, MutationError> {
    let module = find(&course.modules, module_id)?;
    let unit = find(&module.units, unit_id)?;
    find(&unit.lessons, lesson_id)
}

pub(crate) fn units_at<'a>(
    course: &'a mut Course,
    container: &ContainerPath,
) -> Result<&'a mut Vec<Unit>, MutationError> {
    match container {
        ContainerPath::Module { module_id } => Ok(&mut module_mut(course, module_id)?.units),
        other => Err(MutationError::InvalidMove(format!("{} does not hold units", other))),
    }
}

pub(crate) fn lessons_at<'a>(
    course: &'a mut Course,
    container: &ContainerPath,
) -> Result<&'a mut Vec<Lesson>, MutationError> {
    match container {
        ContainerPath::Unit { module_id, unit_id } => {
            Ok(&mut unit_mut(course, module_id, unit_id)?.lessons)
        }
        other => Err(MutationError::InvalidMove(format!("{} does not hold lessons", other))),
    }
}
