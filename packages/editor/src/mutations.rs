//! # Course Mutations
//!
//! Path-addressed create/update/delete operations on the course tree.
//!
//! ## Design Principles
//!
//! 1. **Pure**: the input course is never touched, a new course is returned
//! 2. **Validated**: a missing target is [`MutationError::NotFound`], never a silent no-op
//! 3. **Order-preserving**: siblings of the affected node keep their values and relative order
//!
//! ## Mutation Semantics
//!
//! ### Add
//! - Appends a node built from [`NodeDefaults`] with an empty child collection
//! - The new id is unique among its siblings
//!
//! ### Update
//! - Only declared fields are accepted (see [`crate::fields`])
//! - Atomic replacement of the field value
//!
//! ### Delete
//! - Removes the node and all of its descendants

use crate::attachments::{self, AttachmentMeta};
use crate::config::NodeDefaults;
use crate::fields::{CourseField, LessonField, SectionField};
use crate::model::{Course, EntityKind};
use crate::paths;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} has no field \"{field}\"")]
    InvalidField { kind: EntityKind, field: String },

    #[error("Invalid value for {kind} field \"{field}\": {reason}")]
    InvalidValue {
        kind: EntityKind,
        field: String,
        reason: String,
    },

    #[error("Invalid move: {0}")]
    InvalidMove(String),
}

impl MutationError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        MutationError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid_field(kind: EntityKind, field: impl Into<String>) -> Self {
        MutationError::InvalidField {
            kind,
            field: field.into(),
        }
    }

    pub fn invalid_value(
        kind: EntityKind,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MutationError::InvalidValue {
            kind,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Editing intents (serializable so they can cross the UI boundary)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    UpdateCourseField {
        field: String,
        value: Value,
    },

    AddModule,

    UpdateModuleField {
        module_id: String,
        field: String,
        value: Value,
    },

    DeleteModule {
        module_id: String,
    },

    AddUnit {
        module_id: String,
    },

    UpdateUnitField {
        module_id: String,
        unit_id: String,
        field: String,
        value: Value,
    },

    DeleteUnit {
        module_id: String,
        unit_id: String,
    },

    AddLesson {
        module_id: String,
        unit_id: String,
    },

    UpdateLessonField {
        module_id: String,
        unit_id: String,
        lesson_id: String,
        field: String,
        value: Value,
    },

    DeleteLesson {
        module_id: String,
        unit_id: String,
        lesson_id: String,
    },

    AddAttachment {
        module_id: String,
        unit_id: String,
        lesson_id: String,
        meta: AttachmentMeta,
    },

    RemoveAttachment {
        module_id: String,
        unit_id: String,
        lesson_id: String,
        attachment_id: String,
    },
}

/// Outcome of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub course: Course,

    /// Id of the node an add intent created
    pub created_id: Option<String>,
}

impl Applied {
    fn updated(course: Course) -> Self {
        Self {
            course,
            created_id: None,
        }
    }

    fn created(course: Course, id: String) -> Self {
        Self {
            course,
            created_id: Some(id),
        }
    }
}

impl Mutation {
    /// Apply to `course`, returning the new course
    pub fn apply(
        &self,
        course: &Course,
        defaults: &NodeDefaults,
    ) -> Result<Applied, MutationError> {
        match self {
            Mutation::UpdateCourseField { field, value } => {
                update_course_field(course, field, value).map(Applied::updated)
            }

            Mutation::AddModule => {
                let (next, id) = add_module_with(course, defaults);
                Ok(Applied::created(next, id))
            }

            Mutation::UpdateModuleField { module_id, field, value } => {
                update_module_field(course, module_id, field, value).map(Applied::updated)
            }

            Mutation::DeleteModule { module_id } => {
                delete_module(course, module_id).map(Applied::updated)
            }

            Mutation::AddUnit { module_id } => {
                let (next, id) = add_unit_with(course, module_id, defaults)?;
                Ok(Applied::created(next, id))
            }

            Mutation::UpdateUnitField { module_id, unit_id, field, value } => {
                update_unit_field(course, module_id, unit_id, field, value).map(Applied::updated)
            }

            Mutation::DeleteUnit { module_id, unit_id } => {
                delete_unit(course, module_id, unit_id).map(Applied::updated)
            }

            Mutation::AddLesson { module_id, unit_id } => {
                let (next, id) = add_lesson_with(course, module_id, unit_id, defaults)?;
                Ok(Applied::created(next, id))
            }

            Mutation::UpdateLessonField { module_id, unit_id, lesson_id, field, value } => {
                update_lesson_field(course, module_id, unit_id, lesson_id, field, value)
                    .map(Applied::updated)
            }

            Mutation::DeleteLesson { module_id, unit_id, lesson_id } => {
                delete_lesson(course, module_id, unit_id, lesson_id).map(Applied::updated)
            }

            Mutation::AddAttachment { module_id, unit_id, lesson_id, meta } => {
                let (next, id) =
                    attachments::add_attachment(course, module_id, unit_id, lesson_id, meta)?;
                Ok(Applied::created(next, id))
            }

            Mutation::RemoveAttachment { module_id, unit_id, lesson_id, attachment_id } => {
                attachments::remove_attachment(course, module_id, unit_id, lesson_id, attachment_id)
                    .map(Applied::updated)
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, course: &Course) -> Result<(), MutationError> {
        match self {
            Mutation::UpdateCourseField { field, .. } => {
                CourseField::parse(field)?;
                Ok(())
            }

            Mutation::AddModule => Ok(()),

            Mutation::UpdateModuleField { module_id, field, .. } => {
                SectionField::parse(EntityKind::Module, field)?;
                paths::find(&course.modules, module_id)?;
                Ok(())
            }

            Mutation::DeleteModule { module_id } | Mutation::AddUnit { module_id } => {
                paths::find(&course.modules, module_id)?;
                Ok(())
            }

            Mutation::UpdateUnitField { module_id, unit_id, field, .. } => {
                SectionField::parse(EntityKind::Unit, field)?;
                let module = paths::find(&course.modules, module_id)?;
                paths::find(&module.units, unit_id)?;
                Ok(())
            }

            Mutation::DeleteUnit { module_id, unit_id }
            | Mutation::AddLesson { module_id, unit_id } => {
                let module = paths::find(&course.modules, module_id)?;
                paths::find(&module.units, unit_id)?;
                Ok(())
            }

            Mutation::UpdateLessonField { module_id, unit_id, lesson_id, field, .. } => {
                LessonField::parse(field)?;
                paths::lesson(course, module_id, unit_id, lesson_id)?;
                Ok(())
            }

            Mutation::DeleteLesson { module_id, unit_id, lesson_id }
            | Mutation::AddAttachment { module_id, unit_id, lesson_id, .. } => {
                paths::lesson(course, module_id, unit_id, lesson_id)?;
                Ok(())
            }

            Mutation::RemoveAttachment { module_id, unit_id, lesson_id, attachment_id } => {
                let lesson = paths::lesson(course, module_id, unit_id, lesson_id)?;
                paths::find(&lesson.attachments, attachment_id)?;
                Ok(())
            }
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::UpdateCourseField { .. } => "UpdateCourseField",
            Mutation::AddModule => "AddModule",
            Mutation::UpdateModuleField { .. } => "UpdateModuleField",
            Mutation::DeleteModule { .. } => "DeleteModule",
            Mutation::AddUnit { .. } => "AddUnit",
            Mutation::UpdateUnitField { .. } => "UpdateUnitField",
            Mutation::DeleteUnit { .. } => "DeleteUnit",
            Mutation::AddLesson { .. } => "AddLesson",
            Mutation::UpdateLessonField { .. } => "UpdateLessonField",
            Mutation::DeleteLesson { .. } => "DeleteLesson",
            Mutation::AddAttachment { .. } => "AddAttachment",
            Mutation::RemoveAttachment { .. } => "RemoveAttachment",
        }
    }
}

pub fn update_course_field(
    course: &Course,
    field: &str,
    value: &Value,
) -> Result<Course, MutationError> {
    let field = CourseField::parse(field)?;
    let mut next = course.clone();
    field.assign(&mut next, value)?;
    Ok(next)
}

/// Append a module with placeholder values
pub fn add_module(course: &Course) -> (Course, String) {
    add_module_with(course, &NodeDefaults::default())
}

pub fn add_module_with(course: &Course, defaults: &NodeDefaults) -> (Course, String) {
    let mut next = course.clone();
    let id = paths::fresh_id(&next.modules);
    next.modules.push(defaults.module(id.clone()));
    debug!(module_id = %id, "added module");
    (next, id)
}

pub fn update_module_field(
    course: &Course,
    module_id: &str,
    field: &str,
    value: &Value,
) -> Result<Course, MutationError> {
    let field = SectionField::parse(EntityKind::Module, field)?;
    let mut next = course.clone();
    let module = paths::module_mut(&mut next, module_id)?;
    field.assign(
        EntityKind::Module,
        &mut module.title,
        &mut module.description,
        &mut module.duration,
        value,
    )?;
    Ok(next)
}

/// Remove a module together with its units, lessons and attachments
pub fn delete_module(course: &Course, module_id: &str) -> Result<Course, MutationError> {
    let mut next = course.clone();
    let removed = paths::remove(&mut next.modules, module_id)?;
    debug!(module_id, units = removed.units.len(), "deleted module");
    Ok(next)
}

pub fn add_unit(course: &Course, module_id: &str) -> Result<(Course, String), MutationError> {
    add_unit_with(course, module_id, &NodeDefaults::default())
}

pub fn add_unit_with(
    course: &Course,
    module_id: &str,
    defaults: &NodeDefaults,
) -> Result<(Course, String), MutationError> {
    let mut next = course.clone();
    let module = paths::module_mut(&mut next, module_id)?;
    let id = paths::fresh_id(&module.units);
    module.units.push(defaults.unit(id.clone()));
    debug!(module_id, unit_id = %id, "added unit");
    Ok((next, id))
}

pub fn update_unit_field(
    course: &Course,
    module_id: &str,
    unit_id: &str,
    field: &str,
    value: &Value,
) -> Result<Course, MutationError> {
    let field = SectionField::parse(EntityKind::Unit, field)?;
    let mut next = course.clone();
    let unit = paths::unit_mut(&mut next, module_id, unit_id)?;
    field.assign(
        EntityKind::Unit,
        &mut unit.title,
        &mut unit.description,
        &mut unit.duration,
        value,
    )?;
    Ok(next)
}

/// Remove a unit together with its lessons and attachments
pub fn delete_unit(
    course: &Course,
    module_id: &str,
    unit_id: &str,
) -> Result<Course, MutationError> {
    let mut next = course.clone();
    let module = paths::module_mut(&mut next, module_id)?;
    let removed = paths::remove(&mut module.units, unit_id)?;
    debug!(module_id, unit_id, lessons = removed.lessons.len(), "deleted unit");
    Ok(next)
}

pub fn add_lesson(
    course: &Course,
    module_id: &str,
    unit_id: &str,
) -> Result<(Course, String), MutationError> {
    add_lesson_with(course, module_id, unit_id, &NodeDefaults::default())
}

pub fn add_lesson_with(
    course: &Course,
    module_id: &str,
    unit_id: &str,
    defaults: &NodeDefaults,
) -> Result<(Course, String), MutationError> {
    let mut next = course.clone();
    let unit = paths::unit_mut(&mut next, module_id, unit_id)?;
    let id = paths::fresh_id(&unit.lessons);
    unit.lessons.push(defaults.lesson(id.clone()));
    debug!(module_id, unit_id, lesson_id = %id, "added lesson");
    Ok((next, id))
}

pub fn update_lesson_field(
    course: &Course,
    module_id: &str,
    unit_id: &str,
    lesson_id: &str,
    field: &str,
    value: &Value,
) -> Result<Course, MutationError> {
    let field = LessonField::parse(field)?;
    let mut next = course.clone();
    let lesson = paths::lesson_mut(&mut next, module_id, unit_id, lesson_id)?;
    field.assign(lesson, value)?;
    Ok(next)
}

pub fn delete_lesson(
    course: &Course,
    module_id: &str,
    unit_id: &str,
    lesson_id: &str,
) -> Result<Course, MutationError> {
    let mut next = course.clone();
    let unit = paths::unit_mut(&mut next, module_id, unit_id)?;
    paths::remove(&mut unit.lessons, lesson_id)?;
    debug!(module_id, unit_id, lesson_id, "deleted lesson");
    Ok(next)
}
