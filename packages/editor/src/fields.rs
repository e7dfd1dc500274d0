//! Declared, editable fields per node kind.
//!
//! Field names arrive as strings from form inputs; anything not declared
//! here is rejected with [`MutationError::InvalidField`] before the tree is
//! touched. Values are checked for shape and rejected with
//! [`MutationError::InvalidValue`].

use crate::model::{Course, EntityKind, Lesson, LessonType};
use crate::mutations::MutationError;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Title,
    Description,
    Price,
}

/// Fields shared by modules and units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionField {
    Title,
    Description,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonField {
    Title,
    Type,
    Duration,
    Content,
    VideoUrl,
}

impl CourseField {
    pub fn parse(name: &str) -> Result<Self, MutationError> {
        match name {
            "title" => Ok(CourseField::Title),
            "description" => Ok(CourseField::Description),
            "price" => Ok(CourseField::Price),
            _ => Err(MutationError::invalid_field(EntityKind::Course, name)),
        }
    }

    pub(crate) fn assign(self, course: &mut Course, value: &Value) -> Result<(), MutationError> {
        let kind = EntityKind::Course;
        match self {
            CourseField::Title => course.title = expect_string(kind, "title", value)?,
            CourseField::Description => {
                course.description = expect_string(kind, "description", value)?
            }
            CourseField::Price => course.price = expect_price(value)?,
        }
        Ok(())
    }
}

impl SectionField {
    pub fn parse(kind: EntityKind, name: &str) -> Result<Self, MutationError> {
        match name {
            "title" => Ok(SectionField::Title),
            "description" => Ok(SectionField::Description),
            "duration" => Ok(SectionField::Duration),
            _ => Err(MutationError::invalid_field(kind, name)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SectionField::Title => "title",
            SectionField::Description => "description",
            SectionField::Duration => "duration",
        }
    }

    /// Write `value` into whichever of the three slots this field names
    pub(crate) fn assign(
        self,
        kind: EntityKind,
        title: &mut String,
        description: &mut String,
        duration: &mut String,
        value: &Value,
    ) -> Result<(), MutationError> {
        let text = expect_string(kind, self.name(), value)?;
        match self {
            SectionField::Title => *title = text,
            SectionField::Description => *description = text,
            SectionField::Duration => *duration = text,
        }
        Ok(())
    }
}

impl LessonField {
    pub fn parse(name: &str) -> Result<Self, MutationError> {
        match name {
            "title" => Ok(LessonField::Title),
            "type" => Ok(LessonField::Type),
            "duration" => Ok(LessonField::Duration),
            "content" => Ok(LessonField::Content),
            "videoUrl" => Ok(LessonField::VideoUrl),
            _ => Err(MutationError::invalid_field(EntityKind::Lesson, name)),
        }
    }

    pub(crate) fn assign(self, lesson: &mut Lesson, value: &Value) -> Result<(), MutationError> {
        let kind = EntityKind::Lesson;
        match self {
            LessonField::Title => lesson.title = expect_string(kind, "title", value)?,
            LessonField::Duration => lesson.duration = expect_string(kind, "duration", value)?,
            LessonField::Type => lesson.lesson_type = expect_lesson_type(value)?,
            LessonField::Content => {
                lesson.content = expect_optional_string(kind, "content", value)?
            }
            LessonField::VideoUrl => {
                lesson.video_url = expect_optional_string(kind, "videoUrl", value)?
            }
        }
        Ok(())
    }
}

fn expect_string(kind: EntityKind, field: &str, value: &Value) -> Result<String, MutationError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| MutationError::invalid_value(kind, field, "expected a string"))
}

fn expect_optional_string(
    kind: EntityKind,
    field: &str,
    value: &Value,
) -> Result<Option<String>, MutationError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(MutationError::invalid_value(kind, field, "expected a string or null")),
    }
}

fn expect_price(value: &Value) -> Result<f64, MutationError> {
    // Form inputs may hand over the raw text of a number field
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match price {
        Some(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(MutationError::invalid_value(
            EntityKind::Course,
            "price",
            "expected a non-negative number",
        )),
    }
}

fn expect_lesson_type(value: &Value) -> Result<LessonType, MutationError> {
    value.as_str().and_then(LessonType::parse).ok_or_else(|| {
        MutationError::invalid_value(
            EntityKind::Lesson,
            "type",
            "expected one of article, video, quiz, assignment",
        )
    })
}
