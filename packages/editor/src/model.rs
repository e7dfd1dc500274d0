//! # Course Tree
//!
//! The statically-typed aggregate edited by this crate.
//!
//! ```text
//! Course
//!  └─ Module[]      (ordered)
//!      └─ Unit[]    (ordered)
//!          └─ Lesson[]        (ordered)
//!              └─ Attachment[] (ordered)
//! ```
//!
//! Every array is display/progression order. Each node has exactly one
//! owner, so removing a node drops its whole subtree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root aggregate: one course outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LessonType {
    #[default]
    Article,
    Video,
    Quiz,
    Assignment,
}

impl LessonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Article => "article",
            LessonType::Video => "video",
            LessonType::Quiz => "quiz",
            LessonType::Assignment => "assignment",
        }
    }

    /// Parse a lesson type name, ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "article" => Some(LessonType::Article),
            "video" => Some(LessonType::Video),
            "quiz" => Some(LessonType::Quiz),
            "assignment" => Some(LessonType::Assignment),
            _ => None,
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of node in the course tree (used in error context)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Course,
    Module,
    Unit,
    Lesson,
    Attachment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Course => "Course",
            EntityKind::Module => "Module",
            EntityKind::Unit => "Unit",
            EntityKind::Lesson => "Lesson",
            EntityKind::Attachment => "Attachment",
        };
        f.write_str(name)
    }
}

/// A node addressed by a sibling-unique id
pub trait Identified {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

impl Identified for Module {
    const KIND: EntityKind = EntityKind::Module;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Unit {
    const KIND: EntityKind = EntityKind::Unit;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Lesson {
    const KIND: EntityKind = EntityKind::Lesson;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Attachment {
    const KIND: EntityKind = EntityKind::Attachment;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Course {
    /// Create an empty course
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price: 0.0,
            modules: Vec::new(),
        }
    }

    pub fn module(&self, module_id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == module_id)
    }

    pub fn unit(&self, module_id: &str, unit_id: &str) -> Option<&Unit> {
        self.module(module_id)?.units.iter().find(|u| u.id == unit_id)
    }

    pub fn lesson(&self, module_id: &str, unit_id: &str, lesson_id: &str) -> Option<&Lesson> {
        self.unit(module_id, unit_id)?
            .lessons
            .iter()
            .find(|l| l.id == lesson_id)
    }

    pub fn unit_count(&self) -> usize {
        self.modules.iter().map(|m| m.units.len()).sum()
    }

    pub fn lesson_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|m| &m.units)
            .map(|u| u.lessons.len())
            .sum()
    }

    pub fn attachment_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|m| &m.units)
            .flat_map(|u| &u.lessons)
            .map(|l| l.attachments.len())
            .sum()
    }
}
