//! Attachment records on lessons.
//!
//! File bytes never pass through here: the file-selection side hands over
//! an [`AttachmentMeta`] that already carries a resolvable display URL.
//! No size or type policy is applied at this layer.

use crate::model::{Attachment, Course};
use crate::mutations::MutationError;
use crate::paths;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Metadata returned by the file-selection collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentMeta {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    pub mime_type: String,
    pub url: String,
}

impl AttachmentMeta {
    fn into_attachment(self, id: String) -> Attachment {
        Attachment {
            id,
            name: self.name,
            url: self.url,
            mime_type: self.mime_type,
        }
    }
}

/// Append an attachment to a lesson, returning the new course and attachment id
pub fn add_attachment(
    course: &Course,
    module_id: &str,
    unit_id: &str,
    lesson_id: &str,
    meta: &AttachmentMeta,
) -> Result<(Course, String), MutationError> {
    let mut next = course.clone();
    let lesson = paths::lesson_mut(&mut next, module_id, unit_id, lesson_id)?;
    let id = paths::fresh_id(&lesson.attachments);
    lesson.attachments.push(meta.clone().into_attachment(id.clone()));
    debug!(lesson_id, attachment_id = %id, name = %meta.name, size = meta.size, "added attachment");
    Ok((next, id))
}

pub fn remove_attachment(
    course: &Course,
    module_id: &str,
    unit_id: &str,
    lesson_id: &str,
    attachment_id: &str,
) -> Result<Course, MutationError> {
    let mut next = course.clone();
    let lesson = paths::lesson_mut(&mut next, module_id, unit_id, lesson_id)?;
    paths::remove(&mut lesson.attachments, attachment_id)?;
    debug!(lesson_id, attachment_id, "removed attachment");
    Ok(next)
}
