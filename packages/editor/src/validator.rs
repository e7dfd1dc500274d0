//! # Publish Validation
//!
//! Structural checks that gate publishing. The tree is walked depth-first
//! in array order and the first violation is reported; nothing is
//! aggregated and nothing is published when a check fails.
//!
//! 1. the course has at least one module
//! 2. every module has at least one unit
//! 3. every unit has at least one lesson

use crate::model::Course;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where in the tree validation stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "at", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FailurePath {
    Root,
    Module {
        module_id: String,
        module_title: String,
    },
    Unit {
        module_id: String,
        module_title: String,
        unit_id: String,
        unit_title: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    NoModules,
    NoUnits,
    NoLessons,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", describe(.path, .reason))]
pub struct ValidationFailed {
    pub path: FailurePath,
    pub reason: FailureReason,
}

fn describe(path: &FailurePath, reason: &FailureReason) -> String {
    match (path, reason) {
        (FailurePath::Module { module_title, .. }, FailureReason::NoUnits) => {
            format!("Module \"{}\" has no units", module_title)
        }
        (
            FailurePath::Unit {
                module_title,
                unit_title,
                ..
            },
            FailureReason::NoLessons,
        ) => format!(
            "Unit \"{}\" in module \"{}\" has no lessons",
            unit_title, module_title
        ),
        (_, reason) => reason.to_string(),
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoModules => f.write_str("Course has no modules"),
            FailureReason::NoUnits => f.write_str("Module has no units"),
            FailureReason::NoLessons => f.write_str("Unit has no lessons"),
        }
    }
}

/// Check that `course` is publishable
pub fn validate(course: &Course) -> Result<&Course, ValidationFailed> {
    if course.modules.is_empty() {
        return Err(ValidationFailed {
            path: FailurePath::Root,
            reason: FailureReason::NoModules,
        });
    }

    for module in &course.modules {
        if module.units.is_empty() {
            return Err(ValidationFailed {
                path: FailurePath::Module {
                    module_id: module.id.clone(),
                    module_title: module.title.clone(),
                },
                reason: FailureReason::NoUnits,
            });
        }

        for unit in &module.units {
            if unit.lessons.is_empty() {
                return Err(ValidationFailed {
                    path: FailurePath::Unit {
                        module_id: module.id.clone(),
                        module_title: module.title.clone(),
                        unit_id: unit.id.clone(),
                        unit_title: unit.title.clone(),
                    },
                    reason: FailureReason::NoLessons,
                });
            }
        }
    }

    Ok(course)
}
