use crate::model::{Lesson, LessonType, Module, Unit};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "coursekit.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Quiet period before an autosave fires
    #[serde(default = "default_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Placeholder values for newly added nodes
    #[serde(default)]
    pub defaults: NodeDefaults,
}

fn default_debounce_ms() -> u64 {
    1000
}

/// Placeholder values used by the add operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeDefaults {
    pub module_title: String,
    pub module_description: String,
    pub module_duration: String,
    pub unit_title: String,
    pub unit_description: String,
    pub unit_duration: String,
    pub lesson_title: String,
    pub lesson_duration: String,
    pub lesson_type: LessonType,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            module_title: "New Module".to_string(),
            module_description: "Module description".to_string(),
            module_duration: "1 hour".to_string(),
            unit_title: "New Unit".to_string(),
            unit_description: "Unit description".to_string(),
            unit_duration: "30 min".to_string(),
            lesson_title: "New Lesson".to_string(),
            lesson_duration: "10 min".to_string(),
            lesson_type: LessonType::Article,
        }
    }
}

impl NodeDefaults {
    pub fn module(&self, id: String) -> Module {
        Module {
            id,
            title: self.module_title.clone(),
            description: self.module_description.clone(),
            duration: self.module_duration.clone(),
            units: Vec::new(),
        }
    }

    pub fn unit(&self, id: String) -> Unit {
        Unit {
            id,
            title: self.unit_title.clone(),
            description: self.unit_description.clone(),
            duration: self.unit_duration.clone(),
            lessons: Vec::new(),
        }
    }

    pub fn lesson(&self, id: String) -> Lesson {
        Lesson {
            id,
            title: self.lesson_title.clone(),
            lesson_type: self.lesson_type,
            duration: self.lesson_duration.clone(),
            content: None,
            video_url: None,
            attachments: Vec::new(),
        }
    }
}

impl EditorConfig {
    /// Load config from a directory
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded editor config");
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_debounce_ms: default_debounce_ms(),
            defaults: NodeDefaults::default(),
        }
    }
}
