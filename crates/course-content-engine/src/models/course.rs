use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::Block;

/// All courses keyed by course id, in display order.
pub type CourseTranslationMap = IndexMap<String, Course>;

/// A course with its ordered modules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub description: String,
    pub duration: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub modules: IndexMap<String, Module>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    pub description: String,
    pub lessons: IndexMap<String, Lesson>,
}

/// A single lesson: markdown body plus optional interactive blocks.
///
/// `blocks` and `hints` are omitted from the serialized form when absent so
/// a lesson round-trips to the same JSON it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
}

impl Lesson {
    /// Blocks in declared order; empty when the lesson has none
    pub fn blocks(&self) -> &[Block] {
        self.blocks.as_deref().unwrap_or_default()
    }

    pub fn hints(&self) -> &[String] {
        self.hints.as_deref().unwrap_or_default()
    }

    /// True when the lesson carries something to render
    pub fn has_body(&self) -> bool {
        !self.content.trim().is_empty() || !self.blocks().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lesson_without_blocks_or_hints() {
        let json = r##"{"title":"Intro","content":"# Hello","duration":"5 min"}"##;
        let lesson: Lesson = serde_json::from_str(json).unwrap();

        assert!(lesson.blocks().is_empty());
        assert!(lesson.hints().is_empty());
        assert!(lesson.has_body());

        // Absent optional fields stay absent when written back
        assert_eq!(serde_json::to_string(&lesson).unwrap(), json);
    }

    #[test]
    fn test_lesson_with_blank_content_has_no_body() {
        let lesson = Lesson {
            title: "Empty".to_string(),
            content: "  \n".to_string(),
            duration: "1 min".to_string(),
            blocks: Some(vec![]),
            hints: None,
        };
        assert!(!lesson.has_body());
    }

    #[test]
    fn test_module_order_follows_source() {
        let json = r#"{
            "title": "Course",
            "description": "d",
            "duration": "1h",
            "tags": ["solana"],
            "modules": {
                "zeta": {"title": "Z", "description": "", "lessons": {}},
                "alpha": {"title": "A", "description": "", "lessons": {}}
            }
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();

        let keys: Vec<_> = course.modules.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
