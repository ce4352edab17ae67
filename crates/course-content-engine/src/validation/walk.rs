use std::collections::HashSet;

use crate::models::BlockType;
use crate::path::ContentPath;
use crate::registry::{Entity, EntityKind, Registry};
use crate::validation::{ErrorKind, ValidationError};
use crate::value::ContentValue;

/// Visit the whole tree depth-first, pre-order, registering entities and
/// collecting defects as they are met.
pub(crate) fn walk(root: &ContentValue) -> (Registry<'_>, Vec<ValidationError>) {
    let mut walker = Walker::default();
    walker.courses(root);
    (walker.registry, walker.errors)
}

#[derive(Default)]
struct Walker<'a> {
    registry: Registry<'a>,
    errors: Vec<ValidationError>,
}

impl<'a> Walker<'a> {
    fn push(&mut self, path: &ContentPath, kind: ErrorKind, message: impl Into<String>) {
        self.errors.push(ValidationError::new(path, kind, message));
    }

    fn structure(&mut self, path: &ContentPath, message: impl Into<String>) {
        self.push(path, ErrorKind::InvalidStructure, message);
    }

    fn register(&mut self, id: String, kind: EntityKind, path: &ContentPath, value: &'a ContentValue) {
        self.registry.insert(
            id,
            Entity {
                kind,
                path: path.clone(),
                value,
            },
        );
    }

    /// Record `id` among its siblings, reporting empty and repeated ids
    fn claim(&mut self, seen: &mut HashSet<&'a str>, id: &'a str, path: &ContentPath, what: &str) {
        if id.is_empty() {
            self.structure(path, format!("{what} id is empty"));
            return;
        }
        if !seen.insert(id) {
            let error = ValidationError::new(
                path,
                ErrorKind::DuplicateId,
                format!("duplicate {what} id `{id}`"),
            );
            self.registry.record_duplicate(error.clone());
            self.errors.push(error);
        }
    }

    // Shape helpers

    fn object(
        &mut self,
        value: &'a ContentValue,
        path: &ContentPath,
        what: &str,
    ) -> Option<&'a [(String, ContentValue)]> {
        let entries = value.as_object();
        if entries.is_none() {
            self.structure(
                path,
                format!("{what} must be an object, found {}", value.type_name()),
            );
        }
        entries
    }

    /// An object read as a record: a key may appear only once
    fn record(
        &mut self,
        value: &'a ContentValue,
        path: &ContentPath,
        what: &str,
    ) -> Option<&'a [(String, ContentValue)]> {
        let entries = self.object(value, path, what)?;
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for (key, _) in entries {
            if !seen.insert(key.as_str()) && reported.insert(key.as_str()) {
                self.structure(&path.field(key), format!("field `{key}` appears more than once"));
            }
        }
        Some(entries)
    }

    fn string(&mut self, value: &'a ContentValue, path: &ContentPath, field: &str) -> Option<&'a str> {
        let s = value.as_str();
        if s.is_none() {
            self.structure(
                path,
                format!("`{field}` must be a string, found {}", value.type_name()),
            );
        }
        s
    }

    fn array(&mut self, value: &'a ContentValue, path: &ContentPath, field: &str) -> Option<&'a [ContentValue]> {
        let items = value.as_array();
        if items.is_none() {
            self.structure(
                path,
                format!("`{field}` must be an array, found {}", value.type_name()),
            );
        }
        items
    }

    fn missing(&mut self, path: &ContentPath, field: &str) {
        self.structure(&path.field(field), format!("missing required field `{field}`"));
    }

    fn required_str(&mut self, obj: &'a ContentValue, path: &ContentPath, field: &str) -> Option<&'a str> {
        match obj.get(field) {
            Some(value) => self.string(value, &path.field(field), field),
            None => {
                self.missing(path, field);
                None
            }
        }
    }

    fn optional_str(&mut self, obj: &'a ContentValue, path: &ContentPath, field: &str) -> Option<&'a str> {
        let value = obj.get(field)?;
        self.string(value, &path.field(field), field)
    }

    fn required_array(
        &mut self,
        obj: &'a ContentValue,
        path: &ContentPath,
        field: &str,
    ) -> Option<&'a [ContentValue]> {
        match obj.get(field) {
            Some(value) => self.array(value, &path.field(field), field),
            None => {
                self.missing(path, field);
                None
            }
        }
    }

    fn optional_array(
        &mut self,
        obj: &'a ContentValue,
        path: &ContentPath,
        field: &str,
    ) -> Option<&'a [ContentValue]> {
        let value = obj.get(field)?;
        self.array(value, &path.field(field), field)
    }

    fn required_object(
        &mut self,
        obj: &'a ContentValue,
        path: &ContentPath,
        field: &str,
    ) -> Option<&'a [(String, ContentValue)]> {
        match obj.get(field) {
            Some(value) => self.object(value, &path.field(field), &format!("`{field}`")),
            None => {
                self.missing(path, field);
                None
            }
        }
    }

    /// Array of strings; each non-string entry is reported at its index
    fn string_list(
        &mut self,
        obj: &'a ContentValue,
        path: &ContentPath,
        field: &str,
        required: bool,
    ) -> Option<&'a [ContentValue]> {
        let items = if required {
            self.required_array(obj, path, field)?
        } else {
            self.optional_array(obj, path, field)?
        };
        let list_path = path.field(field);
        for (index, item) in items.iter().enumerate() {
            if item.as_str().is_none() {
                self.structure(
                    &list_path.index(index),
                    format!("`{field}` entries must be strings, found {}", item.type_name()),
                );
            }
        }
        Some(items)
    }

    // Tree levels

    fn courses(&mut self, root: &'a ContentValue) {
        let root_path = ContentPath::root();
        let Some(courses) = self.object(root, &root_path, "course map") else {
            return;
        };
        let mut seen = HashSet::new();
        for (course_id, course) in courses {
            let path = root_path.field(course_id);
            self.claim(&mut seen, course_id, &path, "course");
            self.register(course_id.clone(), EntityKind::Course, &path, course);
            self.course(course, &path);
        }
    }

    fn course(&mut self, course: &'a ContentValue, path: &ContentPath) {
        if self.record(course, path, "course").is_none() {
            return;
        }
        self.required_str(course, path, "title");
        self.required_str(course, path, "description");
        self.required_str(course, path, "duration");
        self.string_list(course, path, "tags", false);

        let Some(modules) = self.required_object(course, path, "modules") else {
            return;
        };
        let modules_path = path.field("modules");
        let mut seen = HashSet::new();
        for (module_id, module) in modules {
            let module_path = modules_path.field(module_id);
            self.claim(&mut seen, module_id, &module_path, "module");
            self.register(
                module_path.as_str().to_string(),
                EntityKind::Module,
                &module_path,
                module,
            );
            self.module(module, &module_path);
        }
    }

    fn module(&mut self, module: &'a ContentValue, path: &ContentPath) {
        if self.record(module, path, "module").is_none() {
            return;
        }
        self.required_str(module, path, "title");
        self.required_str(module, path, "description");

        let Some(lessons) = self.required_object(module, path, "lessons") else {
            return;
        };
        let lessons_path = path.field("lessons");
        let mut seen = HashSet::new();
        for (lesson_id, lesson) in lessons {
            let lesson_path = lessons_path.field(lesson_id);
            self.claim(&mut seen, lesson_id, &lesson_path, "lesson");
            self.register(
                lesson_path.as_str().to_string(),
                EntityKind::Lesson,
                &lesson_path,
                lesson,
            );
            self.lesson(lesson, &lesson_path);
        }
    }

    fn lesson(&mut self, lesson: &'a ContentValue, path: &ContentPath) {
        if self.record(lesson, path, "lesson").is_none() {
            return;
        }
        self.required_str(lesson, path, "title");
        let content = self.optional_str(lesson, path, "content");
        let content_mistyped = lesson.get("content").is_some() && content.is_none();
        self.required_str(lesson, path, "duration");

        // A mistyped `blocks` is already a structure error; do not pile on
        let has_blocks = match lesson.get("blocks") {
            None => false,
            Some(ContentValue::Array(items)) => !items.is_empty(),
            Some(_) => true,
        };
        let has_content = content.is_some_and(|c| !c.trim().is_empty());
        if !has_content && !has_blocks && !content_mistyped {
            self.push(
                path,
                ErrorKind::EmptyContent,
                "lesson has no content and no blocks",
            );
        }

        self.string_list(lesson, path, "hints", false);

        let Some(blocks) = self.optional_array(lesson, path, "blocks") else {
            return;
        };
        let blocks_path = path.field("blocks");
        let mut seen = HashSet::new();
        for (index, block) in blocks.iter().enumerate() {
            self.block(block, &blocks_path.index(index), path.as_str(), &mut seen);
        }
    }

    fn block(
        &mut self,
        block: &'a ContentValue,
        path: &ContentPath,
        lesson_id: &str,
        seen: &mut HashSet<&'a str>,
    ) {
        if self.record(block, path, "block").is_none() {
            return;
        }
        let id = self.required_str(block, path, "id");
        if let Some(id) = id {
            self.claim(seen, id, path, "block");
        }
        let block_type = self.block_type(block, path);

        let qualified_id = id.map(|id| format!("{lesson_id}.blocks.{id}"));
        if let Some(qualified_id) = &qualified_id {
            self.register(qualified_id.clone(), EntityKind::Block, path, block);
        }

        let Some(block_type) = block_type else {
            return;
        };
        self.required_str(block, path, "title");
        match block_type {
            BlockType::Quiz => self.quiz(block, path, qualified_id.as_deref()),
            BlockType::Terminal => self.terminal(block, path),
            BlockType::Explorer => self.explorer(block, path),
        }
    }

    fn block_type(&mut self, block: &'a ContentValue, path: &ContentPath) -> Option<BlockType> {
        match block.get("type") {
            Some(ContentValue::String(name)) => match name.parse::<BlockType>() {
                Ok(block_type) => Some(block_type),
                Err(_) => {
                    let known: Vec<_> = BlockType::ALL.iter().map(|t| t.as_str()).collect();
                    self.push(
                        path,
                        ErrorKind::UnknownBlockType,
                        format!(
                            "unknown block type `{name}`, expected one of {}",
                            known.join(", ")
                        ),
                    );
                    None
                }
            },
            Some(other) => {
                self.push(
                    path,
                    ErrorKind::UnknownBlockType,
                    format!("block `type` must be a string, found {}", other.type_name()),
                );
                None
            }
            None => {
                self.push(path, ErrorKind::UnknownBlockType, "block has no `type`");
                None
            }
        }
    }

    fn quiz(&mut self, block: &'a ContentValue, path: &ContentPath, block_id: Option<&str>) {
        let Some(questions) = self.required_array(block, path, "questions") else {
            return;
        };
        let questions_path = path.field("questions");
        let mut seen = HashSet::new();
        for (index, question) in questions.iter().enumerate() {
            self.question(question, &questions_path.index(index), block_id, &mut seen);
        }
    }

    fn question(
        &mut self,
        question: &'a ContentValue,
        path: &ContentPath,
        block_id: Option<&str>,
        seen: &mut HashSet<&'a str>,
    ) {
        if self.record(question, path, "question").is_none() {
            return;
        }
        if let Some(id) = self.required_str(question, path, "id") {
            self.claim(seen, id, path, "question");
            if let Some(block_id) = block_id {
                self.register(
                    format!("{block_id}.questions.{id}"),
                    EntityKind::Question,
                    path,
                    question,
                );
            }
        }
        self.required_str(question, path, "prompt");

        let options = self.string_list(question, path, "options", true);
        if let Some(options) = options
            && options.len() < 2
        {
            self.push(
                path,
                ErrorKind::InsufficientOptions,
                format!(
                    "question has {} option(s), at least 2 required",
                    options.len()
                ),
            );
        }
        self.answer_index(question, path, options.map(<[ContentValue]>::len));
        self.required_str(question, path, "explanation");
    }

    fn answer_index(&mut self, question: &'a ContentValue, path: &ContentPath, option_count: Option<usize>) {
        let field_path = path.field("answerIndex");
        let index = match question.get("answerIndex") {
            Some(ContentValue::Number(n)) if n.is_u64() || n.is_i64() => n,
            Some(ContentValue::Number(n)) => {
                self.structure(
                    &field_path,
                    format!("`answerIndex` must be an integer, found {n}"),
                );
                return;
            }
            Some(other) => {
                self.structure(
                    &field_path,
                    format!("`answerIndex` must be an integer, found {}", other.type_name()),
                );
                return;
            }
            None => {
                self.missing(path, "answerIndex");
                return;
            }
        };

        // Without a readable options list there is nothing to bound against
        let Some(count) = option_count else {
            return;
        };
        let in_range = index
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .is_some_and(|i| i < count);
        if !in_range {
            self.push(
                path,
                ErrorKind::InvalidAnswerIndex,
                format!("answerIndex {index} is out of range for {count} option(s)"),
            );
        }
    }

    fn terminal(&mut self, block: &'a ContentValue, path: &ContentPath) {
        let Some(steps) = self.required_array(block, path, "steps") else {
            return;
        };
        let steps_path = path.field("steps");
        for (index, step) in steps.iter().enumerate() {
            let step_path = steps_path.index(index);
            if self.record(step, &step_path, "terminal step").is_none() {
                continue;
            }
            self.required_str(step, &step_path, "cmd");
            self.required_str(step, &step_path, "output");
            self.optional_str(step, &step_path, "note");
        }
    }

    fn explorer(&mut self, block: &'a ContentValue, path: &ContentPath) {
        if let Some(name) = self.required_str(block, path, "explorer")
            && name.trim().is_empty()
        {
            self.structure(&path.field("explorer"), "explorer component name is empty");
        }
        if let Some(props) = block.get("props")
            && props.as_object().is_none()
        {
            self.structure(
                &path.field("props"),
                format!("`props` must be an object, found {}", props.type_name()),
            );
        }
    }
}
