//! Lazy, order-preserving walks over a decoded content tree.
//!
//! Every function here borrows the tree and returns a fresh iterator, so
//! calling it again restarts from the first course. Order is the key order
//! of the source document, which is the display order authors intended.

use std::fmt;

use serde::Serialize;

use crate::models::{Block, BlockType, CourseTranslationMap, Lesson, Question, QuizBlock};
use crate::path::ContentPath;

/// Owned coordinates of a lesson
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LessonAddress {
    pub course_id: String,
    pub module_id: String,
    pub lesson_id: String,
}

impl LessonAddress {
    pub fn new(
        course_id: impl Into<String>,
        module_id: impl Into<String>,
        lesson_id: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            module_id: module_id.into(),
            lesson_id: lesson_id.into(),
        }
    }

    pub fn path(&self) -> ContentPath {
        lesson_path(&self.course_id, &self.module_id, &self.lesson_id)
    }
}

impl fmt::Display for LessonAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().as_str())
    }
}

fn lesson_path(course_id: &str, module_id: &str, lesson_id: &str) -> ContentPath {
    ContentPath::root()
        .field(course_id)
        .field("modules")
        .field(module_id)
        .field("lessons")
        .field(lesson_id)
}

/// A lesson together with the keys that locate it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LessonRef<'a> {
    pub course_id: &'a str,
    pub module_id: &'a str,
    pub lesson_id: &'a str,
    pub lesson: &'a Lesson,
}

impl LessonRef<'_> {
    pub fn address(&self) -> LessonAddress {
        LessonAddress::new(self.course_id, self.module_id, self.lesson_id)
    }

    pub fn path(&self) -> ContentPath {
        lesson_path(self.course_id, self.module_id, self.lesson_id)
    }

    fn is_at(&self, address: &LessonAddress) -> bool {
        self.course_id == address.course_id
            && self.module_id == address.module_id
            && self.lesson_id == address.lesson_id
    }
}

/// A block with the lesson it belongs to and its position there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRef<'a> {
    pub lesson: LessonRef<'a>,
    pub index: usize,
    pub block: &'a Block,
}

impl BlockRef<'_> {
    pub fn path(&self) -> ContentPath {
        self.lesson.path().field("blocks").index(self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestionRef<'a> {
    pub block: BlockRef<'a>,
    pub quiz: &'a QuizBlock,
    pub index: usize,
    pub question: &'a Question,
}

impl QuestionRef<'_> {
    pub fn path(&self) -> ContentPath {
        self.block.path().field("questions").index(self.index)
    }
}

/// Every lesson of every module of every course, in display order
pub fn iter_lessons(tree: &CourseTranslationMap) -> impl Iterator<Item = LessonRef<'_>> {
    tree.iter().flat_map(|(course_id, course)| {
        course.modules.iter().flat_map(move |(module_id, module)| {
            module
                .lessons
                .iter()
                .map(move |(lesson_id, lesson)| LessonRef {
                    course_id,
                    module_id,
                    lesson_id,
                    lesson,
                })
        })
    })
}

/// Every block of every lesson, in display order
pub fn iter_blocks(tree: &CourseTranslationMap) -> impl Iterator<Item = BlockRef<'_>> {
    iter_lessons(tree).flat_map(|lesson| {
        lesson
            .lesson
            .blocks()
            .iter()
            .enumerate()
            .map(move |(index, block)| BlockRef {
                lesson,
                index,
                block,
            })
    })
}

pub fn iter_blocks_of_type(
    tree: &CourseTranslationMap,
    block_type: BlockType,
) -> impl Iterator<Item = BlockRef<'_>> {
    iter_blocks(tree).filter(move |b| b.block.block_type() == block_type)
}

/// Every question of every quiz, in display order
pub fn iter_questions(tree: &CourseTranslationMap) -> impl Iterator<Item = QuestionRef<'_>> {
    iter_blocks(tree).flat_map(|block| {
        let quiz = match block.block {
            Block::Quiz(quiz) => Some(quiz),
            _ => None,
        };
        quiz.into_iter().flat_map(move |quiz| {
            quiz.questions
                .iter()
                .enumerate()
                .map(move |(index, question)| QuestionRef {
                    block,
                    quiz,
                    index,
                    question,
                })
        })
    })
}

/// Look up a lesson by its keys
pub fn find_lesson<'a>(
    tree: &'a CourseTranslationMap,
    address: &LessonAddress,
) -> Option<LessonRef<'a>> {
    let (course_id, course) = tree.get_key_value(address.course_id.as_str())?;
    let (module_id, module) = course.modules.get_key_value(address.module_id.as_str())?;
    let (lesson_id, lesson) = module.lessons.get_key_value(address.lesson_id.as_str())?;
    Some(LessonRef {
        course_id,
        module_id,
        lesson_id,
        lesson,
    })
}

/// The lesson after `current` in the same course, crossing module boundaries
pub fn next_lesson<'a>(
    tree: &'a CourseTranslationMap,
    current: &LessonAddress,
) -> Option<LessonRef<'a>> {
    let mut lessons = iter_lessons(tree).filter(|l| l.course_id == current.course_id);
    lessons.by_ref().find(|l| l.is_at(current))?;
    lessons.next()
}

/// The lesson before `current` in the same course, crossing module boundaries
pub fn previous_lesson<'a>(
    tree: &'a CourseTranslationMap,
    current: &LessonAddress,
) -> Option<LessonRef<'a>> {
    let mut previous = None;
    for lesson in iter_lessons(tree).filter(|l| l.course_id == current.course_id) {
        if lesson.is_at(current) {
            return previous;
        }
        previous = Some(lesson);
    }
    None
}
