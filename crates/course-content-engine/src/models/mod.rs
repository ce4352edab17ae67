pub mod block;
pub mod course;

pub use block::{
    Block, BlockType, ExplorerBlock, Question, QuizBlock, TerminalBlock, TerminalStep,
    UnknownBlockType,
};
pub use course::{Course, CourseTranslationMap, Lesson, Module};
