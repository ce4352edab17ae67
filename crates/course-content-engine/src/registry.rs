use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::path::ContentPath;
use crate::validation::{ValidationError, walk};
use crate::value::ContentValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Course,
    Module,
    Lesson,
    Block,
    Question,
}

/// A registered node of the content tree
#[derive(Debug, Clone, PartialEq)]
pub struct Entity<'a> {
    pub kind: EntityKind,
    /// Positional address, the same form validation errors use
    pub path: ContentPath,
    pub value: &'a ContentValue,
}

impl Entity<'_> {
    /// Decode the raw node into one of the typed models
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self.value)?)
    }
}

/// Flat index of fully-qualified id to entity.
///
/// Ids are qualified by their parents: `course`, `course.modules.module`,
/// `course.modules.module.lessons.lesson`, `<lesson>.blocks.<block id>` and
/// `<block>.questions.<question id>`. When ids collide the last entity seen
/// wins and the collision is kept in [`Registry::duplicates`].
#[derive(Debug, Default)]
pub struct Registry<'a> {
    entries: IndexMap<String, Entity<'a>>,
    duplicates: Vec<ValidationError>,
}

impl<'a> Registry<'a> {
    pub(crate) fn insert(&mut self, id: String, entity: Entity<'a>) {
        if let Some(previous) = self.entries.insert(id, entity) {
            log::debug!("registry entry at {} replaced", previous.path);
        }
    }

    pub(crate) fn record_duplicate(&mut self, error: ValidationError) {
        self.duplicates.push(error);
    }

    pub fn get(&self, id: &str) -> Option<&Entity<'a>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries in the order they were first registered
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entity<'a>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = (&str, &Entity<'a>)> {
        self.iter().filter(move |(_, e)| e.kind == kind)
    }

    /// Look up an entity by its positional path
    pub fn find_by_path(&self, path: &str) -> Option<(&str, &Entity<'a>)> {
        self.iter().find(|(_, e)| e.path.as_str() == path)
    }

    /// `DUPLICATE_ID` errors met while building
    pub fn duplicates(&self) -> &[ValidationError] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Index every course, module, lesson, block and question in the tree.
pub fn build_registry(tree: &ContentValue) -> Registry<'_> {
    walk::walk(tree).0
}
