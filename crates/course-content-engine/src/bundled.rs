//! Course content compiled into the binary.

use std::sync::OnceLock;

use crate::io::{LoadError, load_str};
use crate::models::CourseTranslationMap;

/// JSON source of the bundled courses
pub const BUNDLED_CONTENT: &str = include_str!("../content/courses.json");

static COURSES: OnceLock<Result<CourseTranslationMap, LoadError>> = OnceLock::new();
static EMPTY: OnceLock<CourseTranslationMap> = OnceLock::new();

fn load_bundled(json: &str) -> Result<CourseTranslationMap, LoadError> {
    let result = load_str(json);
    match &result {
        Ok(tree) => log::debug!("bundled content has {} courses", tree.len()),
        Err(LoadError::Invalid(report)) => {
            log::error!("bundled course content is invalid:\n{report}");
        }
        Err(e) => log::error!("failed to load bundled course content: {e}"),
    }
    result
}

/// The bundled course tree, or why it could not be loaded.
///
/// Loaded and validated on first use; later calls return the same result.
pub fn try_course_translations() -> Result<&'static CourseTranslationMap, &'static LoadError> {
    COURSES.get_or_init(|| load_bundled(BUNDLED_CONTENT)).as_ref()
}

/// The bundled course tree, degraded to an empty tree when it fails to load
/// so callers never see a partially valid catalogue.
pub fn course_translations() -> &'static CourseTranslationMap {
    or_empty(try_course_translations())
}

fn or_empty(
    loaded: Result<&'static CourseTranslationMap, &'static LoadError>,
) -> &'static CourseTranslationMap {
    loaded.unwrap_or_else(|_| EMPTY.get_or_init(CourseTranslationMap::new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockType;
    use crate::traverse::{iter_blocks_of_type, iter_lessons};

    #[test]
    fn test_bundled_content_loads() {
        let tree = course_translations();

        let keys: Vec<_> = tree.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["solana-fundamentals", "anchor-development"]);
    }

    #[test]
    fn test_bundled_content_loads_without_error() {
        let tree = try_course_translations().unwrap();
        assert!(std::ptr::eq(tree, course_translations()));
    }

    #[test]
    fn test_broken_content_degrades_to_empty_tree() {
        // Given bundled JSON that fails validation
        let loaded: &'static _ = Box::leak(Box::new(load_bundled("[]")));

        // When reading it through the degraded accessor
        let failure = loaded.as_ref().unwrap_err();
        let tree = or_empty(loaded.as_ref());

        // Then the failure is kept and the tree is empty
        assert!(matches!(failure, LoadError::Invalid(_)));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_unparseable_content_is_a_json_error() {
        assert!(matches!(load_bundled("{ nope"), Err(LoadError::Json(_))));
    }

    #[test]
    fn test_bundled_content_is_cached() {
        let first = course_translations() as *const CourseTranslationMap;
        let second = course_translations() as *const CourseTranslationMap;
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_bundled_lesson_has_a_body() {
        let tree = course_translations();

        assert_eq!(iter_lessons(tree).count(), 6);
        assert!(iter_lessons(tree).all(|l| l.lesson.has_body()));
    }

    #[test]
    fn test_bundled_quizzes() {
        let ids: Vec<_> = iter_blocks_of_type(course_translations(), BlockType::Quiz)
            .map(|b| b.block.id())
            .collect();

        assert_eq!(
            ids,
            vec!["cli-basics", "account-model", "transactions", "anchor-macros"]
        );
    }
}
