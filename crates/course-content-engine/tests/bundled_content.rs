use course_content_engine::{
    BUNDLED_CONTENT, BlockType, ContentValue, CourseTranslationMap, LessonAddress, SearchIndex,
    course_translations, iter_blocks_of_type, iter_lessons, next_lesson, parse_str, validate,
    validate_tree,
};
use pretty_assertions::assert_eq;

/// Ids of `"type": "quiz"` objects in raw document order
fn raw_quiz_ids(value: &ContentValue, ids: &mut Vec<String>) {
    match value {
        ContentValue::Object(entries) => {
            if value.get("type").and_then(ContentValue::as_str) == Some("quiz")
                && let Some(id) = value.get("id").and_then(ContentValue::as_str)
            {
                ids.push(id.to_string());
            }
            for (_, child) in entries {
                raw_quiz_ids(child, ids);
            }
        }
        ContentValue::Array(items) => {
            for item in items {
                raw_quiz_ids(item, ids);
            }
        }
        _ => {}
    }
}

#[test]
fn bundled_content_validates_clean() {
    let raw = parse_str(BUNDLED_CONTENT).unwrap();

    let report = validate(&raw);

    assert!(report.valid, "{report}");
    assert_eq!(report.to_string(), "valid: no errors\n");
}

#[test]
fn quizzes_come_back_in_source_order() {
    let raw = parse_str(BUNDLED_CONTENT).unwrap();
    let mut expected = Vec::new();
    raw_quiz_ids(&raw, &mut expected);

    let actual: Vec<_> = iter_blocks_of_type(course_translations(), BlockType::Quiz)
        .map(|b| b.block.id().to_string())
        .collect();

    assert_eq!(actual, expected);
}

#[test]
fn typed_tree_survives_a_json_round_trip() {
    let tree = course_translations();

    let json = serde_json::to_string_pretty(tree).unwrap();
    let reparsed: CourseTranslationMap = serde_json::from_str(&json).unwrap();

    assert_eq!(&reparsed, tree);
    assert!(validate_tree(&reparsed).valid);
}

#[test]
fn navigation_walks_the_whole_course() {
    let tree = course_translations();
    let first = iter_lessons(tree).next().unwrap();

    let mut visited = vec![first.lesson_id.to_string()];
    let mut current: LessonAddress = first.address();
    while let Some(next) = next_lesson(tree, &current) {
        visited.push(format!("{}/{}", next.module_id, next.lesson_id));
        current = next.address();
    }

    assert_eq!(
        visited,
        vec![
            "l1",
            "module-getting-started/l2",
            "module-accounts/l1",
            "module-accounts/l2",
        ]
    );
}

#[test]
fn search_over_bundled_lessons() {
    let index = SearchIndex::build(course_translations());

    let results: Vec<_> = index
        .search("anchor")
        .into_iter()
        .map(|a| a.lesson_id.as_str())
        .collect();

    assert_eq!(results, vec!["scaffold", "accounts-macro"]);
    assert_eq!(index.len(), 6);
}
