use std::collections::{BTreeSet, HashMap};

use crate::models::CourseTranslationMap;
use crate::text::plain_text;
use crate::traverse::{LessonAddress, iter_lessons};

/// Split text into lowercase alphanumeric words
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

/// Word index over lesson titles, markdown text, hints and block titles.
///
/// Results come back in display order because postings hold the lesson's
/// position in [`iter_lessons`].
#[derive(Debug, Default)]
pub struct SearchIndex {
    lessons: Vec<LessonAddress>,
    postings: HashMap<String, BTreeSet<usize>>,
}

impl SearchIndex {
    pub fn build(tree: &CourseTranslationMap) -> Self {
        let mut index = Self::default();
        for (position, lesson_ref) in iter_lessons(tree).enumerate() {
            index.lessons.push(lesson_ref.address());

            let lesson = lesson_ref.lesson;
            let body = plain_text(&lesson.content);
            let mut texts = vec![lesson.title.as_str(), body.as_str()];
            texts.extend(lesson.hints().iter().map(String::as_str));
            texts.extend(lesson.blocks().iter().map(|b| b.title()));

            for text in texts {
                for word in tokenize(text) {
                    index.postings.entry(word).or_default().insert(position);
                }
            }
        }
        log::debug!(
            "indexed {} lessons, {} distinct terms",
            index.lessons.len(),
            index.postings.len()
        );
        index
    }

    /// Lessons containing every word of `query`, in display order.
    ///
    /// A query with no words matches nothing.
    pub fn search(&self, query: &str) -> Vec<&LessonAddress> {
        let mut matches: Option<BTreeSet<usize>> = None;
        for term in tokenize(query) {
            let Some(postings) = self.postings.get(&term) else {
                return Vec::new();
            };
            matches = Some(match matches {
                Some(current) => current.intersection(postings).copied().collect(),
                None => postings.clone(),
            });
        }
        matches
            .unwrap_or_default()
            .into_iter()
            .map(|position| &self.lessons[position])
            .collect()
    }

    /// Number of indexed lessons
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample_tree;
    use pretty_assertions::assert_eq;

    fn lesson_ids<'a>(results: &[&'a LessonAddress]) -> Vec<&'a str> {
        results.iter().map(|a| a.lesson_id.as_str()).collect()
    }

    #[test]
    fn test_tokenize() {
        let words: Vec<_> = tokenize("Use the `solana` CLI, v1.18!").collect();
        assert_eq!(words, vec!["use", "the", "solana", "cli", "v1", "18"]);
    }

    #[test]
    fn test_finds_words_in_markdown_content() {
        let index = SearchIndex::build(&sample_tree());

        let results = index.search("Lamports");

        assert_eq!(lesson_ids(&results), vec!["l1"]);
        assert_eq!(results[0].module_id, "module-accounts");
    }

    #[test]
    fn test_all_terms_must_match() {
        let index = SearchIndex::build(&sample_tree());

        assert_eq!(lesson_ids(&index.search("solana cli")), vec!["l1"]);
        assert!(index.search("solana anchor").is_empty());
    }

    #[test]
    fn test_matches_hints_and_block_titles() {
        let index = SearchIndex::build(&sample_tree());

        assert_eq!(lesson_ids(&index.search("secret")), vec!["l2"]);
        assert_eq!(lesson_ids(&index.search("inspect")), vec!["l1"]);
    }

    #[test]
    fn test_results_follow_display_order() {
        let index = SearchIndex::build(&sample_tree());

        let results = index.search("to");

        let paths: Vec<_> = results.iter().map(|a| a.to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "solana-fundamentals.modules.module-getting-started.lessons.l1",
                "anchor-development.modules.module-intro.lessons.hello",
            ]
        );
    }

    #[test]
    fn test_empty_query_and_unknown_words() {
        let index = SearchIndex::build(&sample_tree());

        assert_eq!(index.len(), 4);
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
        assert!(index.search("ethereum").is_empty());
    }
}
