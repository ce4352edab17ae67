use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use course_content_config::Config;
use course_content_engine::{CourseTranslationMap, LoadError, load_file, try_course_translations};

/// Where course content is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Path(PathBuf),
    Bundled,
}

impl ContentSource {
    pub fn resolve(arg: Option<PathBuf>, config: Option<Config>) -> Self {
        match arg.or_else(|| config.and_then(|c| c.content_path)) {
            Some(path) => ContentSource::Path(path),
            None => ContentSource::Bundled,
        }
    }

    /// Load and validate a single content tree
    pub fn load_tree(&self) -> Result<Cow<'static, CourseTranslationMap>> {
        match self {
            ContentSource::Bundled => bundled_tree(try_course_translations()),
            ContentSource::Path(path) => {
                if path.is_dir() {
                    bail!(
                        "{} is a directory; only `validate` accepts directories",
                        path.display()
                    );
                }
                let tree = load_file(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                Ok(Cow::Owned(tree))
            }
        }
    }
}

/// Tree commands refuse degraded bundled content instead of listing nothing
fn bundled_tree(
    loaded: Result<&'static CourseTranslationMap, &'static LoadError>,
) -> Result<Cow<'static, CourseTranslationMap>> {
    loaded
        .map(Cow::Borrowed)
        .map_err(|e| anyhow!("Bundled course content failed to load: {e}"))
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Path(path) => write!(f, "{}", path.display()),
            ContentSource::Bundled => f.write_str("<bundled>"),
        }
    }
}
