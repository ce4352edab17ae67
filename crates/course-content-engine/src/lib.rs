pub mod bundled;
pub mod io;
pub mod models;
pub mod path;
pub mod registry;
pub mod search;
pub mod text;
pub mod traverse;
pub mod validation;
pub mod value;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use bundled::{BUNDLED_CONTENT, course_translations, try_course_translations};
pub use io::*;
pub use models::*;
pub use path::ContentPath;
pub use registry::{Entity, EntityKind, Registry, build_registry};
pub use search::SearchIndex;
pub use traverse::*;
pub use validation::{ErrorKind, ValidationError, ValidationReport, validate, validate_tree};
pub use value::ContentValue;
