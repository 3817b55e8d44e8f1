//! Repository scanning: walking, language detection, file inventory.

pub mod inventory;
pub mod language_detect;
pub mod types;
pub mod walker;

pub use inventory::{detect_languages, RepoInventory};
pub use language_detect::Language;
pub use types::{LanguageShare, LanguageStats, UNKNOWN_LANGUAGE};
pub use walker::{build_globset, walk_repo, WalkOptions};
