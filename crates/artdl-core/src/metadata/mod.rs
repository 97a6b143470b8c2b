//! Snapshot metadata (`maven-metadata.xml`) model and version selection.
//!
//! Only the `snapshotVersion` entries matter here: each names an extension, an
//! optional classifier and the concrete timestamped version to substitute for
//! the symbolic `-SNAPSHOT` one.

mod parse;

pub use parse::parse_snapshot_metadata;

/// Classifier excluded when no classifier is configured.
const SOURCES_CLASSIFIER: &str = "sources";

/// One `<snapshotVersion>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotVersion {
    pub extension: String,
    pub classifier: Option<String>,
    pub value: Option<String>,
}

impl SnapshotVersion {
    fn classifier_text(&self) -> &str {
        self.classifier.as_deref().unwrap_or("")
    }

    /// Containment match, not equality: extension `jar` also matches `jar.asc`,
    /// classifier `tests` also matches `unittests`.
    pub fn matches(&self, extension: &str, classifier: Option<&str>) -> bool {
        if !self.extension.contains(extension) {
            return false;
        }
        match classifier {
            None => !self.classifier_text().contains(SOURCES_CLASSIFIER),
            Some(c) => self.classifier_text().contains(c),
        }
    }
}

/// All snapshot entries of one metadata document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotMetadata {
    pub entries: Vec<SnapshotVersion>,
}

impl SnapshotMetadata {
    /// Value of the first matching entry that has one. Empty string when
    /// nothing matches; callers substitute it as-is.
    pub fn select_version(&self, extension: &str, classifier: Option<&str>) -> String {
        self.entries
            .iter()
            .filter(|e| e.matches(extension, classifier))
            .find_map(|e| e.value.clone())
            .unwrap_or_default()
    }
}
