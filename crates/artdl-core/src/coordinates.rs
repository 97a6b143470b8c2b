//! Repository coordinates and the URL layout derived from them.
//!
//! A repository follows the conventional layout
//! `<repo>/<group as path>/<artifactId>/<version>/<artifactId>-<version>[-<classifier>].<ext>`.

use crate::error::ResolutionError;

/// Extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = "jar";

/// Marker that makes a version symbolic (resolved through metadata).
pub const SNAPSHOT_MARKER: &str = "SNAPSHOT";

/// Name of the per-version metadata document.
pub const METADATA_FILE: &str = "maven-metadata.xml";

/// Scheme prepended to repository URLs that carry none.
const DEFAULT_SCHEME: &str = "http://";

/// Identifies one artifact in a remote repository. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    repository_url: String,
    group_id: String,
    artifact_id: String,
    version: String,
    extension: String,
    classifier: Option<String>,
}

impl Coordinates {
    /// Validates the required fields and normalizes the repository URL.
    /// Extension defaults to `jar`, classifier to none.
    pub fn new(
        repository_url: &str,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> Result<Self, ResolutionError> {
        require("artifactRepository", repository_url)?;
        require("groupId", group_id)?;
        require("artifactId", artifact_id)?;
        require("version", version)?;

        Ok(Self {
            repository_url: normalize_repository_url(repository_url),
            group_id: group_id.trim().to_string(),
            artifact_id: artifact_id.trim().to_string(),
            version: version.trim().to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            classifier: None,
        })
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim().to_string();
        self
    }

    /// Sets the classifier. An empty string counts as no classifier.
    pub fn with_classifier(mut self, classifier: Option<&str>) -> Self {
        self.classifier = classifier
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// True when the version contains `SNAPSHOT` anywhere (not only as a suffix).
    pub fn is_snapshot(&self) -> bool {
        self.version.contains(SNAPSHOT_MARKER)
    }

    /// `<repo>/<group/as/path>/<artifactId>/<version>/`, always with a trailing slash.
    pub fn base_directory_url(&self) -> String {
        format!(
            "{}/{}/{}/{}/",
            self.repository_url,
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version
        )
    }

    pub fn metadata_url(&self) -> String {
        format!("{}{}", self.base_directory_url(), METADATA_FILE)
    }

    /// `<artifactId>-<concrete>[-<classifier>].<ext>`.
    pub fn file_name(&self, concrete_version: &str) -> String {
        let mut name = format!("{}-{}", self.artifact_id, concrete_version);
        if let Some(classifier) = &self.classifier {
            name.push('-');
            name.push_str(classifier);
        }
        name.push('.');
        name.push_str(&self.extension);
        name
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ResolutionError> {
    if value.trim().is_empty() {
        return Err(ResolutionError::InvalidCoordinates { field });
    }
    Ok(())
}

/// Prefixes `http://` when the URL has no scheme and drops trailing slashes,
/// so path segments can be appended with a single `/`.
pub fn normalize_repository_url(raw: &str) -> String {
    let raw = raw.trim();
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{raw}")
    };
    with_scheme.trim_end_matches('/').to_string()
}
