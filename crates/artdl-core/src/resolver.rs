//! Turns coordinates into the concrete artifact URL.
//!
//! Release versions map straight onto the repository layout. Snapshot versions
//! need one GET of `maven-metadata.xml` to learn the timestamped version that
//! replaces the symbolic one in the filename.

use crate::coordinates::Coordinates;
use crate::error::ResolutionError;
use crate::metadata::parse_snapshot_metadata;
use crate::transport::Transport;

/// Resolves artifact URLs, fetching snapshot metadata through `transport`.
pub struct MetadataResolver<'a> {
    transport: &'a dyn Transport,
}

impl<'a> MetadataResolver<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Full download URL for `coordinates`. Metadata is fetched fresh on every
    /// call and never cached; no retries.
    ///
    /// If no metadata entry matches, the concrete version is empty and the URL
    /// comes out as `.../lib-.jar`; that is returned, not treated as an error.
    pub fn resolve_url(&self, coordinates: &Coordinates) -> Result<String, ResolutionError> {
        let base = coordinates.base_directory_url();
        let concrete = if coordinates.is_snapshot() {
            let version = self.snapshot_version(coordinates)?;
            if version.is_empty() {
                tracing::warn!(
                    version = coordinates.version(),
                    extension = coordinates.extension(),
                    classifier = coordinates.classifier().unwrap_or(""),
                    "no snapshotVersion entry matched; using empty version"
                );
            }
            version
        } else {
            coordinates.version().to_string()
        };
        let url = format!("{}{}", base, coordinates.file_name(&concrete));
        tracing::debug!(%url, "resolved artifact URL");
        Ok(url)
    }

    fn snapshot_version(&self, coordinates: &Coordinates) -> Result<String, ResolutionError> {
        let url = coordinates.metadata_url();
        tracing::debug!(%url, "fetching snapshot metadata");

        let mut body = Vec::new();
        let status = self.transport.get(&url, &mut body)?;
        if status != 200 {
            return Err(ResolutionError::MetadataStatus { url, status });
        }

        let metadata = parse_snapshot_metadata(&body)
            .map_err(|source| ResolutionError::MetadataParse { url, source })?;
        Ok(metadata.select_version(coordinates.extension(), coordinates.classifier()))
    }
}
