//! Artifact download: resolve, GET, write, optional rename.
//!
//! `download` is best effort. Any failure is handed to the reporter and the
//! call returns `None`; it never panics, exits, or retries. `try_download`,
//! `fetch` and `rename` expose the same steps with structured errors.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DownloaderConfig;
use crate::coordinates::Coordinates;
use crate::error::{DownloadError, FetchError};
use crate::report::Reporter;
use crate::resolver::MetadataResolver;
use crate::storage::{replace_file, CreatedDirs, PartFile};
use crate::transport::Transport;
use crate::url_model::filename_from_url_path;

/// Everything one download needs. Built once, read-only afterwards.
/// Whether to download at all is decided by `run` from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub coordinates: Coordinates,
    pub destination_folder: PathBuf,
    /// File name (inside `destination_folder`) to rename the artifact to.
    pub rename_to: Option<String>,
}

/// Outcome of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub url: String,
    /// Where the artifact ended up (after any rename).
    pub path: PathBuf,
}

pub struct ArtifactFetcher<'a> {
    transport: &'a dyn Transport,
    reporter: &'a dyn Reporter,
}

impl<'a> ArtifactFetcher<'a> {
    pub fn new(transport: &'a dyn Transport, reporter: &'a dyn Reporter) -> Self {
        Self {
            transport,
            reporter,
        }
    }

    /// Runs the download, reporting instead of returning any failure.
    /// Returns `None` when something went wrong.
    pub fn download(&self, request: &DownloadRequest) -> Option<DownloadResult> {
        match self.try_download(request) {
            Ok(result) => Some(result),
            Err(DownloadError::Fetch(e @ FetchError::Rename { .. })) => {
                self.reporter.report_failure("Failed renaming artifact", &e);
                None
            }
            Err(e) => {
                self.reporter.report_failure("Artifact download failed", &e);
                None
            }
        }
    }

    /// Resolve, fetch and rename, surfacing the first error.
    pub fn try_download(&self, request: &DownloadRequest) -> Result<DownloadResult, DownloadError> {
        let url = MetadataResolver::new(self.transport).resolve_url(&request.coordinates)?;
        let artifact = self.fetch(&url, &request.destination_folder)?;
        let path = self.rename(&artifact, &request.destination_folder, request.rename_to.as_deref())?;
        Ok(DownloadResult { url, path })
    }

    /// GET `url` into `<destination_folder>/<last URL segment>`. Only HTTP 200
    /// counts as success; on any failure nothing is left on disk, including
    /// any part of `destination_folder` this call had to create.
    pub fn fetch(&self, url: &str, destination_folder: &Path) -> Result<PathBuf, FetchError> {
        self.reporter
            .report(&format!("About to download artifact from {}", url));

        let name = filename_from_url_path(url).ok_or_else(|| FetchError::NoFileName {
            url: url.to_string(),
        })?;
        // Declared before the part file so it is dropped after it.
        let dirs = CreatedDirs::create(destination_folder).map_err(|source| FetchError::Io {
            path: destination_folder.to_path_buf(),
            source,
        })?;
        let final_path = destination_folder.join(name);

        let mut part = PartFile::create(&final_path).map_err(|source| FetchError::Io {
            path: final_path.clone(),
            source,
        })?;
        let status = self.transport.get(url, &mut part)?;
        if status != 200 {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let file = part.finalize().map_err(|source| FetchError::Io {
            path: final_path.clone(),
            source,
        })?;
        dirs.keep();

        self.reporter.report("Download finished");
        Ok(file)
    }

    /// Moves `artifact` to `<destination_folder>/<rename_to>`, replacing any
    /// file already there. Skipped (returning `artifact`) when no target is
    /// given, when the artifact is missing, or when it already has that name.
    pub fn rename(
        &self,
        artifact: &Path,
        destination_folder: &Path,
        rename_to: Option<&str>,
    ) -> Result<PathBuf, FetchError> {
        let Some(target_name) = rename_to.filter(|n| !n.is_empty()) else {
            return Ok(artifact.to_path_buf());
        };
        if !artifact.exists() {
            return Ok(artifact.to_path_buf());
        }
        let target = destination_folder.join(target_name);
        if target == artifact {
            return Ok(target);
        }

        self.reporter.report(&format!(
            "Renaming artifact {} to {}",
            display_path(artifact),
            display_path(&target)
        ));
        replace_file(artifact, &target).map_err(|source| FetchError::Rename {
            from: artifact.to_path_buf(),
            to: target.clone(),
            source,
        })?;
        Ok(target)
    }
}

/// Canonical form when it resolves, otherwise the path as given.
fn display_path(path: &Path) -> String {
    let canonical = match path.parent().map(fs::canonicalize) {
        Some(Ok(parent)) => path
            .file_name()
            .map(|name| parent.join(name))
            .unwrap_or_else(|| path.to_path_buf()),
        _ => path.to_path_buf(),
    };
    canonical.display().to_string()
}

/// One-shot entry: build the request from `config` and download.
/// Invalid coordinates are reported like any other failure.
pub fn run(
    config: &DownloaderConfig,
    transport: &dyn Transport,
    reporter: &dyn Reporter,
) -> Option<DownloadResult> {
    if !config.enabled {
        tracing::info!("artifact download disabled by configuration");
        return None;
    }
    let request = match config.download_request() {
        Ok(r) => r,
        Err(e) => {
            reporter.report_failure("Invalid artifact coordinates", &e);
            return None;
        }
    };
    ArtifactFetcher::new(transport, reporter).download(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;
    use crate::transport::fake::FakeTransport;

    const URL: &str = "http://example.test/repo/org/acme/lib/2.1.0/lib-2.1.0.jar";

    fn request(dir: &Path, rename_to: Option<&str>) -> DownloadRequest {
        DownloadRequest {
            coordinates: Coordinates::new("http://example.test/repo", "org.acme", "lib", "2.1.0")
                .unwrap(),
            destination_folder: dir.to_path_buf(),
            rename_to: rename_to.map(str::to_string),
        }
    }

    #[test]
    fn downloads_release_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::default().route(URL, 200, b"jar-bytes");
        let reporter = RecordingReporter::default();
        let result = ArtifactFetcher::new(&transport, &reporter)
            .download(&request(dir.path(), None))
            .unwrap();
        assert_eq!(result.url, URL);
        assert_eq!(result.path, dir.path().join("lib-2.1.0.jar"));
        assert_eq!(fs::read(&result.path).unwrap(), b"jar-bytes");
        assert_eq!(
            reporter.lines(),
            vec![format!("About to download artifact from {URL}"), "Download finished".to_string()]
        );
        assert!(reporter.failures().is_empty());
    }

    #[test]
    fn renames_and_overwrites_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib.jar"), b"stale").unwrap();
        let transport = FakeTransport::default().route(URL, 200, b"fresh");
        let reporter = RecordingReporter::default();
        let result = ArtifactFetcher::new(&transport, &reporter)
            .download(&request(dir.path(), Some("lib.jar")))
            .unwrap();
        assert_eq!(result.path, dir.path().join("lib.jar"));
        assert_eq!(fs::read(dir.path().join("lib.jar")).unwrap(), b"fresh");
        assert!(!dir.path().join("lib-2.1.0.jar").exists());
        assert!(reporter.lines().iter().any(|l| l.starts_with("Renaming artifact")));
    }

    #[test]
    fn non_200_is_reported_not_returned() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::default().route(URL, 500, b"boom");
        let reporter = RecordingReporter::default();
        let out = ArtifactFetcher::new(&transport, &reporter).download(&request(dir.path(), None));
        assert!(out.is_none());
        let failures = reporter.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains(URL));
        assert!(failures[0].contains("500"));
        assert_eq!(transport.requested().len(), 1, "no retry");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0, "no partial file left");
    }

    #[test]
    fn try_download_surfaces_fetch_status() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::default();
        let reporter = RecordingReporter::default();
        let err = ArtifactFetcher::new(&transport, &reporter)
            .try_download(&request(dir.path(), None))
            .unwrap_err();
        match err {
            DownloadError::Fetch(FetchError::Status { url, status }) => {
                assert_eq!(url, URL);
                assert_eq!(status, 404);
            }
            other => panic!("expected fetch status error, got {other:?}"),
        }
    }

    #[test]
    fn rename_skips_missing_artifact_and_empty_target() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::default();
        let reporter = RecordingReporter::default();
        let fetcher = ArtifactFetcher::new(&transport, &reporter);
        let missing = dir.path().join("lib-2.1.0.jar");
        assert_eq!(
            fetcher.rename(&missing, dir.path(), Some("lib.jar")).unwrap(),
            missing
        );
        assert!(!dir.path().join("lib.jar").exists());

        fs::write(&missing, b"x").unwrap();
        assert_eq!(fetcher.rename(&missing, dir.path(), Some("")).unwrap(), missing);
        assert_eq!(fetcher.rename(&missing, dir.path(), None).unwrap(), missing);
        assert!(missing.exists());
        assert!(reporter.lines().is_empty());
    }

    #[test]
    fn rename_to_same_name_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::default();
        let reporter = RecordingReporter::default();
        let artifact = dir.path().join("lib-2.1.0.jar");
        fs::write(&artifact, b"x").unwrap();
        let out = ArtifactFetcher::new(&transport, &reporter)
            .rename(&artifact, dir.path(), Some("lib-2.1.0.jar"))
            .unwrap();
        assert_eq!(out, artifact);
        assert_eq!(fs::read(&artifact).unwrap(), b"x");
    }

    #[test]
    fn fetch_creates_destination_folder() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let transport = FakeTransport::default().route(URL, 200, b"x");
        let reporter = RecordingReporter::default();
        let path = ArtifactFetcher::new(&transport, &reporter)
            .fetch(URL, &nested)
            .unwrap();
        assert_eq!(path, nested.join("lib-2.1.0.jar"));
        assert!(path.exists());
    }

    #[test]
    fn failed_fetch_removes_folders_it_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let transport = FakeTransport::default();
        let reporter = RecordingReporter::default();
        let err = ArtifactFetcher::new(&transport, &reporter)
            .fetch(URL, &nested)
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert!(!dir.path().join("a").exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn failed_fetch_keeps_existing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::default().route(URL, 500, b"oops");
        let reporter = RecordingReporter::default();
        ArtifactFetcher::new(&transport, &reporter)
            .fetch(URL, dir.path())
            .unwrap_err();
        assert!(dir.path().is_dir());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn fetch_rejects_url_without_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FakeTransport::default();
        let reporter = RecordingReporter::default();
        let err = ArtifactFetcher::new(&transport, &reporter)
            .fetch("http://example.test/repo/", dir.path())
            .unwrap_err();
        assert!(matches!(err, FetchError::NoFileName { .. }));
        assert!(transport.requested().is_empty());
    }

    #[test]
    fn run_reports_invalid_coordinates() {
        let cfg = DownloaderConfig {
            artifact_id: String::new(),
            ..DownloaderConfig::default()
        };
        let transport = FakeTransport::default();
        let reporter = RecordingReporter::default();
        assert!(run(&cfg, &transport, &reporter).is_none());
        let failures = reporter.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("artifactId"));
        assert!(transport.requested().is_empty());
    }

    #[test]
    fn run_disabled_skips_validation() {
        let cfg = DownloaderConfig {
            enabled: false,
            artifact_id: String::new(),
            ..DownloaderConfig::default()
        };
        let transport = FakeTransport::default();
        let reporter = RecordingReporter::default();
        assert!(run(&cfg, &transport, &reporter).is_none());
        assert!(reporter.failures().is_empty());
    }

    #[test]
    fn run_disabled_makes_no_requests_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DownloaderConfig {
            enabled: false,
            artifact_repository: "http://example.test/repo".to_string(),
            group_id: "org.acme".to_string(),
            artifact_id: "lib".to_string(),
            version: "2.1.0".to_string(),
            destination_folder: dir.path().to_path_buf(),
            ..DownloaderConfig::default()
        };
        let transport = FakeTransport::default().route(URL, 200, b"x");
        let reporter = RecordingReporter::default();
        assert!(run(&cfg, &transport, &reporter).is_none());
        assert!(transport.requested().is_empty());
        assert!(reporter.lines().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let enabled = DownloaderConfig { enabled: true, ..cfg };
        let out = run(&enabled, &transport, &reporter).unwrap();
        assert_eq!(out.path, dir.path().join("lib-2.1.0.jar"));
    }
}
