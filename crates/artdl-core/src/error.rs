//! Error types for resolution and download.
//!
//! Resolution and fetch failures stay distinct so callers (and tests) can tell
//! a bad coordinate or metadata problem apart from a failed artifact transfer.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while performing a single HTTP GET.
#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl rejected the request setup or the transfer itself failed
    /// (DNS, connect, TLS, timeout).
    #[error("GET {url} failed")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// The response body could not be handed to the caller's sink.
    #[error("GET {url}: writing response body failed")]
    Sink {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure reading `maven-metadata.xml`.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed XML at byte {position}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
    /// Not a well-formed document: nothing parseable, truncated, or stray text.
    #[error("malformed XML: {0}")]
    Malformed(&'static str),
}

/// Failure turning coordinates into a concrete artifact URL.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("invalid coordinates: please specify {field}")]
    InvalidCoordinates { field: &'static str },
    #[error("metadata fetch failed: GET {url} returned HTTP {status}")]
    MetadataStatus { url: String, status: u32 },
    #[error("metadata fetch failed")]
    MetadataTransport(#[from] TransportError),
    #[error("failed to get version from metadata at {url}")]
    MetadataParse {
        url: String,
        #[source]
        source: MetadataError,
    },
}

/// Failure retrieving the artifact once its URL is known.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("download failed: GET {url} returned HTTP {status}")]
    Status { url: String, status: u32 },
    #[error("download failed")]
    Transport(#[from] TransportError),
    #[error("resolved URL {url} has no file name")]
    NoFileName { url: String },
    #[error("failed writing file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed renaming artifact {} to {}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can stop a download, as seen by the top-level operation.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Renders `err` and every `source()` below it as `outer: inner: root`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(cause) = cur {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        cur = cause.source();
    }
    out
}
