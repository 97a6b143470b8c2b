pub mod config;
pub mod logging;

pub mod coordinates;
pub mod error;
pub mod fetcher;
pub mod metadata;
pub mod report;
pub mod resolver;
pub mod storage;
pub mod transport;
pub mod url_model;

pub use coordinates::Coordinates;
pub use error::{DownloadError, FetchError, ResolutionError};
pub use fetcher::{run, ArtifactFetcher, DownloadRequest, DownloadResult};
pub use report::{Reporter, TracingReporter};
pub use resolver::MetadataResolver;
pub use transport::{CurlTransport, Transport};
