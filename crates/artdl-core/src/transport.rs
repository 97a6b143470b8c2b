//! Blocking HTTP GET over libcurl.
//!
//! One `Easy` handle per request; the handle (and its connection) is dropped
//! when `get` returns, whichever way it returns.

use crate::error::TransportError;
use std::io::Write;
use std::time::Duration;

/// Performs GET requests and streams the body into a caller-supplied sink.
pub trait Transport {
    /// GETs `url`, writing the body (whatever the status) to `sink`.
    /// Returns the final HTTP status code after redirects.
    fn get(&self, url: &str, sink: &mut dyn Write) -> Result<u32, TransportError>;
}

/// libcurl-backed transport. Runs in the calling thread.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    pub connect_timeout: Duration,
    pub max_redirections: u32,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            max_redirections: 10,
        }
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, sink: &mut dyn Write) -> Result<u32, TransportError> {
        let curl_err = |source: curl::Error| TransportError::Curl {
            url: url.to_string(),
            source,
        };

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_err)?;
        easy.get(true).map_err(curl_err)?;
        easy.follow_location(true).map_err(curl_err)?;
        easy.max_redirections(self.max_redirections).map_err(curl_err)?;
        easy.connect_timeout(self.connect_timeout).map_err(curl_err)?;

        let mut sink_err: Option<std::io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| match sink.write_all(data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        sink_err = Some(e);
                        Ok(0) // abort transfer
                    }
                })
                .map_err(curl_err)?;
            transfer.perform()
        };

        if let Some(source) = sink_err {
            return Err(TransportError::Sink {
                url: url.to_string(),
                source,
            });
        }
        performed.map_err(curl_err)?;

        let code = easy.response_code().map_err(curl_err)?;
        tracing::debug!(url, status = code, "GET complete");
        Ok(code)
    }
}
