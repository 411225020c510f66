//! Byte acquisition from local paths, http(s) URLs and data URLs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::{Result, ThumbError};

/// True if the identifier should be fetched over the network rather than
/// read from the local filesystem.
fn is_remote(source: &str) -> bool {
    source.starts_with("http:") || source.starts_with("https:")
}

/// Resolve a file identifier to raw document bytes.
///
/// Local paths are read from the filesystem; `http:`/`https:` identifiers
/// are fetched with the request raced against `cancel`; `data:` URLs are
/// decoded inline. `blob:` URLs only exist inside a browser session and are
/// rejected here. The returned buffer is owned by the caller.
pub async fn load_bytes(source: &str, cancel: &CancellationToken) -> Result<Vec<u8>> {
    if let Some(rest) = source.strip_prefix("data:") {
        return decode_data_url(rest);
    }
    if source.starts_with("blob:") {
        return Err(ThumbError::UnsupportedScheme("blob:".to_string()));
    }
    if is_remote(source) {
        return fetch(source, cancel).await;
    }
    trace!("reading local file {}", source);
    Ok(tokio::fs::read(source).await?)
}

async fn fetch(url: &str, cancel: &CancellationToken) -> Result<Vec<u8>> {
    debug!("fetching {}", url);
    let response = tokio::select! {
        _ = cancel.cancelled() => return Err(ThumbError::Cancelled),
        response = reqwest::get(url) => response?,
    };

    let status = response.status();
    if !status.is_success() {
        return Err(ThumbError::Http {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        });
    }

    let body = tokio::select! {
        _ = cancel.cancelled() => return Err(ThumbError::Cancelled),
        body = response.bytes() => body?,
    };
    Ok(body.to_vec())
}

fn decode_data_url(rest: &str) -> Result<Vec<u8>> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ThumbError::DataUrl("missing ',' separator".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(ThumbError::DataUrl(
            "only base64 payloads are supported".to_string(),
        ));
    }
    BASE64
        .decode(payload)
        .map_err(|e| ThumbError::DataUrl(e.to_string()))
}
