//! Input resolution: turn a user-supplied path or URL into an in-memory upload.
//!
//! The upload boundary of the library is "bytes plus a file name". Local
//! files are read whole; URLs are downloaded with `reqwest`. The size cap
//! from [`InputLimits`] is enforced here, before the validator sees any
//! bytes: for local files from the file metadata, for downloads from
//! `Content-Length` when the server sends it and from the running body size
//! otherwise. A download stops as soon as it passes the cap.

use crate::config::InputLimits;
use crate::error::Pdf2DocxError;
use futures::{Stream, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name used when a download offers no usable file name.
pub const FALLBACK_NAME: &str = "downloaded.pdf";

/// A PDF held in memory together with the name it was uploaded under.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size in mebibytes, for display.
    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / (1024.0 * 1024.0)
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to an in-memory upload.
pub async fn resolve_input(input: &str, limits: &InputLimits) -> Result<Upload, Pdf2DocxError> {
    if is_url(input) {
        download_url(input, limits).await
    } else {
        read_local(Path::new(input), limits).await
    }
}

/// Read a local file, mapping the common failure modes.
async fn read_local(path: &Path, limits: &InputLimits) -> Result<Upload, Pdf2DocxError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Pdf2DocxError::InvalidInput {
            input: path.display().to_string(),
            reason: "not a file path or a valid HTTP/HTTPS URL".into(),
        })?;

    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|e| map_open_error(path, e))?;
    if !meta.is_file() {
        return Err(Pdf2DocxError::InvalidInput {
            input: path.display().to_string(),
            reason: "not a regular file".into(),
        });
    }
    limits.check_size(&name, meta.len())?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| map_open_error(path, e))?;

    debug!("Read local PDF: {} ({} bytes)", path.display(), bytes.len());
    Ok(Upload::new(name, bytes))
}

fn map_open_error(path: &Path, e: std::io::Error) -> Pdf2DocxError {
    let path = PathBuf::from(path);
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => Pdf2DocxError::PermissionDenied { path },
        std::io::ErrorKind::NotFound => Pdf2DocxError::FileNotFound { path },
        _ => Pdf2DocxError::InvalidInput {
            input: path.display().to_string(),
            reason: e.to_string(),
        },
    }
}

/// Download a URL into memory.
async fn download_url(url: &str, limits: &InputLimits) -> Result<Upload, Pdf2DocxError> {
    info!("Downloading PDF from: {}", url);
    let timeout_secs = limits.download_timeout_secs;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Pdf2DocxError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let map_send_error = |e: reqwest::Error| {
        if e.is_timeout() {
            Pdf2DocxError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            Pdf2DocxError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    };

    let response = client.get(url).send().await.map_err(map_send_error)?;

    if !response.status().is_success() {
        return Err(Pdf2DocxError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let disposition = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let name = extract_filename(url, disposition.as_deref());

    if let Some(len) = response.content_length() {
        limits.check_size(&name, len)?;
    }

    let bytes = read_capped(response.bytes_stream(), &name, limits, map_send_error).await?;

    info!("Downloaded {} ({} bytes)", name, bytes.len());
    Ok(Upload::new(name, bytes))
}

/// Collect a chunked body, failing once it grows past the upload cap.
async fn read_capped<S, B, E>(
    stream: S,
    name: &str,
    limits: &InputLimits,
    map_err: impl Fn(E) -> Pdf2DocxError,
) -> Result<Vec<u8>, Pdf2DocxError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    let mut stream = std::pin::pin!(stream);
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(&map_err)?;
        limits.check_size(name, (body.len() + chunk.as_ref().len()) as u64)?;
        body.extend_from_slice(chunk.as_ref());
    }
    Ok(body)
}

static RE_DISPOSITION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)filename\s*=\s*"?([^";]+)"?"#).unwrap());

/// Pick a file name from `Content-Disposition`, then the URL path, then a fallback.
pub fn extract_filename(url: &str, content_disposition: Option<&str>) -> String {
    if let Some(name) = content_disposition
        .and_then(|h| RE_DISPOSITION_NAME.captures(h))
        .and_then(|c| c.get(1))
        .map(|m| sanitize_name(m.as_str()))
        .filter(|n| !n.is_empty())
    {
        return name;
    }

    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() && last.contains('.') {
                    return sanitize_name(last);
                }
            }
        }
    }

    FALLBACK_NAME.to_string()
}

/// Keep only the final path component of a server-supplied name.
fn sanitize_name(name: &str) -> String {
    name.trim()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .to_string()
}
