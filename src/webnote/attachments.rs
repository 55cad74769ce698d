//! Reading image files into data URIs.

use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Image MIME type for a path, judged by extension.
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

/// Reads `path` as a `data:` URI. Non-image files yield `None`.
pub fn read_image(path: &Path) -> Result<Option<String>> {
    let Some(mime) = image_mime(path) else {
        debug!(path = %path.display(), "skipping non-image file");
        return Ok(None);
    };
    let bytes = fs::read(path)?;
    Ok(Some(format!("data:{};base64,{}", mime, STANDARD.encode(bytes))))
}
