use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;
use warbler_core::ProfileImage;

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// JPEG quality factor in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegQuality(u8);

impl JpegQuality {
    pub fn new(quality: u8) -> Self {
        Self(quality.clamp(1, 100))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Profile pictures are shown as small avatars, so they are stored heavily compressed.
impl Default for JpegQuality {
    fn default() -> Self {
        Self(10)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("image is empty")]
    Empty,
    #[error("image could not be decoded: {0}")]
    Undecodable(String),
    #[error("image could not be compressed: {0}")]
    Compression(String),
    #[error("encoder task failed: {0}")]
    Task(String),
}

/// Decodes whatever format the user picked and re-encodes it as JPEG.
///
/// Runs on the blocking pool, inside the caller's span.
#[tracing::instrument(name = "Encoding profile image", skip_all, fields(bytes = image.len()))]
pub async fn encode_profile_image(
    image: &ProfileImage,
    quality: JpegQuality,
) -> Result<Vec<u8>, EncodingError> {
    if image.is_empty() {
        return Err(EncodingError::Empty);
    }

    let raw = image.as_bytes().to_vec();
    let current_span: tracing::Span = tracing::Span::current();
    tokio::task::spawn_blocking(move || current_span.in_scope(|| encode_jpeg(&raw, quality)))
        .await
        .map_err(|e| EncodingError::Task(e.to_string()))?
}

fn encode_jpeg(raw: &[u8], quality: JpegQuality) -> Result<Vec<u8>, EncodingError> {
    let decoded =
        image::load_from_memory(raw).map_err(|e| EncodingError::Undecodable(e.to_string()))?;
    // JPEG has no alpha channel
    let rgb = decoded.to_rgb8();

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, quality.value())
        .encode_image(&rgb)
        .map_err(|e| EncodingError::Compression(e.to_string()))?;

    Ok(encoded)
}
