//! Logo and signature images.
//!
//! Uploads arrive as data URLs (what a browser file reader produces) or raw
//! bytes. They are decoded once at ingestion; a payload that cannot be
//! decoded is reported as an [`AssetError`] by the strict API and as "no
//! asset" by [`load_asset`].
//!
//! Supported formats: PNG (any bit depth/colour type, decoded to 8-bit RGB
//! plus optional alpha) and baseline/progressive JPEG (kept encoded).

mod data_url;
mod image;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use data_url::{parse_data_url, to_data_url};
pub use image::{ImageAsset, ImageFormat, PixelData};

/// Errors from asset ingestion.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssetError {
    /// The text is not a `data:<mime>;base64,<payload>` URL.
    #[error("malformed data URL: {0}")]
    DataUrl(String),

    /// The base64 payload is invalid.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The bytes are not a PNG or JPEG image.
    #[error("unsupported image format")]
    UnsupportedFormat,

    /// The image header or pixel data is corrupt.
    #[error("failed to decode {format} image: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },
}

/// Which image slot an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Logo,
    Signature,
}

impl AssetKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Signature => "signature",
        }
    }
}

/// An upload as delivered by the file reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetPayload {
    /// `data:image/png;base64,...`
    DataUrl(String),
    /// Raw file contents.
    Bytes(Vec<u8>),
}

impl AssetPayload {
    /// Decode the payload into an image.
    pub fn decode(&self) -> Result<ImageAsset, AssetError> {
        match self {
            Self::DataUrl(url) => ImageAsset::from_data_url(url),
            Self::Bytes(bytes) => ImageAsset::from_bytes(bytes),
        }
    }
}

/// Decode a payload, turning any failure into "no asset".
pub fn load_asset(kind: AssetKind, payload: &AssetPayload) -> Option<ImageAsset> {
    match payload.decode() {
        Ok(asset) => {
            tracing::debug!(
                kind = kind.label(),
                format = asset.format().label(),
                width = asset.width(),
                height = asset.height(),
                "image asset decoded"
            );
            Some(asset)
        }
        Err(e) => {
            tracing::warn!(kind = kind.label(), error = %e, "image asset dropped");
            None
        }
    }
}

/// Optional images accompanying an invoice at export time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assets {
    pub logo: Option<ImageAsset>,
    pub signature: Option<ImageAsset>,
}

impl Assets {
    /// No logo, no signature.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: AssetKind) -> Option<&ImageAsset> {
        match kind {
            AssetKind::Logo => self.logo.as_ref(),
            AssetKind::Signature => self.signature.as_ref(),
        }
    }
}
