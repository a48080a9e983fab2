use std::sync::Arc;

use png::{ColorType, Transformations};

use super::AssetError;

/// Image container formats accepted for logo/signature uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Sniff the format from magic bytes.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']) {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }
}

/// Pixel representation ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    /// JPEG stays encoded; `components` is 1 (gray), 3 (RGB) or 4 (CMYK).
    Jpeg { components: u8 },
    /// 8-bit RGB samples plus an optional 8-bit alpha plane.
    Rgb {
        rgb: Arc<[u8]>,
        alpha: Option<Arc<[u8]>>,
    },
}

/// A decoded, immutable image. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    format: ImageFormat,
    width: u32,
    height: u32,
    encoded: Arc<[u8]>,
    pixels: PixelData,
}

impl ImageAsset {
    /// Decode raw file contents.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        match ImageFormat::detect(bytes) {
            Some(ImageFormat::Png) => decode_png(bytes),
            Some(ImageFormat::Jpeg) => decode_jpeg(bytes),
            None => Err(AssetError::UnsupportedFormat),
        }
    }

    /// Decode a `data:image/...;base64,` URL.
    pub fn from_data_url(url: &str) -> Result<Self, AssetError> {
        let bytes = super::parse_data_url(url)?;
        Self::from_bytes(&bytes)
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The original file bytes.
    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    pub fn pixels(&self) -> &PixelData {
        &self.pixels
    }

    /// Width / height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

fn png_error(e: impl std::fmt::Display) -> AssetError {
    AssetError::Decode {
        format: "PNG",
        message: e.to_string(),
    }
}

fn decode_png(bytes: &[u8]) -> Result<ImageAsset, AssetError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(png_error)?;
    let (color_type, _) = reader.output_color_type();
    let mut buf = vec![0_u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(png_error)?;
    let data = &buf[..info.buffer_size()];

    let (rgb, alpha): (Vec<u8>, Option<Vec<u8>>) = match color_type {
        ColorType::Rgb => (data.to_vec(), None),
        ColorType::Rgba => {
            let rgb = data
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            let alpha = data.chunks_exact(4).map(|px| px[3]).collect();
            (rgb, Some(alpha))
        }
        ColorType::Grayscale => (data.iter().flat_map(|&g| [g, g, g]).collect(), None),
        ColorType::GrayscaleAlpha => {
            let rgb = data
                .chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0]])
                .collect();
            let alpha = data.chunks_exact(2).map(|px| px[1]).collect();
            (rgb, Some(alpha))
        }
        ColorType::Indexed => {
            return Err(png_error("palette image was not expanded"));
        }
    };

    let expected = info.width as usize * info.height as usize * 3;
    if rgb.len() != expected {
        return Err(png_error(format!(
            "expected {expected} RGB bytes, decoded {}",
            rgb.len()
        )));
    }

    Ok(ImageAsset {
        format: ImageFormat::Png,
        width: info.width,
        height: info.height,
        encoded: Arc::from(bytes),
        pixels: PixelData::Rgb {
            rgb: Arc::from(rgb),
            alpha: alpha.map(Arc::from),
        },
    })
}

fn jpeg_error(message: &str) -> AssetError {
    AssetError::Decode {
        format: "JPEG",
        message: message.to_string(),
    }
}

/// Walk JPEG markers up to the first start-of-frame and read its geometry.
fn decode_jpeg(bytes: &[u8]) -> Result<ImageAsset, AssetError> {
    let mut pos = 2; // past SOI
    loop {
        // Skip fill bytes before the marker code.
        while bytes.get(pos) == Some(&0xFF) && bytes.get(pos + 1) == Some(&0xFF) {
            pos += 1;
        }
        if bytes.get(pos) != Some(&0xFF) {
            return Err(jpeg_error("expected marker"));
        }
        let marker = *bytes
            .get(pos + 1)
            .ok_or_else(|| jpeg_error("truncated before frame header"))?;
        pos += 2;

        // Standalone markers carry no length.
        if matches!(marker, 0x01 | 0xD0..=0xD7) {
            continue;
        }
        if marker == 0xDA || marker == 0xD9 {
            return Err(jpeg_error("no frame header before scan data"));
        }

        let len = read_u16(bytes, pos).ok_or_else(|| jpeg_error("truncated segment length"))?
            as usize;
        if len < 2 {
            return Err(jpeg_error("invalid segment length"));
        }

        let is_sof = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            // length(2) precision(1) height(2) width(2) components(1)
            let height = read_u16(bytes, pos + 3).ok_or_else(|| jpeg_error("truncated frame"))?;
            let width = read_u16(bytes, pos + 5).ok_or_else(|| jpeg_error("truncated frame"))?;
            let components = *bytes
                .get(pos + 7)
                .ok_or_else(|| jpeg_error("truncated frame"))?;
            if width == 0 || height == 0 {
                return Err(jpeg_error("zero-sized frame"));
            }
            if !matches!(components, 1 | 3 | 4) {
                return Err(jpeg_error("unsupported component count"));
            }
            return Ok(ImageAsset {
                format: ImageFormat::Jpeg,
                width: u32::from(width),
                height: u32::from(height),
                encoded: Arc::from(bytes),
                pixels: PixelData::Jpeg { components },
            });
        }

        pos += len;
    }
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let hi = *bytes.get(at)?;
    let lo = *bytes.get(at + 1)?;
    Some(u16::from_be_bytes([hi, lo]))
}
