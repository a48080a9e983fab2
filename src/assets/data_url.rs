use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::AssetError;
use super::image::ImageAsset;

/// Extract the payload bytes from a base64 `data:` URL.
///
/// Only `image/*` media types are accepted. Whitespace inside the payload
/// (line-wrapped base64) is ignored.
pub fn parse_data_url(url: &str) -> Result<Vec<u8>, AssetError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| AssetError::DataUrl("missing 'data:' prefix".into()))?;

    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| AssetError::DataUrl("missing ',' separator".into()))?;

    let mut params = meta.split(';');
    let mime = params.next().unwrap_or_default();
    if !mime.starts_with("image/") {
        return Err(AssetError::DataUrl(format!(
            "media type '{mime}' is not an image"
        )));
    }
    if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(AssetError::DataUrl("payload is not base64-encoded".into()));
    }

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

/// Encode an image back into a data URL for display.
pub fn to_data_url(asset: &ImageAsset) -> String {
    format!(
        "data:{};base64,{}",
        asset.format().mime_type(),
        STANDARD.encode(asset.encoded())
    )
}
