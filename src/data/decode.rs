use crate::{layers::image::DecodedImage, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Strips an optional `data:<mime>;base64,` prefix and surrounding whitespace
fn base64_payload(encoded: &str) -> &str {
    let trimmed = encoded.trim();
    match trimmed.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, payload)| payload),
        None => trimmed,
    }
}

/// Decodes base64 image bytes (PNG, or anything `image` was built with) into
/// straight-alpha RGBA8 pixels.
pub fn decode_base64_image(encoded: &str) -> Result<DecodedImage> {
    let bytes = STANDARD.decode(base64_payload(encoded))?;
    decode_image_bytes(&bytes)
}

pub fn decode_image_bytes(bytes: &[u8]) -> Result<DecodedImage> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}
