use image::DynamicImage;

use crate::error::ProcessingError;

/// Lossy WebP through libwebp. The `image` crate's own encoder is lossless
/// only, so it cannot honour the quality setting.
pub fn encode(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, ProcessingError> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let encoded = webp::Encoder::from_rgba(rgba.as_raw(), width, height)
        .encode_simple(false, f32::from(quality))
        .map_err(|e| ProcessingError::Encode(format!("Failed to encode WebP: {e:?}")))?;

    Ok(encoded.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn test_roundtrip_dimensions() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::new(24, 12));
        let out = encode(&img, 85).unwrap();
        assert_eq!(&out[0..4], b"RIFF");
        assert_eq!(&out[8..12], b"WEBP");
        assert_eq!(image::load_from_memory(&out).unwrap().dimensions(), (24, 12));
    }
}
