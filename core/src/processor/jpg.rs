use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType};

use crate::error::ProcessingError;

/// Encode as baseline JPEG. Single-channel images stay single-channel,
/// everything else is flattened to RGB since JPEG has no alpha.
pub fn encode(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, ProcessingError> {
    let mut output = Vec::new();

    {
        let mut encoder = JpegEncoder::new_with_quality(&mut output, quality);
        let result = match img {
            DynamicImage::ImageLuma8(gray) => encoder.encode(
                gray.as_raw(),
                gray.width(),
                gray.height(),
                ExtendedColorType::L8,
            ),
            _ => {
                let rgb = img.to_rgb8();
                encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            }
        };
        result.map_err(|e| ProcessingError::Encode(format!("Failed to encode JPEG: {e}")))?;
    }

    Ok(output)
}
