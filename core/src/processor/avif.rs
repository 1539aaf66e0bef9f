use image::codecs::avif::AvifEncoder;
use image::DynamicImage;

use crate::error::ProcessingError;

/// rav1e speed preset, 1 (slowest) to 10 (fastest). Requests wait on this.
const SPEED: u8 = 8;

pub fn encode(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, ProcessingError> {
    let rgba = img.to_rgba8();
    let mut output = Vec::new();

    let encoder = AvifEncoder::new_with_speed_quality(&mut output, SPEED, quality);
    rgba.write_with_encoder(encoder)
        .map_err(|e| ProcessingError::Encode(format!("Failed to encode AVIF: {e}")))?;

    Ok(output)
}
