use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::error::ProcessingError;

/// Lossless; quality does not apply.
pub fn encode(img: &DynamicImage) -> Result<Vec<u8>, ProcessingError> {
    let mut output = Vec::new();
    img.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|e| ProcessingError::Encode(format!("Failed to encode PNG: {e}")))?;
    Ok(output)
}
