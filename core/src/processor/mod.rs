pub mod avif;
pub mod jpg;
pub mod png;
pub mod webp;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::ProcessingError;
use crate::format::Codec;
use crate::transform::{ColorMode, TransformSpec};

pub trait ImageProcessor: Send + Sync {
    fn process(&self, input: &[u8], spec: &TransformSpec) -> Result<Vec<u8>, ProcessingError>;
}

const FILTER: FilterType = FilterType::Lanczos3;

/// Largest pixel count any resize stage may allocate. Allocation failure
/// aborts the process, so oversized targets are refused up front.
pub const MAX_PIXELS: u64 = 40_000_000;

/// Upper bound on the blur sigma; the kernel grows linearly with it.
pub const MAX_BLUR_SIGMA: f32 = 1000.0;

/// Decode, resize, blur, desaturate and re-encode with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterProcessor;

impl ImageProcessor for RasterProcessor {
    fn process(&self, input: &[u8], spec: &TransformSpec) -> Result<Vec<u8>, ProcessingError> {
        let img = image::load_from_memory(input)
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;

        log::debug!(
            "Transforming {}x{} image to {} ({}x{}, crop={}, blur={}, {:?})",
            img.width(),
            img.height(),
            spec.codec.as_str(),
            spec.width,
            spec.height,
            spec.crop,
            spec.blur_sigma,
            spec.color_mode
        );

        check_resize_budget(&img, spec)?;
        let img = apply(&img, spec);

        let output = match spec.codec {
            Codec::Jpeg => jpg::encode(&img, spec.quality)?,
            Codec::Png => png::encode(&img)?,
            Codec::Webp => webp::encode(&img, spec.quality)?,
            Codec::Avif => avif::encode(&img, spec.quality)?,
        };

        log::debug!(
            "Encoded {}x{} {}: {} bytes",
            img.width(),
            img.height(),
            spec.codec.as_str(),
            output.len()
        );

        Ok(output)
    }
}

/// Geometry and pixel operations, in order: resize, blur, grayscale.
pub fn apply(img: &DynamicImage, spec: &TransformSpec) -> DynamicImage {
    let mut out = match (spec.height, spec.crop) {
        // Width-constrained; the unbounded height never limits the ratio.
        (0, _) => img.resize(spec.width, u32::MAX, FILTER),
        (height, true) => img.resize_to_fill(spec.width, height, FILTER),
        (height, false) => img.resize(spec.width, height, FILTER),
    };

    if spec.blur_sigma > 0.0 {
        // Past the image size a wider kernel changes nothing visible.
        let largest_side = out.width().max(out.height()) as f32;
        out = out.blur(spec.blur_sigma.min(largest_side).min(MAX_BLUR_SIGMA));
    }

    if spec.color_mode == ColorMode::Grayscale {
        out = out.grayscale();
    }

    out
}

/// Refuse resizes whose output, or whose intermediate buffer, would exceed
/// [`MAX_PIXELS`]. Resampling runs columns first, so the intermediate is
/// source width by target height.
pub fn check_resize_budget(
    img: &DynamicImage,
    spec: &TransformSpec,
) -> Result<(), ProcessingError> {
    let (width, height) = resize_target(img.width(), img.height(), spec);
    let intermediate = u64::from(img.width()).saturating_mul(height);
    if width.saturating_mul(height).max(intermediate) > MAX_PIXELS {
        return Err(ProcessingError::TooLarge { width, height });
    }
    Ok(())
}

/// Dimensions `apply` resizes to before any fill crop, same rounding as `image`.
fn resize_target(src_w: u32, src_h: u32, spec: &TransformSpec) -> (u64, u64) {
    let (box_h, fill) = match (spec.height, spec.crop) {
        (0, _) => (u32::MAX, false),
        (height, crop) => (height, crop),
    };
    let wratio = f64::from(spec.width) / f64::from(src_w);
    let hratio = f64::from(box_h) / f64::from(src_h);
    let ratio = if fill { wratio.max(hratio) } else { wratio.min(hratio) };
    let scale = |side: u32| (f64::from(side) * ratio).round().max(1.0) as u64;
    (scale(src_w), scale(src_h))
}
