use crate::format::Codec;
use crate::params::ValidatedRequest;

/// Encoder quality for every lossy codec. Not caller-configurable.
pub const QUALITY: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Color,
    Grayscale,
}

/// Everything the processor needs to know about one request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformSpec {
    pub codec: Codec,
    pub width: u32,
    /// 0 keeps the source aspect ratio.
    pub height: u32,
    pub crop: bool,
    pub blur_sigma: f32,
    pub color_mode: ColorMode,
    pub quality: u8,
}

impl TransformSpec {
    pub fn build(request: &ValidatedRequest, codec: Codec) -> Self {
        Self {
            codec,
            width: request.width,
            height: request.height,
            crop: request.crop,
            blur_sigma: request.blur_sigma,
            color_mode: if request.grayscale {
                ColorMode::Grayscale
            } else {
                ColorMode::Color
            },
            quality: QUALITY,
        }
    }
}
