//! Query parameter parsing and validation.
//!
//! | key | meaning |
//! |-----|---------|
//! | `rel` | path relative to the bucket host |
//! | `abs`, `url` | absolute source URL |
//! | `w` | width, integer > 0 (required) |
//! | `h` | height, integer >= 0, 0 = proportional |
//! | `c` | crop, `"true"` or anything else |
//! | `f` | `auto`, `jpeg`, `png`, `webp` or `avif` |
//! | `b` | gaussian blur sigma, float >= 0 |
//! | `g` | grayscale, `"true"` or anything else |

use crate::error::TransformError;
use crate::format::FormatHint;

/// Untyped request input, as received.
///
/// `None` means the key was absent; `Some("")` means it was present but
/// empty. The two are not always equivalent (see `f`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequestParams {
    pub rel: Option<String>,
    pub abs: Option<String>,
    pub url: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub crop: Option<String>,
    pub format: Option<String>,
    pub blur: Option<String>,
    pub gray: Option<String>,
    /// Value of the caller's `Accept` header.
    pub accept: Option<String>,
}

impl RawRequestParams {
    /// Collect query pairs. The first occurrence of a key wins, unknown keys
    /// are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "rel" => &mut params.rel,
                "abs" => &mut params.abs,
                "url" => &mut params.url,
                "w" => &mut params.width,
                "h" => &mut params.height,
                "c" => &mut params.crop,
                "f" => &mut params.format,
                "b" => &mut params.blur,
                "g" => &mut params.gray,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    pub fn with_accept(mut self, accept: Option<String>) -> Self {
        self.accept = accept;
        self
    }
}

/// Where the source image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// Path joined to the configured bucket host.
    Relative(String),
    /// Fully qualified URL, used as-is.
    Absolute(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub source: SourceRef,
    /// Always > 0.
    pub width: u32,
    /// 0 means derive from the source aspect ratio.
    pub height: u32,
    pub crop: bool,
    pub format: FormatHint,
    /// Always finite and >= 0.
    pub blur_sigma: f32,
    pub grayscale: bool,
}

impl ValidatedRequest {
    /// A request with every optional field at its default.
    ///
    /// Returns `InvalidWidth` for a zero width.
    pub fn new(source: SourceRef, width: u32) -> Result<Self, TransformError> {
        if width == 0 {
            return Err(TransformError::InvalidWidth);
        }
        Ok(Self {
            source,
            width,
            height: 0,
            crop: false,
            format: FormatHint::Auto,
            blur_sigma: 0.0,
            grayscale: false,
        })
    }

    pub fn from_raw(raw: &RawRequestParams) -> Result<Self, TransformError> {
        let source = parse_source(raw)?;

        let width = match non_empty(&raw.width) {
            None => return Err(TransformError::MissingWidth),
            Some(w) => parse_dimension(w)
                .filter(|w| *w > 0)
                .ok_or(TransformError::InvalidWidth)?,
        };

        let height = match non_empty(&raw.height) {
            None => 0,
            Some(h) => parse_dimension(h).ok_or(TransformError::InvalidHeight)?,
        };

        let blur_sigma = match non_empty(&raw.blur) {
            None => 0.0,
            Some(b) => b
                .parse::<f64>()
                .ok()
                .filter(|b| b.is_finite() && *b >= 0.0)
                .map(narrow_sigma)
                .ok_or(TransformError::InvalidBlur)?,
        };

        let format = raw
            .format
            .as_deref()
            .map(FormatHint::parse)
            .unwrap_or_default();

        Ok(Self {
            source,
            width,
            height,
            crop: parse_flag(&raw.crop),
            format,
            blur_sigma,
            grayscale: parse_flag(&raw.gray),
        })
    }
}

/// Sigmas beyond `f32` range saturate; the processor clamps them anyway.
fn narrow_sigma(sigma: f64) -> f32 {
    sigma.min(f64::from(f32::MAX)) as f32
}

fn parse_source(raw: &RawRequestParams) -> Result<SourceRef, TransformError> {
    if let Some(rel) = non_empty(&raw.rel) {
        return Ok(SourceRef::Relative(rel.to_string()));
    }
    non_empty(&raw.abs)
        .or_else(|| non_empty(&raw.url))
        .map(|abs| SourceRef::Absolute(abs.to_string()))
        .ok_or(TransformError::MissingSource)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Signed decimal integer that must land in `0..=u32::MAX`.
fn parse_dimension(raw: &str) -> Option<u32> {
    raw.parse::<i64>().ok().and_then(|v| u32::try_from(v).ok())
}

// Case-sensitive on purpose: "True" and "1" are false.
fn parse_flag(value: &Option<String>) -> bool {
    value.as_deref() == Some("true")
}
