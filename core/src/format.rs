use std::path::Path;

/// Output encodings the service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Jpeg,
    Png,
    Webp,
    Avif,
}

impl Codec {
    /// Parse an explicit format name. Exact, lowercase names only.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "jpeg" => Some(Codec::Jpeg),
            "png" => Some(Codec::Png),
            "webp" => Some(Codec::Webp),
            "avif" => Some(Codec::Avif),
            _ => None,
        }
    }

    /// Guess a codec from a file extension, e.g. for CLI output paths.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Codec::Jpeg),
            "png" => Some(Codec::Png),
            "webp" => Some(Codec::Webp),
            "avif" => Some(Codec::Avif),
            _ => None,
        }
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            Codec::Jpeg => image::ImageFormat::Jpeg,
            Codec::Png => image::ImageFormat::Png,
            Codec::Webp => image::ImageFormat::WebP,
            Codec::Avif => image::ImageFormat::Avif,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::Jpeg => "JPEG",
            Codec::Png => "PNG",
            Codec::Webp => "WebP",
            Codec::Avif => "AVIF",
        }
    }
}

/// The caller's `f` parameter, kept loosely typed until negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormatHint {
    #[default]
    Auto,
    Explicit(Codec),
    /// Anything else, including an empty value. Negotiates to JPEG.
    Unrecognized(String),
}

impl FormatHint {
    pub fn parse(raw: &str) -> Self {
        if raw == "auto" {
            return FormatHint::Auto;
        }
        match Codec::from_name(raw) {
            Some(codec) => FormatHint::Explicit(codec),
            None => FormatHint::Unrecognized(raw.to_string()),
        }
    }
}

/// Generic binary type for anything without a dedicated mapping.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// MIME type sent back with an encoded image.
pub fn content_type(format: image::ImageFormat) -> &'static str {
    match format {
        image::ImageFormat::Jpeg => "image/jpeg",
        image::ImageFormat::Png => "image/png",
        image::ImageFormat::WebP => "image/webp",
        image::ImageFormat::Avif => "image/avif",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_per_codec() {
        assert_eq!(content_type(Codec::Jpeg.image_format()), "image/jpeg");
        assert_eq!(content_type(Codec::Png.image_format()), "image/png");
        assert_eq!(content_type(Codec::Webp.image_format()), "image/webp");
        assert_eq!(content_type(Codec::Avif.image_format()), "image/avif");
    }

    #[test]
    fn test_content_type_fallback() {
        assert_eq!(content_type(image::ImageFormat::Gif), OCTET_STREAM);
        assert_eq!(content_type(image::ImageFormat::Tiff), OCTET_STREAM);
    }

    #[test]
    fn test_format_hint_parse() {
        assert_eq!(FormatHint::parse("auto"), FormatHint::Auto);
        assert_eq!(FormatHint::parse("png"), FormatHint::Explicit(Codec::Png));
        assert_eq!(FormatHint::parse("avif"), FormatHint::Explicit(Codec::Avif));
        assert_eq!(FormatHint::parse("PNG"), FormatHint::Unrecognized("PNG".into()));
        assert_eq!(FormatHint::parse("jpg"), FormatHint::Unrecognized("jpg".into()));
        assert_eq!(FormatHint::parse(""), FormatHint::Unrecognized(String::new()));
    }

    #[test]
    fn test_codec_from_path() {
        assert_eq!(Codec::from_path(Path::new("out/thumb.JPG")), Some(Codec::Jpeg));
        assert_eq!(Codec::from_path(Path::new("a.webp")), Some(Codec::Webp));
        assert_eq!(Codec::from_path(Path::new("a.gif")), None);
        assert_eq!(Codec::from_path(Path::new("noext")), None);
    }
}
