use crate::format::{Codec, FormatHint};

/// Pick the output codec.
///
/// With `FormatHint::Auto` the `Accept` value is compared as a whole string:
/// only a bare `image/avif` or `image/webp` selects those codecs. Lists,
/// wildcards and q-values all fall back to JPEG.
pub fn negotiate(hint: &FormatHint, accept: Option<&str>) -> Codec {
    match hint {
        FormatHint::Auto => match accept {
            Some("image/avif") => Codec::Avif,
            Some("image/webp") => Codec::Webp,
            _ => Codec::Jpeg,
        },
        FormatHint::Explicit(codec) => *codec,
        FormatHint::Unrecognized(_) => Codec::Jpeg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_uses_accept() {
        assert_eq!(negotiate(&FormatHint::Auto, Some("image/avif")), Codec::Avif);
        assert_eq!(negotiate(&FormatHint::Auto, Some("image/webp")), Codec::Webp);
        assert_eq!(negotiate(&FormatHint::Auto, None), Codec::Jpeg);
        assert_eq!(negotiate(&FormatHint::Auto, Some("")), Codec::Jpeg);
    }

    #[test]
    fn test_auto_is_exact_match_only() {
        for accept in [
            "image/avif,image/webp,*/*;q=0.8",
            "image/webp;q=0.9",
            "image/*",
            "*/*",
            "IMAGE/WEBP",
            " image/webp",
        ] {
            assert_eq!(negotiate(&FormatHint::Auto, Some(accept)), Codec::Jpeg, "{accept}");
        }
    }

    #[test]
    fn test_explicit_ignores_accept() {
        for codec in [Codec::Jpeg, Codec::Png, Codec::Webp, Codec::Avif] {
            assert_eq!(negotiate(&FormatHint::Explicit(codec), Some("image/avif")), codec);
            assert_eq!(negotiate(&FormatHint::Explicit(codec), None), codec);
        }
    }

    #[test]
    fn test_unrecognized_defaults_to_jpeg() {
        let gif = FormatHint::Unrecognized("gif".into());
        assert_eq!(negotiate(&gif, Some("image/webp")), Codec::Jpeg);
        let empty = FormatHint::Unrecognized(String::new());
        assert_eq!(negotiate(&empty, Some("image/avif")), Codec::Jpeg);
    }
}
