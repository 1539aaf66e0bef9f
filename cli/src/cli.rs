use std::path::PathBuf;

use clap::Parser;

use imgopt_core::format::{Codec, FormatHint};
use imgopt_core::negotiate::negotiate;
use imgopt_core::params::{SourceRef, ValidatedRequest};
use imgopt_core::TransformError;

/// Resize, blur, desaturate and re-encode a single image
#[derive(Debug, Parser)]
#[command(name = "imgopt", version, about)]
pub struct Cli {
    /// Source image: local path or http(s) URL
    pub source: String,

    /// Output file
    pub output: PathBuf,

    /// Target width in pixels
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Target height in pixels (0 = keep aspect ratio)
    #[arg(short = 'H', long, default_value_t = 0)]
    pub height: u32,

    /// Crop to exactly width x height instead of fitting inside it
    #[arg(short, long)]
    pub crop: bool,

    /// Output format: auto, jpeg, png, webp, avif (default: from output extension)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Accepted content type, consulted when the format is auto
    #[arg(long, value_name = "TYPE")]
    pub accept: Option<String>,

    /// Gaussian blur sigma
    #[arg(short, long, default_value_t = 0.0, value_parser = parse_blur)]
    pub blur: f32,

    /// Convert to grayscale
    #[arg(short, long)]
    pub gray: bool,

    /// Timeout in seconds for remote sources
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_request(&self) -> Result<ValidatedRequest, TransformError> {
        // Only the processing options feed `TransformSpec`; the bytes come from
        // `io::load_source`, so the source is carried as given and never resolved.
        let source = SourceRef::Absolute(self.source.clone());
        let mut request = ValidatedRequest::new(source, self.width)?;
        request.height = self.height;
        request.crop = self.crop;
        request.blur_sigma = self.blur;
        request.grayscale = self.gray;
        request.format = self
            .format
            .as_deref()
            .map(FormatHint::parse)
            .unwrap_or_default();
        Ok(request)
    }

    /// Explicit `--format` goes through normal negotiation; without it the
    /// output extension decides, falling back to negotiation on `--accept`.
    pub fn codec(&self, request: &ValidatedRequest) -> Codec {
        if self.format.is_none() {
            if let Some(codec) = Codec::from_path(&self.output) {
                return codec;
            }
        }
        negotiate(&request.format, self.accept.as_deref())
    }
}

fn parse_blur(raw: &str) -> Result<f32, String> {
    match raw.parse::<f64>() {
        Ok(sigma) if sigma.is_finite() && sigma >= 0.0 => Ok(sigma.min(f64::from(f32::MAX)) as f32),
        _ => Err(format!("invalid blur value: {raw}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("imgopt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["in.png", "out.jpg", "-w", "100"]);
        let request = cli.to_request().unwrap();
        assert_eq!(request.source, SourceRef::Absolute("in.png".into()));
        assert_eq!(request.width, 100);
        assert_eq!(request.height, 0);
        assert!(!request.crop);
        assert!(!request.grayscale);
        assert_eq!(request.format, FormatHint::Auto);
        assert_eq!(cli.codec(&request), Codec::Jpeg);
    }

    #[test]
    fn test_extension_decides_without_format() {
        let cli = parse(&["in.png", "out.avif", "-w", "10"]);
        let request = cli.to_request().unwrap();
        assert_eq!(cli.codec(&request), Codec::Avif);
    }

    #[test]
    fn test_explicit_format_wins_over_extension() {
        let cli = parse(&["in.png", "out.avif", "-w", "10", "-f", "png"]);
        let request = cli.to_request().unwrap();
        assert_eq!(cli.codec(&request), Codec::Png);
    }

    #[test]
    fn test_auto_uses_accept() {
        let cli = parse(&["in.png", "out", "-w", "10", "-f", "auto", "--accept", "image/webp"]);
        let request = cli.to_request().unwrap();
        assert_eq!(cli.codec(&request), Codec::Webp);
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["in.png", "out.png", "-w", "10", "-H", "5", "-c", "-g", "-b", "1.5"]);
        let request = cli.to_request().unwrap();
        assert_eq!(request.height, 5);
        assert!(request.crop);
        assert!(request.grayscale);
        assert_eq!(request.blur_sigma, 1.5);
    }

    #[test]
    fn test_large_blur_saturates() {
        let cli = parse(&["in.png", "out.png", "-w", "10", "-b", "1e39"]);
        assert_eq!(cli.blur, f32::MAX);
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = ["imgopt", "in.png", "out.png"];
        for extra in [&["-w", "0"][..], &["-w", "x"], &["-w", "5", "-b", "-1"], &[]] {
            let args = base.iter().chain(extra.iter()).copied();
            assert!(Cli::try_parse_from(args).is_err(), "{extra:?}");
        }
    }
}
