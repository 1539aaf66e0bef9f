use std::path::PathBuf;

use imgopt_core::format::Codec;

/// Outcome of one transform run.
pub struct Report {
    pub output: PathBuf,
    pub codec: Codec,
    pub original_size: u64,
    pub output_size: u64,
}

impl Report {
    pub fn savings_pct(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.output_size as f64 / self.original_size as f64) * 100.0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ({}): {} → {} ({:.1}% reduction)",
            self.output.display(),
            self.codec.as_str(),
            format_size(self.original_size),
            format_size(self.output_size),
            self.savings_pct()
        )
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
