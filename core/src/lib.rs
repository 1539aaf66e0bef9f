//! Request-to-transform pipeline for on-demand image resizing and re-encoding.

pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod negotiate;
pub mod params;
pub mod pipeline;
pub mod processor;
pub mod source;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use error::{ProcessingError, TransformError};
pub use pipeline::{Pipeline, TransformedImage};
