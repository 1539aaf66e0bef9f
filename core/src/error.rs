use thiserror::Error;

/// Terminal outcome of one pipeline stage.
///
/// The display strings are the messages returned to callers, so keep them
/// short and free of upstream detail.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("rel or abs parameter required")]
    MissingSource,

    #[error("url and w (width) are required")]
    MissingWidth,

    #[error("invalid width")]
    InvalidWidth,

    #[error("invalid height")]
    InvalidHeight,

    #[error("invalid blur value")]
    InvalidBlur,

    #[error("failed to fetch image")]
    SourceFetchFailed,

    #[error("failed to read image")]
    SourceReadFailed,

    #[error("image processing failed")]
    ProcessingFailed,
}

impl TransformError {
    /// Whether the failure is attributed to the caller (bad input or an
    /// unusable source) rather than to this service.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::MissingSource
            | Self::MissingWidth
            | Self::InvalidWidth
            | Self::InvalidHeight
            | Self::InvalidBlur
            | Self::SourceFetchFailed => true,
            Self::SourceReadFailed | Self::ProcessingFailed => false,
        }
    }
}

/// Failure inside the image processor. Never shown to callers; the pipeline
/// folds every variant into [`TransformError::ProcessingFailed`].
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("{width}x{height} pixels exceeds the processing limit")]
    TooLarge { width: u64, height: u64 },

    #[error("processing worker failed: {0}")]
    Worker(String),
}

impl From<ProcessingError> for TransformError {
    fn from(err: ProcessingError) -> Self {
        log::warn!("{err}");
        TransformError::ProcessingFailed
    }
}
