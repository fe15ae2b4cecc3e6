#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read content: {0}")]
    ReadError(String),

    #[error("no content provided")]
    EmptyContent,
}
