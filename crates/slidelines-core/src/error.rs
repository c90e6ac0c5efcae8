use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlidelinesError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF operation failed: {0}")]
    OperationError(String),
}

pub type Result<T> = std::result::Result<T, SlidelinesError>;
