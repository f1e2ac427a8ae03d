use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhatsappError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Not found: {message}")]
    NotFoundError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Template rendering failed: {message}")]
    RenderError { message: String },

    #[error("PDF generation failed: {message}")]
    PdfGenerationError { message: String },

    #[error("Upload failed: {message}")]
    UploadError { message: String },

    #[error("Gateway request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WhatsappError>;
