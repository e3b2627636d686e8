use async_trait::async_trait;

use crate::domain::Upload;

#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(&self, data: &[u8], upload: &Upload) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("Failed to process PDF: {0}")]
    ExtractionFailed(String),
    #[error("No readable text found in PDF")]
    NoTextFound(String),
    #[error("File must be UTF-8 encoded text")]
    InvalidEncoding,
    #[error("Text file is empty")]
    EmptyFile(String),
}
