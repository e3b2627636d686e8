use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileType, Upload};

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(&self, data: &[u8], upload: &Upload) -> Result<String, FileLoaderError> {
        if upload.file_type != FileType::Txt {
            return Err(FileLoaderError::UnsupportedFileType(
                upload.file_type.to_string(),
            ));
        }

        let content = std::str::from_utf8(data).map_err(|e| {
            tracing::warn!(error = %e, filename = %upload.filename, "File encoding error");
            FileLoaderError::InvalidEncoding
        })?;

        if content.trim().is_empty() {
            return Err(FileLoaderError::EmptyFile(upload.filename.clone()));
        }

        tracing::debug!(chars = content.len(), "Extracted text file content");
        Ok(content.to_string())
    }
}
