use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileInfo, FileType, Upload};

use super::request_validator::sanitize_filename;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Gates uploads by name and size, then hands them to the file loader.
pub struct DocumentService<F>
where
    F: FileLoader,
{
    file_loader: Arc<F>,
    max_file_size: u64,
}

impl<F> DocumentService<F>
where
    F: FileLoader,
{
    pub fn new(file_loader: Arc<F>) -> Self {
        Self {
            file_loader,
            max_file_size: MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    pub async fn extract(&self, data: &[u8], declared_filename: &str) -> Result<FileInfo, FileError> {
        if declared_filename.trim().is_empty() {
            return Err(FileError::NoFile);
        }

        let file_type = FileType::from_filename(declared_filename).ok_or(FileError::UnsupportedType)?;

        let size = data.len() as u64;
        if size > self.max_file_size {
            return Err(FileError::TooLarge {
                max_bytes: self.max_file_size,
            });
        }

        let filename = sanitize_filename(declared_filename);
        tracing::debug!(filename = %filename, file_type = %file_type, "Processing file");

        let upload = Upload::new(filename, file_type, size);
        let content = self.file_loader.extract_text(data, &upload).await?;

        let info = FileInfo::new(upload.filename, upload.size_bytes, upload.file_type, content);
        tracing::info!(
            filename = %info.filename,
            word_count = info.word_count,
            "File text extracted"
        );

        Ok(info)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("No file provided")]
    NoFile,
    #[error("File type not allowed. Supported types: {}", FileType::ALLOWED_EXTENSIONS.join(", "))]
    UnsupportedType,
    #[error("File too large. Maximum size: {:.1}MB", megabytes(.max_bytes))]
    TooLarge { max_bytes: u64 },
    #[error("{0}")]
    Extraction(#[from] FileLoaderError),
}

fn megabytes(bytes: &u64) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}
