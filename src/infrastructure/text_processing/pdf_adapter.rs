use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileType, Upload};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-page outcome of text extraction; the error is the parser's message.
pub type PageText = Result<String, String>;

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &std::path::Path) -> Result<Vec<PageText>, FileLoaderError> {
        let doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("page count unavailable: {e}"))
        })?;

        Ok((0..page_count)
            .map(|page_index| doc.extract_text(page_index).map_err(|e| e.to_string()))
            .collect())
    }
}

/// Joins the readable pages with a blank line. Failed and blank pages are
/// skipped; the document fails only when no page yields text.
pub fn join_page_texts<I>(pages: I, filename: &str) -> Result<String, FileLoaderError>
where
    I: IntoIterator<Item = PageText>,
{
    let mut texts = Vec::new();
    let mut page_count = 0usize;
    let mut failed_pages = 0usize;

    for (index, page) in pages.into_iter().enumerate() {
        page_count += 1;
        match page {
            Ok(text) if !text.trim().is_empty() => {
                tracing::debug!(page = index + 1, "Extracted text from page");
                texts.push(text);
            }
            Ok(_) => {
                tracing::debug!(page = index + 1, "Page has no text");
            }
            Err(e) => {
                failed_pages += 1;
                tracing::warn!(page = index + 1, error = %e, "Failed to extract text from page");
            }
        }
    }

    if texts.is_empty() {
        if page_count > 0 && failed_pages == page_count {
            return Err(FileLoaderError::ExtractionFailed(format!(
                "text extraction failed on all {page_count} pages"
            )));
        }
        return Err(FileLoaderError::NoTextFound(filename.to_string()));
    }

    let joined = texts.join("\n\n");
    tracing::info!(
        page_count,
        failed_pages,
        chars = joined.len(),
        "PDF text extraction complete"
    );

    Ok(joined)
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %upload.filename))]
    async fn extract_text(&self, data: &[u8], upload: &Upload) -> Result<String, FileLoaderError> {
        if upload.file_type != FileType::Pdf {
            return Err(FileLoaderError::UnsupportedFileType(
                upload.file_type.to_string(),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        join_page_texts(pages, &upload.filename)
    }
}
