use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{FileType, Upload};

use super::{PdfAdapter, PlainTextAdapter};

/// Dispatches to the adapter registered for the upload's file type.
pub struct CompositeFileLoader {
    adapters: HashMap<FileType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(FileType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// PDF and plain-text adapters.
    pub fn standard() -> Self {
        let pdf: Arc<dyn FileLoader> = Arc::new(PdfAdapter::new());
        let text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
        Self::new(vec![(FileType::Pdf, pdf), (FileType::Txt, text)])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(&self, data: &[u8], upload: &Upload) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&upload.file_type).ok_or_else(|| {
            FileLoaderError::UnsupportedFileType(upload.file_type.to_string())
        })?;

        adapter.extract_text(data, upload).await
    }
}
