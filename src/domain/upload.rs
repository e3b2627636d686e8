use super::FileType;

/// An uploaded file before extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub filename: String,
    pub file_type: FileType,
    pub size_bytes: u64,
}

impl Upload {
    pub fn new(filename: String, file_type: FileType, size_bytes: u64) -> Self {
        Self {
            filename,
            file_type,
            size_bytes,
        }
    }
}
