use std::fmt;

/// Upload formats the extractor understands, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Pdf,
    Txt,
}

impl FileType {
    pub const ALLOWED_EXTENSIONS: [&'static str; 2] = ["pdf", "txt"];

    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        Self::from_extension(extension)
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An uploaded file and the text pulled out of it. Lives for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub filename: String,
    pub size: u64,
    pub file_type: FileType,
    pub content: String,
    pub word_count: usize,
}

impl FileInfo {
    pub fn new(filename: String, size: u64, file_type: FileType, content: String) -> Self {
        let word_count = content.split_whitespace().count();
        Self {
            filename,
            size,
            file_type,
            content,
            word_count,
        }
    }
}
