use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::{Completion, FileInfo, ModelCatalog, ModelEntry};

const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Serialize)]
pub struct ResponseMetadata {
    pub finish_reason: Option<String>,
    pub perspectives_analyzed: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub model: String,
    pub mode: String,
    pub usage: Value,
    pub metadata: ResponseMetadata,
}

impl ChatResponse {
    /// `default_mode` is used when the completion carries no mode of its own.
    pub fn from_completion(completion: Completion, default_mode: &str) -> Self {
        Self {
            success: true,
            response: completion.content,
            model: completion.model,
            mode: completion.mode.unwrap_or_else(|| default_mode.to_string()),
            usage: completion.usage,
            metadata: ResponseMetadata {
                finish_reason: completion.finish_reason,
                perspectives_analyzed: completion.perspectives_analyzed,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub success: bool,
    pub models: BTreeMap<String, ModelEntry>,
    pub default_model: String,
    pub vision_models: BTreeMap<String, ModelEntry>,
    pub default_vision_model: String,
}

impl ModelsResponse {
    pub fn from_catalog(catalog: &ModelCatalog) -> Self {
        let by_key = |entries: &[ModelEntry]| {
            entries
                .iter()
                .map(|entry| (entry.key.clone(), entry.clone()))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            success: true,
            models: by_key(catalog.chat_models()),
            default_model: catalog.default_model().to_string(),
            vision_models: by_key(catalog.vision_models()),
            default_vision_model: catalog.default_vision_model().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileInfoResponse {
    pub filename: String,
    pub size: u64,
    pub r#type: String,
    pub word_count: usize,
}

impl From<&FileInfo> for FileInfoResponse {
    fn from(info: &FileInfo) -> Self {
        Self {
            filename: info.filename.clone(),
            size: info.size,
            r#type: info.file_type.to_string(),
            word_count: info.word_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AiAnalysis {
    pub response: String,
    pub model: String,
    pub question: String,
    pub usage: Value,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file_info: FileInfoResponse,
    pub content_preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct ContentStats {
    pub character_count: usize,
    pub word_count: usize,
}

impl ContentStats {
    pub fn of(content: &str) -> Self {
        Self {
            character_count: content.chars().count(),
            word_count: content.split_whitespace().count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: String,
    pub model: String,
    pub mode: String,
    pub question: String,
    pub content_stats: ContentStats,
    pub usage: Value,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// First 500 characters, with an ellipsis when the content is longer.
pub fn content_preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let head: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}
