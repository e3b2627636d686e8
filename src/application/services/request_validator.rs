use serde::Deserialize;

use crate::domain::{ChatMessage, ChatMode, ModelCatalog};

pub const MAX_MESSAGE_CHARS: usize = 4000;
pub const MAX_CONTEXT_CHARS: usize = 8000;
pub const MAX_ANALYZE_CONTENT_CHARS: usize = 50_000;
pub const MIN_API_KEY_CHARS: usize = 20;

const MAX_FILENAME_CHARS: usize = 100;
const TRUNCATED_STEM_CHARS: usize = 95;

/// Chat payload exactly as the client sent it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequestBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub model: String,
    pub mode: ChatMode,
    pub context: Option<String>,
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequestBody {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeRequest {
    pub content: String,
    pub question: Option<String>,
    pub model: String,
    pub mode: ChatMode,
}

/// Every constraint a request violated, in check order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .violations.join("; "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

pub fn validate_chat_request(
    body: ChatRequestBody,
    catalog: &ModelCatalog,
) -> Result<ChatRequest, ValidationError> {
    let mut violations = Vec::new();

    let message = body.message.unwrap_or_default().trim().to_string();
    if message.is_empty() {
        violations.push("Message is required and cannot be empty".to_string());
    } else if message.chars().count() > MAX_MESSAGE_CHARS {
        violations.push(format!(
            "Message cannot exceed {MAX_MESSAGE_CHARS} characters"
        ));
    }

    let model = check_model(body.model, catalog, &mut violations);
    let mode = check_mode(body.mode.as_deref(), &mut violations);

    let context = body.context.filter(|c| !c.is_empty());
    if let Some(context) = &context {
        if context.chars().count() > MAX_CONTEXT_CHARS {
            violations.push(format!(
                "Context cannot exceed {MAX_CONTEXT_CHARS} characters"
            ));
        }
    }

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(ChatRequest {
        message,
        model,
        mode,
        context,
        conversation_history: body.conversation_history,
    })
}

pub fn validate_analyze_request(
    body: AnalyzeRequestBody,
    catalog: &ModelCatalog,
) -> Result<AnalyzeRequest, ValidationError> {
    let mut violations = Vec::new();

    let content = body.content.unwrap_or_default().trim().to_string();
    if content.is_empty() {
        violations.push("Content field is required".to_string());
    } else if content.chars().count() > MAX_ANALYZE_CONTENT_CHARS {
        violations.push("Content cannot exceed 50,000 characters".to_string());
    }

    let model = check_model(body.model, catalog, &mut violations);
    let mode = check_mode(body.mode.as_deref(), &mut violations);

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    let question = body
        .question
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());

    Ok(AnalyzeRequest {
        content,
        question,
        model,
        mode,
    })
}

/// Resolves an optional model key against the catalog, defaulting when absent.
pub fn resolve_model(model: Option<String>, catalog: &ModelCatalog) -> Result<String, ValidationError> {
    let mut violations = Vec::new();
    let model = check_model(model, catalog, &mut violations);
    if violations.is_empty() {
        Ok(model)
    } else {
        Err(ValidationError { violations })
    }
}

pub fn invalid_model_message(available: &[&str]) -> String {
    format!("Invalid model. Available models: [{}]", available.join(", "))
}

fn check_model(model: Option<String>, catalog: &ModelCatalog, violations: &mut Vec<String>) -> String {
    let model = model.unwrap_or_else(|| catalog.default_model().to_string());
    if !catalog.contains(&model) {
        violations.push(invalid_model_message(&catalog.keys()));
    }
    model
}

fn check_mode(mode: Option<&str>, violations: &mut Vec<String>) -> ChatMode {
    match mode.map(str::parse::<ChatMode>) {
        None => ChatMode::Basic,
        Some(Ok(mode)) => mode,
        Some(Err(message)) => {
            violations.push(message);
            ChatMode::Basic
        }
    }
}

/// Cheap presence gate for the upstream key; not a format check.
pub fn api_key_is_plausible(api_key: Option<&str>) -> bool {
    match api_key.map(str::trim) {
        None | Some("") => {
            tracing::error!("GROQ_API_KEY environment variable not set");
            false
        }
        Some(key) if key.chars().count() < MIN_API_KEY_CHARS => {
            tracing::error!("GROQ_API_KEY appears to be invalid (too short)");
            false
        }
        Some(_) => true,
    }
}

/// Reduces a client-supplied filename to a safe basename.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.chars().count() <= MAX_FILENAME_CHARS {
        return cleaned;
    }

    match cleaned.rsplit_once('.') {
        Some((stem, extension)) => {
            let stem: String = stem.chars().take(TRUNCATED_STEM_CHARS).collect();
            format!("{stem}.{extension}")
        }
        None => cleaned.chars().take(TRUNCATED_STEM_CHARS).collect(),
    }
}
