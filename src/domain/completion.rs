use serde_json::Value;

/// Result of one upstream completion, reshaped for callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    /// Catalog key of the model, not the upstream identifier.
    pub model: String,
    /// Token accounting passed through from upstream untouched.
    pub usage: Value,
    pub finish_reason: Option<String>,
    pub mode: Option<String>,
    pub perspectives_analyzed: Option<usize>,
}

impl Completion {
    pub fn new(content: String, model: String, usage: Value, finish_reason: Option<String>) -> Self {
        Self {
            content,
            model,
            usage,
            finish_reason,
            mode: None,
            perspectives_analyzed: None,
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }
}
