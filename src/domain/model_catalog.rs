use serde::Serialize;

/// One model the proxy accepts, keyed by a short name clients use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    #[serde(skip)]
    pub key: String,
    pub id: String,
    pub name: String,
    pub description: String,
    pub context_window: u32,
}

impl ModelEntry {
    pub fn new(key: &str, id: &str, name: &str, description: &str, context_window: u32) -> Self {
        Self {
            key: key.to_string(),
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            context_window,
        }
    }
}

/// Immutable table of chat and vision models, built once at startup.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    chat_models: Vec<ModelEntry>,
    vision_models: Vec<ModelEntry>,
    default_model: String,
    default_vision_model: String,
}

impl ModelCatalog {
    pub fn new(
        chat_models: Vec<ModelEntry>,
        vision_models: Vec<ModelEntry>,
        default_model: String,
        default_vision_model: String,
    ) -> Self {
        Self {
            chat_models,
            vision_models,
            default_model,
            default_vision_model,
        }
    }

    /// Models served by Groq's OpenAI-compatible endpoint.
    pub fn groq() -> Self {
        let vision_id = "meta-llama/llama-4-scout-17b-16e-instruct";
        Self::new(
            vec![
                ModelEntry::new(
                    "llama3-8b",
                    "llama3-8b-8192",
                    "Llama 3 8B",
                    "Fast and efficient for general tasks",
                    8192,
                ),
                ModelEntry::new(
                    "llama3-70b",
                    "llama3-70b-8192",
                    "Llama 3 70B",
                    "Most capable model for complex reasoning",
                    8192,
                ),
                ModelEntry::new(
                    "mixtral",
                    "mixtral-8x7b-32768",
                    "Mixtral 8x7B",
                    "Excellent for long context tasks",
                    32768,
                ),
                ModelEntry::new(
                    "gemma",
                    "gemma-7b-it",
                    "Gemma 7B",
                    "Google's efficient instruction-tuned model",
                    8192,
                ),
                ModelEntry::new(
                    "gpt-oss-20b",
                    "openai/gpt-oss-20b",
                    "GPT-OSS 20B",
                    "OpenAI open-weight model, fast",
                    131072,
                ),
                ModelEntry::new(
                    "gpt-oss-120b",
                    "openai/gpt-oss-120b",
                    "GPT-OSS 120B",
                    "OpenAI open-weight model, most capable",
                    131072,
                ),
            ],
            vec![ModelEntry::new(
                vision_id,
                vision_id,
                "Meta Llama 4 Scout",
                "Advanced vision-language model for image analysis",
                8192,
            )],
            "llama3-8b".to_string(),
            vision_id.to_string(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&ModelEntry> {
        self.chat_models.iter().find(|entry| entry.key == key)
    }

    pub fn get_vision(&self, key: &str) -> Option<&ModelEntry> {
        self.vision_models.iter().find(|entry| entry.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Chat model keys in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        self.chat_models.iter().map(|entry| entry.key.as_str()).collect()
    }

    pub fn vision_keys(&self) -> Vec<&str> {
        self.vision_models
            .iter()
            .map(|entry| entry.key.as_str())
            .collect()
    }

    pub fn chat_models(&self) -> &[ModelEntry] {
        &self.chat_models
    }

    pub fn vision_models(&self) -> &[ModelEntry] {
        &self.vision_models
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn default_vision_model(&self) -> &str {
        &self.default_vision_model
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::groq()
    }
}
