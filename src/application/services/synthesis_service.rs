use std::sync::Arc;

use futures::future::join_all;

use crate::application::ports::LlmClient;
use crate::domain::{ChatMessage, Completion, DegradeReason, SynthesisOutcome};

use super::completion_service::{CompletionParams, CompletionService, UpstreamError};

const RECAP_TURNS: usize = 4;
const RECAP_TURN_CHARS: usize = 200;

const ANALYST_SYSTEM_PROMPT: &str =
    "Provide a detailed, analytical response with specific examples and insights.";
const SYNTHESIZER_SYSTEM_PROMPT: &str =
    "You are an expert synthesizer. Create comprehensive, well-structured responses.";

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("all pro mode queries failed")]
    Exhausted,
    #[error("synthesis query failed: {0}")]
    Synthesis(UpstreamError),
}

/// Pro mode: three perspective queries merged by a fourth, degrading to a
/// single basic completion when that pipeline cannot finish.
pub struct SynthesisService<L>
where
    L: LlmClient,
{
    completion_service: Arc<CompletionService<L>>,
    response_language: String,
}

impl<L> SynthesisService<L>
where
    L: LlmClient,
{
    pub fn new(completion_service: Arc<CompletionService<L>>, response_language: String) -> Self {
        Self {
            completion_service,
            response_language,
        }
    }

    #[tracing::instrument(skip(self, params), fields(model = %params.model_key))]
    pub async fn run(&self, params: CompletionParams<'_>) -> Result<SynthesisOutcome, UpstreamError> {
        let failure = match self.synthesize(&params).await {
            Ok((completion, perspectives_analyzed)) => {
                tracing::info!(perspectives_analyzed, "Pro mode synthesis complete");
                return Ok(SynthesisOutcome::Success {
                    completion,
                    perspectives_analyzed,
                });
            }
            Err(e) => e,
        };

        tracing::error!(error = %failure, "Pro mode completion failed, falling back to basic mode");

        let reason = match failure {
            SynthesisError::Exhausted => DegradeReason::PerspectivesExhausted,
            SynthesisError::Synthesis(e) => DegradeReason::SynthesisFailed(e.to_string()),
        };

        let fallback = CompletionParams {
            system_prompt: None,
            ..params
        };
        let completion = self.completion_service.complete(fallback).await?;

        Ok(SynthesisOutcome::Degraded { reason, completion })
    }

    async fn synthesize(
        &self,
        params: &CompletionParams<'_>,
    ) -> Result<(Completion, usize), SynthesisError> {
        let recap = render_history_recap(params.conversation_history);
        let analyst_prompt = format!(
            "{ANALYST_SYSTEM_PROMPT} Always respond in {}.",
            self.response_language
        );

        let prompts: Vec<String> = perspective_prompts(params.message)
            .iter()
            .map(|prompt| format!("{recap}{prompt}"))
            .collect();

        let analyst_prompt = analyst_prompt.as_str();
        let completion_service = self.completion_service.as_ref();
        let calls = prompts.iter().map(|prompt| {
            let perspective = CompletionParams::new(prompt, params.model_key)
                .with_context(params.context)
                .with_system_prompt(analyst_prompt);
            completion_service.complete(perspective)
        });

        let mut answers = Vec::with_capacity(prompts.len());
        for (index, result) in join_all(calls).await.into_iter().enumerate() {
            match result {
                Ok(completion) => {
                    tracing::debug!(query = index + 1, "Pro mode query completed");
                    answers.push(completion.content);
                }
                Err(e) => {
                    tracing::warn!(query = index + 1, error = %e, "Pro mode query failed");
                }
            }
        }

        if answers.is_empty() {
            return Err(SynthesisError::Exhausted);
        }

        let synthesis_prompt = synthesis_prompt(params.message, &answers);
        let synthesizer_prompt = format!(
            "{SYNTHESIZER_SYSTEM_PROMPT} Always respond in {}.",
            self.response_language
        );
        let merge = CompletionParams::new(&synthesis_prompt, params.model_key)
            .with_context(params.context)
            .with_system_prompt(&synthesizer_prompt);

        let completion = self
            .completion_service
            .complete(merge)
            .await
            .map_err(SynthesisError::Synthesis)?;

        Ok((completion, answers.len()))
    }
}

pub fn perspective_prompts(message: &str) -> [String; 3] {
    [
        format!("Analyze this comprehensively: {message}"),
        format!("Provide detailed insights about: {message}"),
        format!("What are the key aspects and implications of: {message}"),
    ]
}

/// Short recap of the last four turns, each cut to 200 characters.
/// Empty when there is no history.
pub fn render_history_recap(history: &[ChatMessage]) -> String {
    if history.is_empty() {
        return String::new();
    }

    let start = history.len().saturating_sub(RECAP_TURNS);
    let mut recap = String::from("Previous conversation:\n");
    for turn in &history[start..] {
        let text: String = turn.text().chars().take(RECAP_TURN_CHARS).collect();
        recap.push_str(&format!("{}: {}\n", turn.role, text));
    }
    recap.push('\n');
    recap
}

pub fn synthesis_prompt(message: &str, answers: &[String]) -> String {
    let labelled = answers
        .iter()
        .enumerate()
        .map(|(index, answer)| format!("Response {}: {}", index + 1, answer))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the following multiple analytical responses to the question \"{message}\", \
         create a comprehensive, well-structured final answer that synthesizes the best insights:\n\n\
         {labelled}\n\n\
         Provide a detailed, authoritative response that combines the best elements from all perspectives."
    )
}
