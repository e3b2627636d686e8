mod common;

use std::sync::Arc;

use chatbridge::application::ports::LlmClientError;
use chatbridge::application::services::{
    CompletionParams, CompletionService, SynthesisService, UpstreamError, perspective_prompts,
    render_history_recap, synthesis_prompt,
};
use chatbridge::domain::{
    ChatMessage, DegradeReason, FALLBACK_MODE, MessageRole, ModelCatalog, PRO_MODE,
    SynthesisOutcome,
};

use common::{ScriptedLlmClient, completion, last_user_text, system_text};

fn synthesis(client: &Arc<ScriptedLlmClient>) -> SynthesisService<ScriptedLlmClient> {
    let completion_service = Arc::new(CompletionService::new(
        Arc::clone(client),
        Arc::new(ModelCatalog::groq()),
    ));
    SynthesisService::new(completion_service, "English".to_string())
}

fn is_perspective(system: &str) -> bool {
    system.starts_with("Provide a detailed, analytical response")
}

fn is_synthesizer(system: &str) -> bool {
    system.starts_with("You are an expert synthesizer")
}

fn upstream_down() -> LlmClientError {
    LlmClientError::ApiRequestFailed("HTTP 503: unavailable".to_string())
}

#[tokio::test]
async fn given_all_perspectives_answer_when_running_then_returns_pro_with_three() {
    let client = Arc::new(ScriptedLlmClient::new(|request| {
        let system = system_text(request);
        if is_synthesizer(&system) {
            Ok(completion("merged answer"))
        } else {
            Ok(completion(&format!("perspective on {}", last_user_text(request))))
        }
    }));
    let service = synthesis(&client);

    let outcome = service
        .run(CompletionParams::new("What is Rust?", "llama3-8b"))
        .await
        .unwrap();

    assert!(!outcome.is_degraded());
    assert_eq!(outcome.mode(), PRO_MODE);
    let completion = outcome.into_completion();
    assert_eq!(completion.content, "merged answer");
    assert_eq!(completion.mode.as_deref(), Some("pro"));
    assert_eq!(completion.perspectives_analyzed, Some(3));
    assert_eq!(client.call_count(), 4);
}

#[tokio::test]
async fn given_one_perspective_fails_when_running_then_synthesizes_the_other_two() {
    let client = Arc::new(ScriptedLlmClient::new(|request| {
        let system = system_text(request);
        let user = last_user_text(request);
        if is_synthesizer(&system) {
            Ok(completion(&user))
        } else if user.starts_with("Provide detailed insights") {
            Err(upstream_down())
        } else {
            Ok(completion("an answer"))
        }
    }));
    let service = synthesis(&client);

    let outcome = service
        .run(CompletionParams::new("What is Rust?", "llama3-8b"))
        .await
        .unwrap();

    match &outcome {
        SynthesisOutcome::Success {
            completion,
            perspectives_analyzed,
        } => {
            assert_eq!(*perspectives_analyzed, 2);
            assert!(completion.content.contains("Response 1: an answer"));
            assert!(completion.content.contains("Response 2: an answer"));
            assert!(!completion.content.contains("Response 3"));
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn given_every_perspective_fails_when_running_then_degrades_to_basic_call() {
    let client = Arc::new(ScriptedLlmClient::new(|request| {
        if is_perspective(&system_text(request)) {
            Err(LlmClientError::Timeout)
        } else {
            Ok(completion("plain answer"))
        }
    }));
    let service = synthesis(&client);

    let outcome = service
        .run(CompletionParams::new("What is Rust?", "llama3-8b"))
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        SynthesisOutcome::Degraded {
            reason: DegradeReason::PerspectivesExhausted,
            ..
        }
    ));
    assert_eq!(outcome.mode(), FALLBACK_MODE);
    let completion = outcome.into_completion();
    assert_eq!(completion.content, "plain answer");
    assert_eq!(completion.mode.as_deref(), Some("basic (fallback)"));
    assert_eq!(completion.perspectives_analyzed, None);

    let requests = client.requests();
    assert_eq!(requests.len(), 4);
    let fallback = requests.last().unwrap();
    assert_eq!(fallback.messages, vec![ChatMessage::user("What is Rust?")]);
}

#[tokio::test]
async fn given_synthesis_call_fails_when_running_then_degrades_with_reason() {
    let client = Arc::new(ScriptedLlmClient::new(|request| {
        let system = system_text(request);
        if is_synthesizer(&system) {
            Err(LlmClientError::RateLimited)
        } else if is_perspective(&system) {
            Ok(completion("a perspective"))
        } else {
            Ok(completion("plain answer"))
        }
    }));
    let service = synthesis(&client);

    let outcome = service
        .run(CompletionParams::new("What is Rust?", "llama3-8b"))
        .await
        .unwrap();

    match &outcome {
        SynthesisOutcome::Degraded {
            reason: DegradeReason::SynthesisFailed(_),
            completion,
        } => assert_eq!(completion.content, "plain answer"),
        other => panic!("expected synthesis failure, got {other:?}"),
    }
    assert_eq!(client.call_count(), 5);
}

#[tokio::test]
async fn given_fallback_also_fails_when_running_then_returns_error() {
    let client = Arc::new(ScriptedLlmClient::failing());
    let service = synthesis(&client);

    let result = service
        .run(CompletionParams::new("What is Rust?", "llama3-8b"))
        .await;

    assert!(matches!(result, Err(UpstreamError::Request(_))));
    assert_eq!(client.call_count(), 4);
}

#[tokio::test]
async fn given_context_when_running_then_every_call_carries_it() {
    let client = Arc::new(ScriptedLlmClient::answering("ok"));
    let service = synthesis(&client);

    service
        .run(CompletionParams::new("Summarize", "llama3-8b").with_context(Some("the notes")))
        .await
        .unwrap();

    for request in client.requests() {
        assert!(
            request
                .messages
                .iter()
                .any(|m| m.role == MessageRole::System
                    && m.text() == "Context information: the notes")
        );
    }
}

#[tokio::test]
async fn given_history_when_running_then_perspectives_get_recap_not_raw_history() {
    let history: Vec<ChatMessage> = (0..6)
        .map(|i| {
            if i % 2 == 0 {
                ChatMessage::user(format!("question {i}"))
            } else {
                ChatMessage::assistant(format!("answer {i}"))
            }
        })
        .collect();
    let client = Arc::new(ScriptedLlmClient::answering("ok"));
    let service = synthesis(&client);

    service
        .run(CompletionParams::new("And now?", "llama3-8b").with_history(&history))
        .await
        .unwrap();

    let perspective_requests: Vec<_> = client
        .requests()
        .into_iter()
        .filter(|r| is_perspective(&system_text(r)))
        .collect();
    assert_eq!(perspective_requests.len(), 3);
    for request in perspective_requests {
        assert_eq!(request.messages.len(), 2);
        let user = last_user_text(&request);
        assert!(user.starts_with("Previous conversation:\n"));
        assert!(!user.contains("question 0"));
        assert!(!user.contains("answer 1"));
        assert!(user.contains("user: question 2\n"));
        assert!(user.contains("assistant: answer 5\n"));
    }
}

#[test]
fn given_long_history_when_rendering_recap_then_keeps_last_four_turns_cut_to_200_chars() {
    let long_turn = "x".repeat(250);
    let history = vec![
        ChatMessage::user("dropped"),
        ChatMessage::user(long_turn.as_str()),
        ChatMessage::assistant("b"),
        ChatMessage::user("c"),
        ChatMessage::assistant("d"),
    ];

    let recap = render_history_recap(&history);

    let expected = format!(
        "Previous conversation:\nuser: {}\nassistant: b\nuser: c\nassistant: d\n\n",
        "x".repeat(200)
    );
    assert_eq!(recap, expected);
}

#[test]
fn given_no_history_when_rendering_recap_then_returns_empty() {
    assert_eq!(render_history_recap(&[]), "");
}

#[test]
fn given_message_when_building_perspectives_then_uses_three_fixed_framings() {
    let prompts = perspective_prompts("tides");

    assert_eq!(prompts[0], "Analyze this comprehensively: tides");
    assert_eq!(prompts[1], "Provide detailed insights about: tides");
    assert_eq!(
        prompts[2],
        "What are the key aspects and implications of: tides"
    );
}

#[test]
fn given_answers_when_building_synthesis_prompt_then_labels_each_in_order() {
    let prompt = synthesis_prompt("tides", &["first".to_string(), "second".to_string()]);

    assert!(prompt.contains("\"tides\""));
    assert!(prompt.contains("Response 1: first\nResponse 2: second"));
}
