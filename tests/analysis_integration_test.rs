use anyhow::Result;
use async_trait::async_trait;
use httpmock::prelude::*;
use saju_reader::core::orchestrator::MIN_ANALYSIS_DURATION;
use saju_reader::core::prompt::UNKNOWN_BIRTH_TIME;
use saju_reader::domain::model::CompletionRequest;
use saju_reader::utils::error::ANALYSIS_INTERRUPTED_MESSAGE;
use saju_reader::{
    AnalysisOrchestrator, AnalysisSession, CompletionClient, GeminiClient, MonthlyLuck,
    SajuError, SessionState, SubmitOutcome, Topic, UserInput,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

/// Answers instantly and records what it was asked.
#[derive(Default)]
struct InstantClient {
    reply: String,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionClient for InstantClient {
    async fn complete(&self, request: &CompletionRequest) -> saju_reader::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());
        Ok(self.reply.clone())
    }
}

fn input() -> UserInput {
    UserInput::with_defaults("홍길동", 2026)
}

fn gemini_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
}

#[tokio::test]
async fn test_resolves_no_sooner_than_the_pacing_floor() {
    let client = Arc::new(InstantClient {
        reply: "## 총평\n무난합니다.".to_string(),
        ..Default::default()
    });
    let orchestrator = AnalysisOrchestrator::new(client.clone(), Some("key".into()));

    let started = Instant::now();
    let result = orchestrator.request_analysis(input()).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(2000));
    assert_eq!(MIN_ANALYSIS_DURATION, Duration::from_millis(2000));
    assert_eq!(result.narrative_text, "## 총평\n무난합니다.");
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_slow_call_is_not_lengthened_further() {
    struct SlowClient;

    #[async_trait]
    impl CompletionClient for SlowClient {
        async fn complete(&self, _request: &CompletionRequest) -> saju_reader::Result<String> {
            tokio::time::sleep(Duration::from_millis(300)).await;
            Ok("느린 응답".to_string())
        }
    }

    let orchestrator = AnalysisOrchestrator::new(SlowClient, Some("key".into()))
        .with_min_duration(Duration::from_millis(100));

    let started = Instant::now();
    orchestrator.request_analysis(input()).await.unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(1000));
}

#[tokio::test]
async fn test_missing_credential_fails_without_network() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(gemini_reply("unused"));
    });

    let client = GeminiClient::new(server.base_url(), "", Duration::from_secs(5)).unwrap();
    let orchestrator = AnalysisOrchestrator::new(client, None);

    let started = Instant::now();
    let err = orchestrator.request_analysis(input()).await.unwrap_err();

    assert!(matches!(err, SajuError::Configuration { .. }));
    assert!(started.elapsed() < MIN_ANALYSIS_DURATION);
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_session_without_credential_never_sends_placeholder_key() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(gemini_reply("unused"));
    });

    let api_key: Option<String> = None;
    let client = GeminiClient::new(
        server.base_url(),
        api_key.as_deref().unwrap_or_default(),
        Duration::from_secs(5),
    )
    .unwrap();
    let session = AnalysisSession::new(AnalysisOrchestrator::new(client, api_key));

    assert_eq!(session.submit(input()).await, SubmitOutcome::Failed);
    assert_eq!(session.error_exit_code().await, Some(1));
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_unknown_birth_time_prompt_uses_sentinel() {
    let client = Arc::new(InstantClient {
        reply: "ok".to_string(),
        ..Default::default()
    });
    let orchestrator = AnalysisOrchestrator::new(client.clone(), Some("key".into()))
        .with_min_duration(Duration::ZERO);

    let mut wealth = input();
    wealth.topic = Topic::Wealth;
    wealth.birth_time = String::new();
    orchestrator.request_analysis(wealth).await.unwrap();

    let prompts = client.prompts.lock().unwrap();
    assert!(prompts[0].contains(UNKNOWN_BIRTH_TIME));
    assert!(!prompts[0].contains("태어난 시간: \n"));
}

#[tokio::test]
async fn test_end_to_end_report_with_series() -> Result<()> {
    let raw = "## Summary\n**Good** fortune.\n```json\n[{\"month\":1,\"score\":80,\"keyword\":\"luck\"}]\n```";
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(gemini_reply(raw));
    });

    let client = GeminiClient::new(server.base_url(), "test-key", Duration::from_secs(5))?;
    let orchestrator = AnalysisOrchestrator::new(client, Some("test-key".into()))
        .with_min_duration(Duration::ZERO);

    let result = orchestrator.request_analysis(input()).await?;

    api_mock.assert();
    assert_eq!(result.narrative_text, "## Summary\n**Good** fortune.");
    assert_eq!(
        result.monthly_luck,
        vec![MonthlyLuck {
            month: 1,
            score: 80,
            keyword: "luck".to_string()
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_malformed_series_still_yields_narrative() -> Result<()> {
    let raw = "## 총평\n좋습니다.\n```json\n{\"month\": 1}\n```";
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(200).json_body(gemini_reply(raw));
    });

    let client = GeminiClient::new(server.base_url(), "test-key", Duration::from_secs(5))?;
    let session = AnalysisSession::new(
        AnalysisOrchestrator::new(client, Some("test-key".into()))
            .with_min_duration(Duration::ZERO),
    );

    assert_eq!(session.submit(input()).await, SubmitOutcome::Completed);
    match session.state().await {
        SessionState::Ready(result) => {
            assert_eq!(result.narrative_text, raw);
            assert!(result.monthly_luck.is_empty());
        }
        other => panic!("unexpected state: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_provider_failure_shows_generic_error_and_no_result() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(503).body("model overloaded");
    });

    let client = GeminiClient::new(server.base_url(), "test-key", Duration::from_secs(5))?;
    let session = AnalysisSession::new(
        AnalysisOrchestrator::new(client, Some("test-key".into()))
            .with_min_duration(Duration::ZERO),
    );

    assert_eq!(session.submit(input()).await, SubmitOutcome::Failed);
    api_mock.assert_hits(1);
    assert_eq!(session.error_exit_code().await, Some(2));
    assert_eq!(
        session.state().await,
        SessionState::Failed(ANALYSIS_INTERRUPTED_MESSAGE.to_string())
    );
    Ok(())
}
