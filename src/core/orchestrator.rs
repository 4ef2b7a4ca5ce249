use crate::core::normalizer::normalize;
use crate::core::prompt::{build_prompt, system_instruction};
use crate::domain::contract;
use crate::domain::model::{CompletionRequest, SajuResult, UserInput};
use crate::domain::ports::CompletionClient;
use crate::utils::error::{Result, SajuError};
use std::time::{Duration, Instant};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Pacing floor: a request never resolves sooner than this.
pub const MIN_ANALYSIS_DURATION: Duration = Duration::from_millis(2000);

pub const MISSING_API_KEY_MESSAGE: &str =
    "API key is missing. Please set the API_KEY environment variable.";

/// Turns one `UserInput` into one `SajuResult` via the injected completion client.
pub struct AnalysisOrchestrator<C: CompletionClient> {
    client: C,
    api_key: Option<String>,
    model: String,
    temperature: f64,
    min_duration: Duration,
}

impl<C: CompletionClient> AnalysisOrchestrator<C> {
    pub fn new(client: C, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            min_duration: MIN_ANALYSIS_DURATION,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_min_duration(mut self, min_duration: Duration) -> Self {
        self.min_duration = min_duration;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request(&self, input: &UserInput) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            prompt: build_prompt(input),
            system_instruction: system_instruction(),
            temperature: self.temperature,
        }
    }

    pub async fn request_analysis(&self, input: UserInput) -> Result<SajuResult> {
        let has_key = self
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !has_key {
            tracing::error!("Analysis requested without an API key");
            return Err(SajuError::configuration(MISSING_API_KEY_MESSAGE));
        }

        let request = self.build_request(&input);
        tracing::debug!("Using output contract v{}", contract::CONTRACT_VERSION);
        let started = Instant::now();
        tracing::info!(
            "Requesting {} analysis for target year {} ({})",
            input.topic.display_name(),
            input.target_year,
            request.model
        );

        let (_, completion) = tokio::join!(
            tokio::time::sleep(self.min_duration),
            self.client.complete(&request)
        );
        tracing::debug!("Analysis settled after {:?}", started.elapsed());

        let text = match completion {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::error!("Completion API error: empty completion text");
                return Err(SajuError::provider("empty completion text"));
            }
            Err(e) => {
                tracing::error!("Completion API error: {}", provider_detail(&e));
                return Err(SajuError::provider(provider_detail(&e)));
            }
        };

        Ok(normalize(&text))
    }
}

fn provider_detail(error: &SajuError) -> String {
    match error {
        SajuError::Provider { detail } => detail.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct StubClient {
        reply: std::result::Result<String, String>,
        calls: AtomicUsize,
        last_request: Mutex<Option<CompletionRequest>>,
    }

    impl StubClient {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }

        fn failing(detail: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(detail.to_string()),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl CompletionClient for StubClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.reply.clone().map_err(SajuError::provider)
        }
    }

    fn input() -> UserInput {
        UserInput::with_defaults("홍길동", 2026)
    }

    #[tokio::test]
    async fn test_request_carries_prompt_instruction_and_temperature() {
        let client = StubClient::ok("## 총평\n좋습니다.");
        let orchestrator = AnalysisOrchestrator::new(client.clone(), Some("key".into()))
            .with_min_duration(Duration::ZERO);

        let result = orchestrator.request_analysis(input()).await.unwrap();
        assert_eq!(result.narrative_text, "## 총평\n좋습니다.");
        assert!(result.monthly_luck.is_empty());

        let request = client.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, DEFAULT_MODEL);
        assert!((request.temperature - 0.7).abs() < f64::EPSILON);
        assert!(request.prompt.contains("홍길동"));
        assert_eq!(request.system_instruction, system_instruction());
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_call() {
        let client = StubClient::ok("unused");
        for key in [None, Some(String::new()), Some("  ".to_string())] {
            let orchestrator = AnalysisOrchestrator::new(client.clone(), key);
            let started = Instant::now();
            let err = orchestrator.request_analysis(input()).await.unwrap_err();
            assert!(matches!(err, SajuError::Configuration { .. }));
            assert!(started.elapsed() < MIN_ANALYSIS_DURATION);
        }
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_generic() {
        let client = StubClient::failing("HTTP 429 Too Many Requests: quota exceeded");
        let orchestrator = AnalysisOrchestrator::new(client, Some("key".into()))
            .with_min_duration(Duration::ZERO);

        let err = orchestrator.request_analysis(input()).await.unwrap_err();
        assert!(matches!(err, SajuError::Provider { .. }));
        assert_eq!(
            err.to_string(),
            crate::utils::error::ANALYSIS_INTERRUPTED_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_blank_completion_is_a_provider_failure() {
        let orchestrator = AnalysisOrchestrator::new(StubClient::ok("  \n"), Some("key".into()))
            .with_min_duration(Duration::ZERO);
        let err = orchestrator.request_analysis(input()).await.unwrap_err();
        assert!(matches!(err, SajuError::Provider { .. }));
    }
}
