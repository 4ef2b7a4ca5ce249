use crate::core::orchestrator::AnalysisOrchestrator;
use crate::domain::model::{SajuResult, UserInput};
use crate::domain::ports::CompletionClient;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Loading,
    Ready(SajuResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Completed,
    Failed,
    /// Another submission was still in flight; nothing happened.
    Ignored,
}

#[derive(Debug, Default)]
struct Slots {
    last_input: Option<UserInput>,
    result: Option<SajuResult>,
    error: Option<SlotError>,
}

/// What the error panel shows, plus the process exit code for the failure kind.
#[derive(Debug)]
struct SlotError {
    message: String,
    exit_code: i32,
}

/// The state container sitting between the input collector and the report.
///
/// Holds one result slot and one error slot. A new result replaces the old one
/// wholesale. While a submission is in flight further submissions are
/// ignored rather than queued.
pub struct AnalysisSession<C: CompletionClient> {
    orchestrator: AnalysisOrchestrator<C>,
    loading: AtomicBool,
    slots: Mutex<Slots>,
}

impl<C: CompletionClient> AnalysisSession<C> {
    pub fn new(orchestrator: AnalysisOrchestrator<C>) -> Self {
        Self {
            orchestrator,
            loading: AtomicBool::new(false),
            slots: Mutex::new(Slots::default()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn submit(&self, input: UserInput) -> SubmitOutcome {
        if self
            .loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Submission ignored: an analysis is already in flight");
            return SubmitOutcome::Ignored;
        }

        {
            let mut slots = self.slots.lock().await;
            slots.last_input = Some(input.clone());
            slots.error = None;
            slots.result = None;
        }

        let outcome = self.orchestrator.request_analysis(input).await;

        let submit_outcome = {
            let mut slots = self.slots.lock().await;
            match outcome {
                Ok(result) => {
                    slots.result = Some(result);
                    SubmitOutcome::Completed
                }
                Err(e) => {
                    slots.error = Some(SlotError {
                        message: e.user_friendly_message(),
                        exit_code: e.exit_code(),
                    });
                    SubmitOutcome::Failed
                }
            }
        };

        self.loading.store(false, Ordering::SeqCst);
        submit_outcome
    }

    pub async fn state(&self) -> SessionState {
        if self.is_loading() {
            return SessionState::Loading;
        }
        let slots = self.slots.lock().await;
        if let Some(error) = &slots.error {
            SessionState::Failed(error.message.clone())
        } else if let Some(result) = &slots.result {
            SessionState::Ready(result.clone())
        } else {
            SessionState::Idle
        }
    }

    /// Exit code of the failure currently shown, if any.
    pub async fn error_exit_code(&self) -> Option<i32> {
        self.slots.lock().await.error.as_ref().map(|e| e.exit_code)
    }

    /// Closes the error panel.
    pub async fn dismiss_error(&self) {
        self.slots.lock().await.error = None;
    }

    /// Discards the report but keeps the last input for re-entry.
    pub async fn reset(&self) {
        let mut slots = self.slots.lock().await;
        slots.result = None;
        slots.error = None;
    }

    pub async fn last_input(&self) -> Option<UserInput> {
        self.slots.lock().await.last_input.clone()
    }
}
