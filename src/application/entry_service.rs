// Entry service - Use case for submitting new records
use crate::application::dashboard_service::DashboardService;
use crate::application::sheet_repository::SheetRepository;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// How long the "Saved." confirmation stays on the status line.
pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPhase {
    Idle,
    Validating,
    Submitting,
}

/// Status line for the entry form. `busy` mirrors the disabled state of the
/// submit control and is always cleared once a cycle finishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitStatus {
    pub phase: SubmitPhase,
    pub message: String,
    pub busy: bool,
}

impl SubmitStatus {
    fn idle(message: impl Into<String>) -> Self {
        Self {
            phase: SubmitPhase::Idle,
            message: message.into(),
            busy: false,
        }
    }
}

impl Default for SubmitStatus {
    fn default() -> Self {
        Self::idle("")
    }
}

#[derive(Clone)]
pub struct EntryService {
    repository: Arc<dyn SheetRepository>,
    dashboard: DashboardService,
    default_token: String,
    status: Arc<Mutex<SubmitStatus>>,
}

impl EntryService {
    pub fn new(
        repository: Arc<dyn SheetRepository>,
        dashboard: DashboardService,
        default_token: String,
    ) -> Self {
        Self {
            repository,
            dashboard,
            default_token,
            status: Arc::new(Mutex::new(SubmitStatus::default())),
        }
    }

    pub async fn status(&self) -> SubmitStatus {
        self.status.lock().await.clone()
    }

    /// Validate and submit one raw JSON record.
    ///
    /// Validation failures never reach the network. A successful write
    /// triggers a full dashboard refresh before the cycle completes.
    pub async fn submit(&self, raw: &str, token: Option<&str>) -> SubmitStatus {
        self.set_status(SubmitStatus {
            phase: SubmitPhase::Validating,
            message: String::new(),
            busy: false,
        })
        .await;

        let raw = raw.trim();
        if raw.is_empty() {
            return self.set_status(SubmitStatus::idle("Provide JSON.")).await;
        }

        let payload: Value = match serde_json::from_str(raw) {
            Ok(payload) => payload,
            Err(_) => return self.set_status(SubmitStatus::idle("Invalid JSON.")).await,
        };

        self.set_status(SubmitStatus {
            phase: SubmitPhase::Submitting,
            message: "Uploading…".to_string(),
            busy: true,
        })
        .await;

        let token = token.unwrap_or(&self.default_token);
        match self.repository.submit_record(&payload, token).await {
            Ok(()) => {
                self.set_status(SubmitStatus {
                    phase: SubmitPhase::Submitting,
                    message: "Saved.".to_string(),
                    busy: true,
                })
                .await;
                self.dashboard.refresh().await;
                self.schedule_status_clear();
                self.set_status(SubmitStatus {
                    phase: SubmitPhase::Idle,
                    message: "Saved.".to_string(),
                    busy: false,
                })
                .await
            }
            Err(err) => {
                tracing::error!("record submission failed: {err:#}");
                self.set_status(SubmitStatus::idle(format!("Error: {err}")))
                    .await
            }
        }
    }

    async fn set_status(&self, status: SubmitStatus) -> SubmitStatus {
        *self.status.lock().await = status.clone();
        status
    }

    // drop the confirmation after a beat unless something replaced it
    fn schedule_status_clear(&self) {
        let status = Arc::clone(&self.status);
        tokio::spawn(async move {
            tokio::time::sleep(STATUS_CLEAR_DELAY).await;
            let mut guard = status.lock().await;
            if guard.message == "Saved." {
                *guard = SubmitStatus::default();
            }
        });
    }
}
