// Repository trait for the spreadsheet backend
use crate::domain::snapshot::DashboardSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait SheetRepository: Send + Sync {
    /// Fetch the current dashboard snapshot.
    async fn fetch_snapshot(&self) -> anyhow::Result<DashboardSnapshot>;

    /// Append a new record to the sheet.
    ///
    /// The payload shape is up to the backend; callers only guarantee it is
    /// valid JSON.
    async fn submit_record(&self, payload: &serde_json::Value, token: &str)
        -> anyhow::Result<()>;
}
