// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::entry_service::EntryService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub entry_service: EntryService,
}
