// Dashboard view model served to clients
use serde::Serialize;

/// Fully rendered dashboard: formatted strings and chart markup, nothing
/// left for the client to compute.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub summary: SummaryView,
    pub nutrients: Vec<NutrientBarView>,
    pub calorie_donut: DonutView,
    pub budget_donut: DonutView,
    pub calorie_history: HistoryView,
    pub budget_history: HistoryView,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub date: String,
    pub calorie_goal: String,
    pub calories_consumed: String,
    pub calories_remaining: String,
    pub budget_goal: String,
    pub budget_spent: String,
    pub budget_remaining: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NutrientBarView {
    pub name: String,
    pub base_percent: f64,
    pub over_percent: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DonutView {
    pub label: String,
    pub over_budget: bool,
    pub over_pct: f64,
    pub svg: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub suggested_min: f64,
    pub suggested_max: f64,
    pub svg: String,
}

/// What the dashboard currently shows. A failed read replaces the whole
/// view with the error panel; no partial dashboard is left behind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Ready { dashboard: DashboardView },
    Failed { message: String },
}
