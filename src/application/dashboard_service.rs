// Dashboard service - Use case for building the rendered dashboard
use crate::application::sheet_repository::SheetRepository;
use crate::domain::charts::{self, DonutChart, HistoryChart};
use crate::domain::dashboard::{
    DashboardView, DonutView, HistoryView, NutrientBarView, SummaryView, ViewState,
};
use crate::domain::numeric::{coerce, group_thousands};
use crate::domain::snapshot::DashboardSnapshot;
use crate::infrastructure::svg;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

const DONUT_CALORIE_STOPS: [&str; 2] = ["#bb86fc", "#03dac6"];
const DONUT_BUDGET_STOPS: [&str; 2] = ["#f797e8", "#f5db69"];
const OVERAGE_STOPS: [&str; 2] = ["#ff8a80", "#ff5252"];
const HISTORY_CALORIE_FILL: &str = "rgba(3, 218, 198, 0.1)";
const HISTORY_BUDGET_FILL: &str = "rgba(245, 219, 105, 0.1)";

/// Chart handles owned by the service and updated in place on every
/// refresh instead of being recreated.
#[derive(Debug, Default)]
struct ChartSet {
    calorie_donut: Option<DonutChart>,
    budget_donut: Option<DonutChart>,
    calorie_history: Option<HistoryChart>,
    budget_history: Option<HistoryChart>,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn SheetRepository>,
    charts: Arc<Mutex<ChartSet>>,
    view: Arc<Mutex<ViewState>>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn SheetRepository>) -> Self {
        Self {
            repository,
            charts: Arc::new(Mutex::new(ChartSet::default())),
            view: Arc::new(Mutex::new(ViewState::Loading)),
        }
    }

    /// Fetch a fresh snapshot and re-render everything in order: summary,
    /// nutrient bars, donuts, history charts.
    ///
    /// Holding the chart lock for the whole cycle serializes overlapping
    /// refresh triggers. A failed read replaces the entire view with the
    /// error panel.
    pub async fn refresh(&self) -> ViewState {
        let mut charts = self.charts.lock().await;
        let state = match self.repository.fetch_snapshot().await {
            Ok(snapshot) => ViewState::Ready {
                dashboard: build_view(&mut charts, &snapshot),
            },
            Err(err) => {
                tracing::error!("failed to refresh dashboard: {err:#}");
                ViewState::Failed {
                    message: format!("{err:#}"),
                }
            }
        };
        *self.view.lock().await = state.clone();
        state
    }

    pub async fn current_view(&self) -> ViewState {
        self.view.lock().await.clone()
    }
}

fn build_view(charts: &mut ChartSet, snapshot: &DashboardSnapshot) -> DashboardView {
    let summary = build_summary(snapshot);

    let nutrients = snapshot
        .nutrients()
        .into_iter()
        .map(|(name, consumed, goal)| {
            let bar = charts::nutrient_bar(consumed, goal);
            NutrientBarView {
                name: name.to_string(),
                base_percent: bar.base_percent,
                over_percent: bar.over_percent,
                label: bar.label,
            }
        })
        .collect();

    let calorie_donut = render_donut_view(
        &mut charts.calorie_donut,
        &snapshot.consumed_kcal,
        &snapshot.base_goal_kcal,
        "calorie-donut",
        &DONUT_CALORIE_STOPS,
    );
    let budget_donut = render_donut_view(
        &mut charts.budget_donut,
        &snapshot.spent_today,
        &snapshot.today_budget,
        "budget-donut",
        &DONUT_BUDGET_STOPS,
    );

    let calorie_history = render_history_view(
        &mut charts.calorie_history,
        &snapshot.calorie_history_labels,
        &snapshot.calorie_history_values,
        "calorie-history",
        &DONUT_CALORIE_STOPS,
        HISTORY_CALORIE_FILL,
    );
    let budget_history = render_history_view(
        &mut charts.budget_history,
        &snapshot.spend_history_labels,
        &snapshot.spend_history_values,
        "budget-history",
        &DONUT_BUDGET_STOPS,
        HISTORY_BUDGET_FILL,
    );

    DashboardView {
        summary,
        nutrients,
        calorie_donut,
        budget_donut,
        calorie_history,
        budget_history,
    }
}

fn build_summary(snapshot: &DashboardSnapshot) -> SummaryView {
    let date = snapshot
        .date_today
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or("Loading...")
        .to_string();

    SummaryView {
        date,
        calorie_goal: group_thousands(coerce(&snapshot.base_goal_kcal)),
        calories_consumed: group_thousands(coerce(&snapshot.consumed_kcal)),
        calories_remaining: group_thousands(coerce(&snapshot.remaining_kcal)),
        budget_goal: format!("{:.2}", coerce(&snapshot.today_budget)),
        budget_spent: format!("{:.2}", coerce(&snapshot.spent_today)),
        budget_remaining: format!("{:.2}", coerce(&snapshot.budget_remaining)),
    }
}

fn render_donut_view(
    handle: &mut Option<DonutChart>,
    consumed: &Value,
    goal: &Value,
    id: &str,
    ring_stops: &[&str],
) -> DonutView {
    let chart = charts::render_donut(handle.take(), consumed, goal);
    let markup = svg::donut_svg(&chart, id, ring_stops, &OVERAGE_STOPS);
    let view = DonutView {
        label: chart.label.clone(),
        over_budget: chart.over_budget,
        over_pct: chart.over_pct,
        svg: markup,
    };
    *handle = Some(chart);
    view
}

fn render_history_view(
    handle: &mut Option<HistoryChart>,
    labels_raw: &[Value],
    values_raw: &[Value],
    id: &str,
    line_stops: &[&str],
    fill: &str,
) -> HistoryView {
    let labels = labels_raw.iter().map(label_text).collect();
    let chart = charts::render_history(handle.take(), labels, values_raw);
    let markup = svg::history_svg(&chart, id, line_stops, fill);
    let view = HistoryView {
        labels: chart.labels.clone(),
        values: chart.values.clone(),
        suggested_min: chart.axis.suggested_min,
        suggested_max: chart.axis.suggested_max,
        svg: markup,
    };
    *handle = Some(chart);
    view
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex as StdMutex;

    struct StubRepository {
        snapshot: DashboardSnapshot,
        fail: StdMutex<Option<String>>,
    }

    impl StubRepository {
        fn new(snapshot: DashboardSnapshot) -> Arc<Self> {
            Arc::new(Self {
                snapshot,
                fail: StdMutex::new(None),
            })
        }

        fn fail_with(&self, message: &str) {
            *self.fail.lock().unwrap() = Some(message.to_string());
        }
    }

    #[async_trait]
    impl SheetRepository for StubRepository {
        async fn fetch_snapshot(&self) -> anyhow::Result<DashboardSnapshot> {
            match self.fail.lock().unwrap().clone() {
                Some(message) => Err(anyhow::anyhow!("{message}")),
                None => Ok(self.snapshot.clone()),
            }
        }

        async fn submit_record(&self, _payload: &Value, _token: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn snapshot_fixture() -> DashboardSnapshot {
        serde_json::from_value(json!({
            "dateToday": "Mon, Aug 3",
            "baseGoalKcal": "2,000",
            "consumedKcal": 1200,
            "remainingKcal": "800",
            "todayBudget": 100,
            "spentToday": 150,
            "budgetRemaining": "(50.00)",
            "consumedProtein": 120,
            "goalProtein": 100,
            "consumedCarbs": 50,
            "goalCarbs": 100,
            "consumedFat": "₱10",
            "goalFat": 70,
            "consumedSugar": 10,
            "goalSugar": 25,
            "consumedFiber": 5,
            "goalFiber": 30,
            "calorieHistoryLabels": ["Aug 1", "Aug 2", "Aug 3"],
            "calorieHistoryValues": [-5, 10, 0],
            "spendHistoryLabels": ["Aug 1", "Aug 2", "Aug 3"],
            "spendHistoryValues": ["(5)", "12%", 0]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn refresh_renders_full_dashboard() {
        let service = DashboardService::new(StubRepository::new(snapshot_fixture()));

        let ViewState::Ready { dashboard } = service.refresh().await else {
            panic!("expected a rendered dashboard");
        };

        assert_eq!(dashboard.summary.date, "Mon, Aug 3");
        assert_eq!(dashboard.summary.calorie_goal, "2,000");
        assert_eq!(dashboard.summary.calories_remaining, "800");
        assert_eq!(dashboard.summary.budget_spent, "150.00");
        assert_eq!(dashboard.summary.budget_remaining, "-50.00");

        assert_eq!(dashboard.calorie_donut.label, "40%");
        assert!(!dashboard.calorie_donut.over_budget);
        assert_eq!(dashboard.budget_donut.label, "+50%");
        assert!(dashboard.budget_donut.over_budget);
        assert_eq!(dashboard.budget_donut.over_pct, 50.0);

        let protein = &dashboard.nutrients[0];
        assert_eq!(protein.name, "Protein");
        assert_eq!(protein.base_percent, 100.0);
        assert_eq!(protein.over_percent, 20.0);

        assert_eq!(dashboard.calorie_history.suggested_min, -8.0);
        assert_eq!(dashboard.calorie_history.suggested_max, 13.0);
        assert_eq!(dashboard.budget_history.values, vec![-5.0, 12.0, 0.0]);
        assert!(dashboard.calorie_donut.svg.starts_with("<svg"));
        assert!(dashboard.calorie_history.svg.contains("Aug 2"));
    }

    #[tokio::test]
    async fn missing_date_falls_back_to_placeholder() {
        let summary = build_summary(&DashboardSnapshot::default());
        assert_eq!(summary.date, "Loading...");
        assert_eq!(summary.calorie_goal, "0");
        assert_eq!(summary.budget_goal, "0.00");
    }

    #[tokio::test]
    async fn failed_read_replaces_the_whole_view() {
        let repository = StubRepository::new(snapshot_fixture());
        let service = DashboardService::new(repository.clone());

        assert!(matches!(service.refresh().await, ViewState::Ready { .. }));

        repository.fail_with("Backend Error: quota exceeded");
        let state = service.refresh().await;
        let ViewState::Failed { message } = state else {
            panic!("expected the error panel");
        };
        assert!(message.contains("quota exceeded"));

        // nothing of the previous dashboard remains visible
        assert!(matches!(
            service.current_view().await,
            ViewState::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn chart_handles_survive_across_refreshes() {
        let service = DashboardService::new(StubRepository::new(snapshot_fixture()));
        service.refresh().await;
        service.refresh().await;

        let charts = service.charts.lock().await;
        assert!(charts.calorie_donut.is_some());
        assert!(charts.budget_history.is_some());
    }
}
