// Dashboard snapshot as returned by the sheet backend
use serde::Deserialize;
use serde_json::Value;

/// One full set of dashboard figures from a single read call.
///
/// Fields stay as raw JSON values because the sheet formats them
/// inconsistently (numbers, currency strings, accounting negatives); they are
/// normalized on render. A fresh snapshot fully replaces the previous one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub date_today: Value,

    pub base_goal_kcal: Value,
    pub consumed_kcal: Value,
    pub remaining_kcal: Value,

    pub today_budget: Value,
    pub spent_today: Value,
    pub budget_remaining: Value,

    pub consumed_protein: Value,
    pub goal_protein: Value,
    pub consumed_carbs: Value,
    pub goal_carbs: Value,
    pub consumed_fat: Value,
    pub goal_fat: Value,
    pub consumed_sugar: Value,
    pub goal_sugar: Value,
    pub consumed_fiber: Value,
    pub goal_fiber: Value,

    pub calorie_history_labels: Vec<Value>,
    pub calorie_history_values: Vec<Value>,
    pub spend_history_labels: Vec<Value>,
    pub spend_history_values: Vec<Value>,
}

impl DashboardSnapshot {
    /// Consumed/goal pairs for the five tracked nutrients, in display order.
    pub fn nutrients(&self) -> [(&'static str, &Value, &Value); 5] {
        [
            ("Protein", &self.consumed_protein, &self.goal_protein),
            ("Carbs", &self.consumed_carbs, &self.goal_carbs),
            ("Fat", &self.consumed_fat, &self.goal_fat),
            ("Sugar", &self.consumed_sugar, &self.goal_sugar),
            ("Fiber", &self.consumed_fiber, &self.goal_fiber),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_partial_payloads() {
        let snapshot: DashboardSnapshot = serde_json::from_value(json!({
            "dateToday": "Mon, Aug 3",
            "baseGoalKcal": "2,000",
            "calorieHistoryLabels": ["Aug 1", "Aug 2"],
            "calorieHistoryValues": [1, "2"]
        }))
        .unwrap();

        assert_eq!(snapshot.date_today, json!("Mon, Aug 3"));
        assert_eq!(snapshot.base_goal_kcal, json!("2,000"));
        assert_eq!(snapshot.calorie_history_values.len(), 2);
        assert_eq!(snapshot.consumed_kcal, Value::Null);
        assert!(snapshot.spend_history_labels.is_empty());
    }
}
