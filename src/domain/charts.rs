// Chart math: progress bars, donut rings and history axis policy
use crate::domain::numeric::coerce;
use serde_json::Value;

/// Filled/overflow proportions for one nutrient progress bar.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientBar {
    pub base_percent: f64,
    pub over_percent: f64,
    pub label: String,
}

/// Compute the stacked bar layers for a consumed/goal pair.
///
/// The goal is clamped to at least 1 so an unset goal never divides by zero.
pub fn nutrient_bar(consumed_raw: &Value, goal_raw: &Value) -> NutrientBar {
    let consumed = coerce(consumed_raw);
    let goal = coerce(goal_raw).max(1.0);
    let base_percent = (consumed / goal * 100.0).min(100.0);
    let over_percent = ((consumed - goal) / goal * 100.0).clamp(0.0, 100.0);
    NutrientBar {
        base_percent,
        over_percent,
        label: format!("{}g / {}g", consumed.round(), goal.round()),
    }
}

/// A radial progress ring, reused across refreshes.
///
/// `over_pct` rides along on the handle so the overlay pass knows how far to
/// sweep after the base ring is drawn; the ring's own segments always sum to
/// the goal once it is exceeded.
#[derive(Debug, Clone, PartialEq)]
pub struct DonutChart {
    pub segments: [f64; 2],
    pub label: String,
    pub over_budget: bool,
    pub over_pct: f64,
}

impl DonutChart {
    /// Fraction of a full revolution the overlay arc covers, at most 1.0.
    pub fn sweep_fraction(&self) -> f64 {
        self.over_pct / 100.0
    }
}

/// Build or update a donut ring for a consumed/goal pair.
///
/// Passing an existing handle mutates it in place instead of recreating it.
pub fn render_donut(
    handle: Option<DonutChart>,
    consumed_raw: &Value,
    goal_raw: &Value,
) -> DonutChart {
    let consumed = coerce(consumed_raw);
    let goal = coerce(goal_raw).max(1.0);

    let (segments, label, over_budget, over_pct) = if consumed <= goal {
        let remaining = (goal - consumed).max(0.0);
        let percent_left = 100 - (consumed / goal * 100.0).round() as i64;
        ([consumed, remaining], format!("{percent_left}%"), false, 0.0)
    } else {
        let over = consumed - goal;
        let over_pct = (over / goal * 100.0).min(100.0);
        // full base ring, the overage is drawn as an overlay pass
        let label = format!("+{}%", (over / goal * 100.0).round() as i64);
        ([goal, 0.0], label, true, over_pct)
    };

    match handle {
        Some(mut chart) => {
            chart.segments = segments;
            chart.label = label;
            chart.over_budget = over_budget;
            chart.over_pct = over_pct;
            chart
        }
        None => DonutChart {
            segments,
            label,
            over_budget,
            over_pct,
        },
    }
}

/// Suggested y-axis bounds for a history chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub suggested_min: f64,
    pub suggested_max: f64,
}

/// Pad the value range by 15% on each side, always keeping zero in view.
pub fn axis_bounds(values: &[f64]) -> AxisBounds {
    let min_v = values.iter().copied().fold(0.0_f64, f64::min);
    let max_v = values.iter().copied().fold(0.0_f64, f64::max);
    let range = (max_v - min_v).max(1.0);
    let pad = (range * 0.15).ceil();
    AxisBounds {
        suggested_min: min_v - pad,
        suggested_max: max_v + pad,
    }
}

/// Axis tick text: positive values get an explicit `+`, fractions are
/// trimmed to one decimal.
pub fn tick_label(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    let text = if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    };
    if rounded > 0.0 {
        format!("+{text}")
    } else {
        text
    }
}

/// A time-series line chart, reused across refreshes like the donuts.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub axis: AxisBounds,
}

/// Build or update a history chart from parallel label/value sequences.
pub fn render_history(
    handle: Option<HistoryChart>,
    labels: Vec<String>,
    values_raw: &[Value],
) -> HistoryChart {
    let values: Vec<f64> = values_raw.iter().map(coerce).collect();
    let axis = axis_bounds(&values);
    match handle {
        Some(mut chart) => {
            chart.labels = labels;
            chart.values = values;
            chart.axis = axis;
            chart
        }
        None => HistoryChart {
            labels,
            values,
            axis,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bar_within_goal() {
        let bar = nutrient_bar(&json!(50), &json!(100));
        assert_eq!(bar.base_percent, 50.0);
        assert_eq!(bar.over_percent, 0.0);
        assert_eq!(bar.label, "50g / 100g");
    }

    #[test]
    fn bar_over_goal() {
        let bar = nutrient_bar(&json!(120), &json!(100));
        assert_eq!(bar.base_percent, 100.0);
        assert_eq!(bar.over_percent, 20.0);
    }

    #[test]
    fn bar_clamps_zero_goal() {
        let bar = nutrient_bar(&json!(50), &json!(0));
        assert!(bar.base_percent.is_finite());
        assert_eq!(bar.base_percent, 100.0);
        assert_eq!(bar.over_percent, 100.0);
        assert_eq!(bar.label, "50g / 1g");
    }

    #[test]
    fn donut_under_goal() {
        let chart = render_donut(None, &json!(60), &json!(100));
        assert_eq!(chart.label, "40%");
        assert!(!chart.over_budget);
        assert_eq!(chart.over_pct, 0.0);
        assert_eq!(chart.segments, [60.0, 40.0]);
    }

    #[test]
    fn donut_over_goal() {
        let chart = render_donut(None, &json!(150), &json!(100));
        assert_eq!(chart.label, "+50%");
        assert!(chart.over_budget);
        assert_eq!(chart.segments, [100.0, 0.0]);
        assert_eq!(chart.sweep_fraction(), 0.5);
    }

    #[test]
    fn donut_overlay_sweep_caps_at_full_circle() {
        let chart = render_donut(None, &json!(300), &json!(100));
        assert_eq!(chart.label, "+200%");
        assert_eq!(chart.sweep_fraction(), 1.0);
    }

    #[test]
    fn donut_updates_existing_handle() {
        let first = render_donut(None, &json!(150), &json!(100));
        let second = render_donut(Some(first), &json!(60), &json!(100));
        assert_eq!(second.label, "40%");
        assert_eq!(second.over_pct, 0.0);
    }

    #[test]
    fn axis_pads_range_and_includes_zero() {
        let axis = axis_bounds(&[-5.0, 10.0, 0.0]);
        assert_eq!(axis.suggested_min, -8.0);
        assert_eq!(axis.suggested_max, 13.0);

        // all-positive values still anchor the axis at zero
        let axis = axis_bounds(&[5.0, 10.0]);
        assert_eq!(axis.suggested_min, -2.0);
        assert_eq!(axis.suggested_max, 12.0);
    }

    #[test]
    fn axis_handles_empty_series() {
        let axis = axis_bounds(&[]);
        assert_eq!(axis.suggested_min, -1.0);
        assert_eq!(axis.suggested_max, 1.0);
    }

    #[test]
    fn tick_labels_prefix_positive_values() {
        assert_eq!(tick_label(5.0), "+5");
        assert_eq!(tick_label(0.0), "0");
        assert_eq!(tick_label(-3.0), "-3");
        assert_eq!(tick_label(2.5), "+2.5");
    }

    #[test]
    fn history_normalizes_values() {
        let chart = render_history(
            None,
            vec!["a".into(), "b".into()],
            &[json!("(5)"), json!("12%")],
        );
        assert_eq!(chart.values, vec![-5.0, 12.0]);
        assert_eq!(chart.axis.suggested_min, -8.0);
    }
}
