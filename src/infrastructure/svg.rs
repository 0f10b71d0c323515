// Server-side SVG rendering for donut and history charts
use crate::domain::charts::{tick_label, DonutChart, HistoryChart};
use std::f64::consts::{PI, TAU};
use std::fmt::Write;

const DONUT_VIEW: f64 = 200.0;
const DONUT_OUTER: f64 = 90.0;
const DONUT_CUTOUT: f64 = 0.75;
// segment 0 starts at 12 o'clock and sweeps clockwise
const DONUT_ROTATION: f64 = -0.5 * PI;
const DONUT_TRACK_COLOR: &str = "#3a3a3a";
const OVERLAY_BORDER_WIDTH: f64 = 4.0;
const OVERLAY_BORDER_COLOR: &str = "#1e1e1e";
const TEXT_COLOR: &str = "#a0a0a0";
const TEXT_OVER_COLOR: &str = "#ff5252";

const HISTORY_WIDTH: f64 = 600.0;
const HISTORY_HEIGHT: f64 = 260.0;
const HISTORY_PAD_X: f64 = 44.0;
const HISTORY_PAD_Y: f64 = 34.0;
const HISTORY_TOP: f64 = 24.0;
const HISTORY_TICKS: usize = 4;
const GRID_COLOR: &str = "#444";
const GRID_ZERO_COLOR: &str = "#ffffff";

/// Render a donut ring with its overflow overlay.
///
/// The base ring can only show segments that sum within the ring, so an
/// over-goal state draws a full ring and layers the overage on top as a
/// halo-bordered stroke at the ring's mid-radius.
pub fn donut_svg(chart: &DonutChart, id: &str, ring_stops: &[&str], over_stops: &[&str]) -> String {
    let center = DONUT_VIEW / 2.0;
    let inner = DONUT_OUTER * DONUT_CUTOUT;
    let thickness = DONUT_OUTER - inner;
    let r_mid = inner + thickness / 2.0;

    let mut svg = format!(
        "<svg viewBox=\"0 0 {DONUT_VIEW} {DONUT_VIEW}\" xmlns=\"http://www.w3.org/2000/svg\">"
    );
    svg.push_str("<defs>");
    svg.push_str(&linear_gradient(&format!("{id}-ring"), ring_stops));
    svg.push_str(&linear_gradient(&format!("{id}-over"), over_stops));
    svg.push_str("</defs>");

    let total: f64 = chart.segments.iter().sum();
    let mut angle = DONUT_ROTATION;
    for (index, &segment) in chart.segments.iter().enumerate() {
        if segment <= 0.0 || total <= 0.0 {
            continue;
        }
        let sweep = segment / total * TAU;
        let stroke = if index == 0 {
            format!("url(#{id}-ring)")
        } else {
            DONUT_TRACK_COLOR.to_string()
        };
        push_arc(
            &mut svg,
            center,
            center,
            r_mid,
            angle,
            angle + sweep,
            &stroke,
            thickness,
            false,
        );
        angle += sweep;
    }

    if chart.over_pct > 0.0 {
        let end = DONUT_ROTATION + chart.sweep_fraction() * TAU;
        // halo first so the colored stroke sits on top of it
        push_arc(
            &mut svg,
            center,
            center,
            r_mid,
            DONUT_ROTATION,
            end,
            OVERLAY_BORDER_COLOR,
            thickness + 2.0 * OVERLAY_BORDER_WIDTH,
            true,
        );
        push_arc(
            &mut svg,
            center,
            center,
            r_mid,
            DONUT_ROTATION,
            end,
            &format!("url(#{id}-over)"),
            thickness,
            true,
        );
    }

    let fill = if chart.over_budget {
        TEXT_OVER_COLOR
    } else {
        TEXT_COLOR
    };
    let _ = write!(
        svg,
        "<text x=\"{center}\" y=\"{center}\" text-anchor=\"middle\" \
         dominant-baseline=\"central\" font-size=\"26\" fill=\"{fill}\">{}</text>",
        escape_text(&chart.label)
    );
    svg.push_str("</svg>");
    svg
}

/// Render a history line chart with padded axis bounds, a distinct zero
/// gridline and signed tick labels.
pub fn history_svg(chart: &HistoryChart, id: &str, line_stops: &[&str], fill: &str) -> String {
    let mut svg = format!(
        "<svg viewBox=\"0 0 {HISTORY_WIDTH} {HISTORY_HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\">"
    );

    if chart.values.is_empty() {
        let _ = write!(
            svg,
            "<text x=\"50%\" y=\"50%\" text-anchor=\"middle\" font-size=\"14\" \
             fill=\"{TEXT_COLOR}\">No data yet</text></svg>"
        );
        return svg;
    }

    svg.push_str("<defs>");
    svg.push_str(&linear_gradient(&format!("{id}-line"), line_stops));
    svg.push_str("</defs>");

    let min = chart.axis.suggested_min;
    let span = chart.axis.suggested_max - min;
    let count = chart.values.len();
    let x_step = if count > 1 {
        (HISTORY_WIDTH - HISTORY_PAD_X * 2.0) / (count - 1) as f64
    } else {
        0.0
    };
    let x = |index: usize| HISTORY_PAD_X + index as f64 * x_step;
    let scale_y = (HISTORY_HEIGHT - HISTORY_TOP - HISTORY_PAD_Y) / span;
    let y = |value: f64| HISTORY_HEIGHT - HISTORY_PAD_Y - (value - min) * scale_y;

    for tick in 0..=HISTORY_TICKS {
        let value = min + span * tick as f64 / HISTORY_TICKS as f64;
        let gy = y(value);
        let _ = write!(
            svg,
            "<line x1=\"{HISTORY_PAD_X}\" y1=\"{gy:.2}\" x2=\"{:.2}\" y2=\"{gy:.2}\" \
             stroke=\"{GRID_COLOR}\" stroke-width=\"1\"/>",
            HISTORY_WIDTH - HISTORY_PAD_X
        );
        let _ = write!(
            svg,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-size=\"11\" \
             fill=\"{TEXT_COLOR}\">{}</text>",
            HISTORY_PAD_X - 10.0,
            gy + 4.0,
            tick_label(value)
        );
    }

    // suggested bounds always straddle zero, so the zero line is in frame
    let zero_y = y(0.0);
    let _ = write!(
        svg,
        "<line x1=\"{HISTORY_PAD_X}\" y1=\"{zero_y:.2}\" x2=\"{:.2}\" y2=\"{zero_y:.2}\" \
         stroke=\"{GRID_ZERO_COLOR}\" stroke-width=\"2\"/>",
        HISTORY_WIDTH - HISTORY_PAD_X
    );

    let mut line_path = String::new();
    for (index, &value) in chart.values.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        let _ = write!(line_path, "{command} {:.2} {:.2} ", x(index), y(value));
    }
    let line_path = line_path.trim_end();

    if count > 1 {
        let baseline = HISTORY_HEIGHT - HISTORY_PAD_Y;
        let _ = write!(
            svg,
            "<path d=\"{line_path} L {:.2} {baseline} L {HISTORY_PAD_X} {baseline} Z\" \
             fill=\"{fill}\" stroke=\"none\"/>",
            x(count - 1)
        );
    }

    let _ = write!(
        svg,
        "<path d=\"{line_path}\" fill=\"none\" stroke=\"url(#{id}-line)\" stroke-width=\"3\"/>"
    );

    for (index, &value) in chart.values.iter().enumerate() {
        let _ = write!(
            svg,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"white\" \
             stroke=\"url(#{id}-line)\" stroke-width=\"2\"/>",
            x(index),
            y(value)
        );
    }

    let label_every = if count > 8 { 2 } else { 1 };
    for (index, label) in chart.labels.iter().enumerate().take(count) {
        if index % label_every != 0 {
            continue;
        }
        let _ = write!(
            svg,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"11\" \
             fill=\"{TEXT_COLOR}\">{}</text>",
            x(index),
            HISTORY_HEIGHT - HISTORY_PAD_Y + 18.0,
            escape_text(label)
        );
    }

    svg.push_str("</svg>");
    svg
}

// vertical gradient, matching the top-to-bottom stops the charts use
fn linear_gradient(id: &str, stops: &[&str]) -> String {
    let mut gradient = format!("<linearGradient id=\"{id}\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\">");
    let denominator = stops.len().saturating_sub(1).max(1);
    for (index, color) in stops.iter().enumerate() {
        let offset = index as f64 / denominator as f64 * 100.0;
        let _ = write!(
            gradient,
            "<stop offset=\"{offset:.0}%\" stop-color=\"{color}\"/>"
        );
    }
    gradient.push_str("</linearGradient>");
    gradient
}

fn push_arc(
    svg: &mut String,
    cx: f64,
    cy: f64,
    r: f64,
    start: f64,
    end: f64,
    stroke: &str,
    width: f64,
    rounded: bool,
) {
    let cap = if rounded {
        " stroke-linecap=\"round\""
    } else {
        ""
    };
    // a sweep of a full revolution degenerates as a path, draw a circle
    if end - start >= TAU * 0.999 {
        let _ = write!(
            svg,
            "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r:.2}\" fill=\"none\" stroke=\"{stroke}\" \
             stroke-width=\"{width:.2}\"{cap}/>"
        );
        return;
    }
    let _ = write!(
        svg,
        "<path d=\"{}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{width:.2}\"{cap}/>",
        arc_path(cx, cy, r, start, end)
    );
}

fn arc_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let (x0, y0) = point_on(cx, cy, r, start);
    let (x1, y1) = point_on(cx, cy, r, end);
    let large_arc = i32::from(end - start > PI);
    format!("M {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x1:.2} {y1:.2}")
}

fn point_on(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
