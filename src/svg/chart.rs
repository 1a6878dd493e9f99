//! Chart renderer: vertical bars scaled to the largest value, or a line
//! through the points when the labels count through consecutive periods.

use super::shapes::{document_head, escape_xml, fmt_num, points_to_polyline_path, render_note, NOTE_HEIGHT};
use super::styles::{display_label, estimate_text_width, FontSizes, FontWeights, StrokeWidths, TEXT_BASELINE_SHIFT};
use super::theme::DiagramColors;
use super::types::{Point, RenderedMarkup};
use crate::config::ChartStyle;
use crate::types::{ChartSeries, SeriesPoint};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

/// Fewest points drawn as a line in automatic mode
pub const LINE_MIN_POINTS: usize = 3;

const PLOT_HEIGHT: f64 = 280.0;
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 32.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 56.0;
const MIN_SLOT_WIDTH: f64 = 64.0;
const MAX_SLOT_WIDTH: f64 = 160.0;
const BAR_RATIO: f64 = 0.7;
const POINT_RADIUS: f64 = 5.0;
const GRID_LINES: usize = 4;

lazy_static! {
    static ref RE_QUARTER: Regex = Regex::new(r"(?i)^q([1-4])(?:\s+(\d{4}))?$").unwrap();
    static ref RE_MONTH: Regex = Regex::new(r"(?i)^([a-z]+)\.?(?:\s+(\d{4}))?$").unwrap();
    static ref RE_YEAR: Regex = Regex::new(r"^(?:19|20)\d{2}$").unwrap();
    static ref RE_NUMBERED: Regex =
        Regex::new(r"(?i)^(week|day|month|year|sprint|phase|wave|round)\s*(\d+)$").unwrap();
}

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december",
];

/// Family of a period label; only labels of one family form a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
enum PeriodKind {
    Quarter,
    Month,
    Year,
    Numbered(String),
}

pub fn render_chart(
    series: &ChartSeries,
    colors: &DiagramColors,
    style: ChartStyle,
    max_points: usize,
) -> RenderedMarkup {
    let total = series.points.len();
    let visible = total.min(max_points);
    let omitted = total - visible;
    if omitted > 0 {
        warn!(shown = visible, omitted = omitted; "Chart truncated");
    }
    let points = &series.points[..visible];
    let as_line = use_line(points, style);
    debug!(points = visible, line = as_line; "Rendering chart");

    let max_value = points.iter().map(|p| p.value).fold(0.0, f64::max);
    let widest = points
        .iter()
        .map(|p| estimate_text_width(&display_label(&p.label), FontSizes::AXIS_LABEL, FontWeights::AXIS_LABEL))
        .fold(0.0, f64::max);
    let slot = (widest + 16.0).clamp(MIN_SLOT_WIDTH, MAX_SLOT_WIDTH);

    let plot_width = slot * visible as f64;
    let baseline = MARGIN_TOP + PLOT_HEIGHT;
    let width = MARGIN_LEFT + plot_width + MARGIN_RIGHT;
    let mut height = baseline + MARGIN_BOTTOM;
    if omitted > 0 {
        height += NOTE_HEIGHT;
    }

    let class = if as_line { "visual chart line" } else { "visual chart bar" };
    let mut parts = document_head(width, height, colors, class);
    parts.push(render_grid(max_value, baseline, plot_width));

    let bar_height = |value: f64| -> f64 {
        if max_value > 0.0 {
            value.max(0.0) / max_value * PLOT_HEIGHT
        } else {
            0.0
        }
    };

    let centers: Vec<Point> = points
        .iter()
        .enumerate()
        .map(|(i, p)| Point {
            x: MARGIN_LEFT + slot * (i as f64 + 0.5),
            y: baseline - bar_height(p.value),
        })
        .collect();

    if as_line {
        if centers.len() > 1 {
            parts.push(format!(
                r#"<polyline class="series-line" points="{}" fill="none" stroke="var(--_bar)" stroke-width="3" stroke-linejoin="round" />"#,
                points_to_polyline_path(&centers)
            ));
        }
        for (point, center) in points.iter().zip(&centers) {
            parts.push(format!(
                r#"<circle class="point" data-label="{}" data-value="{}" cx="{}" cy="{}" r="{}" fill="var(--bg)" stroke="var(--_bar)" stroke-width="3" />"#,
                escape_xml(&point.label),
                fmt_num(point.value),
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(POINT_RADIUS)
            ));
        }
    } else {
        let bar_width = slot * BAR_RATIO;
        for (point, center) in points.iter().zip(&centers) {
            parts.push(format!(
                r#"<rect class="bar" data-label="{}" data-value="{}" x="{}" y="{}" width="{}" height="{}" rx="4" ry="4" fill="var(--_bar)" />"#,
                escape_xml(&point.label),
                fmt_num(point.value),
                fmt_num(center.x - bar_width / 2.0),
                fmt_num(center.y),
                fmt_num(bar_width),
                fmt_num(baseline - center.y)
            ));
        }
    }

    for (point, center) in points.iter().zip(&centers) {
        parts.push(render_value(point, center.x, center.y - 12.0));
        parts.push(render_category(point, center.x, baseline + 20.0));
    }

    parts.push(format!(
        r#"<line class="axis" x1="{x0}" y1="{top}" x2="{x0}" y2="{base}" stroke="var(--_line)" stroke-width="{sw}" />
<line class="axis" x1="{x0}" y1="{base}" x2="{x1}" y2="{base}" stroke="var(--_line)" stroke-width="{sw}" />"#,
        x0 = fmt_num(MARGIN_LEFT),
        x1 = fmt_num(MARGIN_LEFT + plot_width),
        top = fmt_num(MARGIN_TOP),
        base = fmt_num(baseline),
        sw = fmt_num(StrokeWidths::AXIS)
    ));

    if omitted > 0 {
        parts.push(render_note(
            &format!("+{} more points not shown", omitted),
            width / 2.0,
            height - NOTE_HEIGHT / 2.0,
        ));
    }

    parts.push("</svg>".to_string());
    RenderedMarkup {
        svg: parts.join("\n"),
        width,
        height,
        omitted,
    }
}

fn use_line(points: &[SeriesPoint], style: ChartStyle) -> bool {
    match style {
        ChartStyle::Bar => false,
        ChartStyle::Line => true,
        ChartStyle::Auto => {
            points.len() >= LINE_MIN_POINTS
                && is_sequential_periods(points.iter().map(|p| p.label.as_str()))
        }
    }
}

/// Horizontal guide lines with their values on the left
fn render_grid(max_value: f64, baseline: f64, plot_width: f64) -> String {
    if max_value <= 0.0 {
        return String::new();
    }
    (1..=GRID_LINES)
        .map(|i| {
            let fraction = i as f64 / GRID_LINES as f64;
            let y = baseline - fraction * PLOT_HEIGHT;
            format!(
                r#"<line class="grid" x1="{x0}" y1="{y}" x2="{x1}" y2="{y}" stroke="var(--_grid)" stroke-width="1" />
<text x="{tx}" y="{y}" text-anchor="end" dy="{dy}" font-size="{fs}" fill="var(--_text-muted)">{label}</text>"#,
                x0 = fmt_num(MARGIN_LEFT),
                x1 = fmt_num(MARGIN_LEFT + plot_width),
                y = fmt_num(y),
                tx = fmt_num(MARGIN_LEFT - 8.0),
                dy = TEXT_BASELINE_SHIFT,
                fs = fmt_num(FontSizes::EDGE_LABEL),
                label = format_value(max_value * fraction)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_value(point: &SeriesPoint, x: f64, y: f64) -> String {
    format!(
        r#"<text class="value" x="{}" y="{}" text-anchor="middle" dy="{}" font-size="{}" font-weight="{}" fill="var(--_text)">{}</text>"#,
        fmt_num(x),
        fmt_num(y),
        TEXT_BASELINE_SHIFT,
        fmt_num(FontSizes::AXIS_LABEL),
        FontWeights::NODE_LABEL,
        escape_xml(&format_value(point.value))
    )
}

fn render_category(point: &SeriesPoint, x: f64, y: f64) -> String {
    format!(
        r#"<text class="category" x="{}" y="{}" text-anchor="middle" dy="{}" font-size="{}" font-weight="{}" fill="var(--_text-sec)">{}</text>"#,
        fmt_num(x),
        fmt_num(y),
        TEXT_BASELINE_SHIFT,
        fmt_num(FontSizes::AXIS_LABEL),
        FontWeights::AXIS_LABEL,
        escape_xml(&display_label(&point.label))
    )
}

/// Value as printed on the chart: thousands separators, at most two decimals
pub fn format_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc();
    let cents = ((abs - whole) * 100.0).round() as u64;

    let digits = format!("{:.0}", whole);
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if cents > 0 {
        let frac = format!("{:02}", cents);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

/// True when every label is a period of the same family and each one is
/// the period right after the previous
pub fn is_sequential_periods<'a>(labels: impl IntoIterator<Item = &'a str>) -> bool {
    let mut prev: Option<(PeriodKind, i64)> = None;
    let mut seen = 0;
    for label in labels {
        let Some((kind, ordinal)) = period_ordinal(label.trim()) else {
            return false;
        };
        if let Some((prev_kind, prev_ordinal)) = &prev {
            if *prev_kind != kind || ordinal != prev_ordinal + 1 {
                return false;
            }
        }
        prev = Some((kind, ordinal));
        seen += 1;
    }
    seen > 0
}

fn period_ordinal(label: &str) -> Option<(PeriodKind, i64)> {
    if let Some(caps) = RE_QUARTER.captures(label) {
        let quarter: i64 = caps[1].parse().ok()?;
        let year: i64 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        return Some((PeriodKind::Quarter, year * 4 + quarter));
    }
    if RE_YEAR.is_match(label) {
        return Some((PeriodKind::Year, label.parse().ok()?));
    }
    if let Some(caps) = RE_NUMBERED.captures(label) {
        let n: i64 = caps[2].parse().ok()?;
        return Some((PeriodKind::Numbered(caps[1].to_lowercase()), n));
    }
    if let Some(caps) = RE_MONTH.captures(label) {
        let name = caps[1].to_lowercase();
        if name.len() < 3 {
            return None;
        }
        let month = MONTHS.iter().position(|m| m.starts_with(&name))? as i64 + 1;
        let year: i64 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        return Some((PeriodKind::Month, year * 12 + month));
    }
    None
}
