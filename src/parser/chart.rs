//! Chart parser: `<label>: <number>` lines become a series

use super::{collapse_whitespace, content_lines};
use crate::types::{ChartSeries, SeriesPoint};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    // label, separator, optional sign and currency, digits with optional
    // thousands separators and decimals, optional unit word or percent
    static ref RE_POINT: Regex = Regex::new(
        r"^(?P<label>[^:=]*[^:=\s])\s*[:=]\s*(?P<sign>[-+])?\$?(?P<number>\d[\d,]*(?:\.\d+)?)(?:\s*(?:%|[A-Za-z]+))?$"
    )
    .unwrap();
}

/// Parse every label:value line into a point, in input order.
///
/// Lines that do not match, or whose number does not parse to a finite
/// value, are skipped.
pub fn parse_chart(text: &str) -> ChartSeries {
    let mut series = ChartSeries::new();
    for line in content_lines(text) {
        match parse_point(line) {
            Some(point) => series.points.push(point),
            None => debug!(line = line; "Skipping line without a label:value pair"),
        }
    }
    series
}

/// Parse a single `<label>: <number>` line
pub fn parse_point(line: &str) -> Option<SeriesPoint> {
    let caps = RE_POINT.captures(line.trim())?;
    let label = collapse_whitespace(&caps["label"]);
    if label.is_empty() {
        return None;
    }

    let digits = caps["number"].replace(',', "");
    let magnitude: f64 = digits.parse().ok()?;
    if !magnitude.is_finite() {
        return None;
    }
    let value = match caps.name("sign").map(|m| m.as_str()) {
        Some("-") => -magnitude,
        _ => magnitude,
    };

    Some(SeriesPoint { label, value })
}

/// True when the line has the label:value shape, ignoring whether the
/// number itself is usable. Used by the detector.
pub fn is_point_shaped(line: &str) -> bool {
    RE_POINT.is_match(line.trim())
}
