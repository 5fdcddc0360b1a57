//! Series Module
//!
//! Numeric transforms applied to loaded frames before plotting: power-on
//! trimming, min-max normalization, and assembly of line-chart traces.

use serde::Serialize;

use crate::frame::LogFrame;

// == Well-Known Fields ==
/// Field used to detect when the ion beam source was switched on.
pub const POWER_SUPPLY_FIELD: &str = "Ion Beam Source - Process Power Supply: Forward power";

/// Fields pre-selected in the dashboard when present in a file.
pub const DEFAULT_FILTER_FIELDS: [&str; 8] = [
    POWER_SUPPLY_FIELD,
    "Drives - Target Change Drive: Position",
    "Optical Measuring System - OMS5k: Derivative",
    "Optical Measuring System - OMS5k: Intensity",
    "Optical Measuring System - OMS5k: Layer number",
    "Optical Measuring System - OMS5k: Monitor wavelength",
    "Optical Measuring System - OMS5k: Next turning point",
    "Optical Measuring System - OMS5k: Second turning point",
];

// == Trace ==
/// One plottable line: a named series with x labels and hover values.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub name: String,
    pub mode: &'static str,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub hovertext: Vec<f64>,
}

// == First Nonzero ==
/// Returns the index of the first sample that compares unequal to zero.
///
/// NaN compares unequal to zero and therefore counts as nonzero, matching
/// the mask semantics of the dashboard this feeds.
pub fn first_nonzero(values: &[f64]) -> Option<usize> {
    values.iter().position(|&v| v != 0.0)
}

// == Min-Max Scale ==
/// Scales samples into `[0, 1]` via `(v - min) / (max - min)` over the
/// finite values. A constant column scales to all zeros; NaN passes through.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }

    if !min.is_finite() {
        // No finite samples at all
        return values.to_vec();
    }

    let range = if max > min { max - min } else { 1.0 };
    values
        .iter()
        .map(|&v| if v.is_finite() { (v - min) / range } else { v })
        .collect()
}

// == Power-On Start ==
/// Returns the row at which the power supply first reports forward power,
/// or 0 when the field is absent or never nonzero.
pub fn power_on_start(frame: &LogFrame) -> usize {
    frame
        .column(POWER_SUPPLY_FIELD)
        .and_then(|col| first_nonzero(&col.values))
        .unwrap_or(0)
}

// == Build Series ==
/// Assembles one trace per selected field, optionally trimmed to the
/// power-on start and min-max normalized. Hover values are always raw.
/// Fields not present in the frame are skipped.
pub fn build_series(
    frame: &LogFrame,
    fields: &[String],
    normalized: bool,
    from_power_on: bool,
) -> Vec<Trace> {
    let start = if from_power_on {
        power_on_start(frame)
    } else {
        0
    };
    let x: Vec<String> = frame.index()[start..].to_vec();

    fields
        .iter()
        .filter_map(|name| frame.column(name))
        .map(|col| {
            let raw = col.values[start..].to_vec();
            let y = if normalized {
                min_max_scale(&raw)
            } else {
                raw.clone()
            };
            Trace {
                name: col.name.clone(),
                mode: "lines",
                x: x.clone(),
                y,
                hovertext: raw,
            }
        })
        .collect()
}
