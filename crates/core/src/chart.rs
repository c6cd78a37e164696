//! Fragment-to-series transform for waveform charts.
//!
//! A fragment arrives as a sample-major matrix: `signal[i][j]` is the value
//! of lead `j` at sample `i`. Charts want the transpose, one series per lead,
//! plus a shared time axis in seconds.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Sampling rate assumed when a fragment does not declare one.
pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 200.0;

/// A raw multi-lead signal fragment.
#[derive(Debug, Clone, Deserialize)]
pub struct Fragment {
    pub signal: Vec<Vec<f64>>,
    pub sampling_rate: Option<f64>,
}

/// One lead's samples, labelled for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSeries {
    pub label: String,
    pub data: Vec<f64>,
}

/// Chart-ready data: time labels and one series per lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub series: Vec<LeadSeries>,
}

/// Transpose a fragment into per-lead series.
///
/// Time labels are `index / rate` seconds rendered with two decimals. An
/// empty signal yields an empty [`ChartSeries`].
pub fn to_chart_series(fragment: &Fragment) -> Result<ChartSeries, CoreError> {
    let rate = fragment.sampling_rate.unwrap_or(DEFAULT_SAMPLING_RATE_HZ);
    if !rate.is_finite() || rate <= 0.0 {
        return Err(CoreError::Validation(format!(
            "sampling_rate must be a positive number, got {rate}"
        )));
    }

    let Some(first) = fragment.signal.first() else {
        return Ok(ChartSeries {
            labels: Vec::new(),
            series: Vec::new(),
        });
    };

    let lead_count = first.len();
    if let Some(pos) = fragment.signal.iter().position(|row| row.len() != lead_count) {
        return Err(CoreError::Validation(format!(
            "signal row {pos} has {} leads, expected {lead_count}",
            fragment.signal[pos].len()
        )));
    }

    let labels = (0..fragment.signal.len())
        .map(|i| format!("{:.2}", i as f64 / rate))
        .collect();

    let series = (0..lead_count)
        .map(|lead| LeadSeries {
            label: format!("lead {}", lead + 1),
            data: fragment.signal.iter().map(|row| row[lead]).collect(),
        })
        .collect();

    Ok(ChartSeries { labels, series })
}
