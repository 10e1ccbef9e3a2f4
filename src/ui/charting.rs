use crate::time_series::TimeSeriesPoint;

/// Compute X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(samples: &[TimeSeriesPoint], elapsed_secs: f64) -> (f64, f64) {
    let highest_wpm = samples.iter().map(|p| p.wpm).fold(0.0, f64::max);

    let overall_duration = samples
        .last()
        .map(|p| p.t)
        .unwrap_or(elapsed_secs)
        .max(1.0);

    (overall_duration, highest_wpm.round())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
