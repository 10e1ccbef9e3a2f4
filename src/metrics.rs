//! Scoring arithmetic shared by every test mode.
//!
//! Every function here is pure and guards its own zero denominators, so
//! callers can feed it an empty input or a zero-length interval.

use std::time::Duration;

use crate::time_series::TimeSeriesPoint;

/// Characters per "word" in the WPM formula
pub const CHARS_PER_WORD: f64 = 5.0;

/// Snapshot of the figures shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub wpm: u32,
    pub accuracy: u32,
    pub errors: usize,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            errors: 0,
        }
    }
}

/// Position-by-position mismatches up to the shorter of the two strings.
pub fn count_mismatches(typed: &str, reference: &str) -> usize {
    typed
        .chars()
        .zip(reference.chars())
        .filter(|(t, r)| t != r)
        .count()
}

/// Percentage of typed characters that matched. 100 for empty input.
pub fn accuracy_percent(typed_len: usize, errors: usize) -> u32 {
    if typed_len == 0 {
        return 100;
    }
    let correct = typed_len.saturating_sub(errors) as f64;
    (100.0 * correct / typed_len as f64).round() as u32
}

/// Character-rate WPM: `(typed / 5) / minutes`. 0 when no time has passed.
pub fn wpm(typed_len: usize, elapsed: Duration) -> u32 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }
    ((typed_len as f64 / CHARS_PER_WORD) / (secs / 60.0)).round() as u32
}

fn mean_wpm(samples: &[TimeSeriesPoint]) -> Option<f64> {
    match samples.len() {
        0 => None,
        n => Some(samples.iter().map(|p| p.wpm).sum::<f64>() / n as f64),
    }
}

/// Spread (population standard deviation) of the per-second WPM samples;
/// lower is steadier. 0 when there are no samples.
pub fn consistency(samples: &[TimeSeriesPoint]) -> f64 {
    let Some(mean) = mean_wpm(samples) else {
        return 0.0;
    };
    let variance = samples
        .iter()
        .map(|p| (p.wpm - mean).powi(2))
        .sum::<f64>()
        / samples.len() as f64;
    variance.sqrt()
}

pub fn stats_for(typed: &str, reference: &str, elapsed: Duration) -> Stats {
    let typed_len = typed.chars().count();
    let errors = count_mismatches(typed, reference);
    Stats {
        wpm: wpm(typed_len, elapsed),
        accuracy: accuracy_percent(typed_len, errors),
        errors,
    }
}
