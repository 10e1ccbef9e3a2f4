use std::time::Duration;

/// One WPM reading taken while a session is running
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    /// seconds since the session started
    pub t: f64,
    pub wpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }

    pub fn at(elapsed: Duration, wpm: u32) -> Self {
        Self::new(elapsed.as_secs_f64(), wpm as f64)
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.wpm)
    }
}
