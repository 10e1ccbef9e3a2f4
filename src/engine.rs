use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use itertools::{EitherOrBoth, Itertools};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::EngineError;
use crate::metrics::{self, Stats};
use crate::session::{CompletionPolicy, SessionConfig, SessionState, StartPolicy};
use crate::time_series::TimeSeriesPoint;

/// What an input event or tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Ignored,
    Accepted,
    Completed,
}

/// Display status of one reference character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharStatus {
    Untyped,
    Correct,
    Incorrect,
    Cursor,
}

/// Results frozen at the moment a session completes
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub stats: Stats,
    pub elapsed_secs: f64,
    pub consistency: f64,
    pub samples: Vec<TimeSeriesPoint>,
    pub finished_at: DateTime<Local>,
}

/// A single typing session: reference text, what has been typed so far,
/// and the Idle -> Running -> Completed lifecycle around it.
#[derive(Debug)]
pub struct TypingEngine {
    reference: String,
    reference_len: usize,
    typed: String,
    typed_len: usize,
    config: SessionConfig,
    state: SessionState,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    seconds_left: Option<u64>,
    samples: Vec<TimeSeriesPoint>,
    summary: Option<SessionSummary>,
    clock: Arc<dyn Clock>,
}

impl TypingEngine {
    pub fn new(reference: impl Into<String>, config: SessionConfig) -> Self {
        Self::with_clock(reference, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        reference: impl Into<String>,
        config: SessionConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let reference = reference.into();
        Self {
            reference_len: reference.chars().count(),
            reference,
            typed: String::new(),
            typed_len: 0,
            seconds_left: config.time_limit(),
            config,
            state: SessionState::Idle,
            started_at: None,
            finished_at: None,
            samples: vec![],
            summary: None,
            clock,
        }
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state != SessionState::Idle {
            return Ok(());
        }
        if self.reference_len == 0 {
            return Err(EngineError::NoContent);
        }
        self.started_at = Some(self.clock.now());
        self.state = SessionState::Running;
        debug!(chars = self.reference_len, "session started");
        Ok(())
    }

    /// Replace the typed input with `new_input`, the way a text field
    /// reports its whole value on every change.
    pub fn apply_input(&mut self, new_input: &str) -> Result<Progress, EngineError> {
        if self.reference_len == 0 {
            return Err(EngineError::NoContent);
        }

        match (self.state, self.config.start) {
            (SessionState::Completed, _) => return Ok(Progress::Ignored),
            (SessionState::Idle, StartPolicy::Explicit) => return Ok(Progress::Ignored),
            (SessionState::Idle, StartPolicy::OnFirstInput) => {
                if new_input.is_empty() {
                    return Ok(Progress::Ignored);
                }
                self.start()?;
            }
            (SessionState::Running, _) => {}
        }

        let candidate: String = if self.config.character_limit {
            new_input.chars().take(self.reference_len).collect()
        } else {
            new_input.to_string()
        };
        let candidate_len = candidate.chars().count();

        if !self.config.allow_shrink && candidate_len < self.typed_len {
            return Ok(Progress::Ignored);
        }
        if candidate == self.typed {
            return Ok(Progress::Ignored);
        }

        self.typed = candidate;
        self.typed_len = candidate_len;

        if self.config.completion == CompletionPolicy::ReachFullLength
            && self.typed_len >= self.reference_len
        {
            self.complete();
            return Ok(Progress::Completed);
        }

        Ok(Progress::Accepted)
    }

    pub fn type_char(&mut self, c: char) -> Result<Progress, EngineError> {
        let mut next = self.typed.clone();
        next.push(c);
        self.apply_input(&next)
    }

    pub fn backspace(&mut self) -> Result<Progress, EngineError> {
        let mut next = self.typed.clone();
        if next.pop().is_none() {
            return Ok(Progress::Ignored);
        }
        self.apply_input(&next)
    }

    /// One-second tick while running: records a WPM sample and, for
    /// time-boxed sessions, counts down.
    pub fn tick(&mut self) -> Progress {
        if self.state != SessionState::Running {
            return Progress::Ignored;
        }

        let elapsed = self.elapsed();
        let wpm = metrics::wpm(self.scored_input().chars().count(), elapsed);
        self.samples.push(TimeSeriesPoint::at(elapsed, wpm));

        if let Some(left) = self.seconds_left.as_mut() {
            *left = left.saturating_sub(1);
            if *left == 0 {
                self.complete();
                return Progress::Completed;
            }
        }

        Progress::Accepted
    }

    /// Discard the session. `Some(text)` swaps in a new reference ("new
    /// test"); `None` keeps the current one ("try again").
    pub fn reset(&mut self, new_text: Option<String>) {
        if let Some(text) = new_text {
            self.reference_len = text.chars().count();
            self.reference = text;
        }
        self.typed.clear();
        self.typed_len = 0;
        self.state = SessionState::Idle;
        self.started_at = None;
        self.finished_at = None;
        self.seconds_left = self.config.time_limit();
        self.samples.clear();
        self.summary = None;
    }

    pub fn live_stats(&self) -> Stats {
        if let Some(summary) = &self.summary {
            return summary.stats;
        }
        metrics::stats_for(self.scored_input(), &self.reference, self.elapsed())
    }

    /// One status per reference character
    pub fn char_statuses(&self) -> Vec<CharStatus> {
        let cursor = (self.state != SessionState::Completed).then_some(self.typed_len);

        self.reference
            .chars()
            .zip_longest(self.typed.chars())
            .enumerate()
            .filter_map(|(idx, pair)| match pair {
                EitherOrBoth::Both(expected, got) if expected == got => Some(CharStatus::Correct),
                EitherOrBoth::Both(_, _) => Some(CharStatus::Incorrect),
                EitherOrBoth::Left(_) if Some(idx) == cursor => Some(CharStatus::Cursor),
                EitherOrBoth::Left(_) => Some(CharStatus::Untyped),
                EitherOrBoth::Right(_) => None,
            })
            .collect()
    }

    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => self.clock.now().saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    /// Fraction of the session used up: time for time-boxed sessions,
    /// text otherwise.
    pub fn progress_ratio(&self) -> f64 {
        match (self.config.time_limit(), self.seconds_left) {
            (Some(limit), Some(left)) if limit > 0 => (limit - left.min(limit)) as f64 / limit as f64,
            _ if self.reference_len > 0 => {
                self.typed_len.min(self.reference_len) as f64 / self.reference_len as f64
            }
            _ => 0.0,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn has_content(&self) -> bool {
        self.reference_len > 0
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn seconds_left(&self) -> Option<u64> {
        self.seconds_left
    }

    pub fn samples(&self) -> &[TimeSeriesPoint] {
        &self.samples
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    fn scored_input(&self) -> &str {
        match self.typed.char_indices().nth(self.reference_len) {
            Some((byte_idx, _)) => &self.typed[..byte_idx],
            None => &self.typed,
        }
    }

    fn complete(&mut self) {
        self.finished_at = Some(self.clock.now());
        self.state = SessionState::Completed;

        let elapsed = self.elapsed();
        let stats = metrics::stats_for(self.scored_input(), &self.reference, elapsed);
        info!(
            wpm = stats.wpm,
            accuracy = stats.accuracy,
            errors = stats.errors,
            elapsed_secs = elapsed.as_secs_f64(),
            "session completed"
        );

        self.summary = Some(SessionSummary {
            stats,
            elapsed_secs: elapsed.as_secs_f64(),
            consistency: metrics::consistency(&self.samples),
            samples: self.samples.clone(),
            finished_at: Local::now(),
        });
    }
}
