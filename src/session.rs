/// When a session is considered complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// typed input reaches the length of the reference text
    ReachFullLength,
    /// the countdown hits zero, whatever was typed
    TimeExpired { secs: u64 },
}

/// What moves a session out of Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPolicy {
    OnFirstInput,
    /// only `start()` does; input while idle is ignored
    Explicit,
}

/// Per-mode knobs for a typing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub completion: CompletionPolicy,
    pub start: StartPolicy,
    /// whether an edit may shorten the input (backspace)
    pub allow_shrink: bool,
    /// drop keystrokes past the end of the reference text
    pub character_limit: bool,
}

impl SessionConfig {
    pub fn time_limit(&self) -> Option<u64> {
        match self.completion {
            CompletionPolicy::TimeExpired { secs } => Some(secs),
            CompletionPolicy::ReachFullLength => None,
        }
    }

    pub fn is_time_boxed(&self) -> bool {
        self.time_limit().is_some()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            completion: CompletionPolicy::ReachFullLength,
            start: StartPolicy::OnFirstInput,
            allow_shrink: true,
            character_limit: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_character_bounded() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.time_limit(), None);
        assert!(!cfg.is_time_boxed());
        assert!(cfg.allow_shrink);
        assert!(cfg.character_limit);
    }

    #[test]
    fn time_boxed_config_reports_limit() {
        let cfg = SessionConfig {
            completion: CompletionPolicy::TimeExpired { secs: 30 },
            ..SessionConfig::default()
        };
        assert_eq!(cfg.time_limit(), Some(30));
        assert!(cfg.is_time_boxed());
    }
}
