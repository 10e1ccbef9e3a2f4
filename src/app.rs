use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::analytics::PageTracker;
use crate::clock::Clock;
use crate::config::Config;
use crate::engine::{Progress, TypingEngine};
use crate::error::EngineError;
use crate::mode::{Mode, ModeOptions};
use crate::runtime::{AppEvent, IntervalTimer};
use crate::session::{SessionConfig, SessionState, StartPolicy};
use crate::source::{load_text, source_for, RemoteEndpoints};

const SECOND: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Loading,
    Typing,
    Results,
    About,
}

pub struct App {
    pub config: Config,
    pub state: AppState,
    pub mode: Mode,
    pub options: ModeOptions,
    pub menu_index: usize,
    pub engine: TypingEngine,
    remote: Option<RemoteEndpoints>,
    clock: Arc<dyn Clock>,
    timer: Option<IntervalTimer>,
    pending: Option<Receiver<String>>,
    tracker: Box<dyn PageTracker>,
    notice: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, clock: Arc<dyn Clock>, mut tracker: Box<dyn PageTracker>) -> Self {
        if let Some(id) = &config.analytics_id {
            tracker.init(id);
        }
        let mode = config.mode;
        let menu_index = Mode::ALL.iter().position(|m| *m == mode).unwrap_or(0);

        let mut app = Self {
            options: config.mode_options(),
            remote: config.remote_endpoints(),
            engine: TypingEngine::with_clock("", SessionConfig::default(), clock.clone()),
            config,
            state: AppState::Menu,
            mode,
            menu_index,
            clock,
            timer: None,
            pending: None,
            tracker,
            notice: None,
            should_quit: false,
        };
        app.enter(AppState::Menu);
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn route(&self) -> &'static str {
        match self.state {
            AppState::Menu => "/",
            AppState::About => "/about",
            AppState::Results => "/results",
            AppState::Loading | AppState::Typing => self.mode.route(),
        }
    }

    /// Jump straight into a test mode, fetching its text
    pub fn open_mode(&mut self, mode: Mode) {
        info!(%mode, "opening mode");
        self.mode = mode;
        if let Some(idx) = Mode::ALL.iter().position(|m| *m == mode) {
            self.menu_index = idx;
        }
        self.new_test();
    }

    /// "Try again": same text, fresh session
    pub fn retry(&mut self) {
        self.engine.reset(None);
        self.enter(AppState::Typing);
        self.sync_timer();
    }

    /// "New test": fresh text, fresh session
    pub fn new_test(&mut self) {
        self.notice = None;
        let source = source_for(self.mode, &self.options, self.remote.as_ref());

        if source.is_remote() {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let text = load_text(source.as_ref());
                // receiver is gone if the user navigated away
                let _ = tx.send(text);
            });
            // replacing the receiver discards any older fetch still in flight
            self.pending = Some(rx);
            self.timer = None;
            self.enter(AppState::Loading);
        } else {
            self.pending = None;
            let text = load_text(source.as_ref());
            self.install_text(text);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => self.on_key(key),
        }
    }

    fn on_tick(&mut self) {
        match self.pending.as_ref().map(|rx| rx.try_recv()) {
            Some(Ok(text)) => {
                self.pending = None;
                self.install_text(text);
            }
            Some(Err(TryRecvError::Disconnected)) => {
                warn!("text loader exited without a result");
                self.pending = None;
                let text = self.mode.fallback_text(&self.options);
                self.install_text(text);
            }
            Some(Err(TryRecvError::Empty)) | None => {}
        }

        let fired = match self.timer.as_mut() {
            Some(timer) => timer.poll(self.clock.now()),
            None => 0,
        };
        for _ in 0..fired {
            if self.engine.tick() == Progress::Completed {
                self.finish();
                break;
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Menu => self.on_menu_key(key),
            AppState::About => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                    self.enter(AppState::Menu)
                }
                _ => {}
            },
            AppState::Loading => {
                if key.code == KeyCode::Esc {
                    self.leave_to_menu();
                }
            }
            AppState::Typing => self.on_typing_key(key),
            AppState::Results => match key.code {
                KeyCode::Char('r') | KeyCode::Left => self.retry(),
                KeyCode::Char('n') | KeyCode::Right => self.new_test(),
                KeyCode::Char('m') | KeyCode::Esc => self.leave_to_menu(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        let len = Mode::ALL.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.menu_index = (self.menu_index + len - 1) % len,
            KeyCode::Down | KeyCode::Char('j') => self.menu_index = (self.menu_index + 1) % len,
            KeyCode::Enter | KeyCode::Char(' ') => self.open_mode(Mode::ALL[self.menu_index]),
            KeyCode::Char('?') => self.enter(AppState::About),
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn on_typing_key(&mut self, key: KeyEvent) {
        let result = match key.code {
            KeyCode::Esc => {
                self.leave_to_menu();
                return;
            }
            KeyCode::Left => {
                self.retry();
                return;
            }
            KeyCode::Right => {
                self.new_test();
                return;
            }
            KeyCode::Up | KeyCode::Down => {
                if self.engine.state() == SessionState::Idle
                    && self.options.cycle(self.mode, key.code == KeyCode::Up)
                {
                    self.new_test();
                }
                return;
            }
            KeyCode::Backspace => self.engine.backspace(),
            KeyCode::Enter => self.engine.type_char('\n'),
            KeyCode::Tab => self.engine.type_char('\t'),
            KeyCode::Char(' ')
                if self.engine.state() == SessionState::Idle
                    && self.engine.config().start == StartPolicy::Explicit =>
            {
                self.engine.start().map(|_| Progress::Accepted)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.engine.type_char(c)
            }
            _ => return,
        };

        match result {
            Ok(Progress::Completed) => self.finish(),
            Ok(_) => {}
            Err(EngineError::NoContent) => {
                self.notice = Some("Nothing to type. Press → for a new test.".to_string());
            }
        }
        self.sync_timer();
    }

    fn install_text(&mut self, text: String) {
        let config = self.mode.session_config(&self.options);
        self.engine = TypingEngine::with_clock(text, config, self.clock.clone());
        if !self.engine.has_content() {
            self.notice = Some("Nothing to type. Press → for a new test.".to_string());
        }
        self.enter(AppState::Typing);
        self.sync_timer();
    }

    fn finish(&mut self) {
        self.timer = None;
        if let Some(summary) = self.engine.summary() {
            debug!(wpm = summary.stats.wpm, mode = %self.mode, "showing results");
        }
        self.enter(AppState::Results);
    }

    fn leave_to_menu(&mut self) {
        self.pending = None;
        self.timer = None;
        self.engine.reset(None);
        self.enter(AppState::Menu);
    }

    /// The one-second timer lives exactly as long as the session is running
    fn sync_timer(&mut self) {
        let running = self.state == AppState::Typing && self.engine.state() == SessionState::Running;
        match (running, self.timer.is_some()) {
            (true, false) => self.timer = Some(IntervalTimer::start(SECOND, self.clock.now())),
            (false, true) => self.timer = None,
            _ => {}
        }
    }

    fn enter(&mut self, state: AppState) {
        self.state = state;
        let route = self.route();
        self.tracker.on_route_change(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::PageViews;
    use crate::clock::ManualClock;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn offline_app() -> (App, ManualClock) {
        let clock = ManualClock::new();
        let config = Config {
            offline: true,
            ..Config::default()
        };
        let app = App::new(config, Arc::new(clock.clone()), Box::new(PageViews::new()));
        (app, clock)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn starts_on_menu() {
        let (app, _) = offline_app();
        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.route(), "/");
        assert!(!app.timer_armed());
    }

    #[test]
    fn menu_navigation_wraps() {
        let (mut app, _) = offline_app();
        app.handle_event(key(KeyCode::Up));
        assert_eq!(app.menu_index, Mode::ALL.len() - 1);
        app.handle_event(key(KeyCode::Down));
        assert_eq!(app.menu_index, 0);
    }

    #[test]
    fn quick_test_needs_space_to_start() {
        let (mut app, _) = offline_app();
        app.open_mode(Mode::Quick);
        assert_eq!(app.state, AppState::Typing);

        type_str(&mut app, "The");
        assert_eq!(app.engine.typed(), "");
        assert!(!app.timer_armed());

        app.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(app.engine.state(), SessionState::Running);
        assert!(app.timer_armed());

        type_str(&mut app, crate::mode::QUICK_TEXT);
        assert_eq!(app.state, AppState::Results);
        assert!(!app.timer_armed());
        assert_eq!(app.engine.summary().unwrap().stats.errors, 0);
    }

    #[test]
    fn timer_disarmed_on_retry_and_menu() {
        let (mut app, _) = offline_app();
        app.open_mode(Mode::Words);
        type_str(&mut app, "x");
        assert!(app.timer_armed());

        app.handle_event(key(KeyCode::Left));
        assert_eq!(app.engine.state(), SessionState::Idle);
        assert!(!app.timer_armed());

        type_str(&mut app, "x");
        assert!(app.timer_armed());
        app.handle_event(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Menu);
        assert!(!app.timer_armed());
    }

    #[test]
    fn timed_mode_completes_from_ticks() {
        let (mut app, clock) = offline_app();
        app.options.timed_secs = 15;
        app.open_mode(Mode::Timed);
        type_str(&mut app, "a");
        assert_eq!(app.engine.seconds_left(), Some(15));

        for _ in 0..15 {
            clock.advance(SECOND);
            app.handle_event(AppEvent::Tick);
        }

        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.engine.seconds_left(), Some(0));
        assert!(!app.timer_armed());
        assert_eq!(app.engine.summary().unwrap().samples.len(), 15);
    }

    #[test]
    fn hard_mode_ignores_backspace() {
        let (mut app, _) = offline_app();
        app.open_mode(Mode::Hard);
        type_str(&mut app, "zz");
        app.handle_event(key(KeyCode::Backspace));
        assert_eq!(app.engine.typed(), "zz");
    }

    #[test]
    fn option_cycling_only_while_idle() {
        let (mut app, _) = offline_app();
        app.options.timed_secs = 30;
        app.open_mode(Mode::Timed);

        app.handle_event(key(KeyCode::Up));
        assert_eq!(app.options.timed_secs, 60);
        assert_eq!(app.engine.seconds_left(), Some(60));

        type_str(&mut app, "a");
        app.handle_event(key(KeyCode::Up));
        assert_eq!(app.options.timed_secs, 60);
    }

    #[test]
    fn results_keys() {
        let (mut app, _) = offline_app();
        app.open_mode(Mode::Alphabet);
        type_str(&mut app, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.route(), "/results");

        app.handle_event(key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Typing);
        assert_eq!(app.engine.reference(), "abcdefghijklmnopqrstuvwxyz");

        type_str(&mut app, "abcdefghijklmnopqrstuvwxyz");
        app.handle_event(key(KeyCode::Char('m')));
        assert_eq!(app.state, AppState::Menu);

        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn about_screen_round_trip() {
        let (mut app, _) = offline_app();
        app.handle_event(key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::About);
        app.handle_event(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Menu);
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let (mut app, _) = offline_app();
        app.open_mode(Mode::Code);
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn code_mode_accepts_newlines_and_tabs() {
        let (mut app, _) = offline_app();
        app.open_mode(Mode::Code);
        type_str(&mut app, "fn main() {");
        app.handle_event(key(KeyCode::Enter));
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.engine.typed(), "fn main() {\n\t");
        assert_eq!(app.engine.live_stats().errors, 1);
    }

    fn unreachable_app() -> App {
        let config = Config {
            offline: false,
            word_api_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_secs: 1,
            ..Config::default()
        };
        App::new(
            config,
            Arc::new(ManualClock::new()),
            Box::new(PageViews::new()),
        )
    }

    #[test]
    fn remote_failure_loads_fallback() {
        let mut app = unreachable_app();
        app.open_mode(Mode::Hard);
        assert_eq!(app.state, AppState::Loading);

        for _ in 0..200 {
            app.handle_event(AppEvent::Tick);
            if app.state == AppState::Typing {
                break;
            }
            thread::sleep(Duration::from_millis(20));
        }

        assert_eq!(app.state, AppState::Typing);
        assert_eq!(
            app.engine.reference(),
            crate::mode::hard_default_words(15).join(" ")
        );
    }

    #[test]
    fn late_fetch_result_is_ignored() {
        let mut app = unreachable_app();
        app.open_mode(Mode::Timed);
        app.handle_event(key(KeyCode::Esc));
        assert!(!app.is_loading());

        thread::sleep(Duration::from_millis(200));
        app.handle_event(AppEvent::Tick);
        assert_eq!(app.state, AppState::Menu);
    }
}
