use ratatui::{buffer::Buffer, layout::Rect, Frame};

use crate::app::{App, AppState};

use super::{pages, render_results, render_typing};

/// A UI screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        pages::render_menu(app, area, buf);
    }
}

pub struct LoadingScreen;

impl Screen for LoadingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        pages::render_loading(app, area, buf);
    }
}

pub struct TypingScreen;

impl Screen for TypingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_typing(app, area, buf);
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_results(app, area, buf);
    }
}

pub struct AboutScreen;

impl Screen for AboutScreen {
    fn render(&self, _app: &App, area: Rect, buf: &mut Buffer) {
        pages::render_about(area, buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Menu => Box::new(MenuScreen),
        AppState::Loading => Box::new(LoadingScreen),
        AppState::Typing => Box::new(TypingScreen),
        AppState::Results => Box::new(ResultsScreen),
        AppState::About => Box::new(AboutScreen),
    }
}

/// Draw the whole frame for the app's current state
pub fn draw(app: &App, f: &mut Frame) {
    let area = f.area();
    current_screen(&app.state).render(app, area, f.buffer_mut());
}
