// Library surface for the binary and for headless/integration tests.
pub mod analytics;
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod mode;
pub mod runtime;
pub mod session;
pub mod source;
pub mod time_series;
pub mod ui;

pub use app::{App, AppState};
