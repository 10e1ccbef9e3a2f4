use tracing::{debug, info};

/// Receives the screens the user visits
pub trait PageTracker: Send {
    /// Configure the tracker. Repeating the same id is a no-op.
    fn init(&mut self, measurement_id: &str);
    fn on_route_change(&mut self, path: &str);
}

/// Page-view tracker that reports through the log instead of a network beacon
#[derive(Debug, Default)]
pub struct PageViews {
    measurement_id: Option<String>,
    last_path: Option<String>,
    views: u64,
}

impl PageViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn views(&self) -> u64 {
        self.views
    }

    pub fn measurement_id(&self) -> Option<&str> {
        self.measurement_id.as_deref()
    }
}

impl PageTracker for PageViews {
    fn init(&mut self, measurement_id: &str) {
        let measurement_id = measurement_id.trim();
        if measurement_id.is_empty() {
            debug!("analytics measurement id not provided");
            return;
        }
        if self.measurement_id.as_deref() == Some(measurement_id) {
            return;
        }
        info!(target: "typingo::analytics", measurement_id, "analytics configured");
        self.measurement_id = Some(measurement_id.to_string());
        self.last_path = None;
    }

    fn on_route_change(&mut self, path: &str) {
        let Some(id) = self.measurement_id.as_deref() else {
            debug!(path, "page view dropped, analytics not configured");
            return;
        };
        if self.last_path.as_deref() == Some(path) {
            return;
        }
        self.views += 1;
        info!(target: "typingo::analytics", measurement_id = id, page_path = path, "page_view");
        self.last_path = Some(path.to_string());
    }
}
