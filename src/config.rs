//! Configuration options for the CourseHub client

use std::time::Duration;

/// Configuration options for the CourseHub client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Base URL used to resolve bare asset filenames (thumbnails, videos).
    /// Falls back to `<api base>/uploads/courses` when unset.
    pub asset_base_url: Option<String>,

    /// Percentage at which a course counts as completed
    pub completion_threshold: f64,

    /// Quiet period before a playback position is persisted
    pub save_quiet_period: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            asset_base_url: None,
            completion_threshold: 90.0,
            save_quiet_period: Duration::from_secs(2),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the asset base URL
    pub fn with_asset_base_url(mut self, value: &str) -> Self {
        self.asset_base_url = Some(value.trim_end_matches('/').to_string());
        self
    }

    /// Set the completion threshold percentage
    pub fn with_completion_threshold(mut self, value: f64) -> Self {
        self.completion_threshold = value;
        self
    }

    /// Set the quiet period for debounced progress saves
    pub fn with_save_quiet_period(mut self, value: Duration) -> Self {
        self.save_quiet_period = value;
        self
    }
}
