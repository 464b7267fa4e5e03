//! Playback tracker: resume-from-offset, live percentage, debounced saves

use std::time::Duration;

use super::debounce::Debouncer;
use super::{ProgressClient, ProgressRecord};

/// Lifecycle of one viewing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    /// Waiting for the saved record and the media metadata
    Loading,
    Playing,
    Ended,
}

/// Tracks playback of one course video.
///
/// Feed it `record_loaded` and `metadata_ready` during startup and
/// `on_time_update` for every native time-update event; it keeps a display
/// percentage current and coalesces the event stream into one persistence
/// call per quiet period. Dropping the tracker aborts any pending save.
#[derive(Debug)]
pub struct ProgressTracker {
    client: ProgressClient,
    course_id: String,
    completion_threshold: f64,
    state: TrackerState,
    saved: Option<ProgressRecord>,
    record_loaded: bool,
    metadata_ready: bool,
    resume_emitted: bool,
    percentage: f64,
    last_position: Option<(f64, f64)>,
    debouncer: Debouncer,
}

impl ProgressTracker {
    pub fn new(
        client: ProgressClient,
        course_id: &str,
        completion_threshold: f64,
        quiet_period: Duration,
    ) -> Self {
        Self {
            client,
            course_id: course_id.to_string(),
            completion_threshold,
            state: TrackerState::Loading,
            saved: None,
            record_loaded: false,
            metadata_ready: false,
            resume_emitted: false,
            percentage: 0.0,
            last_position: None,
            debouncer: Debouncer::new(quiet_period),
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Current display percentage, clamped to [0, 100]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Whether playback has crossed the completion threshold. Derived from
    /// the percentage, never persisted separately.
    pub fn is_complete(&self) -> bool {
        self.percentage >= self.completion_threshold
    }

    /// Report the outcome of the saved-record fetch. Returns the resume
    /// offset when this was the last of the two startup events.
    pub fn record_loaded(&mut self, record: Option<ProgressRecord>) -> Option<f64> {
        self.saved = record;
        self.record_loaded = true;
        self.try_resume()
    }

    /// Report that media metadata (and so the duration) is available.
    /// Returns the resume offset when this was the last of the two startup
    /// events.
    pub fn metadata_ready(&mut self) -> Option<f64> {
        self.metadata_ready = true;
        self.try_resume()
    }

    /// The resume offset is produced exactly once, by whichever of
    /// record-loaded / metadata-ready lands last, so seeking never races
    /// against an unparsed media element or a not-yet-fetched record.
    fn try_resume(&mut self) -> Option<f64> {
        if !self.record_loaded || !self.metadata_ready || self.resume_emitted {
            return None;
        }
        self.resume_emitted = true;
        self.state = TrackerState::Playing;
        self.saved
            .as_ref()
            .map(|record| record.current_time)
            .filter(|offset| *offset > 0.0)
    }

    /// Handle a native time-update event: recompute the display percentage
    /// and re-arm the debounced save.
    pub fn on_time_update(&mut self, current_time: f64, duration: f64) -> f64 {
        self.percentage = compute_percentage(current_time, duration);
        self.last_position = Some((current_time, duration));
        if self.state != TrackerState::Ended {
            self.state = TrackerState::Playing;
        }

        let client = self.client.clone();
        let course_id = self.course_id.clone();
        self.debouncer.arm(async move {
            if let Err(err) = client.save(&course_id, current_time, duration).await {
                tracing::warn!(%course_id, error = %err, "failed to save progress");
            }
        });

        self.percentage
    }

    /// Playback finished: cancel the pending debounced save and persist the
    /// final position immediately.
    pub fn ended(&mut self) {
        self.state = TrackerState::Ended;
        self.debouncer.cancel();
        if let Some((current_time, duration)) = self.last_position {
            let client = self.client.clone();
            let course_id = self.course_id.clone();
            tokio::spawn(async move {
                if let Err(err) = client.save(&course_id, current_time, duration).await {
                    tracing::warn!(%course_id, error = %err, "failed to save final progress");
                }
            });
        }
    }

    /// The viewer is going away: abort any scheduled save so nothing writes
    /// after navigation.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
        self.state = TrackerState::Idle;
    }

    /// Whether a save is currently scheduled
    pub fn save_pending(&self) -> bool {
        self.debouncer.is_armed()
    }
}

/// Percentage watched, clamped to [0, 100]; 0 when the duration is
/// unknown, zero or not a finite number.
pub fn compute_percentage(current_time: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current_time.is_finite() {
        return 0.0;
    }
    (current_time / duration * 100.0).clamp(0.0, 100.0)
}
