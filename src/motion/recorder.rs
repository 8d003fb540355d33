// Motion capture at a fixed sampling cadence

use log::{debug, info};

use crate::arm::ArmState;
use crate::program::{SequenceProgram, Waypoint};

/// Milliseconds between captured samples while recording.
pub const SAMPLE_INTERVAL_MS: u64 = 200;

/// Captures the live arm state into an ordered, time-stamped sample list.
/// The first sample is taken immediately on start, then one every
/// `SAMPLE_INTERVAL_MS` as the frame loop ticks. Absolute capture times are
/// kept until `stop` normalizes them so the first waypoint lands at 0.
pub struct Recorder {
    samples: Vec<(u64, ArmState)>,
    last_sample_ms: u64,
    recording: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            last_sample_ms: 0,
            recording: false,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Begin a capture session, sampling the current state as waypoint 0.
    /// The player/record guard is enforced by the engine before this is
    /// called.
    pub fn start(&mut self, now_ms: u64, state: &ArmState) {
        info!("Recording started");
        self.samples.clear();
        self.samples.push((now_ms, state.clone()));
        self.last_sample_ms = now_ms;
        self.recording = true;
    }

    /// Frame step: capture another sample once the cadence interval has
    /// elapsed. No-op while idle.
    pub fn tick(&mut self, now_ms: u64, state: &ArmState) {
        if !self.recording {
            return;
        }
        if now_ms.saturating_sub(self.last_sample_ms) >= SAMPLE_INTERVAL_MS {
            self.samples.push((now_ms, state.clone()));
            self.last_sample_ms = now_ms;
        }
    }

    /// Finish the session. Returns the captured sequence with timestamps
    /// rebased so the first sample is at 0, or `None` if nothing was
    /// captured.
    pub fn stop(&mut self, name: &str) -> Option<SequenceProgram> {
        self.recording = false;
        if self.samples.is_empty() {
            debug!("Recording stopped with no samples, nothing to save");
            return None;
        }

        let origin = self.samples[0].0;
        let positions: Vec<Waypoint> = self
            .samples
            .drain(..)
            .map(|(time, state)| Waypoint {
                time: time - origin,
                state,
            })
            .collect();

        info!(
            "Recording stopped: {} waypoints over {} ms",
            positions.len(),
            positions.last().map(|w| w.time).unwrap_or(0)
        );
        Some(SequenceProgram::new(name.to_string(), positions))
    }

    /// Abort the session and discard every captured sample.
    pub fn clear(&mut self) {
        if self.recording {
            debug!("Recording cleared while active");
        }
        self.recording = false;
        self.samples.clear();
    }

    #[cfg(test)]
    pub(crate) fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}
