// Playback of stored programs over the live arm state

use log::{debug, info, warn};

use crate::arm::ArmState;
use crate::motion::interpolate::{blend, clamp01, ease_in_out};
use crate::program::{Program, Waypoint};
use crate::sync::StateSync;

/// Duration of an eased point-to-point move.
pub const EASE_DURATION_MS: u64 = 1000;
/// Settle time at the target before the player returns to idle.
pub const HOLD_MS: u64 = 500;

enum Session {
    /// Eased transition from the pose at play time to a saved position.
    Eased {
        from: ArmState,
        to: ArmState,
        start_ms: u64,
        hold_started_ms: Option<u64>,
    },
    /// Linear walk over recorded waypoints by elapsed wall-clock time.
    Sequence {
        positions: Vec<Waypoint>,
        start_ms: u64,
        index: usize,
    },
}

/// Drives the arm state along a stored program, one frame at a time. The
/// session is the playing flag: `stop` drops it, and `tick` checks it first,
/// so cancellation lands within one frame.
pub struct Player {
    session: Option<Session>,
}

impl Player {
    pub fn new() -> Self {
        Self { session: None }
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    /// Begin playback of a program. The engine enforces the record guard and
    /// the toggle-stop rule before calling this.
    pub fn play(&mut self, program: Program, current: &ArmState, now_ms: u64) {
        match program {
            Program::Single(position) => {
                info!("Moving to position '{}'", position.name);
                self.session = Some(Session::Eased {
                    from: current.clone(),
                    to: position.state,
                    start_ms: now_ms,
                    hold_started_ms: None,
                });
            }
            Program::Sequence(sequence) => {
                if sequence.positions.is_empty() {
                    warn!("Sequence '{}' has no waypoints, ignoring", sequence.name);
                    return;
                }
                info!(
                    "Playing sequence '{}' ({} waypoints)",
                    sequence.name,
                    sequence.positions.len()
                );
                self.session = Some(Session::Sequence {
                    positions: sequence.positions,
                    start_ms: now_ms,
                    index: 0,
                });
            }
        }
    }

    /// Cancel the active session, if any. Takes effect on the next tick.
    pub fn stop(&mut self) {
        if self.session.take().is_some() {
            info!("Playback stopped");
        }
    }

    /// Frame step: advance the active session and apply the interpolated
    /// pose. Every applied update fans out to the sync collaborator.
    pub fn tick(&mut self, now_ms: u64, state: &mut ArmState, sync: &dyn StateSync) {
        let finished = match self.session.as_mut() {
            None => return,
            Some(Session::Eased {
                from,
                to,
                start_ms,
                hold_started_ms,
            }) => {
                if let Some(hold_start) = *hold_started_ms {
                    // Settled at the target; nothing new is applied.
                    now_ms.saturating_sub(hold_start) >= HOLD_MS
                } else {
                    let t = clamp01(
                        now_ms.saturating_sub(*start_ms) as f64 / EASE_DURATION_MS as f64,
                    );
                    *state = blend(from, to, ease_in_out(t));
                    sync.push(state);
                    if t >= 1. {
                        *hold_started_ms = Some(now_ms);
                    }
                    false
                }
            }
            Some(Session::Sequence {
                positions,
                start_ms,
                index,
            }) => {
                let elapsed = now_ms.saturating_sub(*start_ms);

                // Monotonic forward seek to the bracketing waypoint pair.
                while *index + 1 < positions.len() && elapsed >= positions[*index + 1].time {
                    *index += 1;
                }

                if *index + 1 >= positions.len() {
                    // Final waypoint reached: snap exactly, no extrapolation.
                    *state = positions[*index].state.clone();
                    sync.push(state);
                    true
                } else {
                    let current = &positions[*index];
                    let next = &positions[*index + 1];
                    let span = (next.time - current.time).max(1) as f64;
                    let t = clamp01(elapsed.saturating_sub(current.time) as f64 / span);
                    *state = blend(&current.state, &next.state, t);
                    sync.push(state);
                    false
                }
            }
        };

        if finished {
            debug!("Playback complete");
            self.session = None;
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
