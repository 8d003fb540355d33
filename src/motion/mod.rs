pub(crate) mod engine;
pub(crate) mod interpolate;
pub(crate) mod player;
pub(crate) mod recorder;

pub use engine::MotionEngine;
pub use interpolate::{blend, clamp01, ease_in_out, lerp};
pub use player::{EASE_DURATION_MS, HOLD_MS, Player};
pub use recorder::{Recorder, SAMPLE_INTERVAL_MS};
