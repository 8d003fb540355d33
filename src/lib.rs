// Library interface for armdeck
// This allows integration tests to access internal modules

pub mod arm;
pub mod clock;
pub mod config;
pub mod console;
pub mod errors;
pub mod motion;
pub mod program;
pub mod sync;

// Re-export commonly used types
pub use arm::{ArmState, Axis};
pub use errors::ArmdeckError;
pub use motion::MotionEngine;
pub use program::{Program, ProgramStore, SequenceProgram, SinglePosition, Waypoint};
pub use sync::StateSync;
