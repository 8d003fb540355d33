// Error types for armdeck

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum ArmdeckError {
    // Guard violations: the rejected action leaves both subsystems unchanged
    #[snafu(display("Cannot start playback while a recording is in progress"))]
    RecorderBusy,
    #[snafu(display("Cannot start recording while playback is in progress"))]
    PlayerBusy,
    #[snafu(display("Recorder is already capturing a sequence"))]
    AlreadyRecording,

    // Program store errors
    #[snafu(display("Error reading or writing the program store"))]
    StoreIoError { source: io::Error },
    #[snafu(display("Error serializing the program list"))]
    StoreSerializeError { source: serde_json::Error },
    #[snafu(display("Could not find application data directory for the program store"))]
    NoDataDir,

    // State sync client errors
    #[snafu(display("Could not start the state sync runtime"))]
    SyncInitError { source: io::Error },

    // Config management errors
    #[snafu(display("Could not find application config directory"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIoError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
}
