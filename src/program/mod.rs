pub(crate) mod store;

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub use store::{BlobStore, FileBlobStore, MemoryBlobStore, ProgramStore};

use crate::arm::ArmState;

/// A single timestamped pose within a recorded sequence. `time` is elapsed
/// milliseconds since the first sample of the sequence; within a sequence
/// times are non-decreasing and the first waypoint is at 0 by construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub time: u64,
    pub state: ArmState,
}

/// A saved pose the player moves to with an eased point-to-point transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SinglePosition {
    pub name: String,
    pub timestamp: u64,
    pub state: ArmState,
}

/// Marker for the `type` field that distinguishes sequences from single
/// positions in the stored JSON.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum SequenceTag {
    #[serde(rename = "sequence")]
    #[default]
    Sequence,
}

/// A recorded motion sequence the player replays with linear interpolation
/// between consecutive waypoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceProgram {
    pub name: String,
    #[serde(rename = "type")]
    pub tag: SequenceTag,
    pub positions: Vec<Waypoint>,
    #[serde(rename = "createdAt")]
    pub created_at: u64,
}

impl SequenceProgram {
    pub fn new(name: String, positions: Vec<Waypoint>) -> Self {
        Self {
            name,
            tag: SequenceTag::Sequence,
            positions,
            created_at: unix_ms(),
        }
    }
}

/// A stored program: either a recorded sequence or a single saved position.
/// Sequences carry a `type: "sequence"` tag on the wire; single positions
/// have no tag, so the variants deserialize by field shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Program {
    Sequence(SequenceProgram),
    Single(SinglePosition),
}

impl Program {
    pub fn name(&self) -> &str {
        match self {
            Program::Sequence(sequence) => &sequence.name,
            Program::Single(position) => &position.name,
        }
    }
}

/// Milliseconds since the unix epoch, used for creation timestamps.
pub(crate) fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
