// Owned context tying state, recorder, player, and store together

use log::debug;
use std::sync::Arc;

use crate::arm::{ArmState, Axis};
use crate::clock::Clock;
use crate::errors::ArmdeckError;
use crate::motion::player::Player;
use crate::motion::recorder::Recorder;
use crate::program::{Program, ProgramStore, SinglePosition, unix_ms};
use crate::sync::StateSync;

/// The control surface of the arm. Owns the live state, the recorder, the
/// player, and the program store; every user intent enters through here, and
/// the frame loop drives it with `tick`. Recording and playback are mutually
/// exclusive; the guard is advisory and safe because all mutation happens on
/// the single thread that owns the engine.
pub struct MotionEngine {
    state: ArmState,
    recorder: Recorder,
    player: Player,
    store: ProgramStore,
    sync: Box<dyn StateSync>,
    clock: Arc<dyn Clock>,
}

impl MotionEngine {
    pub fn new(store: ProgramStore, sync: Box<dyn StateSync>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: ArmState::default(),
            recorder: Recorder::new(),
            player: Player::new(),
            store,
            sync,
            clock,
        }
    }

    pub fn state(&self) -> &ArmState {
        &self.state
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// Set an axis to an absolute value (clamped) and sync immediately.
    pub fn set(&mut self, axis: Axis, value: f64) {
        self.state.set(axis, value);
        self.sync.push(&self.state);
    }

    /// Nudge an axis by its fixed step and sync immediately.
    pub fn adjust(&mut self, axis: Axis, direction: i32) {
        self.state.adjust(axis, direction);
        self.sync.push(&self.state);
    }

    /// Return every axis to the home position.
    pub fn reset(&mut self) {
        self.state.reset();
        self.sync.push(&self.state);
    }

    /// Begin recording. Rejected while playback is active; the rejection
    /// changes nothing in either subsystem.
    pub fn start_recording(&mut self) -> Result<(), ArmdeckError> {
        if self.player.is_playing() {
            return Err(ArmdeckError::PlayerBusy);
        }
        if self.recorder.is_recording() {
            return Err(ArmdeckError::AlreadyRecording);
        }
        self.recorder.start(self.clock.now_ms(), &self.state);
        Ok(())
    }

    /// Stop recording and persist the captured sequence under `name`. A
    /// session with no samples persists nothing.
    pub fn stop_recording(&mut self, name: &str) -> Result<(), ArmdeckError> {
        if let Some(sequence) = self.recorder.stop(name) {
            self.store.save(Program::Sequence(sequence))?;
        }
        Ok(())
    }

    /// Abort any in-progress recording, discarding captured samples.
    pub fn clear_recording(&mut self) {
        self.recorder.clear();
    }

    /// Play the stored program at `index`. Calling this while already
    /// playing stops the current playback instead of starting a new one
    /// (toggle-stop, preserved from the original panel pending product
    /// sign-off). Rejected while recording; a missing index is a silent
    /// no-op.
    pub fn play(&mut self, index: usize) -> Result<(), ArmdeckError> {
        if self.player.is_playing() {
            self.player.stop();
            return Ok(());
        }
        if self.recorder.is_recording() {
            return Err(ArmdeckError::RecorderBusy);
        }
        match self.store.get(index)? {
            Some(program) => {
                self.player.play(program, &self.state, self.clock.now_ms());
            }
            None => {
                debug!("Play ignored: no program at index {}", index);
            }
        }
        Ok(())
    }

    /// Cancel playback; takes effect within one frame.
    pub fn stop_playback(&mut self) {
        self.player.stop();
    }

    /// Save the current pose as a named single-position program.
    pub fn save_position(&mut self, name: &str) -> Result<(), ArmdeckError> {
        self.store.save(Program::Single(SinglePosition {
            name: name.to_string(),
            timestamp: unix_ms(),
            state: self.state.clone(),
        }))
    }

    pub fn programs(&self) -> Result<Vec<Program>, ArmdeckError> {
        self.store.list()
    }

    pub fn delete_program(&self, index: usize) -> Result<(), ArmdeckError> {
        self.store.delete(index)
    }

    /// Frame step, called once per display refresh: advances the recording
    /// cadence and the playback session.
    pub fn tick(&mut self) {
        let now_ms = self.clock.now_ms();
        self.recorder.tick(now_ms, &self.state);
        self.player.tick(now_ms, &mut self.state, self.sync.as_ref());
    }
}
