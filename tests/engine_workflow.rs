// End-to-end workflow tests for the motion engine:
// record a session, persist it, replay it with interpolation, and verify
// the record/play guard and the per-frame state fan-out.

use std::sync::{Arc, Mutex};

use armdeck::arm::{ArmState, Axis};
use armdeck::clock::ManualClock;
use armdeck::errors::ArmdeckError;
use armdeck::motion::MotionEngine;
use armdeck::program::{MemoryBlobStore, Program, ProgramStore};
use armdeck::sync::StateSync;

/// Records every pushed state so tests can assert on the fan-out.
#[derive(Clone, Default)]
struct CapturingSync {
    pushes: Arc<Mutex<Vec<ArmState>>>,
}

impl CapturingSync {
    fn count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }

    fn last(&self) -> Option<ArmState> {
        self.pushes.lock().unwrap().last().cloned()
    }
}

impl StateSync for CapturingSync {
    fn push(&self, state: &ArmState) {
        self.pushes.lock().unwrap().push(state.clone());
    }
}

fn engine_fixture() -> (MotionEngine, Arc<ManualClock>, CapturingSync) {
    let clock = ManualClock::new();
    let sync = CapturingSync::default();
    let store = ProgramStore::new(Box::new(MemoryBlobStore::new()));
    let engine = MotionEngine::new(store, Box::new(sync.clone()), clock.clone());
    (engine, clock, sync)
}

#[test]
fn record_persist_replay_round_trip() {
    let (mut engine, clock, _sync) = engine_fixture();

    // Record: home at t=0, 10 degrees at t=200, 20 degrees at t=400.
    engine.start_recording().unwrap();
    engine.adjust(Axis::Rotate, 1);
    clock.advance(200);
    engine.tick();
    engine.adjust(Axis::Rotate, 1);
    clock.advance(200);
    engine.tick();
    engine.stop_recording("sweep").unwrap();

    let programs = engine.programs().unwrap();
    assert_eq!(programs.len(), 1);
    let Program::Sequence(sequence) = &programs[0] else {
        panic!("expected a sequence");
    };
    assert_eq!(sequence.name, "sweep");
    assert_eq!(sequence.positions.len(), 3);
    assert_eq!(sequence.positions[0].time, 0);
    assert_eq!(sequence.positions[2].time, 400);

    // Replay and sample the middle of the first segment.
    engine.play(0).unwrap();
    assert!(engine.is_playing());

    clock.advance(100);
    engine.tick();
    assert_eq!(engine.state().rotate, 5.);

    // Past the final waypoint: snap exactly, playback over.
    clock.advance(500);
    engine.tick();
    assert_eq!(engine.state().rotate, 20.);
    assert!(!engine.is_playing());
}

#[test]
fn sequence_playback_fans_out_every_frame() {
    let (mut engine, clock, sync) = engine_fixture();

    engine.start_recording().unwrap();
    engine.adjust(Axis::Extend, 1);
    clock.advance(1000);
    engine.tick();
    engine.stop_recording("slide").unwrap();

    engine.play(0).unwrap();
    let before = sync.count();
    for _ in 0..5 {
        clock.advance(100);
        engine.tick();
    }
    assert_eq!(sync.count(), before + 5);
    assert!(engine.is_playing());
}

#[test]
fn eased_move_to_saved_position() {
    let (mut engine, clock, sync) = engine_fixture();

    engine.set(Axis::Extend, 100.);
    engine.save_position("reach").unwrap();
    engine.reset();
    assert_eq!(engine.state().extend, 0.);

    engine.play(0).unwrap();

    // ease_in_out(0.5) == 0.5, so the midpoint of the 1000 ms move is 50%.
    clock.advance(500);
    engine.tick();
    assert_eq!(engine.state().extend, 50.);
    assert_eq!(sync.last().unwrap().extend, 50.);

    // Transition done; the 500 ms hold keeps the player busy.
    clock.advance(500);
    engine.tick();
    assert_eq!(engine.state().extend, 100.);
    assert!(engine.is_playing());

    clock.advance(500);
    engine.tick();
    assert!(!engine.is_playing());
    assert_eq!(engine.state().extend, 100.);
}

#[test]
fn guard_rejects_play_during_recording_without_side_effects() {
    let (mut engine, clock, _sync) = engine_fixture();

    engine.save_position("target").unwrap();
    engine.start_recording().unwrap();
    clock.advance(200);
    engine.tick();

    let result = engine.play(0);
    assert!(matches!(result, Err(ArmdeckError::RecorderBusy)));
    assert!(engine.is_recording());
    assert!(!engine.is_playing());

    // The rejected play must not have disturbed the capture.
    engine.stop_recording("kept").unwrap();
    let programs = engine.programs().unwrap();
    let Program::Sequence(sequence) = &programs[1] else {
        panic!("expected the recorded sequence");
    };
    assert_eq!(sequence.positions.len(), 2);
}

#[test]
fn stopping_mid_sequence_leaves_player_idle() {
    let (mut engine, clock, _sync) = engine_fixture();

    engine.start_recording().unwrap();
    engine.adjust(Axis::Elevate, 1);
    clock.advance(600);
    engine.tick();
    engine.stop_recording("lift").unwrap();

    engine.play(0).unwrap();
    clock.advance(100);
    engine.tick();
    let mid = engine.state().clone();

    engine.stop_playback();
    assert!(!engine.is_playing());

    // The cancelled transition never completes.
    clock.advance(1000);
    engine.tick();
    assert_eq!(engine.state(), &mid);
}

#[test]
fn deleting_out_of_bounds_keeps_the_list() {
    let (mut engine, _clock, _sync) = engine_fixture();

    engine.save_position("a").unwrap();
    engine.save_position("b").unwrap();

    engine.delete_program(5).unwrap();
    assert_eq!(engine.programs().unwrap().len(), 2);
}
