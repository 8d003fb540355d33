// Line-oriented control surface and the frame loop that drives the engine

use log::{error, warn};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::arm::Axis;
use crate::motion::MotionEngine;
use crate::program::Program;

/// A discrete user intent, one per console line. The single-letter commands
/// mirror the keyboard shortcuts of the original panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Adjust(Axis, i32),
    Set(Axis, f64),
    Home,
    StartRecording,
    StopRecording(String),
    ClearRecording,
    Play(usize),
    StopPlayback,
    List,
    Delete(usize),
    SavePosition(String),
    Quit,
}

fn parse_axis(word: &str) -> Option<Axis> {
    match word {
        "rotate" => Some(Axis::Rotate),
        "extend" => Some(Axis::Extend),
        "elevate" => Some(Axis::Elevate),
        "pinch" => Some(Axis::Pinch),
        _ => None,
    }
}

/// Parse one console line into a command; `None` for anything unrecognized.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let rest: Vec<&str> = parts.collect();

    match head {
        "q" => Some(Command::Adjust(Axis::Rotate, -1)),
        "e" => Some(Command::Adjust(Axis::Rotate, 1)),
        "w" => Some(Command::Adjust(Axis::Elevate, 1)),
        "s" => Some(Command::Adjust(Axis::Elevate, -1)),
        "a" => Some(Command::Adjust(Axis::Pinch, -1)),
        "d" => Some(Command::Adjust(Axis::Pinch, 1)),
        "z" => Some(Command::Adjust(Axis::Extend, -1)),
        "c" => Some(Command::Adjust(Axis::Extend, 1)),
        "r" | "home" => Some(Command::Home),
        "set" => {
            let axis = parse_axis(rest.first().copied()?)?;
            let value: f64 = rest.get(1)?.parse().ok()?;
            Some(Command::Set(axis, value))
        }
        "rec" => Some(Command::StartRecording),
        "stop" => {
            let name = rest.join(" ");
            if name.is_empty() {
                None
            } else {
                Some(Command::StopRecording(name))
            }
        }
        "clear" => Some(Command::ClearRecording),
        "play" => rest.first()?.parse().ok().map(Command::Play),
        "halt" => Some(Command::StopPlayback),
        "ls" => Some(Command::List),
        "rm" => rest.first()?.parse().ok().map(Command::Delete),
        "save" => {
            let name = rest.join(" ");
            if name.is_empty() {
                None
            } else {
                Some(Command::SavePosition(name))
            }
        }
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Print the stored program list, one line per entry.
pub fn print_programs(programs: &[Program]) {
    if programs.is_empty() {
        println!("No stored programs");
        return;
    }
    for (index, program) in programs.iter().enumerate() {
        match program {
            Program::Sequence(sequence) => {
                println!(
                    "{:>3}  sequence  {} ({} waypoints, {} ms)",
                    index,
                    sequence.name,
                    sequence.positions.len(),
                    sequence.positions.last().map(|w| w.time).unwrap_or(0),
                );
            }
            Program::Single(position) => {
                println!("{:>3}  position  {}", index, position.name);
            }
        }
    }
}

/// Apply one command to the engine. Returns `false` when the session should
/// end. Rejected actions (guard violations) are reported and otherwise
/// ignored, per the panel's degrade-and-continue error model.
pub fn apply_command(engine: &mut MotionEngine, command: Command) -> bool {
    match command {
        Command::Adjust(axis, direction) => engine.adjust(axis, direction),
        Command::Set(axis, value) => engine.set(axis, value),
        Command::Home => engine.reset(),
        Command::StartRecording => {
            if let Err(e) = engine.start_recording() {
                warn!("{}", e);
            }
        }
        Command::StopRecording(name) => {
            if let Err(e) = engine.stop_recording(&name) {
                error!("Could not save recording: {}", e);
            }
        }
        Command::ClearRecording => engine.clear_recording(),
        Command::Play(index) => {
            if let Err(e) = engine.play(index) {
                warn!("{}", e);
            }
        }
        Command::StopPlayback => engine.stop_playback(),
        Command::List => match engine.programs() {
            Ok(programs) => print_programs(&programs),
            Err(e) => error!("Could not list programs: {}", e),
        },
        Command::Delete(index) => {
            if let Err(e) = engine.delete_program(index) {
                error!("Could not delete program: {}", e);
            }
        }
        Command::SavePosition(name) => {
            if let Err(e) = engine.save_position(&name) {
                error!("Could not save position: {}", e);
            }
        }
        Command::Quit => return false,
    }
    true
}

/// Frame loop: drain pending commands, tick the engine, sleep one frame.
/// Runs until a quit command arrives or every sender is dropped.
pub fn run(mut engine: MotionEngine, commands: Receiver<Command>, frame_interval_ms: u64) {
    loop {
        loop {
            match commands.try_recv() {
                Ok(command) => {
                    if !apply_command(&mut engine, command) {
                        return;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return,
            }
        }
        engine.tick();
        thread::sleep(Duration::from_millis(frame_interval_ms));
    }
}
