use std::{
    io::{self, BufRead},
    sync::{Arc, mpsc},
    thread,
    time::Duration,
};

use clap::{Parser, Subcommand};
use log::warn;

use armdeck::clock::SystemClock;
use armdeck::config::AppConfig;
use armdeck::console::{self, Command};
use armdeck::errors::ArmdeckError;
use armdeck::motion::MotionEngine;
use armdeck::program::{FileBlobStore, ProgramStore};
use armdeck::sync::{HttpStateSync, NullSync, StateSync};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive console control of the arm
    Run {
        #[arg(short, long)]
        sync_url: Option<String>,
    },
    /// List stored programs
    List,
    /// Play the stored program at the given index and wait for it to finish
    Play {
        #[arg(short, long)]
        index: usize,

        #[arg(short, long)]
        sync_url: Option<String>,
    },
    /// Delete the stored program at the given index
    Delete {
        #[arg(short, long)]
        index: usize,
    },
    /// Save the home pose as a named single-position program
    Save {
        #[arg(short, long)]
        name: String,
    },
}

fn build_engine(
    sync_url: Option<String>,
    config: &AppConfig,
) -> Result<MotionEngine, ArmdeckError> {
    let blob_store = match &config.programs_path {
        Some(path) => FileBlobStore::new(path.clone())?,
        None => FileBlobStore::new_default()?,
    };
    let sync: Box<dyn StateSync> = match sync_url.or_else(|| config.sync_url.clone()) {
        Some(url) => Box::new(HttpStateSync::new(url)?),
        None => Box::new(NullSync),
    };
    Ok(MotionEngine::new(
        ProgramStore::new(Box::new(blob_store)),
        sync,
        Arc::new(SystemClock::new()),
    ))
}

fn run(sync_url: Option<String>, config: AppConfig) -> Result<(), ArmdeckError> {
    let engine = build_engine(sync_url, &config)?;
    let (command_tx, command_rx) = mpsc::channel::<Command>();

    println!("armdeck console: q/e rotate, w/s elevate, a/d pinch, z/c extend");
    println!("  home | rec | stop <name> | clear | play <i> | halt | ls | rm <i> | save <name> | quit");

    // Console reader: one command per line, dropped sender ends the frame loop.
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match console::parse_command(&line) {
                Some(command) => {
                    let quit = command == Command::Quit;
                    if command_tx.send(command).is_err() || quit {
                        break;
                    }
                }
                None => {
                    if !line.trim().is_empty() {
                        warn!("Unrecognized command: {}", line.trim());
                    }
                }
            }
        }
    });

    console::run(engine, command_rx, config.frame_interval_ms);
    Ok(())
}

fn play(index: usize, sync_url: Option<String>, config: AppConfig) -> Result<(), ArmdeckError> {
    let mut engine = build_engine(sync_url, &config)?;
    engine.play(index)?;
    while engine.is_playing() {
        engine.tick();
        thread::sleep(Duration::from_millis(config.frame_interval_ms));
    }
    Ok(())
}

fn list(config: AppConfig) -> Result<(), ArmdeckError> {
    let engine = build_engine(None, &config)?;
    console::print_programs(&engine.programs()?);
    Ok(())
}

fn delete(index: usize, config: AppConfig) -> Result<(), ArmdeckError> {
    let engine = build_engine(None, &config)?;
    engine.delete_program(index)
}

fn save(name: &str, config: AppConfig) -> Result<(), ArmdeckError> {
    let mut engine = build_engine(None, &config)?;
    engine.save_position(name)
}

fn main() {
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    let config = match AppConfig::from_local_file() {
        Some(config) => config,
        None => {
            // First run: seed the config file so users have something to edit.
            let config = AppConfig::default();
            if let Err(e) = config.save() {
                warn!("Could not write default config: {}", e);
            }
            config
        }
    };
    match cli.command {
        Commands::Run { sync_url } => {
            run(sync_url, config).expect("Error while running the arm console")
        }
        Commands::List => list(config).expect("Error while listing programs"),
        Commands::Play { index, sync_url } => {
            play(index, sync_url, config).expect("Error while playing program")
        }
        Commands::Delete { index } => delete(index, config).expect("Error while deleting program"),
        Commands::Save { name } => save(&name, config).expect("Error while saving position"),
    };
}
