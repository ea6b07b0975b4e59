use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use genesispad::input::{InputManager, InputScript};
use genesispad::sim::{ControllerState, ControllerType, SimulatedPad};
use genesispad::{Buttons3, Buttons6, GenesisPad, LineBinding, PadConfig};
use serde::Serialize;
use std::path::PathBuf;

/// Wiring used when no config file is given. Any distinct lines will do
/// for a simulated pad.
const DEMO_BINDING: LineBinding = LineBinding {
    select: 2,
    up: 3,
    down: 4,
    left: 5,
    right: 6,
    b: 7,
    c: 8,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Controller {
    None,
    Three,
    Six,
}

impl From<Controller> for ControllerType {
    fn from(c: Controller) -> Self {
        match c {
            Controller::None => ControllerType::None,
            Controller::Three => ControllerType::ThreeButton,
            Controller::Six => ControllerType::SixButton,
        }
    }
}

/// Poll a simulated Genesis pad frame by frame and print what was decoded.
#[derive(Parser, Debug)]
#[command(name = "genesispad", version)]
struct Opts {
    /// Pad config (JSON line binding and settle delay)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input script pressing buttons on the simulated pad
    #[arg(long)]
    script: Option<PathBuf>,

    /// Frames to run (defaults to the length of the script)
    #[arg(long)]
    frames: Option<u64>,

    /// Kind of pad plugged into the simulated port
    #[arg(long, value_enum, default_value_t = Controller::Six)]
    controller: Controller,

    /// Back-to-back polls per frame
    #[arg(long, default_value_t = 3)]
    polls_per_frame: u32,

    /// Idle time between frames, in microseconds
    #[arg(long, default_value_t = 16_667)]
    frame_gap_us: u32,

    /// Print one JSON object per frame
    #[arg(long)]
    json: bool,

    /// Write the decoded buttons out as an input script
    #[arg(long)]
    record: Option<PathBuf>,
}

#[derive(Serialize)]
struct FrameReport {
    frame: u64,
    status3: Buttons3,
    status6: Buttons6,
    extended: bool,
    buttons: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let config = match &opts.config {
        Some(path) => PadConfig::load(path).map_err(|e| anyhow!(e))?,
        None => {
            log::info!("No pad config given, using demo wiring");
            PadConfig::new(DEMO_BINDING)
        }
    };

    let mut playback = InputManager::new();
    let mut frames = opts.frames.unwrap_or(1);
    if let Some(path) = &opts.script {
        let script = InputScript::load(path)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("loading {}", path.display()))?;
        frames = opts.frames.unwrap_or(script.max_frame + 1);
        playback.set_script(script);
    }

    let sim = SimulatedPad::new(opts.controller.into(), config.binding);
    let mut pad = config.build(sim);

    let mut recorder = InputManager::new();
    if opts.record.is_some() {
        recorder.start_recording();
    }

    for frame in 0..frames {
        pad.io_mut().state = playback.advance_frame();
        let extended = run_frame(&mut pad, opts.polls_per_frame);
        pad.io_mut().advance(opts.frame_gap_us);

        let decoded = ControllerState::from_buttons(pad.buttons3(), pad.buttons6());
        recorder.record(decoded);
        recorder.advance_frame();

        if opts.json {
            let report = FrameReport {
                frame,
                status3: pad.buttons3(),
                status6: pad.buttons6(),
                extended,
                buttons: decoded.to_string(),
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            let marker = if extended { " *" } else { "" };
            println!("{:>6} {} {}{}", frame, pad.buttons3(), pad.buttons6(), marker);
        }
    }

    if let Some(path) = &opts.record {
        recorder
            .stop_recording()
            .save(path)
            .map_err(|e| anyhow!(e))?;
        log::info!("Recorded {} frames to {}", frames, path.display());
    }

    Ok(())
}

/// Poll `polls` times back to back; true if any poll read extra buttons.
fn run_frame(pad: &mut GenesisPad<SimulatedPad>, polls: u32) -> bool {
    let mut extended = false;
    for _ in 0..polls {
        pad.poll();
        extended |= pad.extended_detected();
    }
    extended
}
