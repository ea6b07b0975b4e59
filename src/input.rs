//! Frame-indexed input scripts
//!
//! Scripts drive a [`SimulatedPad`](crate::sim::SimulatedPad) frame by frame,
//! and the same format records what the poller decoded.
//!
//! ## Script Format
//!
//! Simple CSV format:
//! ```text
//! # frame,buttons
//! # buttons: UDLRABCS (Up,Down,Left,Right,A,B,C,Start), . = released
//! # For 6-button: UDLRABCSXYZM
//! 0,........
//! 60,....A...
//! 120,.....B....Z.
//! ```
//!
//! Frames without an entry hold the previous frame's buttons.

use crate::sim::ControllerState;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Maximum script size in bytes (8MB) to prevent OOM
const MAX_SCRIPT_SIZE: u64 = 8 * 1024 * 1024;

/// An input script containing frame-indexed inputs
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InputScript {
    /// Map from frame number to pad state
    frames: BTreeMap<u64, ControllerState>,
    /// Highest frame number in the script
    pub max_frame: u64,
}

impl InputScript {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a script from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let file = File::open(path).map_err(|e| format!("Failed to open input script: {}", e))?;

        // Check metadata size first for quick fail
        if let Ok(metadata) = file.metadata() {
            if metadata.len() > MAX_SCRIPT_SIZE {
                return Err(format!(
                    "Input script too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_SCRIPT_SIZE
                ));
            }
        }

        // Read with limit in case metadata lies (pipes, procfs)
        let mut buffer = Vec::new();
        file.take(MAX_SCRIPT_SIZE + 1)
            .read_to_end(&mut buffer)
            .map_err(|e| format!("Failed to read input script: {}", e))?;

        if buffer.len() as u64 > MAX_SCRIPT_SIZE {
            return Err(format!(
                "Input script too large: exceeds {} bytes",
                MAX_SCRIPT_SIZE
            ));
        }

        let content = String::from_utf8(buffer)
            .map_err(|e| format!("Input script is not valid UTF-8: {}", e))?;

        Self::parse(&content)
    }

    /// Parse a script from a string
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut script = Self::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split(',');
            let frame = parts.next().unwrap_or("").trim();
            let buttons = parts
                .next()
                .ok_or_else(|| format!("Line {}: expected 2 fields", line_num + 1))?;

            let frame: u64 = frame
                .parse()
                .map_err(|_| format!("Line {}: invalid frame number", line_num + 1))?;

            script.insert(frame, ControllerState::parse(buttons.trim()));
        }

        Ok(script)
    }

    /// Set the pad state for a frame
    pub fn insert(&mut self, frame: u64, state: ControllerState) {
        self.frames.insert(frame, state);
        self.max_frame = self.max_frame.max(frame);
    }

    /// Get input for a specific frame
    pub fn get(&self, frame: u64) -> Option<&ControllerState> {
        self.frames.get(&frame)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Render the script text
    pub fn to_text(&self) -> String {
        let mut out = String::from("# frame,buttons\n");
        for (frame, state) in &self.frames {
            out.push_str(&format!("{},{}\n", frame, state));
        }
        out
    }

    /// Save script to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let mut file =
            File::create(path).map_err(|e| format!("Failed to create input script: {}", e))?;
        file.write_all(self.to_text().as_bytes())
            .map_err(|e| format!("Failed to write input script: {}", e))
    }
}

/// Input manager handling script playback and recording
#[derive(Debug, Default)]
pub struct InputManager {
    /// Currently loaded script
    script: Option<InputScript>,
    /// Current frame number
    current_frame: u64,
    /// Last applied input (for hold behavior)
    last_input: ControllerState,
    /// Recording mode
    recording: bool,
    /// Recorded inputs
    recorded: InputScript,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an input script
    pub fn load_script<P: AsRef<Path>>(&mut self, path: P) -> Result<(), String> {
        self.set_script(InputScript::load(path)?);
        Ok(())
    }

    /// Set script directly
    pub fn set_script(&mut self, script: InputScript) {
        self.script = Some(script);
        self.current_frame = 0;
        self.last_input = ControllerState::default();
    }

    /// Advance to the next frame and return the input
    pub fn advance_frame(&mut self) -> ControllerState {
        if let Some(state) = self
            .script
            .as_ref()
            .and_then(|script| script.get(self.current_frame))
        {
            self.last_input = *state;
        }

        self.current_frame += 1;
        self.last_input
    }

    /// Get current frame number
    pub fn frame(&self) -> u64 {
        self.current_frame
    }

    /// Reset to frame 0
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.last_input = ControllerState::default();
        self.script = None;
    }

    /// Check if script playback is complete
    pub fn is_complete(&self) -> bool {
        match &self.script {
            Some(script) => self.current_frame > script.max_frame,
            None => false,
        }
    }

    /// Start recording
    pub fn start_recording(&mut self) {
        self.recording = true;
        self.recorded = InputScript::new();
    }

    /// Record input for current frame
    pub fn record(&mut self, state: ControllerState) {
        if self.recording {
            self.recorded.insert(self.current_frame, state);
        }
    }

    /// Stop recording and return the recorded script
    pub fn stop_recording(&mut self) -> InputScript {
        self.recording = false;
        std::mem::take(&mut self.recorded)
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }
}
