//! Simulated controller backends
//!
//! Two [`DigitalIo`] implementations for exercising the poller without
//! hardware:
//!
//! - [`ScriptedLines`]: input levels scripted per select level. Good for
//!   asserting exact bit decoding and the select sequence.
//! - [`SimulatedPad`]: an electrical model of a real pad behind the
//!   connector, including the 6-button pad's select-edge counter and its
//!   multiplexer timeout.
//!
//! ## Pad output per select phase (active low)
//!
//! | Edge count | Select high          | Select low            |
//! |:-----------|:---------------------|:----------------------|
//! | 0-2        | U D L R B C          | U D 0 0 A Start       |
//! | 3          | Z Y X Mode B C       | 0 0 0 0 A Start       |
//! | 4          | U D L R B C          | 1 1 1 1 A Start       |
//!
//! Only 6-button pads count edges; 3-button pads always answer as in
//! row 0-2. The count is the number of select falling edges seen, wrapping
//! after four, and drops back to zero after [`SIX_BUTTON_TIMEOUT_US`]
//! without a falling edge.

mod scripted_lines;

pub use scripted_lines::ScriptedLines;

use crate::buttons::{Buttons3, Buttons6};
use crate::hal::{DigitalIo, Level, Line};
use crate::pad::LineBinding;
use std::collections::HashMap;
use std::fmt;

/// Time without a select falling edge after which a 6-button pad restarts
/// its cycle.
pub const SIX_BUTTON_TIMEOUT_US: u32 = 1500;

/// How a line has been configured by the code under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Output,
    InputPullup,
}

/// Button state for a Genesis controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// D-pad Up
    pub up: bool,
    /// D-pad Down
    pub down: bool,
    /// D-pad Left
    pub left: bool,
    /// D-pad Right
    pub right: bool,
    /// A button
    pub a: bool,
    /// B button
    pub b: bool,
    /// C button
    pub c: bool,
    /// Start button
    pub start: bool,

    // 6-button extension
    /// X button (6-button only)
    pub x: bool,
    /// Y button (6-button only)
    pub y: bool,
    /// Z button (6-button only)
    pub z: bool,
    /// Mode button (6-button only)
    pub mode: bool,
}

impl ControllerState {
    /// Create a new controller state with no buttons pressed
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from decoded registers.
    pub fn from_buttons(three: Buttons3, six: Buttons6) -> Self {
        Self {
            up: three.up(),
            down: three.down(),
            left: three.left(),
            right: three.right(),
            a: three.a(),
            b: three.b(),
            c: three.c(),
            start: three.start(),
            x: six.x(),
            y: six.y(),
            z: six.z(),
            mode: six.mode(),
        }
    }

    /// Parse `UDLRABCSXYZM` notation, `.` (or anything else) for released.
    pub fn parse(s: &str) -> Self {
        let three = Buttons3::from_chars(s.chars().take(8));
        let six = Buttons6::from_chars(s.chars().skip(8));
        Self::from_buttons(three, six)
    }

    /// The buttons a 3-button read reports for this state.
    pub fn buttons3(&self) -> Buttons3 {
        let mut b = Buttons3::default();
        b.set(Buttons3::UP, self.up);
        b.set(Buttons3::DOWN, self.down);
        b.set(Buttons3::LEFT, self.left);
        b.set(Buttons3::RIGHT, self.right);
        b.set(Buttons3::A, self.a);
        b.set(Buttons3::B, self.b);
        b.set(Buttons3::C, self.c);
        b.set(Buttons3::START, self.start);
        b
    }

    /// The buttons a 6-button read reports for this state.
    pub fn buttons6(&self) -> Buttons6 {
        let mut b = Buttons6::default();
        b.set(Buttons6::Z, self.z);
        b.set(Buttons6::Y, self.y);
        b.set(Buttons6::X, self.x);
        b.set(Buttons6::MODE, self.mode);
        b
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.buttons3(), self.buttons6())
    }
}

/// Controller type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControllerType {
    /// No controller connected
    None,
    /// 3-button controller (original)
    #[default]
    ThreeButton,
    /// 6-button controller (Fighting Pad)
    SixButton,
}

/// A controller plugged into a set of simulated lines.
///
/// Lines are identified through the same [`LineBinding`] the poller uses.
/// Time only passes through [`DigitalIo::delay_us`] and [`SimulatedPad::advance`].
#[derive(Debug)]
pub struct SimulatedPad {
    /// Type of controller connected
    pub controller_type: ControllerType,
    /// Current button state
    pub state: ControllerState,
    binding: LineBinding,
    modes: HashMap<Line, PinMode>,
    /// Select (TH) level last driven
    th_state: bool,
    /// Select falling edges seen in the current 6-button cycle
    th_counter: u8,
    /// Microseconds since the last falling edge
    th_timer: u32,
    elapsed_us: u64,
    falling_edges: u64,
}

impl SimulatedPad {
    /// Create a pad wired to `binding`
    pub fn new(controller_type: ControllerType, binding: LineBinding) -> Self {
        Self {
            controller_type,
            state: ControllerState::new(),
            binding,
            modes: HashMap::new(),
            th_state: true,
            th_counter: 0,
            th_timer: 0,
            elapsed_us: 0,
            falling_edges: 0,
        }
    }

    /// Let time pass without touching the lines (e.g. between frames).
    pub fn advance(&mut self, us: u32) {
        self.elapsed_us += u64::from(us);
        if self.controller_type == ControllerType::SixButton {
            self.th_timer = self.th_timer.saturating_add(us);
            // Reset counter if TH hasn't been toggled recently
            if self.th_timer > SIX_BUTTON_TIMEOUT_US {
                self.th_counter = 0;
            }
        }
    }

    /// Total simulated time.
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    /// Select falling edges seen since creation.
    pub fn falling_edges(&self) -> u64 {
        self.falling_edges
    }

    /// Position in the 6-button cycle (0 after a timeout, then 1..=4).
    pub fn cycle_position(&self) -> u8 {
        self.th_counter
    }

    pub fn pin_mode(&self, line: Line) -> Option<PinMode> {
        self.modes.get(&line).copied()
    }

    /// Connector data in the emulator's port layout:
    /// bit 0-3 = up/down/left/right lines, bit 4 = B line (TL), bit 5 = C line (TR).
    /// A zero bit is a line pulled low.
    pub fn read_data(&self) -> u8 {
        match self.controller_type {
            ControllerType::None => 0x3F, // No controller = all inputs high

            ControllerType::ThreeButton => self.read_3button(),

            ControllerType::SixButton => self.read_6button(),
        }
    }

    /// Read 3-button controller data
    fn read_3button(&self) -> u8 {
        // Genesis controllers are active-low: pressed = 0, released = 1
        if self.th_state {
            // TH=1: Up, Down, Left, Right, B, C
            let mut data = 0x3F;

            if self.state.up {
                data &= !0x01;
            }
            if self.state.down {
                data &= !0x02;
            }
            if self.state.left {
                data &= !0x04;
            }
            if self.state.right {
                data &= !0x08;
            }
            if self.state.b {
                data &= !0x10;
            }
            if self.state.c {
                data &= !0x20;
            }

            data
        } else {
            // TH=0: Up, Down, 0, 0, A, Start
            let mut data = 0x33;

            if self.state.up {
                data &= !0x01;
            }
            if self.state.down {
                data &= !0x02;
            }
            data & self.low_phase_buttons()
        }
    }

    /// A and Start on the TL/TR bits, everything else left set.
    fn low_phase_buttons(&self) -> u8 {
        let mut mask = 0xFF;
        if self.state.a {
            mask &= !0x10;
        }
        if self.state.start {
            mask &= !0x20;
        }
        mask
    }

    /// Read 6-button controller data
    fn read_6button(&self) -> u8 {
        match (self.th_counter, self.th_state) {
            // Identification: all four direction lines low at once
            (3, false) => 0x30 & self.low_phase_buttons(),
            (3, true) => self.read_extra_buttons(),
            (4, false) => 0x3F & self.low_phase_buttons(),
            _ => self.read_3button(),
        }
    }

    /// Z, Y, X, Mode on the direction lines; B and C as usual
    fn read_extra_buttons(&self) -> u8 {
        let mut data = 0x3F;
        if self.state.z {
            data &= !0x01;
        }
        if self.state.y {
            data &= !0x02;
        }
        if self.state.x {
            data &= !0x04;
        }
        if self.state.mode {
            data &= !0x08;
        }
        if self.state.b {
            data &= !0x10;
        }
        if self.state.c {
            data &= !0x20;
        }
        data
    }

    /// Drive the select line
    fn write_select(&mut self, high: bool) {
        // Detect TH 1->0 transition (falling edge)
        if self.th_state && !high {
            self.falling_edges += 1;
            if self.controller_type == ControllerType::SixButton {
                self.th_counter = self.th_counter % 4 + 1;
                self.th_timer = 0;
            }
        }

        self.th_state = high;
    }

    fn data_bit(&self, line: Line) -> Option<u8> {
        let b = &self.binding;
        let bit = if line == b.up {
            0
        } else if line == b.down {
            1
        } else if line == b.left {
            2
        } else if line == b.right {
            3
        } else if line == b.b {
            4
        } else if line == b.c {
            5
        } else {
            return None;
        };
        Some(bit)
    }
}

impl DigitalIo for SimulatedPad {
    fn configure_output(&mut self, line: Line) {
        self.modes.insert(line, PinMode::Output);
    }

    fn configure_input_pullup(&mut self, line: Line) {
        self.modes.insert(line, PinMode::InputPullup);
    }

    fn write(&mut self, line: Line, level: Level) {
        if line != self.binding.select {
            log::warn!("write to line {} which is not wired to select", line);
            return;
        }
        if self.pin_mode(line) != Some(PinMode::Output) {
            log::warn!("select line {} driven before being configured as output", line);
        }
        self.write_select(level.is_high());
    }

    fn read(&mut self, line: Line) -> Level {
        if self.pin_mode(line) != Some(PinMode::InputPullup) {
            log::warn!("line {} read without pull-up configured", line);
        }
        match self.data_bit(line) {
            Some(bit) => Level::from(self.read_data() & (1 << bit) != 0),
            // Unwired lines float high through the pull-up
            None => Level::High,
        }
    }

    fn delay_us(&mut self, us: u32) {
        self.advance(us);
    }
}
