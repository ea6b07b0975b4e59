//! Genesis / Mega Drive Controller Poller
//!
//! Reads a controller wired to seven digital lines: one output driving the
//! connector's select pin (TH) and six pulled-up inputs.
//!
//! ## Connector pins per select phase
//!
//! | Pin | Line  | Select high  | Select low   | High after signature |
//! |:----|:------|:-------------|:-------------|:---------------------|
//! | 1   | up    | Up           | Up           | Z                    |
//! | 2   | down  | Down         | Down         | Y                    |
//! | 3   | left  | Left         | logic low    | X                    |
//! | 4   | right | Right        | logic low    | Mode                 |
//! | 6   | b     | B            | A            | -                    |
//! | 9   | c     | C            | Start        | -                    |
//!
//! All inputs are active-low. A 6-button pad announces its extra buttons by
//! pulling up and down low together during one select-low phase, something a
//! d-pad cannot do mechanically. The next select-high phase then carries
//! Z, Y, X and Mode on the direction lines.

use crate::buttons::{Buttons3, Buttons6};
use crate::hal::{DigitalIo, Level, Line};
use serde::{Deserialize, Serialize};

/// Settle delay used unless the caller supplies one.
///
/// Large enough for the lines to settle after a select transition, and
/// small enough that consecutive polls land inside the 6-button pad's
/// multiplexer window. Values in the hundreds of microseconds already lose
/// 6-button detection on real pads.
pub const DEFAULT_SETTLE_DELAY_US: u32 = 20;

/// Physical lines the controller connector is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBinding {
    /// Output driving the connector's select pin.
    pub select: Line,
    pub up: Line,
    pub down: Line,
    pub left: Line,
    pub right: Line,
    /// Carries B with select high, A with select low.
    pub b: Line,
    /// Carries C with select high, Start with select low.
    pub c: Line,
}

impl LineBinding {
    pub fn new(select: Line, up: Line, down: Line, left: Line, right: Line, b: Line, c: Line) -> Self {
        Self {
            select,
            up,
            down,
            left,
            right,
            b,
            c,
        }
    }

    /// The six input lines, in sampling order.
    pub fn inputs(&self) -> [Line; 6] {
        [self.up, self.down, self.left, self.right, self.b, self.c]
    }
}

/// Polls one controller through a [`DigitalIo`] backend.
///
/// Owns its lines exclusively. Polls must not overlap: each one drives the
/// select line through a fixed sequence and the pad tracks those edges.
#[derive(Debug)]
pub struct GenesisPad<IO> {
    io: IO,
    binding: LineBinding,
    settle_delay_us: u32,
    status3: Buttons3,
    status6: Buttons6,
    extended: bool,
}

impl<IO: DigitalIo> GenesisPad<IO> {
    /// Configure the lines and create a poller with the default settle delay.
    pub fn new(io: IO, binding: LineBinding) -> Self {
        Self::with_settle_delay(io, binding, DEFAULT_SETTLE_DELAY_US)
    }

    /// Configure the lines and create a poller.
    ///
    /// A zero delay is accepted but unsupported: samples may be taken
    /// before the lines have settled.
    pub fn with_settle_delay(mut io: IO, binding: LineBinding, settle_delay_us: u32) -> Self {
        io.configure_output(binding.select);
        for line in binding.inputs() {
            io.configure_input_pullup(line);
        }

        log::debug!(
            "Genesis pad on {:?}, settle delay {}us",
            binding,
            settle_delay_us
        );

        Self {
            io,
            binding,
            settle_delay_us,
            status3: Buttons3::default(),
            status6: Buttons6::default(),
            extended: false,
        }
    }

    /// Sample the controller and update the status registers.
    ///
    /// The 3-button register is overwritten every time. The 6-button
    /// register is only written when the pad shows its signature during this
    /// poll; otherwise it keeps the last value read, so it is "last known"
    /// for 6-button pads and meaningless for 3-button ones.
    ///
    /// Blocks for two settle delays, or four when the 6-button phase runs.
    pub fn poll(&mut self) {
        let lines = self.binding;
        let mut buttons = Buttons3::default();

        // Select high: d-pad, B, C.
        self.select(Level::High);
        buttons.set(Buttons3::UP, self.pressed(lines.up));
        buttons.set(Buttons3::DOWN, self.pressed(lines.down));
        buttons.set(Buttons3::LEFT, self.pressed(lines.left));
        buttons.set(Buttons3::RIGHT, self.pressed(lines.right));
        buttons.set(Buttons3::B, self.pressed(lines.b));
        buttons.set(Buttons3::C, self.pressed(lines.c));

        // Select low: A and Start share the B and C lines.
        self.select(Level::Low);
        buttons.set(Buttons3::A, self.pressed(lines.b));
        buttons.set(Buttons3::START, self.pressed(lines.c));

        self.status3 = buttons;

        // Up and down low together only happens during a 6-button pad's
        // identification phase.
        self.extended = self.pressed(lines.up) && self.pressed(lines.down);
        if self.extended {
            let mut extra = Buttons6::default();

            self.select(Level::High);
            extra.set(Buttons6::Z, self.pressed(lines.up));
            extra.set(Buttons6::Y, self.pressed(lines.down));
            extra.set(Buttons6::X, self.pressed(lines.left));
            extra.set(Buttons6::MODE, self.pressed(lines.right));
            self.status6 = extra;

            // Finish the pad's cycle; nothing useful is on the lines here.
            self.select(Level::Low);

            log::debug!("6-button signature seen, extra buttons {}", extra);
        }

        log::trace!(
            "poll: {} {} (6-button phase: {})",
            self.status3,
            self.status6,
            self.extended
        );
    }

    fn select(&mut self, level: Level) {
        self.io.write(self.binding.select, level);
        self.io.delay_us(self.settle_delay_us);
    }

    fn pressed(&mut self, line: Line) -> bool {
        self.io.read(line).is_low()
    }

    /// Raw 3-button register from the most recent poll.
    pub fn status3button(&self) -> u8 {
        self.status3.bits()
    }

    /// Raw 6-button register; only bits 0-3 are meaningful.
    pub fn status6button(&self) -> u8 {
        self.status6.bits()
    }

    pub fn buttons3(&self) -> Buttons3 {
        self.status3
    }

    pub fn buttons6(&self) -> Buttons6 {
        self.status6
    }

    /// Whether the most recent poll saw the 6-button signature and
    /// refreshed the 6-button register.
    pub fn extended_detected(&self) -> bool {
        self.extended
    }

    pub fn settle_delay_us(&self) -> u32 {
        self.settle_delay_us
    }

    pub fn binding(&self) -> &LineBinding {
        &self.binding
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Release the backend.
    pub fn into_inner(self) -> IO {
        self.io
    }
}

#[cfg(test)]
mod tests_protocol;
