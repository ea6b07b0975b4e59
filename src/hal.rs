//! Digital I/O capability used by the poller.
//!
//! The poller never touches hardware directly. Everything it needs from the
//! host platform is expressed through [`DigitalIo`]: two pin-mode calls, a
//! level write, a level read and a blocking microsecond delay. A board
//! support crate implements it over real GPIO; [`crate::sim`] implements it
//! over a software model of the controller.

/// Identifier of a digital I/O line in the host platform's numbering.
pub type Line = u8;

/// Logic level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn is_low(self) -> bool {
        self == Level::Low
    }

    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// The five primitives the poller consumes.
///
/// None of these can fail. A backend that can encounter errors (for example
/// a GPIO character device) has to deal with them itself; the controller
/// protocol has no way to report or recover from them mid-poll.
pub trait DigitalIo {
    /// Configure `line` as a push-pull output.
    fn configure_output(&mut self, line: Line);

    /// Configure `line` as an input with the pull-up enabled, so a released
    /// or disconnected line reads [`Level::High`].
    fn configure_input_pullup(&mut self, line: Line);

    /// Drive an output line.
    fn write(&mut self, line: Line, level: Level);

    /// Sample an input line.
    fn read(&mut self, line: Line) -> Level;

    /// Block for at least `us` microseconds.
    fn delay_us(&mut self, us: u32);
}

impl<T: DigitalIo + ?Sized> DigitalIo for &mut T {
    fn configure_output(&mut self, line: Line) {
        (**self).configure_output(line)
    }

    fn configure_input_pullup(&mut self, line: Line) {
        (**self).configure_input_pullup(line)
    }

    fn write(&mut self, line: Line, level: Level) {
        (**self).write(line, level)
    }

    fn read(&mut self, line: Line) -> Level {
        (**self).read(line)
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
