//! Genesispad - Sega Genesis / Mega Drive controller reader
//!
//! Polls 3-button and 6-button pads wired to seven digital I/O lines. The
//! host platform supplies the lines through [`hal::DigitalIo`]; [`sim`]
//! provides software backends for running the poller without hardware.
//!
//! ```
//! use genesispad::sim::{ControllerType, SimulatedPad};
//! use genesispad::{GenesisPad, LineBinding};
//!
//! let binding = LineBinding::new(2, 3, 4, 5, 6, 7, 8);
//! let mut pad = GenesisPad::new(SimulatedPad::new(ControllerType::ThreeButton, binding), binding);
//! pad.io_mut().state.start = true;
//! pad.poll();
//! assert!(pad.buttons3().start());
//! ```

pub mod buttons;
pub mod config;
pub mod hal;
pub mod input;
pub mod pad;
pub mod sim;

pub use buttons::{Buttons3, Buttons6};
pub use config::PadConfig;
pub use hal::{DigitalIo, Level, Line};
pub use pad::{GenesisPad, LineBinding, DEFAULT_SETTLE_DELAY_US};
