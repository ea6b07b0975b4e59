#![no_main]
use genesispad::sim::{ControllerState, ControllerType, SimulatedPad};
use genesispad::{Buttons3, Buttons6, GenesisPad, LineBinding};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|ops: Vec<(u8, u16, u16)>| {
    let binding = LineBinding::new(0, 1, 2, 3, 4, 5, 6);
    let mut pad = GenesisPad::new(SimulatedPad::new(ControllerType::SixButton, binding), binding);

    for (op, buttons, gap) in ops {
        match op % 3 {
            0 => {
                let three = Buttons3::from_bits(buttons as u8);
                let six = Buttons6::from_bits((buttons >> 8) as u8 & 0x0F);
                pad.io_mut().state = ControllerState::from_buttons(three, six);
            }
            1 => pad.poll(),
            2 => pad.io_mut().advance(u32::from(gap)),
            _ => unreachable!(),
        }
        assert!(pad.io().cycle_position() <= 4);
    }
});
