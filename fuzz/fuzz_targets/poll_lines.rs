#![no_main]
use genesispad::sim::ScriptedLines;
use genesispad::{GenesisPad, Level, LineBinding};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|phases: Vec<u8>| {
    let binding = LineBinding::new(0, 1, 2, 3, 4, 5, 6);
    let mut io = ScriptedLines::new();

    // One byte per phase: bit n is input line n, set = pulled low.
    for (i, bits) in phases.iter().enumerate() {
        for (n, line) in binding.inputs().into_iter().enumerate() {
            let level = if bits & (1 << n) != 0 { Level::Low } else { Level::High };
            io.set_phase(i + 1, line, level);
        }
    }

    let mut pad = GenesisPad::new(io, binding);
    let mut last6 = pad.status6button();
    while pad.io().phase() < phases.len() {
        pad.poll();
        if !pad.extended_detected() {
            assert_eq!(pad.status6button(), last6);
        }
        assert_eq!(pad.status6button() & 0xF0, 0);
        last6 = pad.status6button();
    }
});
