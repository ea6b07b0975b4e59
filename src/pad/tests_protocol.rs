//! Decoding tests against scripted lines and the simulated pad.

use super::tests::binding;
use super::*;
use crate::sim::{ControllerType, SimulatedPad, ScriptedLines, SIX_BUTTON_TIMEOUT_US};

fn scripted_pad(setup: impl FnOnce(&mut ScriptedLines, &LineBinding)) -> GenesisPad<ScriptedLines> {
    let b = binding();
    let mut io = ScriptedLines::new();
    setup(&mut io, &b);
    GenesisPad::new(io, b)
}

fn sim_pad(controller_type: ControllerType) -> GenesisPad<SimulatedPad> {
    let b = binding();
    GenesisPad::new(SimulatedPad::new(controller_type, b), b)
}

#[test]
fn test_up_and_b_held() {
    let mut pad = scripted_pad(|io, b| {
        io.hold(b.up, Level::Low);
        io.hold(b.b, Level::Low);
    });
    pad.poll();

    // B line low with select low also reads as A.
    assert_eq!(pad.status3button() & 0b0010_0001, 0b0010_0001);
    assert_eq!(pad.status6button(), 0);
}

#[test]
fn test_up_and_b_in_select_high_phase_only() {
    let mut pad = scripted_pad(|io, b| {
        io.set(Level::High, b.up, Level::Low);
        io.set(Level::High, b.b, Level::Low);
    });
    pad.poll();

    assert_eq!(pad.status3button(), 0b0010_0001);
    assert_eq!(pad.status6button(), 0);
    assert!(!pad.extended_detected());
}

#[test]
fn test_single_buttons() {
    // (select phase, line selector, expected register)
    let cases: [(Level, fn(&LineBinding) -> Line, u8); 8] = [
        (Level::High, |b| b.up, 0b0000_0001),
        (Level::High, |b| b.down, 0b0000_0010),
        (Level::High, |b| b.left, 0b0000_0100),
        (Level::High, |b| b.right, 0b0000_1000),
        (Level::Low, |b| b.b, 0b0001_0000),
        (Level::High, |b| b.b, 0b0010_0000),
        (Level::High, |b| b.c, 0b0100_0000),
        (Level::Low, |b| b.c, 0b1000_0000),
    ];

    for (phase, line, expected) in cases {
        let mut pad = scripted_pad(|io, b| io.set(phase, line(b), Level::Low));
        pad.poll();
        assert_eq!(pad.status3button(), expected, "expected {:08b}", expected);
        assert_eq!(pad.status6button(), 0);
    }
}

#[test]
fn test_six_button_signature_reads_extra_buttons() {
    let mut pad = scripted_pad(|io, b| {
        io.hold(b.up, Level::Low);
        io.hold(b.down, Level::Low);
        io.hold(b.left, Level::Low);
    });
    pad.poll();

    assert!(pad.extended_detected());
    assert_eq!(pad.status6button(), Buttons6::Z | Buttons6::Y | Buttons6::X);
    assert_eq!(pad.status3button(), Buttons3::UP | Buttons3::DOWN | Buttons3::LEFT);
}

#[test]
fn test_six_button_phase_uses_its_own_samples() {
    // Up and down low through select high and select low, left low
    // throughout, right high: only X comes out of the extra phase.
    let mut pad = scripted_pad(|io, b| {
        for phase in 1..=2 {
            io.set_phase(phase, b.up, Level::Low);
            io.set_phase(phase, b.down, Level::Low);
        }
        io.hold(b.left, Level::Low);
    });
    pad.poll();

    assert!(pad.extended_detected());
    assert_eq!(pad.status6button(), 0b0000_0100);
    assert_eq!(pad.status3button() & 0b11, 0b11);
    assert!(!pad.buttons3().right());
}

#[test]
fn test_signature_needs_both_up_and_down() {
    let mut pad = scripted_pad(|io, b| {
        io.set(Level::Low, b.up, Level::Low);
        io.hold(b.left, Level::Low);
    });
    pad.poll();

    assert!(!pad.extended_detected());
    assert_eq!(pad.status6button(), 0);
    assert_eq!(pad.io().select_writes().len(), 2);
}

#[test]
fn test_six_button_register_is_stale_between_signatures() {
    let mut pad = scripted_pad(|io, b| {
        io.set(Level::Low, b.up, Level::Low);
        io.set(Level::Low, b.down, Level::Low);
        io.set(Level::High, b.right, Level::Low);
    });
    pad.poll();
    assert_eq!(pad.status3button(), Buttons3::RIGHT);
    assert_eq!(pad.status6button(), Buttons6::MODE);

    // Pad released: no signature, register keeps its last value.
    let b = *pad.binding();
    pad.io_mut().hold(b.up, Level::High);
    pad.io_mut().hold(b.down, Level::High);
    pad.io_mut().hold(b.right, Level::High);
    pad.poll();
    assert_eq!(pad.status6button(), Buttons6::MODE);
    pad.poll();

    assert!(!pad.extended_detected());
    assert_eq!(pad.status3button(), 0);
    assert_eq!(pad.status6button(), Buttons6::MODE);
}

#[test]
fn test_repeated_polls_are_stable() {
    let mut pad = scripted_pad(|io, b| {
        io.hold(b.up, Level::Low);
        io.hold(b.down, Level::Low);
        io.set(Level::High, b.c, Level::Low);
        io.set(Level::High, b.left, Level::Low);
    });

    pad.poll();
    let first = (pad.status3button(), pad.status6button());
    for _ in 0..10 {
        pad.poll();
        assert_eq!((pad.status3button(), pad.status6button()), first);
    }
}

#[test]
fn test_three_button_pad() {
    let mut pad = sim_pad(ControllerType::ThreeButton);
    pad.io_mut().state.right = true;
    pad.io_mut().state.a = true;
    pad.io_mut().state.start = true;

    for _ in 0..5 {
        pad.poll();
        assert_eq!(
            pad.buttons3().bits(),
            Buttons3::RIGHT | Buttons3::A | Buttons3::START
        );
        assert!(!pad.extended_detected());
        assert_eq!(pad.status6button(), 0);
    }
}

#[test]
fn test_disconnected_pad_reads_released() {
    let mut pad = sim_pad(ControllerType::None);
    pad.io_mut().state.b = true;
    pad.poll();

    assert_eq!(pad.status3button(), 0);
    assert_eq!(pad.status6button(), 0);
}

#[test]
fn test_six_button_pad_detected_on_third_poll() {
    let mut pad = sim_pad(ControllerType::SixButton);
    pad.io_mut().state.y = true;
    pad.io_mut().state.mode = true;
    pad.io_mut().state.c = true;

    pad.poll();
    pad.poll();
    assert!(!pad.extended_detected());
    assert_eq!(pad.status6button(), 0);

    pad.poll();
    assert!(pad.extended_detected());
    assert_eq!(pad.status6button(), Buttons6::Y | Buttons6::MODE);
    // Direction lines carried the signature, not presses.
    assert_eq!(pad.status3button(), Buttons3::C);
}

#[test]
fn test_six_button_pad_keeps_cycling() {
    let mut pad = sim_pad(ControllerType::SixButton);
    pad.io_mut().state.z = true;

    let mut detections = 0;
    for _ in 0..12 {
        pad.poll();
        if pad.extended_detected() {
            detections += 1;
            assert_eq!(pad.status6button(), Buttons6::Z);
        }
        assert_eq!(pad.status3button(), 0);
    }
    // Each detection spends two edges, the plain polls in between one each.
    assert_eq!(detections, 4);
}

#[test]
fn test_six_button_release_seen_on_next_detection() {
    let mut pad = sim_pad(ControllerType::SixButton);
    pad.io_mut().state.x = true;
    for _ in 0..3 {
        pad.poll();
    }
    assert!(pad.buttons6().x());

    pad.io_mut().state.x = false;
    pad.poll();
    pad.poll();
    // Stale until the pad shows its signature again.
    assert!(pad.buttons6().x());
    pad.poll();
    assert!(pad.extended_detected());
    assert!(pad.buttons6().is_empty());
}

#[test]
fn test_slow_polling_never_detects_six_button() {
    let mut pad = sim_pad(ControllerType::SixButton);
    pad.io_mut().state.z = true;

    for _ in 0..10 {
        pad.poll();
        pad.io_mut().advance(SIX_BUTTON_TIMEOUT_US + 1);
        assert!(!pad.extended_detected());
    }
    assert_eq!(pad.status6button(), 0);
}

#[test]
fn test_large_settle_delay_breaks_six_button_detection() {
    let b = binding();
    let mut pad = GenesisPad::with_settle_delay(
        SimulatedPad::new(ControllerType::SixButton, b),
        b,
        1000,
    );
    pad.io_mut().state.mode = true;

    for _ in 0..10 {
        pad.poll();
        assert!(!pad.extended_detected());
    }
    assert_eq!(pad.status6button(), 0);
}

#[test]
fn test_poll_timing() {
    let mut pad = sim_pad(ControllerType::SixButton);

    pad.poll();
    pad.poll();
    assert_eq!(pad.io().elapsed_us(), 4 * u64::from(DEFAULT_SETTLE_DELAY_US));
    pad.poll();
    assert_eq!(pad.io().elapsed_us(), 8 * u64::from(DEFAULT_SETTLE_DELAY_US));
    assert_eq!(pad.io().falling_edges(), 4);
}
