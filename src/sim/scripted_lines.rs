use crate::hal::{DigitalIo, Level, Line};
use crate::sim::PinMode;
use std::collections::HashMap;

/// Input levels scripted by select phase.
///
/// Phases are numbered by select writes: phase 1 follows the first write,
/// phase 2 the second and so on, counting across polls. A read resolves, in
/// order, to the level set for the current phase number, the level set for
/// the current select level, or [`Level::High`] (the pull-up).
///
/// The select level is whatever was last written to a line configured as an
/// output; it starts low. Writes to any other line are dropped.
#[derive(Debug, Default)]
pub struct ScriptedLines {
    by_phase: HashMap<(usize, Line), Level>,
    by_select: HashMap<(Level, Line), Level>,
    modes: HashMap<Line, PinMode>,
    select_writes: Vec<Level>,
    total_delay_us: u32,
}

impl ScriptedLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level `line` reads while select is at `select`.
    pub fn set(&mut self, select: Level, line: Line, level: Level) {
        self.by_select.insert((select, line), level);
    }

    /// Set the level `line` reads regardless of select.
    pub fn hold(&mut self, line: Line, level: Level) {
        self.set(Level::High, line, level);
        self.set(Level::Low, line, level);
    }

    /// Set the level `line` reads during one numbered phase only.
    pub fn set_phase(&mut self, phase: usize, line: Line, level: Level) {
        self.by_phase.insert((phase, line), level);
    }

    /// Number of the current phase (0 before the first select write).
    pub fn phase(&self) -> usize {
        self.select_writes.len()
    }

    fn select(&self) -> Level {
        self.select_writes.last().copied().unwrap_or(Level::Low)
    }

    /// Every level written to an output, in order.
    pub fn select_writes(&self) -> &[Level] {
        &self.select_writes
    }

    pub fn total_delay_us(&self) -> u32 {
        self.total_delay_us
    }

    pub fn is_output(&self, line: Line) -> bool {
        self.modes.get(&line) == Some(&PinMode::Output)
    }

    pub fn is_input_pullup(&self, line: Line) -> bool {
        self.modes.get(&line) == Some(&PinMode::InputPullup)
    }
}

impl DigitalIo for ScriptedLines {
    fn configure_output(&mut self, line: Line) {
        self.modes.insert(line, PinMode::Output);
    }

    fn configure_input_pullup(&mut self, line: Line) {
        self.modes.insert(line, PinMode::InputPullup);
    }

    fn write(&mut self, line: Line, level: Level) {
        if self.is_output(line) {
            self.select_writes.push(level);
        }
    }

    fn read(&mut self, line: Line) -> Level {
        self.by_phase
            .get(&(self.phase(), line))
            .or_else(|| self.by_select.get(&(self.select(), line)))
            .copied()
            .unwrap_or(Level::High)
    }

    fn delay_us(&mut self, us: u32) {
        self.total_delay_us = self.total_delay_us.saturating_add(us);
    }
}
