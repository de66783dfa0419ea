//! Keyboard control panel for the simulation parameters
//!
//! Controls:
//! - Up/Down: Raise/lower temperature (applies live)
//! - ]/[: More/fewer propane molecules (reseeds)
//! - =/-: More/fewer oxygen molecules (reseeds)

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// A parameter change produced by a key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlChange {
    /// New temperature; the running simulation picks it up immediately
    Temperature(f32),
    /// New initial counts; the simulation must be reseeded
    Counts { propane: usize, oxygen: usize },
}

/// Ranges and step sizes for the adjustable parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLimits {
    pub temperature_min: f32,
    pub temperature_max: f32,
    pub temperature_step: f32,
    pub count_max: usize,
    pub propane_step: usize,
    pub oxygen_step: usize,
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self {
            temperature_min: 0.0,
            temperature_max: 5.0,
            temperature_step: 0.1,
            count_max: 200,
            propane_step: 1,
            oxygen_step: 5,
        }
    }
}

impl ControlLimits {
    /// Repair inverted or non-finite ranges
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.temperature_min.is_finite() {
            self.temperature_min = defaults.temperature_min;
        }
        if !self.temperature_max.is_finite() {
            self.temperature_max = defaults.temperature_max;
        }
        self.temperature_min = self.temperature_min.max(0.0);
        if self.temperature_max < self.temperature_min {
            std::mem::swap(&mut self.temperature_min, &mut self.temperature_max);
        }
        if !self.temperature_step.is_finite() || self.temperature_step <= 0.0 {
            self.temperature_step = defaults.temperature_step;
        }
        self.propane_step = self.propane_step.max(1);
        self.oxygen_step = self.oxygen_step.max(1);
        self
    }
}

/// Current parameter values plus the keys that change them
#[derive(Debug, Clone)]
pub struct ControlPanel {
    temperature: f32,
    propane_count: usize,
    oxygen_count: usize,
    limits: ControlLimits,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(2.0, 8, 40, ControlLimits::default())
    }
}

impl ControlPanel {
    /// Create a panel, clamping the starting values into the limits
    pub fn new(temperature: f32, propane_count: usize, oxygen_count: usize, limits: ControlLimits) -> Self {
        let limits = limits.sanitized();
        let mut panel = Self {
            temperature: limits.temperature_min,
            propane_count: 0,
            oxygen_count: 0,
            limits,
        };
        panel.temperature = panel.clamp_temperature(temperature);
        panel.propane_count = propane_count.min(limits.count_max);
        panel.oxygen_count = oxygen_count.min(limits.count_max);
        panel
    }

    fn clamp_temperature(&self, t: f32) -> f32 {
        if !t.is_finite() {
            return self.limits.temperature_min;
        }
        // Snap to two decimals so repeated steps don't drift
        let snapped = (t * 100.0).round() / 100.0;
        snapped.clamp(self.limits.temperature_min, self.limits.temperature_max)
    }

    /// Process keyboard input
    ///
    /// Returns the change when the key moved a parameter. Presses at a limit
    /// and key releases return `None`.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> Option<ControlChange> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::ArrowUp => self.nudge_temperature(1.0),
            KeyCode::ArrowDown => self.nudge_temperature(-1.0),
            KeyCode::BracketRight => self.nudge_propane(true),
            KeyCode::BracketLeft => self.nudge_propane(false),
            KeyCode::Equal | KeyCode::NumpadAdd => self.nudge_oxygen(true),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.nudge_oxygen(false),
            _ => None,
        }
    }

    fn nudge_temperature(&mut self, direction: f32) -> Option<ControlChange> {
        let next = self.clamp_temperature(self.temperature + direction * self.limits.temperature_step);
        if next == self.temperature {
            return None;
        }
        self.temperature = next;
        log::debug!("Temperature set to {:.2}", next);
        Some(ControlChange::Temperature(next))
    }

    fn nudge_propane(&mut self, up: bool) -> Option<ControlChange> {
        let next = step_count(self.propane_count, self.limits.propane_step, up, self.limits.count_max);
        if next == self.propane_count {
            return None;
        }
        self.propane_count = next;
        Some(self.counts())
    }

    fn nudge_oxygen(&mut self, up: bool) -> Option<ControlChange> {
        let next = step_count(self.oxygen_count, self.limits.oxygen_step, up, self.limits.count_max);
        if next == self.oxygen_count {
            return None;
        }
        self.oxygen_count = next;
        Some(self.counts())
    }

    fn counts(&self) -> ControlChange {
        log::debug!(
            "Initial counts set to {} propane, {} oxygen",
            self.propane_count,
            self.oxygen_count
        );
        ControlChange::Counts {
            propane: self.propane_count,
            oxygen: self.oxygen_count,
        }
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn propane_count(&self) -> usize {
        self.propane_count
    }

    pub fn oxygen_count(&self) -> usize {
        self.oxygen_count
    }

    pub fn limits(&self) -> &ControlLimits {
        &self.limits
    }
}

fn step_count(current: usize, step: usize, up: bool, max: usize) -> usize {
    if up {
        current.saturating_add(step).min(max)
    } else {
        current.saturating_sub(step)
    }
}
