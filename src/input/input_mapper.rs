//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to commands like TogglePause, Reset, Exit, etc.
//! Parameter keys (arrows, brackets, -/=) are NOT mapped here - they go directly to ControlPanel.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Commands triggered by special input (not parameter changes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Show or hide atom markers and species badges (L key)
    ToggleLabels,
    /// Freeze or resume the simulation (P or Space)
    TogglePause,
    /// Reseed from the current parameters (R key)
    Reset,
    /// Exit application (Escape)
    Exit,
}

/// Maps raw input events to semantic actions
///
/// Parameter keys are NOT mapped here - they go directly
/// to the ControlPanel. This mapper handles command keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for command keys, `None` for everything else
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyL => Some(InputAction::ToggleLabels),
            KeyCode::KeyP | KeyCode::Space => Some(InputAction::TogglePause),
            KeyCode::KeyR => Some(InputAction::Reset),
            _ => None, // Parameter keys handled by the control panel
        }
    }
}
