//! Per-frame input snapshot with edge tracking
//!
//! Device binding lives outside this crate; the host translates whatever
//! raw events it receives into action presses and releases, then hands the
//! resulting snapshot to the frame step.

use std::collections::HashSet;

/// Actions the controller responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move along the facing direction
    MoveForward,
    /// Move against the facing direction
    MoveBackward,
    /// Yaw left
    TurnLeft,
    /// Yaw right
    TurnRight,
    /// Jump
    Jump,
    /// Forward dodge roll
    Roll,
    /// Primary attack
    Attack1,
    /// Secondary attack
    Attack2,
    /// Toggle the follow camera
    CameraFollow,
}

/// Current state of all actions for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<InputAction>,
    just_pressed: HashSet<InputAction>,
    just_released: HashSet<InputAction>,
}

impl InputState {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action press; repeated presses while held are not edges
    pub fn press(&mut self, action: InputAction) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Record an action release
    pub fn release(&mut self, action: InputAction) {
        if self.held.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Clear edge data at the end of a frame; held actions persist
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Clear everything, including held actions
    pub fn clear_all(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_edge_and_level() {
        let mut state = InputState::new();
        state.press(InputAction::Jump);
        assert!(state.is_held(InputAction::Jump));
        assert!(state.is_just_pressed(InputAction::Jump));

        state.end_frame();
        assert!(state.is_held(InputAction::Jump));
        assert!(!state.is_just_pressed(InputAction::Jump));

        // Re-pressing while held is not a new edge
        state.press(InputAction::Jump);
        assert!(!state.is_just_pressed(InputAction::Jump));
    }

    #[test]
    fn test_release_edge() {
        let mut state = InputState::new();
        state.press(InputAction::Roll);
        state.end_frame();
        state.release(InputAction::Roll);
        assert!(!state.is_held(InputAction::Roll));
        assert!(state.is_just_released(InputAction::Roll));

        // A press after a full release is a fresh edge
        state.end_frame();
        state.press(InputAction::Roll);
        assert!(state.is_just_pressed(InputAction::Roll));
    }
}
