// Per-player input state management

use super::action::{Action, InputAxis};
use super::InputQuery;
use std::collections::HashSet;

/// Represents the input state for a single player
///
/// Events are recorded as they arrive; `update` closes the frame and clears
/// the edge sets, so `just_pressed` is true for exactly one simulation step.
#[derive(Debug)]
pub struct PlayerInput {
    /// Player ID (0-3 for up to 4 players)
    player_id: usize,

    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
        }
    }

    /// Get the player ID
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Close the current frame
    /// Call this once per simulation step after all controllers have polled
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl InputQuery for PlayerInput {
    fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    fn axis_value(&self, axis: InputAxis) -> f32 {
        let (negative, positive) = axis.actions();
        let mut value = 0.0;
        if self.is_pressed(negative) {
            value -= 1.0;
        }
        if self.is_pressed(positive) {
            value += 1.0;
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new(0);
        assert_eq!(input.player_id(), 0);
        assert!(!input.is_pressed(Action::Jump));
    }

    #[test]
    fn test_press_is_an_edge() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Dash);
        assert!(input.just_pressed(Action::Dash));

        input.update();
        assert!(input.is_pressed(Action::Dash));
        assert!(!input.just_pressed(Action::Dash));

        // Holding the key does not produce another edge
        input.press(Action::Dash);
        assert!(!input.just_pressed(Action::Dash));
    }

    #[test]
    fn test_release_action() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.update();
        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new(0);
        input.release(Action::Jump);
        assert!(!input.just_released(Action::Jump));
    }

    #[test]
    fn test_axis_neutral() {
        let input = PlayerInput::new(0);
        assert_eq!(input.axis_value(InputAxis::Horizontal), 0.0);
        assert_eq!(input.axis_value(InputAxis::Vertical), 0.0);
    }

    #[test]
    fn test_axis_horizontal() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveRight);
        assert_eq!(input.axis_value(InputAxis::Horizontal), 1.0);

        input.release(Action::MoveRight);
        input.press(Action::MoveLeft);
        assert_eq!(input.axis_value(InputAxis::Horizontal), -1.0);
    }

    #[test]
    fn test_opposing_directions_cancel() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveLeft);
        input.press(Action::MoveRight);
        assert_eq!(input.axis_value(InputAxis::Horizontal), 0.0);
    }

    #[test]
    fn test_axis_vertical() {
        let mut input = PlayerInput::new(0);
        input.press(Action::MoveDown);
        assert_eq!(input.axis_value(InputAxis::Vertical), -1.0);
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new(0);
        input.press(Action::Jump);
        input.press(Action::Attack);
        input.reset();

        assert!(!input.is_pressed(Action::Jump));
        assert!(!input.just_pressed(Action::Attack));
    }
}
