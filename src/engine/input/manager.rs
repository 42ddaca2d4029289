// Input manager - translates window events into per-player action state

use super::action::{Action, InputSource};
use super::config::InputConfigManager;
use super::player::PlayerInput;
use super::InputQuery;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Main input manager that coordinates all input for all players
#[derive(Debug)]
pub struct InputManager {
    /// Configuration manager for all players
    config: InputConfigManager,

    /// Input state for each player
    players: Vec<PlayerInput>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new(max_players: usize) -> Self {
        Self {
            config: InputConfigManager::new(max_players),
            players: (0..max_players).map(PlayerInput::new).collect(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Key repeats are not new presses
        if event.repeat {
            return;
        }
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.apply(InputSource::key(key_code), event.state);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.apply(InputSource::mouse(button), state);
    }

    /// Route a source change to every player it is bound for
    fn apply(&mut self, source: InputSource, state: ElementState) {
        for player in &mut self.players {
            let Some(action) = self.config.get_action(player.player_id(), source) else {
                continue;
            };
            match state {
                ElementState::Pressed => player.press(action),
                ElementState::Released => player.release(action),
            }
        }
    }

    /// Close the current step for every player
    /// Call this once per simulation step after all controllers have polled
    pub fn update(&mut self) {
        for player in &mut self.players {
            player.update();
        }
    }

    /// Get input state for a specific player
    pub fn player(&self, player_id: usize) -> Option<&PlayerInput> {
        self.players.get(player_id)
    }

    /// Get mutable input state for a specific player
    pub fn player_mut(&mut self, player_id: usize) -> Option<&mut PlayerInput> {
        self.players.get_mut(player_id)
    }

    /// Get the configuration manager
    pub fn config(&self) -> &InputConfigManager {
        &self.config
    }

    /// Get mutable configuration manager
    pub fn config_mut(&mut self) -> &mut InputConfigManager {
        &mut self.config
    }

    /// Check if any player pressed a specific action this step
    pub fn any_player_just_pressed(&self, action: Action) -> bool {
        self.players.iter().any(|p| p.just_pressed(action))
    }

    /// Reset all player input states
    pub fn reset_all(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }

    /// Get the number of players
    pub fn num_players(&self) -> usize {
        self.players.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::InputAxis;

    #[test]
    fn test_manager_creation() {
        let manager = InputManager::new(2);
        assert_eq!(manager.num_players(), 2);
        assert!(manager.player(1).is_some());
        assert!(manager.player(2).is_none());
    }

    #[test]
    fn test_mouse_button_maps_to_attack() {
        let mut manager = InputManager::new(1);
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);

        let player = manager.player(0).unwrap();
        assert!(player.just_pressed(Action::Attack));
        assert!(manager.any_player_just_pressed(Action::Attack));
    }

    #[test]
    fn test_update_clears_edges_only() {
        let mut manager = InputManager::new(1);
        manager.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        manager.update();

        let player = manager.player(0).unwrap();
        assert!(!player.just_pressed(Action::ThrowSword));
        assert!(player.is_pressed(Action::ThrowSword));
    }

    #[test]
    fn test_direct_input_manipulation() {
        let mut manager = InputManager::new(1);
        if let Some(player) = manager.player_mut(0) {
            player.press(Action::MoveLeft);
        }
        assert_eq!(
            manager.player(0).unwrap().axis_value(InputAxis::Horizontal),
            -1.0
        );
    }

    #[test]
    fn test_reset_all() {
        let mut manager = InputManager::new(1);
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        manager.reset_all();
        assert!(!manager.player(0).unwrap().is_pressed(Action::Attack));
    }
}
