// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Jump,

    // Combat and skills
    Attack,
    Dash,
    ThrowSword,

    // Meta actions
    Pause,
    Menu,
}

/// Continuous input axes derived from pairs of opposing actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    /// MoveLeft (-1) to MoveRight (+1)
    Horizontal,
    /// MoveDown (-1) to MoveUp (+1)
    Vertical,
}

impl InputAxis {
    /// The (negative, positive) actions that drive this axis
    pub fn actions(self) -> (Action, Action) {
        match self {
            Self::Horizontal => (Action::MoveLeft, Action::MoveRight),
            Self::Vertical => (Action::MoveDown, Action::MoveUp),
        }
    }
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings for Player 1
pub fn default_p1_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::MoveUp),
        (InputSource::key(KeyCode::KeyS), Action::MoveDown),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::ShiftLeft), Action::Dash),
        (InputSource::mouse(MouseButton::Left), Action::Attack),
        (InputSource::mouse(MouseButton::Right), Action::ThrowSword),
    ]
}

/// Global bindings (not player-specific)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Menu),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_actions() {
        assert_eq!(
            InputAxis::Horizontal.actions(),
            (Action::MoveLeft, Action::MoveRight)
        );
        assert_eq!(
            InputAxis::Vertical.actions(),
            (Action::MoveDown, Action::MoveUp)
        );
    }

    #[test]
    fn test_dash_on_left_shift() {
        let bindings = default_p1_bindings();
        assert!(bindings.contains(&(InputSource::key(KeyCode::ShiftLeft), Action::Dash)));
    }

    #[test]
    fn test_attack_on_left_mouse() {
        let bindings = default_p1_bindings();
        let attack = bindings.iter().find(|(_, action)| *action == Action::Attack);
        assert!(matches!(
            attack,
            Some((InputSource::Mouse(MouseButton::Left), _))
        ));
    }

    #[test]
    fn test_no_duplicate_inputs_in_p1() {
        let bindings = default_p1_bindings();
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in bindings {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found in P1 bindings"
            );
        }
    }
}
