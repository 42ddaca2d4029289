// Input handling system
//
// Keyboard and mouse events are translated into per-player action state,
// which controllers poll once per simulation step through `InputQuery`.
//
// ## Architecture
//
// - `action`: Defines game actions, axes and default key bindings
// - `player`: Per-player input state (held actions and per-step edges)
// - `config`: Input configuration and remapping system
// - `manager`: Main input manager coordinating everything

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, InputAxis, InputSource};
pub use config::{InputConfig, InputConfigManager};
pub use manager::InputManager;
pub use player::PlayerInput;

/// What a controller may ask of the input system during a step
pub trait InputQuery {
    /// True only on the step the action went down
    fn just_pressed(&self, action: Action) -> bool;

    /// Axis value in [-1, 1]
    fn axis_value(&self, axis: InputAxis) -> f32;
}

/// Input source that never reports anything (AI-driven or unassigned characters)
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralInput;

impl InputQuery for NeutralInput {
    fn just_pressed(&self, _action: Action) -> bool {
        false
    }

    fn axis_value(&self, _axis: InputAxis) -> f32 {
        0.0
    }
}
