// Input configuration and remapping system

use super::action::{default_p1_bindings, global_bindings, Action, InputSource};
use std::collections::HashMap;

/// Input configuration for a single player
/// Maps input sources (keys/buttons) to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Player ID this config is for
    player_id: usize,

    /// Mapping from input sources to actions (one action per source)
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create an empty input configuration
    pub fn new(player_id: usize) -> Self {
        Self {
            player_id,
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(player_id: usize, bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new(player_id);
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Get the player ID
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Bind an input source to an action, replacing what the source did before
    pub fn bind(&mut self, source: InputSource, action: Action) {
        if let Some(previous) = self.bindings.insert(source, action) {
            if previous != action {
                log::debug!(
                    "P{}: {:?} rebound from {:?} to {:?}",
                    self.player_id + 1,
                    source,
                    previous,
                    action
                );
            }
        }
    }

    /// Unbind an input source
    pub fn unbind_source(&mut self, source: InputSource) {
        self.bindings.remove(&source);
    }

    /// Unbind all sources for an action
    pub fn unbind_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Get all input sources bound to an action
    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(source, _)| *source)
            .collect()
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }

    /// Clear all bindings
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Reset to default bindings for this player
    pub fn reset_to_defaults(&mut self) {
        self.clear();
        // Only the first local player gets keyboard/mouse defaults
        if self.player_id == 0 {
            for (source, action) in default_p1_bindings() {
                self.bind(source, action);
            }
        }
    }
}

/// Manager for all player input configurations
#[derive(Debug)]
pub struct InputConfigManager {
    /// Configurations for each player
    configs: Vec<InputConfig>,

    /// Bindings shared by every player (menu, pause)
    global_config: InputConfig,
}

impl InputConfigManager {
    /// Create a config manager with default configurations for `max_players`
    pub fn new(max_players: usize) -> Self {
        let configs = (0..max_players)
            .map(|player_id| {
                let mut config = InputConfig::new(player_id);
                config.reset_to_defaults();
                config
            })
            .collect();

        Self {
            configs,
            global_config: InputConfig::from_bindings(usize::MAX, global_bindings()),
        }
    }

    /// Get a player's configuration
    pub fn get_config(&self, player_id: usize) -> Option<&InputConfig> {
        self.configs.get(player_id)
    }

    /// Get a mutable reference to a player's configuration
    pub fn get_config_mut(&mut self, player_id: usize) -> Option<&mut InputConfig> {
        self.configs.get_mut(player_id)
    }

    /// Get the action for a given input source and player
    /// Checks player-specific bindings first, then global bindings
    pub fn get_action(&self, player_id: usize, source: InputSource) -> Option<Action> {
        self.get_config(player_id)
            .and_then(|config| config.get_action(source))
            .or_else(|| self.global_config.get_action(source))
    }
}

impl Default for InputConfigManager {
    fn default() -> Self {
        Self::new(1)
    }
}
