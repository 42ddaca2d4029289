// Character system
//
// This module contains everything the game's characters are built from:
// - Shared entity primitives (facing, movement, ground/wall sensing)
// - Player and enemy controllers with their state rosters
// - Tuning values, skills and the attack combo tracker
// - Animation playback and the physics body adapter
// - The manager that owns and steps every character

pub mod animation;
pub mod body;
pub mod combo;
pub mod enemy;
pub mod entity;
pub mod manager;
pub mod player;
pub mod skills;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationPlayer, Animator};
pub use body::{CharacterBody, RapierBody, SensorError};
pub use combo::ComboTracker;
pub use enemy::{Enemy, EnemyStateId};
pub use entity::{Actor, CharacterId, CharacterTask, Entity};
pub use manager::CharacterManager;
pub use player::{Player, PlayerStateId};
pub use skills::{Skill, SkillSet, SpawnRequest};
pub use stats::{EnemyStats, PlayerStats, SensorProbes, SkillStats};
