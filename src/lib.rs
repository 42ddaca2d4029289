// Character behavior state machines for a 2D action game
//
// - `core`: small math helpers
// - `engine`: fixed-step timing, deferred tasks, physics and input adapters
// - `game`: the state machine core, player and enemy controllers

pub mod core;
pub mod engine;
pub mod game;
