// Engine modules: timing, scheduling, physics, input

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod scheduler;
