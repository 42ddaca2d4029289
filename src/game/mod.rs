// Game logic: the state machine core and the characters built on it

pub mod characters;
pub mod fsm;
