// Finite state machine core
//
// - `state`: the per-state lifecycle contract and shared bookkeeping
// - `machine`: the machine that owns the active id and performs transitions

pub mod machine;
pub mod state;

pub use machine::StateMachine;
pub use state::{AnimationTrigger, State, StateBase, StateId, StateRegistry};

/// Programmer errors raised by a state machine
///
/// These are precondition violations, not runtime conditions. Callers are
/// expected to propagate them and abort rather than recover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FsmError {
    #[error("State machine used before initialization")]
    NotInitialized,

    #[error("State machine already initialized (active state: {0})")]
    AlreadyInitialized(String),

    #[error("Transition to unregistered state: {0}")]
    UnregisteredState(String),
}
