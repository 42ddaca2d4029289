// State lifecycle shared by every character behavior

use std::fmt::Debug;

/// Marker for values usable as state identifiers (usually a fieldless enum)
pub trait StateId: Copy + Eq + Debug {}

impl<T: Copy + Eq + Debug> StateId for T {}

/// Bookkeeping every state carries regardless of its behavior
///
/// States are long-lived: the same `StateBase` is reused across every
/// activation, so `enter` must re-arm the timer rather than rely on
/// construction defaults.
#[derive(Debug, Clone)]
pub struct StateBase {
    /// Clip requested from the animation collaborator on enter
    anim_tag: &'static str,
    /// Countdown in seconds, decremented once per update
    timer: f32,
    /// Set by the animation-finished signal, cleared on exit
    trigger_called: bool,
}

impl StateBase {
    pub fn new(anim_tag: &'static str) -> Self {
        Self {
            anim_tag,
            timer: 0.0,
            trigger_called: false,
        }
    }

    /// Animation clip tag for this state
    pub fn anim_tag(&self) -> &'static str {
        self.anim_tag
    }

    /// Remaining time on the state timer (negative once expired)
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Arm the state timer
    pub fn set_timer(&mut self, seconds: f32) {
        self.timer = seconds;
    }

    /// Count the timer down by one step
    pub fn tick(&mut self, dt: f32) {
        self.timer -= dt;
    }

    /// Check if the timer has run out
    pub fn timer_expired(&self) -> bool {
        self.timer < 0.0
    }

    /// Check if the current clip reported completion during this activation
    pub fn trigger_called(&self) -> bool {
        self.trigger_called
    }

    /// Record that the current animation clip finished
    pub fn animation_finished_trigger(&mut self) {
        self.trigger_called = true;
    }

    /// Forget a consumed animation trigger
    pub fn clear_trigger(&mut self) {
        self.trigger_called = false;
    }
}

/// Receives the animation-finished signal
///
/// Kept separate from [`State`] so routing the signal never needs the
/// controller context.
pub trait AnimationTrigger {
    fn animation_finished_trigger(&mut self);
}

/// A behavior mode driven by a [`StateMachine`](super::StateMachine)
///
/// `C` is the controller view the state reads and commands through. A state
/// never switches itself: `update` returns the id it wants next and the
/// machine performs the exit/enter pair.
pub trait State<C>: AnimationTrigger {
    type Id: StateId;

    /// Called once per activation
    fn enter(&mut self, ctx: &mut C);

    /// Called every step while active; returns a requested transition
    fn update(&mut self, ctx: &mut C) -> Option<Self::Id>;

    /// Called once per deactivation
    fn exit(&mut self, ctx: &mut C);
}

/// The fixed set of state instances a controller owns, addressed by id
pub trait StateRegistry {
    type Id: StateId;
    type State;

    /// Look up a registered state
    fn get_mut(&mut self, id: Self::Id) -> Option<&mut Self::State>;
}
