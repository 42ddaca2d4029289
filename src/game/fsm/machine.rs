// Generic state machine driving a registry of long-lived states

use log::debug;

use super::state::{AnimationTrigger, State, StateId, StateRegistry};
use super::FsmError;

/// Tracks which registered state is active and performs transitions
///
/// The machine stores only the active id. State instances live in the
/// owner's [`StateRegistry`] and the controller context is borrowed per call,
/// so there is no back-pointer from a state to its owner.
#[derive(Debug)]
pub struct StateMachine<K: StateId> {
    /// Label used in log output (e.g. "player#0")
    label: String,
    current: Option<K>,
    transitions: u64,
}

impl<K: StateId> StateMachine<K> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            current: None,
            transitions: 0,
        }
    }

    /// Get the active state, `None` before initialization
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Check if `initialize` has run
    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Number of transitions performed since initialization
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    /// Activate the initial state. Must be called exactly once.
    pub fn initialize<C, R>(&mut self, initial: K, states: &mut R, ctx: &mut C) -> Result<(), FsmError>
    where
        R: StateRegistry<Id = K>,
        R::State: State<C, Id = K>,
    {
        if let Some(current) = self.current {
            return Err(FsmError::AlreadyInitialized(format!("{current:?}")));
        }

        let state = states
            .get_mut(initial)
            .ok_or_else(|| FsmError::UnregisteredState(format!("{initial:?}")))?;

        self.current = Some(initial);
        state.enter(ctx);
        debug!("{}: initialized in {:?}", self.label, initial);
        Ok(())
    }

    /// Exit the active state and enter `next`
    ///
    /// Re-entering the active state is allowed and runs a full exit/enter
    /// pair.
    pub fn change_state<C, R>(&mut self, next: K, states: &mut R, ctx: &mut C) -> Result<(), FsmError>
    where
        R: StateRegistry<Id = K>,
        R::State: State<C, Id = K>,
    {
        let previous = self.current.ok_or(FsmError::NotInitialized)?;

        // Reject before touching the active state so a bad request leaves
        // the machine where it was
        if states.get_mut(next).is_none() {
            return Err(FsmError::UnregisteredState(format!("{next:?}")));
        }

        if let Some(state) = states.get_mut(previous) {
            state.exit(ctx);
        }

        self.current = Some(next);
        if let Some(state) = states.get_mut(next) {
            state.enter(ctx);
        }

        self.transitions += 1;
        debug!("{}: {:?} -> {:?}", self.label, previous, next);
        Ok(())
    }

    /// Run one update of the active state and apply the transition it requests
    pub fn update<C, R>(&mut self, states: &mut R, ctx: &mut C) -> Result<(), FsmError>
    where
        R: StateRegistry<Id = K>,
        R::State: State<C, Id = K>,
    {
        let current = self.current.ok_or(FsmError::NotInitialized)?;
        let state = states
            .get_mut(current)
            .ok_or_else(|| FsmError::UnregisteredState(format!("{current:?}")))?;

        if let Some(next) = state.update(ctx) {
            self.change_state(next, states, ctx)?;
        }
        Ok(())
    }

    /// Route the animation-finished signal to the active state
    pub fn animation_finished<R>(&mut self, states: &mut R) -> Result<(), FsmError>
    where
        R: StateRegistry<Id = K>,
        R::State: AnimationTrigger,
    {
        let current = self.current.ok_or(FsmError::NotInitialized)?;
        let state = states
            .get_mut(current)
            .ok_or_else(|| FsmError::UnregisteredState(format!("{current:?}")))?;
        state.animation_finished_trigger();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fsm::StateBase;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Green,
        Yellow,
        Red,
        Broken,
    }

    /// Records every lifecycle call in order
    #[derive(Default)]
    struct Journal {
        calls: Vec<String>,
        elapsed: f32,
    }

    struct LightState {
        id: Light,
        base: StateBase,
        next: Option<Light>,
        duration: f32,
    }

    impl AnimationTrigger for LightState {
        fn animation_finished_trigger(&mut self) {
            self.base.animation_finished_trigger();
        }
    }

    impl State<Journal> for LightState {
        type Id = Light;

        fn enter(&mut self, ctx: &mut Journal) {
            self.base.set_timer(self.duration);
            ctx.calls.push(format!("enter {:?}", self.id));
        }

        fn update(&mut self, ctx: &mut Journal) -> Option<Light> {
            self.base.tick(ctx.elapsed);
            ctx.calls.push(format!("update {:?}", self.id));
            if self.base.timer_expired() || self.base.trigger_called() {
                self.next
            } else {
                None
            }
        }

        fn exit(&mut self, ctx: &mut Journal) {
            self.base.clear_trigger();
            ctx.calls.push(format!("exit {:?}", self.id));
        }
    }

    struct Lights {
        states: Vec<LightState>,
    }

    impl Lights {
        fn new() -> Self {
            let make = |id, next, duration| LightState {
                id,
                base: StateBase::new("light"),
                next,
                duration,
            };
            Self {
                states: vec![
                    make(Light::Green, Some(Light::Yellow), 1.0),
                    make(Light::Yellow, Some(Light::Red), 0.5),
                    make(Light::Red, Some(Light::Green), 1.0),
                ],
            }
        }
    }

    impl StateRegistry for Lights {
        type Id = Light;
        type State = LightState;

        fn get_mut(&mut self, id: Light) -> Option<&mut LightState> {
            self.states.iter_mut().find(|s| s.id == id)
        }
    }

    fn started() -> (StateMachine<Light>, Lights, Journal) {
        let mut machine = StateMachine::new("lights");
        let mut lights = Lights::new();
        let mut journal = Journal::default();
        machine
            .initialize(Light::Green, &mut lights, &mut journal)
            .unwrap();
        (machine, lights, journal)
    }

    #[test]
    fn test_initialize_enters_once() {
        let (machine, _, journal) = started();
        assert_eq!(machine.current(), Some(Light::Green));
        assert_eq!(journal.calls, vec!["enter Green"]);
        assert_eq!(machine.transition_count(), 0);
    }

    #[test]
    fn test_update_before_initialize_fails() {
        let mut machine = StateMachine::new("lights");
        let mut lights = Lights::new();
        let mut journal = Journal::default();

        let result = machine.update(&mut lights, &mut journal);
        assert_eq!(result, Err(FsmError::NotInitialized));
        assert!(journal.calls.is_empty());
    }

    #[test]
    fn test_double_initialize_fails() {
        let (mut machine, mut lights, mut journal) = started();
        let result = machine.initialize(Light::Red, &mut lights, &mut journal);
        assert!(matches!(result, Err(FsmError::AlreadyInitialized(_))));
        assert_eq!(machine.current(), Some(Light::Green));
    }

    #[test]
    fn test_exit_runs_before_enter() {
        let (mut machine, mut lights, mut journal) = started();
        machine
            .change_state(Light::Red, &mut lights, &mut journal)
            .unwrap();

        assert_eq!(journal.calls, vec!["enter Green", "exit Green", "enter Red"]);
        assert_eq!(machine.current(), Some(Light::Red));
    }

    #[test]
    fn test_reenter_same_state_runs_full_pair() {
        let (mut machine, mut lights, mut journal) = started();
        machine
            .change_state(Light::Green, &mut lights, &mut journal)
            .unwrap();

        assert_eq!(
            journal.calls,
            vec!["enter Green", "exit Green", "enter Green"]
        );
        assert_eq!(machine.current(), Some(Light::Green));
        assert_eq!(machine.transition_count(), 1);
    }

    #[test]
    fn test_unregistered_target_leaves_machine_untouched() {
        let (mut machine, mut lights, mut journal) = started();
        let result = machine.change_state(Light::Broken, &mut lights, &mut journal);

        assert!(matches!(result, Err(FsmError::UnregisteredState(_))));
        assert_eq!(machine.current(), Some(Light::Green));
        assert_eq!(journal.calls, vec!["enter Green"]);
    }

    #[test]
    fn test_update_applies_requested_transition() {
        let (mut machine, mut lights, mut journal) = started();
        journal.elapsed = 0.6;

        machine.update(&mut lights, &mut journal).unwrap();
        assert_eq!(machine.current(), Some(Light::Green));

        machine.update(&mut lights, &mut journal).unwrap();
        assert_eq!(machine.current(), Some(Light::Yellow));
        assert_eq!(
            journal.calls,
            vec![
                "enter Green",
                "update Green",
                "update Green",
                "exit Green",
                "enter Yellow"
            ]
        );
    }

    #[test]
    fn test_animation_trigger_routes_to_active_state() {
        let (mut machine, mut lights, mut journal) = started();
        journal.elapsed = 0.0;

        machine.animation_finished(&mut lights).unwrap();
        machine.update(&mut lights, &mut journal).unwrap();
        assert_eq!(machine.current(), Some(Light::Yellow));

        // The trigger was cleared when Green exited
        let green = lights.get_mut(Light::Green).unwrap();
        assert!(!green.base.trigger_called());
    }

    #[test]
    fn test_animation_trigger_before_initialize_fails() {
        let mut machine: StateMachine<Light> = StateMachine::new("lights");
        let mut lights = Lights::new();
        assert_eq!(
            machine.animation_finished(&mut lights),
            Err(FsmError::NotInitialized)
        );
    }
}
