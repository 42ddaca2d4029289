// Player character controller
//
// - `states`: the player's behavior roster and its transitions
// - this module: the controller owning the roster, the per-step context the
//   states act through, and the controller-level dash check

pub mod states;

use log::{debug, info};

use super::animation::{AnimationPlayer, Animator};
use super::body::CharacterBody;
use super::entity::{Actor, CharacterId, CharacterTask, Entity};
use super::skills::{SkillSet, SpawnRequest};
use super::stats::{PlayerStats, SkillStats};
use crate::core::math::direction_or;
use crate::engine::game_loop::StepTime;
use crate::engine::input::{Action, InputAxis, InputQuery, NeutralInput};
use crate::engine::scheduler::Scheduler;
use crate::game::fsm::{FsmError, StateMachine};

pub use states::{PlayerBehavior, PlayerState, PlayerStateId, PlayerStates};

/// Controller-local fields the player's states read and write
#[derive(Debug, Clone)]
pub struct PlayerStatus {
    /// Set when an attack ends, cleared by a scheduled task
    pub busy: bool,
    /// Horizontal direction of the current or last dash (+1/-1)
    pub dash_dir: f32,
    /// Counts down while no wall is detected; a dash needs it below zero
    pub dash_usage_timer: f32,
    pub skills: SkillSet,
    /// Spawns requested this step, drained by the owner
    pub spawns: Vec<SpawnRequest>,
}

impl PlayerStatus {
    pub fn new(skill_stats: SkillStats) -> Self {
        Self {
            busy: false,
            dash_dir: 1.0,
            dash_usage_timer: 0.0,
            skills: SkillSet::new(skill_stats),
            spawns: Vec::new(),
        }
    }
}

/// Everything a player state may touch during one call
pub struct PlayerContext<'a> {
    pub actor: Actor<'a>,
    pub status: &'a mut PlayerStatus,
    pub stats: &'a PlayerStats,
    pub input: &'a dyn InputQuery,
    pub scheduler: &'a mut Scheduler<CharacterTask>,
}

impl PlayerContext<'_> {
    pub fn axis_x(&self) -> f32 {
        self.input.axis_value(InputAxis::Horizontal)
    }

    pub fn axis_y(&self) -> f32 {
        self.input.axis_value(InputAxis::Vertical)
    }

    pub fn pressed(&self, action: Action) -> bool {
        self.input.just_pressed(action)
    }

    /// Mark the player busy and schedule the end of the window
    ///
    /// A window still pending from an earlier attack is replaced.
    pub fn start_busy(&mut self) {
        self.status.busy = true;
        self.scheduler.schedule_after(
            self.actor.entity.id,
            self.actor.time.now,
            self.stats.busy_duration,
            CharacterTask::ClearBusy,
        );
    }

    /// Leave a clone at the current position if the clone skill is ready
    pub fn create_clone(&mut self) {
        let position = self.actor.position();
        let facing = self.actor.facing();
        if let Some(request) = self
            .status
            .skills
            .create_clone(self.actor.entity.id, position, facing)
        {
            debug!("{}: clone requested at {}", self.actor.entity.name, position);
            self.status.spawns.push(request);
        }
    }

    /// Throw a sword if the sword skill is ready
    pub fn throw_sword(&mut self) {
        let position = self.actor.position();
        let facing = self.actor.facing();
        if let Some(request) = self
            .status
            .skills
            .throw_sword(self.actor.entity.id, position, facing)
        {
            debug!("{}: sword thrown from {}", self.actor.entity.name, position);
            self.status.spawns.push(request);
        }
    }

    /// Dash check run after the active state's update
    ///
    /// The cooldown only runs while no wall is ahead, and a dash request is
    /// ignored entirely against a wall.
    fn check_dash_input(&mut self) -> Option<PlayerStateId> {
        if self.actor.is_wall_detected() {
            return None;
        }

        self.status.dash_usage_timer -= self.actor.time.dt;

        if self.pressed(Action::Dash) && self.status.dash_usage_timer < 0.0 {
            self.status.dash_usage_timer = self.stats.dash_cooldown;
            self.status.dash_dir = direction_or(self.axis_x(), self.actor.facing());
            return Some(PlayerStateId::Dash);
        }
        None
    }
}

/// A player-controlled character
#[derive(Debug)]
pub struct Player<A: Animator = AnimationPlayer> {
    entity: Entity,
    stats: PlayerStats,
    status: PlayerStatus,
    machine: StateMachine<PlayerStateId>,
    states: PlayerStates,
    animator: A,
    /// Clip-finished signal waiting for the next step
    pending_trigger: bool,
}

impl Player<AnimationPlayer> {
    /// Create a player with the standard clip set
    pub fn with_standard_animations(id: CharacterId, name: &str, stats: PlayerStats) -> Self {
        Self::new(
            id,
            name,
            stats,
            SkillStats::default(),
            AnimationPlayer::with_player_animations(),
        )
    }
}

impl<A: Animator> Player<A> {
    pub fn new(id: CharacterId, name: &str, stats: PlayerStats, skill_stats: SkillStats, animator: A) -> Self {
        let label = format!("{}#{}", name, id);
        Self {
            entity: Entity::new(id, name, stats.probes),
            status: PlayerStatus::new(skill_stats),
            stats,
            machine: StateMachine::new(label),
            states: PlayerStates::standard(),
            animator,
            pending_trigger: false,
        }
    }

    /// Swap the state registry (e.g. a reduced roster)
    pub fn with_states(mut self, states: PlayerStates) -> Self {
        self.states = states;
        self
    }

    /// Enter the idle state
    pub fn initialize(
        &mut self,
        body: &mut dyn CharacterBody,
        scheduler: &mut Scheduler<CharacterTask>,
        time: StepTime,
    ) -> Result<(), FsmError> {
        self.with_context(body, &NeutralInput, scheduler, time, |machine, states, ctx| {
            machine.initialize(PlayerStateId::Idle, states, ctx)
        })?;
        info!("{} ready", self.entity.name);
        Ok(())
    }

    /// Run one simulation step
    pub fn tick(
        &mut self,
        body: &mut dyn CharacterBody,
        input: &dyn InputQuery,
        scheduler: &mut Scheduler<CharacterTask>,
        time: StepTime,
    ) -> Result<(), FsmError> {
        if std::mem::take(&mut self.pending_trigger) {
            self.machine.animation_finished(&mut self.states)?;
        }

        self.status.skills.tick(time.dt);

        self.with_context(body, input, scheduler, time, |machine, states, ctx| -> Result<(), FsmError> {
            machine.update(states, ctx)?;
            if let Some(next) = ctx.check_dash_input() {
                machine.change_state(next, states, ctx)?;
            }
            Ok(())
        })?;

        if self.animator.advance(time.dt) {
            self.notify_animation_finished();
        }
        Ok(())
    }

    /// Force a transition from outside the state roster
    pub fn change_state(
        &mut self,
        next: PlayerStateId,
        body: &mut dyn CharacterBody,
        scheduler: &mut Scheduler<CharacterTask>,
        time: StepTime,
    ) -> Result<(), FsmError> {
        self.with_context(body, &NeutralInput, scheduler, time, |machine, states, ctx| {
            machine.change_state(next, states, ctx)
        })
    }

    /// Queue the clip-finished signal for the next step
    pub fn notify_animation_finished(&mut self) {
        self.pending_trigger = true;
    }

    /// Handle a scheduled task that came due
    pub fn apply_task(&mut self, task: CharacterTask) {
        match task {
            CharacterTask::ClearBusy => {
                self.status.busy = false;
                debug!("{}: no longer busy", self.entity.name);
            }
        }
    }

    /// Take the spawn requests raised since the last call
    pub fn drain_spawn_requests(&mut self) -> Vec<SpawnRequest> {
        std::mem::take(&mut self.status.spawns)
    }

    pub fn id(&self) -> CharacterId {
        self.entity.id
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }

    /// Get the active state, `None` before initialization
    pub fn state(&self) -> Option<PlayerStateId> {
        self.machine.current()
    }

    pub fn facing(&self) -> f32 {
        self.entity.facing()
    }

    pub fn is_busy(&self) -> bool {
        self.status.busy
    }

    pub fn dash_dir(&self) -> f32 {
        self.status.dash_dir
    }

    pub fn status(&self) -> &PlayerStatus {
        &self.status
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Current attack combo position
    pub fn combo_index(&self) -> usize {
        match self
            .states
            .get(PlayerStateId::PrimaryAttack)
            .map(PlayerState::behavior)
        {
            Some(PlayerBehavior::PrimaryAttack(combo)) => combo.index(),
            _ => 0,
        }
    }

    pub fn transition_count(&self) -> u64 {
        self.machine.transition_count()
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    /// Build the per-call context and hand it to `f` with the machine and
    /// registry
    fn with_context<T>(
        &mut self,
        body: &mut dyn CharacterBody,
        input: &dyn InputQuery,
        scheduler: &mut Scheduler<CharacterTask>,
        time: StepTime,
        f: impl FnOnce(&mut StateMachine<PlayerStateId>, &mut PlayerStates, &mut PlayerContext<'_>) -> T,
    ) -> T {
        let mut ctx = PlayerContext {
            actor: Actor::new(&mut self.entity, body, &mut self.animator, time),
            status: &mut self.status,
            stats: &self.stats,
            input,
            scheduler,
        };
        f(&mut self.machine, &mut self.states, &mut ctx)
    }
}
