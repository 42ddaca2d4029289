// Enemy (skeleton) character controller

pub mod states;

use log::{debug, info};

use super::animation::{AnimationPlayer, Animator};
use super::body::CharacterBody;
use super::entity::{Actor, CharacterId, Entity};
use super::stats::EnemyStats;
use crate::engine::game_loop::StepTime;
use crate::game::fsm::{FsmError, StateMachine};

pub use states::{EnemyState, EnemyStateId, EnemyStates};

/// Everything an enemy state may touch during one call
pub struct EnemyContext<'a> {
    pub actor: Actor<'a>,
    pub stats: &'a EnemyStats,
}

/// An AI-driven patrolling enemy
#[derive(Debug)]
pub struct Enemy<A: Animator = AnimationPlayer> {
    entity: Entity,
    stats: EnemyStats,
    machine: StateMachine<EnemyStateId>,
    states: EnemyStates,
    animator: A,
    pending_trigger: bool,
    /// Whether a hit may currently stun this enemy
    can_be_stunned: bool,
}

impl Enemy<AnimationPlayer> {
    /// Create a skeleton with the standard clip set
    pub fn skeleton(id: CharacterId, stats: EnemyStats) -> Self {
        Self::new(id, "skeleton", stats, AnimationPlayer::with_skeleton_animations())
    }
}

impl<A: Animator> Enemy<A> {
    pub fn new(id: CharacterId, name: &str, stats: EnemyStats, animator: A) -> Self {
        Self {
            entity: Entity::new(id, name, stats.probes),
            stats,
            machine: StateMachine::new(format!("{}#{}", name, id)),
            states: EnemyStates::standard(),
            animator,
            pending_trigger: false,
            can_be_stunned: true,
        }
    }

    /// Enter the idle state
    pub fn initialize(&mut self, body: &mut dyn CharacterBody, time: StepTime) -> Result<(), FsmError> {
        self.with_context(body, time, |machine, states, ctx| {
            machine.initialize(EnemyStateId::Idle, states, ctx)
        })?;
        info!("{} ready", self.entity.name);
        Ok(())
    }

    /// Run one simulation step
    pub fn tick(&mut self, body: &mut dyn CharacterBody, time: StepTime) -> Result<(), FsmError> {
        if std::mem::take(&mut self.pending_trigger) {
            self.machine.animation_finished(&mut self.states)?;
        }

        self.with_context(body, time, |machine, states, ctx| machine.update(states, ctx))?;

        if self.animator.advance(time.dt) {
            self.pending_trigger = true;
        }
        Ok(())
    }

    /// React to a hit: knock back and stun, restarting a stun in progress.
    /// Returns false without touching the machine while stuns are blocked.
    pub fn stun(&mut self, body: &mut dyn CharacterBody, time: StepTime) -> Result<bool, FsmError> {
        if !self.can_be_stunned {
            debug!("{} shrugged off a stun", self.entity.name);
            return Ok(false);
        }

        debug!("{} stunned", self.entity.name);
        self.with_context(body, time, |machine, states, ctx| {
            machine.change_state(EnemyStateId::Stunned, states, ctx)
        })?;
        Ok(true)
    }

    /// Open or close the window in which hits can stun this enemy
    pub fn set_stunnable(&mut self, stunnable: bool) {
        self.can_be_stunned = stunnable;
    }

    pub fn can_be_stunned(&self) -> bool {
        self.can_be_stunned
    }

    /// Queue the clip-finished signal for the next step
    pub fn notify_animation_finished(&mut self) {
        self.pending_trigger = true;
    }

    pub fn id(&self) -> CharacterId {
        self.entity.id
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }

    pub fn state(&self) -> Option<EnemyStateId> {
        self.machine.current()
    }

    pub fn facing(&self) -> f32 {
        self.entity.facing()
    }

    pub fn stats(&self) -> &EnemyStats {
        &self.stats
    }

    pub fn transition_count(&self) -> u64 {
        self.machine.transition_count()
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    fn with_context<T>(
        &mut self,
        body: &mut dyn CharacterBody,
        time: StepTime,
        f: impl FnOnce(&mut StateMachine<EnemyStateId>, &mut EnemyStates, &mut EnemyContext<'_>) -> T,
    ) -> T {
        let mut ctx = EnemyContext {
            actor: Actor::new(&mut self.entity, body, &mut self.animator, time),
            stats: &self.stats,
        };
        f(&mut self.machine, &mut self.states, &mut ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::testing::{RecordingAnimator, ScriptedBody};
    use glam::Vec2;

    fn skeleton() -> (Enemy<RecordingAnimator>, ScriptedBody) {
        let mut enemy = Enemy::new(3, "skeleton", EnemyStats::standard(), RecordingAnimator::default());
        let mut body = ScriptedBody::grounded();
        enemy.initialize(&mut body, StepTime::new(0.0, 0.0)).unwrap();
        (enemy, body)
    }

    fn tick(enemy: &mut Enemy<RecordingAnimator>, body: &mut ScriptedBody, steps: usize) {
        for _ in 0..steps {
            enemy.tick(body, StepTime::new(0.1, 0.0)).unwrap();
        }
    }

    #[test]
    fn test_idle_then_patrol() {
        let (mut enemy, mut body) = skeleton();
        assert_eq!(enemy.state(), Some(EnemyStateId::Idle));

        tick(&mut enemy, &mut body, 5);
        assert_eq!(enemy.state(), Some(EnemyStateId::Idle));

        tick(&mut enemy, &mut body, 7);
        assert_eq!(enemy.state(), Some(EnemyStateId::Move));

        tick(&mut enemy, &mut body, 1);
        assert_eq!(body.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_patrol_turns_at_wall() {
        let (mut enemy, mut body) = skeleton();
        tick(&mut enemy, &mut body, 12);
        assert_eq!(enemy.state(), Some(EnemyStateId::Move));

        body.wall_right = true;
        tick(&mut enemy, &mut body, 1);
        assert_eq!(enemy.state(), Some(EnemyStateId::Idle));
        assert_eq!(enemy.facing(), -1.0);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_patrol_turns_at_ledge() {
        let (mut enemy, mut body) = skeleton();
        tick(&mut enemy, &mut body, 12);

        body.grounded = false;
        tick(&mut enemy, &mut body, 1);
        assert_eq!(enemy.state(), Some(EnemyStateId::Idle));
        assert_eq!(enemy.facing(), -1.0);
    }

    #[test]
    fn test_stun_knocks_back_without_flipping() {
        let (mut enemy, mut body) = skeleton();
        enemy.stun(&mut body, StepTime::new(0.0, 0.0)).unwrap();

        assert_eq!(enemy.state(), Some(EnemyStateId::Stunned));
        assert_eq!(body.velocity, Vec2::new(-10.0, 12.0));
        assert_eq!(enemy.facing(), 1.0);
        assert_eq!(enemy.animator().last_clip(), Some("stunned"));
    }

    #[test]
    fn test_stunned_ignores_surroundings_until_timer_ends() {
        let (mut enemy, mut body) = skeleton();
        enemy.stun(&mut body, StepTime::new(0.0, 0.0)).unwrap();

        // No ground, a wall ahead: a patrol would react, a stunned enemy does not
        body.grounded = false;
        body.wall_right = true;
        tick(&mut enemy, &mut body, 5);
        assert_eq!(enemy.state(), Some(EnemyStateId::Stunned));
        assert_eq!(enemy.facing(), 1.0);

        tick(&mut enemy, &mut body, 6);
        assert_eq!(enemy.state(), Some(EnemyStateId::Idle));
    }

    #[test]
    fn test_stun_restarts_when_already_stunned() {
        let (mut enemy, mut body) = skeleton();
        enemy.stun(&mut body, StepTime::new(0.0, 0.0)).unwrap();
        tick(&mut enemy, &mut body, 8);

        enemy.stun(&mut body, StepTime::new(0.0, 0.8)).unwrap();
        assert_eq!(enemy.transition_count(), 2);

        tick(&mut enemy, &mut body, 8);
        assert_eq!(enemy.state(), Some(EnemyStateId::Stunned));
    }

    #[test]
    fn test_stun_blocked_while_not_stunnable() {
        let (mut enemy, mut body) = skeleton();
        enemy.set_stunnable(false);

        assert_eq!(enemy.stun(&mut body, StepTime::new(0.0, 0.0)), Ok(false));
        assert_eq!(enemy.state(), Some(EnemyStateId::Idle));
        assert_eq!(enemy.transition_count(), 0);
        assert_eq!(body.velocity, Vec2::ZERO);

        enemy.set_stunnable(true);
        assert_eq!(enemy.stun(&mut body, StepTime::new(0.0, 0.1)), Ok(true));
        assert_eq!(enemy.state(), Some(EnemyStateId::Stunned));
    }

    #[test]
    fn test_stun_before_initialize_fails() {
        let mut enemy = Enemy::new(1, "skeleton", EnemyStats::standard(), RecordingAnimator::default());
        let mut body = ScriptedBody::grounded();
        assert_eq!(
            enemy.stun(&mut body, StepTime::new(0.0, 0.0)),
            Err(FsmError::NotInitialized)
        );
    }
}
