// Skeleton behaviors

use glam::Vec2;

use super::EnemyContext;
use crate::game::fsm::{AnimationTrigger, State, StateBase, StateRegistry};

/// Every state an enemy can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyStateId {
    Idle,
    /// Patrolling in the facing direction
    Move,
    /// Knocked back by a hit, ignoring everything until it wears off
    Stunned,
}

impl EnemyStateId {
    pub const ALL: [EnemyStateId; 3] = [Self::Idle, Self::Move, Self::Stunned];

    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::Stunned => "stunned",
        }
    }
}

/// A registered enemy state
#[derive(Debug, Clone)]
pub struct EnemyState {
    id: EnemyStateId,
    base: StateBase,
}

impl EnemyState {
    pub fn new(id: EnemyStateId) -> Self {
        Self {
            id,
            base: StateBase::new(id.animation_name()),
        }
    }

    pub fn id(&self) -> EnemyStateId {
        self.id
    }

    pub fn base(&self) -> &StateBase {
        &self.base
    }
}

impl AnimationTrigger for EnemyState {
    fn animation_finished_trigger(&mut self) {
        self.base.animation_finished_trigger();
    }
}

impl<'a> State<EnemyContext<'a>> for EnemyState {
    type Id = EnemyStateId;

    fn enter(&mut self, ctx: &mut EnemyContext<'a>) {
        ctx.actor.play(self.base.anim_tag());

        match self.id {
            EnemyStateId::Idle => {
                self.base.set_timer(ctx.stats.idle_time);
                ctx.actor.zero_velocity();
            }
            EnemyStateId::Move => {}
            EnemyStateId::Stunned => {
                self.base.set_timer(ctx.stats.stun_duration);
                let knockback = ctx.stats.stun_direction;
                let facing = ctx.actor.facing();
                ctx.actor.push(Vec2::new(-facing * knockback.x, knockback.y));
            }
        }
    }

    fn update(&mut self, ctx: &mut EnemyContext<'a>) -> Option<EnemyStateId> {
        self.base.tick(ctx.actor.time.dt);

        match self.id {
            EnemyStateId::Idle => self.base.timer_expired().then_some(EnemyStateId::Move),
            EnemyStateId::Move => {
                let vx = ctx.stats.move_speed * ctx.actor.facing();
                let vy = ctx.actor.velocity().y;
                ctx.actor.set_velocity(vx, vy);

                // Turn around at walls and ledges
                if ctx.actor.is_wall_detected() || !ctx.actor.is_ground_detected() {
                    ctx.actor.flip();
                    return Some(EnemyStateId::Idle);
                }
                None
            }
            EnemyStateId::Stunned => self.base.timer_expired().then_some(EnemyStateId::Idle),
        }
    }

    fn exit(&mut self, _ctx: &mut EnemyContext<'a>) {
        self.base.clear_trigger();
    }
}

/// The enemy's state instances, one per [`EnemyStateId`]
#[derive(Debug, Clone)]
pub struct EnemyStates {
    states: Vec<EnemyState>,
}

impl EnemyStates {
    pub fn standard() -> Self {
        Self {
            states: EnemyStateId::ALL.into_iter().map(EnemyState::new).collect(),
        }
    }
}

impl Default for EnemyStates {
    fn default() -> Self {
        Self::standard()
    }
}

impl StateRegistry for EnemyStates {
    type Id = EnemyStateId;
    type State = EnemyState;

    fn get_mut(&mut self, id: EnemyStateId) -> Option<&mut EnemyState> {
        self.states.iter_mut().find(|state| state.id == id)
    }
}
