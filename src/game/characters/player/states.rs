// Player behaviors

use glam::Vec2;

use super::PlayerContext;
use crate::core::math::opposes;
use crate::engine::input::Action;
use crate::game::characters::combo::ComboTracker;
use crate::game::fsm::{AnimationTrigger, State, StateBase, StateRegistry};

/// Every state a player can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStateId {
    /// Standing still on ground
    Idle,
    /// Running on ground
    Move,
    /// Rising after a jump
    Jump,
    /// Falling or drifting without ground contact
    Air,
    Dash,
    /// Sliding down a wall
    WallSlide,
    /// Kicking off a wall
    WallJump,
    /// One hit of the attack combo
    PrimaryAttack,
}

impl PlayerStateId {
    pub const ALL: [PlayerStateId; 8] = [
        Self::Idle,
        Self::Move,
        Self::Jump,
        Self::Air,
        Self::Dash,
        Self::WallSlide,
        Self::WallJump,
        Self::PrimaryAttack,
    ];

    /// Check if the state belongs to the grounded group
    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Idle | Self::Move)
    }

    /// Check if the state is an airborne one
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jump | Self::Air | Self::WallJump)
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::Jump | Self::Air | Self::WallJump => "jump",
            Self::Dash => "dash",
            Self::WallSlide => "wall_slide",
            Self::PrimaryAttack => "attack",
        }
    }
}

/// Behavior-specific data of a player state
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerBehavior {
    Idle,
    Move,
    Jump,
    Air,
    Dash,
    WallSlide,
    WallJump,
    PrimaryAttack(ComboTracker),
}

impl PlayerBehavior {
    fn for_state(id: PlayerStateId) -> Self {
        match id {
            PlayerStateId::Idle => Self::Idle,
            PlayerStateId::Move => Self::Move,
            PlayerStateId::Jump => Self::Jump,
            PlayerStateId::Air => Self::Air,
            PlayerStateId::Dash => Self::Dash,
            PlayerStateId::WallSlide => Self::WallSlide,
            PlayerStateId::WallJump => Self::WallJump,
            PlayerStateId::PrimaryAttack => Self::PrimaryAttack(ComboTracker::new()),
        }
    }
}

/// A registered player state: shared bookkeeping plus its behavior
#[derive(Debug, Clone)]
pub struct PlayerState {
    id: PlayerStateId,
    base: StateBase,
    behavior: PlayerBehavior,
}

impl PlayerState {
    pub fn new(id: PlayerStateId) -> Self {
        Self {
            id,
            base: StateBase::new(id.animation_name()),
            behavior: PlayerBehavior::for_state(id),
        }
    }

    pub fn id(&self) -> PlayerStateId {
        self.id
    }

    pub fn base(&self) -> &StateBase {
        &self.base
    }

    pub fn behavior(&self) -> &PlayerBehavior {
        &self.behavior
    }
}

impl AnimationTrigger for PlayerState {
    fn animation_finished_trigger(&mut self) {
        self.base.animation_finished_trigger();
    }
}

impl<'a> State<PlayerContext<'a>> for PlayerState {
    type Id = PlayerStateId;

    fn enter(&mut self, ctx: &mut PlayerContext<'a>) {
        ctx.actor.play(self.base.anim_tag());

        let Self { base, behavior, .. } = self;
        match behavior {
            PlayerBehavior::Idle => ctx.actor.zero_velocity(),
            PlayerBehavior::Jump => {
                let vx = ctx.actor.velocity().x;
                ctx.actor.set_velocity(vx, ctx.stats.jump_force);
            }
            PlayerBehavior::Dash => {
                base.set_timer(ctx.stats.dash_duration);
                ctx.create_clone();
            }
            PlayerBehavior::WallJump => {
                base.set_timer(ctx.stats.wall_jump_duration);
                let push = ctx.stats.wall_jump_push * -ctx.actor.facing();
                ctx.actor.set_velocity(push, ctx.stats.jump_force);
            }
            PlayerBehavior::PrimaryAttack(combo) => {
                let index = combo.select(
                    ctx.actor.time.now,
                    ctx.stats.combo_length(),
                    ctx.stats.combo_window,
                );
                ctx.actor
                    .animator
                    .set_parameter("combo_counter", index as i32);

                let lunge = ctx
                    .stats
                    .attack_movement
                    .get(index)
                    .copied()
                    .unwrap_or(Vec2::ZERO);
                let facing = ctx.actor.facing();
                ctx.actor.set_velocity(lunge.x * facing, lunge.y);

                base.set_timer(ctx.stats.attack_commit_time);
            }
            PlayerBehavior::Move | PlayerBehavior::Air | PlayerBehavior::WallSlide => {}
        }
    }

    fn update(&mut self, ctx: &mut PlayerContext<'a>) -> Option<PlayerStateId> {
        self.base.tick(ctx.actor.time.dt);

        let Self { base, behavior, .. } = self;
        match behavior {
            PlayerBehavior::Idle => grounded(ctx).or_else(|| idle(ctx)),
            PlayerBehavior::Move => grounded(ctx).or_else(|| run(ctx)),
            PlayerBehavior::Jump => (ctx.actor.velocity().y < 0.0).then_some(PlayerStateId::Air),
            PlayerBehavior::Air => air(ctx),
            PlayerBehavior::Dash => dash(base, ctx),
            PlayerBehavior::WallSlide => wall_slide(ctx),
            PlayerBehavior::WallJump => {
                if base.timer_expired() {
                    Some(PlayerStateId::Air)
                } else if ctx.actor.is_ground_detected() {
                    Some(PlayerStateId::Idle)
                } else {
                    None
                }
            }
            PlayerBehavior::PrimaryAttack(_) => {
                if base.timer_expired() {
                    ctx.actor.zero_velocity();
                }
                base.trigger_called().then_some(PlayerStateId::Idle)
            }
        }
    }

    fn exit(&mut self, ctx: &mut PlayerContext<'a>) {
        self.base.clear_trigger();

        match &mut self.behavior {
            PlayerBehavior::Dash => {
                let vy = ctx.actor.velocity().y;
                ctx.actor.set_velocity(0.0, vy);
            }
            PlayerBehavior::PrimaryAttack(combo) => {
                ctx.start_busy();
                combo.record(ctx.actor.time.now);
            }
            _ => {}
        }
    }
}

/// Checks shared by idle and move, evaluated before their own
fn grounded(ctx: &mut PlayerContext<'_>) -> Option<PlayerStateId> {
    if ctx.pressed(Action::Attack) {
        return Some(PlayerStateId::PrimaryAttack);
    }
    if !ctx.actor.is_ground_detected() {
        return Some(PlayerStateId::Air);
    }
    if ctx.pressed(Action::Jump) {
        return Some(PlayerStateId::Jump);
    }
    if ctx.pressed(Action::ThrowSword) {
        ctx.throw_sword();
    }
    None
}

fn idle(ctx: &mut PlayerContext<'_>) -> Option<PlayerStateId> {
    let x = ctx.axis_x();

    // Pushing into a wall is not a reason to start running
    if x == ctx.actor.facing() && ctx.actor.is_wall_detected() {
        return None;
    }

    (x != 0.0 && !ctx.status.busy).then_some(PlayerStateId::Move)
}

fn run(ctx: &mut PlayerContext<'_>) -> Option<PlayerStateId> {
    let x = ctx.axis_x();
    let vy = ctx.actor.velocity().y;
    ctx.actor.set_velocity(x * ctx.stats.move_speed, vy);

    (x == 0.0 || ctx.actor.is_wall_detected()).then_some(PlayerStateId::Idle)
}

fn air(ctx: &mut PlayerContext<'_>) -> Option<PlayerStateId> {
    if ctx.actor.is_wall_detected() {
        return Some(PlayerStateId::WallSlide);
    }
    if ctx.actor.is_ground_detected() {
        return Some(PlayerStateId::Idle);
    }

    let x = ctx.axis_x();
    if x != 0.0 {
        let vy = ctx.actor.velocity().y;
        ctx.actor
            .set_velocity(x * ctx.stats.move_speed * ctx.stats.air_control, vy);
    }
    None
}

fn dash(base: &StateBase, ctx: &mut PlayerContext<'_>) -> Option<PlayerStateId> {
    if !ctx.actor.is_ground_detected() && ctx.actor.is_wall_detected() {
        return Some(PlayerStateId::WallSlide);
    }

    let vx = ctx.stats.dash_speed * ctx.status.dash_dir;
    ctx.actor.set_velocity(vx, 0.0);

    base.timer_expired().then_some(PlayerStateId::Idle)
}

fn wall_slide(ctx: &mut PlayerContext<'_>) -> Option<PlayerStateId> {
    if ctx.pressed(Action::Jump) {
        return Some(PlayerStateId::WallJump);
    }

    if opposes(ctx.axis_x(), ctx.actor.facing()) {
        return Some(PlayerStateId::Idle);
    }

    let vy = ctx.actor.velocity().y;
    if ctx.axis_y() < 0.0 {
        ctx.actor.set_velocity(0.0, vy);
    } else {
        ctx.actor
            .set_velocity(0.0, vy * ctx.stats.wall_slide_factor);
    }

    if ctx.actor.is_ground_detected() {
        return Some(PlayerStateId::Idle);
    }
    (!ctx.actor.is_wall_detected()).then_some(PlayerStateId::Air)
}

/// The player's state instances, one per [`PlayerStateId`]
#[derive(Debug, Clone)]
pub struct PlayerStates {
    states: Vec<PlayerState>,
}

impl PlayerStates {
    /// Register every player state
    pub fn standard() -> Self {
        Self::with_states(&PlayerStateId::ALL)
    }

    /// Register only the given states
    pub fn with_states(ids: &[PlayerStateId]) -> Self {
        Self {
            states: ids.iter().copied().map(PlayerState::new).collect(),
        }
    }

    pub fn get(&self, id: PlayerStateId) -> Option<&PlayerState> {
        self.states.iter().find(|state| state.id == id)
    }
}

impl Default for PlayerStates {
    fn default() -> Self {
        Self::standard()
    }
}

impl StateRegistry for PlayerStates {
    type Id = PlayerStateId;
    type State = PlayerState;

    fn get_mut(&mut self, id: PlayerStateId) -> Option<&mut PlayerState> {
        self.states.iter_mut().find(|state| state.id == id)
    }
}
