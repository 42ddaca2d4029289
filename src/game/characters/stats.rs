// Character tuning values
// Balance lives here, not in the states: states read these per step

use glam::Vec2;

/// Where a character looks for ground and walls
///
/// Anchors are offsets from the body's position, authored for a character
/// facing right. The x component is mirrored when the character faces left.
/// A missing anchor makes the matching query fail instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorProbes {
    /// Start of the downward ground ray
    pub ground_anchor: Option<Vec2>,
    /// Length of the ground ray
    pub ground_distance: f32,
    /// Start of the forward wall ray
    pub wall_anchor: Option<Vec2>,
    /// Length of the wall ray
    pub wall_distance: f32,
}

impl SensorProbes {
    /// Ground anchor mirrored for `facing`
    pub fn ground_anchor(&self, facing: f32) -> Option<Vec2> {
        self.ground_anchor.map(|anchor| mirror(anchor, facing))
    }

    /// Wall anchor mirrored for `facing`
    pub fn wall_anchor(&self, facing: f32) -> Option<Vec2> {
        self.wall_anchor.map(|anchor| mirror(anchor, facing))
    }
}

fn mirror(anchor: Vec2, facing: f32) -> Vec2 {
    Vec2::new(anchor.x * facing.signum(), anchor.y)
}

/// Player movement, combat and sensing configuration
#[derive(Debug, Clone)]
pub struct PlayerStats {
    // Movement
    /// Horizontal ground speed (units/second)
    pub move_speed: f32,
    /// Vertical velocity applied by a jump
    pub jump_force: f32,
    /// Air control multiplier (0.0 = no air control, 1.0 = full control)
    pub air_control: f32,

    // Dash
    pub dash_speed: f32,
    /// How long a dash lasts in seconds
    pub dash_duration: f32,
    /// Minimum time between dashes in seconds
    pub dash_cooldown: f32,

    // Walls
    /// Fall speed multiplier applied each step while sliding
    pub wall_slide_factor: f32,
    /// Horizontal push away from the wall on a wall jump
    pub wall_jump_push: f32,
    /// How long the wall jump overrides input
    pub wall_jump_duration: f32,

    // Combat
    /// Lunge velocity per combo variant (x is scaled by facing)
    pub attack_movement: Vec<Vec2>,
    /// Seconds after an attack during which the next one continues the combo
    pub combo_window: f32,
    /// Seconds the attack lunge lasts before velocity is zeroed
    pub attack_commit_time: f32,
    /// Seconds the player stays busy after an attack ends
    pub busy_duration: f32,

    // Dimensions (for physics collider)
    pub width: f32,
    pub height: f32,

    pub probes: SensorProbes,
}

/// Lunge of each attack in the default three-hit combo
pub const BASE_ATTACK_MOVEMENT: [Vec2; 3] = [
    Vec2::new(3.0, 1.5),
    Vec2::new(1.0, 2.5),
    Vec2::new(4.0, 1.5),
];

/// Probe layout for the 1x2 player capsule
pub const PLAYER_PROBES: SensorProbes = SensorProbes {
    ground_anchor: Some(Vec2::new(0.0, -0.9)),
    ground_distance: 0.25,
    wall_anchor: Some(Vec2::new(0.4, 0.0)),
    wall_distance: 0.3,
};

impl PlayerStats {
    /// Get the standard player tuning
    pub fn standard() -> Self {
        Self {
            move_speed: 12.0,
            jump_force: 12.0,
            air_control: 0.8,

            dash_speed: 25.0,
            dash_duration: 0.2,
            dash_cooldown: 1.0,

            wall_slide_factor: 0.7,
            wall_jump_push: 5.0,
            wall_jump_duration: 0.4,

            attack_movement: BASE_ATTACK_MOVEMENT.to_vec(),
            combo_window: 1.0,
            attack_commit_time: 0.1,
            busy_duration: 0.2,

            width: 1.0,
            height: 2.0,

            probes: PLAYER_PROBES,
        }
    }

    /// Number of attack variants in the combo
    pub fn combo_length(&self) -> usize {
        self.attack_movement.len()
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::standard()
    }
}

/// Enemy (skeleton) configuration
#[derive(Debug, Clone)]
pub struct EnemyStats {
    /// Patrol speed (units/second)
    pub move_speed: f32,
    /// Seconds spent idling between patrol legs
    pub idle_time: f32,
    /// Seconds a hit keeps the enemy stunned
    pub stun_duration: f32,
    /// Knockback applied on stun, x away from the facing direction
    pub stun_direction: Vec2,

    pub width: f32,
    pub height: f32,

    pub probes: SensorProbes,
}

/// Standard skeleton tuning
///
/// The ground anchor sits ahead of the feet so a patrol turns around at
/// ledges.
pub const BASE_ENEMY_STATS: EnemyStats = EnemyStats {
    move_speed: 2.0,
    idle_time: 1.0,
    stun_duration: 1.0,
    stun_direction: Vec2::new(10.0, 12.0),

    width: 1.0,
    height: 2.0,

    probes: SensorProbes {
        ground_anchor: Some(Vec2::new(0.6, -0.9)),
        ground_distance: 0.4,
        wall_anchor: Some(Vec2::new(0.4, 0.0)),
        wall_distance: 0.3,
    },
};

impl EnemyStats {
    pub fn standard() -> Self {
        BASE_ENEMY_STATS
    }
}

impl Default for EnemyStats {
    fn default() -> Self {
        BASE_ENEMY_STATS
    }
}

/// Cooldowns and launch parameters of the player's skills
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillStats {
    /// Seconds between clones left behind by a dash
    pub clone_cooldown: f32,
    /// Seconds between sword throws
    pub sword_cooldown: f32,
    /// Launch velocity of a thrown sword (x is scaled by facing)
    pub sword_launch: Vec2,
    /// Gravity scale applied to a thrown sword
    pub sword_gravity: f32,
}

pub const BASE_SKILL_STATS: SkillStats = SkillStats {
    clone_cooldown: 1.0,
    sword_cooldown: 2.0,
    sword_launch: Vec2::new(15.0, 8.0),
    sword_gravity: 4.5,
};

impl Default for SkillStats {
    fn default() -> Self {
        BASE_SKILL_STATS
    }
}
