// Player skills: cooldowns and the objects they spawn

use glam::Vec2;

use super::entity::CharacterId;
use super::stats::SkillStats;

/// A cooldown-gated ability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skill {
    cooldown: f32,
    timer: f32,
}

impl Skill {
    /// Create a skill that is ready immediately
    pub fn new(cooldown: f32) -> Self {
        Self {
            cooldown,
            timer: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer -= dt;
    }

    /// Check if the cooldown has run out
    pub fn can_use(&self) -> bool {
        self.timer <= 0.0
    }

    /// Use the skill if ready, restarting its cooldown
    pub fn try_use(&mut self) -> bool {
        if !self.can_use() {
            return false;
        }
        self.timer = self.cooldown;
        true
    }

    /// Seconds until the skill is ready again
    pub fn remaining(&self) -> f32 {
        self.timer.max(0.0)
    }
}

/// Objects the scene must instantiate on behalf of a controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRequest {
    /// Afterimage left behind where a dash started
    Clone {
        owner: CharacterId,
        position: Vec2,
        facing: f32,
    },
    /// Thrown sword
    Sword {
        owner: CharacterId,
        position: Vec2,
        velocity: Vec2,
        gravity_scale: f32,
    },
}

/// Skills owned by a player
#[derive(Debug, Clone)]
pub struct SkillSet {
    pub clone: Skill,
    pub sword: Skill,
    stats: SkillStats,
}

impl SkillSet {
    pub fn new(stats: SkillStats) -> Self {
        Self {
            clone: Skill::new(stats.clone_cooldown),
            sword: Skill::new(stats.sword_cooldown),
            stats,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.clone.tick(dt);
        self.sword.tick(dt);
    }

    /// Leave a clone behind at `position` if the clone skill is ready
    pub fn create_clone(&mut self, owner: CharacterId, position: Vec2, facing: f32) -> Option<SpawnRequest> {
        self.clone.try_use().then_some(SpawnRequest::Clone {
            owner,
            position,
            facing,
        })
    }

    /// Throw a sword toward `facing` if the sword skill is ready
    pub fn throw_sword(&mut self, owner: CharacterId, position: Vec2, facing: f32) -> Option<SpawnRequest> {
        let launch = self.stats.sword_launch;
        self.sword.try_use().then(|| SpawnRequest::Sword {
            owner,
            position,
            velocity: Vec2::new(launch.x * facing, launch.y),
            gravity_scale: self.stats.sword_gravity,
        })
    }
}

impl Default for SkillSet {
    fn default() -> Self {
        Self::new(SkillStats::default())
    }
}
