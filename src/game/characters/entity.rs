// Fields and primitives shared by every character controller

use glam::Vec2;
use log::warn;

use super::animation::Animator;
use super::body::{CharacterBody, SensorError};
use super::stats::SensorProbes;
use crate::engine::game_loop::StepTime;
use crate::engine::scheduler::OwnerId;

/// Unique identifier for a character
pub type CharacterId = OwnerId;

/// Deferred work a controller hands to the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterTask {
    /// End the post-attack busy window
    ClearBusy,
}

/// Identity, facing and sensing layout of a character
///
/// Facing persists across state transitions; only `flip` changes it.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: CharacterId,
    /// Label used in log output
    pub name: String,
    /// Direction the character is facing (1 = right, -1 = left)
    facing: f32,
    pub probes: SensorProbes,
}

impl Entity {
    pub fn new(id: CharacterId, name: &str, probes: SensorProbes) -> Self {
        Self {
            id,
            name: name.to_string(),
            facing: 1.0,
            probes,
        }
    }

    /// Facing direction as +1 or -1
    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Check if the character is facing right
    pub fn facing_right(&self) -> bool {
        self.facing > 0.0
    }
}

/// One step's view of a character: its entity plus the collaborators it
/// moves, senses and animates through
pub struct Actor<'a> {
    pub entity: &'a mut Entity,
    pub body: &'a mut dyn CharacterBody,
    pub animator: &'a mut dyn Animator,
    pub time: StepTime,
}

impl<'a> Actor<'a> {
    pub fn new(
        entity: &'a mut Entity,
        body: &'a mut dyn CharacterBody,
        animator: &'a mut dyn Animator,
        time: StepTime,
    ) -> Self {
        Self {
            entity,
            body,
            animator,
            time,
        }
    }

    pub fn facing(&self) -> f32 {
        self.entity.facing
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity()
    }

    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    /// Turn around
    pub fn flip(&mut self) {
        self.entity.facing = -self.entity.facing;
        self.animator.set_flip_horizontal(!self.entity.facing_right());
    }

    /// Turn to face the direction of a horizontal velocity (0 keeps facing)
    pub fn flip_toward(&mut self, vx: f32) {
        if (vx > 0.0 && !self.entity.facing_right()) || (vx < 0.0 && self.entity.facing_right()) {
            self.flip();
        }
    }

    /// Command a velocity and face the way it moves
    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.body.set_velocity(Vec2::new(vx, vy));
        self.flip_toward(vx);
    }

    pub fn zero_velocity(&mut self) {
        self.body.set_velocity(Vec2::ZERO);
    }

    /// Command a velocity without touching facing (knockback)
    pub fn push(&mut self, velocity: Vec2) {
        self.body.set_velocity(velocity);
    }

    pub fn play(&mut self, tag: &str) {
        self.animator.play_clip(tag);
    }

    /// Ground below the ground anchor; a failed probe counts as no ground
    pub fn is_ground_detected(&self) -> bool {
        let result = self
            .entity
            .probes
            .ground_anchor(self.entity.facing)
            .ok_or(SensorError::MissingAnchor("ground"))
            .and_then(|anchor| {
                self.body
                    .ground_contact(anchor, self.entity.probes.ground_distance)
            });
        self.sensed("ground", result)
    }

    /// Wall ahead of the wall anchor in the facing direction; a failed probe
    /// counts as no wall
    pub fn is_wall_detected(&self) -> bool {
        let facing = self.entity.facing;
        let result = self
            .entity
            .probes
            .wall_anchor(facing)
            .ok_or(SensorError::MissingAnchor("wall"))
            .and_then(|anchor| {
                self.body
                    .wall_contact(anchor, facing, self.entity.probes.wall_distance)
            });
        self.sensed("wall", result)
    }

    fn sensed(&self, what: &str, result: Result<bool, SensorError>) -> bool {
        match result {
            Ok(hit) => hit,
            Err(err) => {
                warn!("{}: {} check failed: {}", self.entity.name, what, err);
                false
            }
        }
    }
}
