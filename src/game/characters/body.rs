// Movement and sensing seam between controllers and physics

use glam::Vec2;
use rapier2d::prelude::*;
use thiserror::Error;

use crate::engine::physics::{CollisionGroups, PhysicsWorld, RigidBodyHandle};

/// Errors raised when a sensing query cannot be answered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("No {0} anchor configured")]
    MissingAnchor(&'static str),

    #[error("Rigid body not found in physics world")]
    BodyNotFound,
}

/// The physical body a controller moves and senses through
///
/// Anchors passed to the contact queries are offsets from the body's
/// position, already mirrored for the facing direction by the caller.
pub trait CharacterBody {
    /// World position of the body
    fn position(&self) -> Vec2;

    /// Current linear velocity
    fn velocity(&self) -> Vec2;

    /// Command a new linear velocity
    fn set_velocity(&mut self, velocity: Vec2);

    /// Check for ground within `max_distance` straight below `anchor`
    fn ground_contact(&self, anchor: Vec2, max_distance: f32) -> Result<bool, SensorError>;

    /// Check for a wall within `max_distance` from `anchor` along `direction`
    fn wall_contact(
        &self,
        anchor: Vec2,
        direction: f32,
        max_distance: f32,
    ) -> Result<bool, SensorError>;
}

/// [`CharacterBody`] backed by a rigid body in the rapier world
///
/// Contact rays only hit colliders in the ground group and never the
/// character's own body.
pub struct RapierBody<'w> {
    world: &'w mut PhysicsWorld,
    handle: RigidBodyHandle,
}

impl<'w> RapierBody<'w> {
    pub fn new(world: &'w mut PhysicsWorld, handle: RigidBodyHandle) -> Self {
        Self { world, handle }
    }

    /// Cast a probe ray from `anchor` (relative to the body)
    fn probe(&self, anchor: Vec2, direction: Vector<Real>, max_distance: f32) -> Result<bool, SensorError> {
        let body = self
            .world
            .get_rigid_body(self.handle)
            .ok_or(SensorError::BodyNotFound)?;

        let position = body.translation();
        let origin = vector![position.x + anchor.x, position.y + anchor.y];
        let filter = QueryFilter::default()
            .groups(CollisionGroups::Ground.probe_filter())
            .exclude_rigid_body(self.handle);

        Ok(self
            .world
            .raycast(origin, direction, max_distance, true, filter)
            .is_some())
    }
}

impl CharacterBody for RapierBody<'_> {
    fn position(&self) -> Vec2 {
        self.world
            .get_rigid_body(self.handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
            .unwrap_or_default()
    }

    fn velocity(&self) -> Vec2 {
        self.world
            .get_rigid_body(self.handle)
            .map(|body| Vec2::new(body.linvel().x, body.linvel().y))
            .unwrap_or_default()
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        let Some(body) = self.world.get_rigid_body_mut(self.handle) else {
            return;
        };
        body.set_linvel(vector![velocity.x, velocity.y], true);
    }

    fn ground_contact(&self, anchor: Vec2, max_distance: f32) -> Result<bool, SensorError> {
        self.probe(anchor, vector![0.0, -1.0], max_distance)
    }

    fn wall_contact(
        &self,
        anchor: Vec2,
        direction: f32,
        max_distance: f32,
    ) -> Result<bool, SensorError> {
        self.probe(anchor, vector![direction.signum(), 0.0], max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::presets;

    /// Floor with its top at y = 0 and a wall whose left face is at x = 3
    fn arena() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        let floor = world.add_rigid_body(presets::platform_body(0.0, -0.5));
        world.add_collider(presets::platform_collider(20.0, 1.0), floor);
        let wall = world.add_rigid_body(presets::platform_body(3.5, 2.0));
        world.add_collider(presets::platform_collider(1.0, 4.0), wall);
        world
    }

    fn spawn_character(world: &mut PhysicsWorld, x: f32, y: f32) -> RigidBodyHandle {
        let handle = world.add_rigid_body(presets::character_body(x, y));
        world.add_collider(presets::character_collider(1.0, 2.0), handle);
        world.step();
        handle
    }

    #[test]
    fn test_ground_contact_hits_floor_not_self() {
        let mut world = arena();
        let handle = spawn_character(&mut world, 0.0, 1.0);
        let body = RapierBody::new(&mut world, handle);

        // Feet at y = 0, anchor just above them
        assert_eq!(body.ground_contact(Vec2::new(0.0, -0.9), 0.25), Ok(true));
        // The ray starts inside the character capsule but never hits it
        assert_eq!(body.ground_contact(Vec2::new(0.0, 0.5), 0.25), Ok(false));
    }

    #[test]
    fn test_wall_contact_respects_direction() {
        let mut world = arena();
        let handle = spawn_character(&mut world, 2.4, 1.0);
        let body = RapierBody::new(&mut world, handle);

        assert_eq!(body.wall_contact(Vec2::new(0.4, 0.0), 1.0, 0.3), Ok(true));
        assert_eq!(body.wall_contact(Vec2::new(-0.4, 0.0), -1.0, 0.3), Ok(false));
    }

    #[test]
    fn test_missing_body_reports_error() {
        let mut world = arena();
        let handle = spawn_character(&mut world, 0.0, 1.0);
        world.remove_rigid_body(handle);
        let mut body = RapierBody::new(&mut world, handle);

        assert_eq!(
            body.ground_contact(Vec2::ZERO, 1.0),
            Err(SensorError::BodyNotFound)
        );
        body.set_velocity(Vec2::new(1.0, 0.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_set_velocity_is_read_back() {
        let mut world = arena();
        let handle = spawn_character(&mut world, 0.0, 1.0);
        let mut body = RapierBody::new(&mut world, handle);

        body.set_velocity(Vec2::new(4.0, 0.0));
        assert_eq!(body.velocity(), Vec2::new(4.0, 0.0));
        assert!((body.position().x).abs() < 1e-3);
    }
}
