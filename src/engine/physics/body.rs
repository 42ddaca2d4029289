use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Common rigid body and collider configurations for the arena
pub mod presets {
    use super::*;

    /// Character body (dynamic, rotation locked, never sleeps)
    ///
    /// Velocity is commanded directly by the controller each step, so no
    /// damping is applied.
    pub fn character_body(x: Real, y: Real) -> RigidBody {
        RigidBodyBuilder::dynamic()
            .translation(vector![x, y])
            .lock_rotations()
            .gravity_scale(1.0)
            .can_sleep(false)
            .build()
    }

    /// Character collider (capsule shape spanning `width` x `height`)
    pub fn character_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        // Subtract radius to get capsule half-height
        let half_height = (height / 2.0 - radius).max(0.0);

        ColliderBuilder::capsule_y(half_height, radius)
            .collision_groups(CollisionGroups::Character.to_interaction_groups())
            .friction(0.0)
            .restitution(0.0)
            .density(1.0)
            .build()
    }

    /// Platform or wall body (fixed/static)
    pub fn platform_body(x: Real, y: Real) -> RigidBody {
        RigidBodyBuilder::fixed().translation(vector![x, y]).build()
    }

    /// Platform or wall collider (box shape), sensed as ground
    pub fn platform_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Ground.to_interaction_groups())
            .friction(0.3)
            .restitution(0.0)
            .build()
    }
}
