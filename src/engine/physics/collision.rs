use rapier2d::prelude::*;

/// Collision groups for filtering what objects can collide with each other
///
/// `Ground` doubles as the layer mask for ground and wall probes: only
/// colliders in that group count as something a character can stand on or
/// slide against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Player and enemy characters
    Character = 0b0000_0001,

    /// Static floors, platforms and walls
    Ground = 0b0000_0010,

    /// Spawned skill objects (clones, thrown swords)
    SkillObject = 0b0000_0100,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Characters pass through each other but stand on ground
            CollisionGroups::Character => Group::from_bits_truncate(CollisionGroups::Ground as u32),

            // Ground blocks everything
            CollisionGroups::Ground => Group::ALL,

            // Skill objects hit ground and characters
            CollisionGroups::SkillObject => Group::from_bits_truncate(
                CollisionGroups::Ground as u32 | CollisionGroups::Character as u32,
            ),
        };

        InteractionGroups::new(memberships, filter)
    }

    /// Groups used to filter sensing raycasts (only hit `self`)
    pub fn probe_filter(self) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, Group::from_bits_truncate(self as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_groups_bits() {
        let groups = [
            CollisionGroups::Character,
            CollisionGroups::Ground,
            CollisionGroups::SkillObject,
        ];

        for (i, group1) in groups.iter().enumerate() {
            for (j, group2) in groups.iter().enumerate() {
                if i != j {
                    assert_ne!(*group1 as u32, *group2 as u32, "Groups must have unique bits");
                }
            }
        }
    }

    #[test]
    fn test_characters_do_not_collide_with_each_other() {
        let groups = CollisionGroups::Character.to_interaction_groups();
        assert!(!groups.filter.contains(groups.memberships));
    }

    #[test]
    fn test_ground_probe_only_hits_ground() {
        let probe = CollisionGroups::Ground.probe_filter();
        let character = Group::from_bits_truncate(CollisionGroups::Character as u32);
        let ground = Group::from_bits_truncate(CollisionGroups::Ground as u32);

        assert!(probe.filter.contains(ground));
        assert!(!probe.filter.contains(character));
    }
}
