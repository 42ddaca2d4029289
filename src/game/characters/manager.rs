// Character ownership, per-step driving and removal

use glam::Vec2;
use log::{info, warn};

use super::body::RapierBody;
use super::enemy::Enemy;
use super::entity::{CharacterId, CharacterTask};
use super::player::Player;
use super::skills::SpawnRequest;
use super::stats::{EnemyStats, PlayerStats};
use crate::engine::game_loop::StepTime;
use crate::engine::input::{InputManager, InputQuery, NeutralInput};
use crate::engine::physics::{presets, PhysicsWorld, RigidBodyHandle};
use crate::engine::scheduler::Scheduler;
use crate::game::fsm::FsmError;

#[derive(Debug)]
struct PlayerSlot {
    controller: Player,
    body: RigidBodyHandle,
    /// Input player index, `None` for an uncontrolled player
    input_index: Option<usize>,
}

#[derive(Debug)]
struct EnemySlot {
    controller: Enemy,
    body: RigidBodyHandle,
}

/// Owns every character, their physics bodies and the shared task scheduler
#[derive(Debug, Default)]
pub struct CharacterManager {
    players: Vec<PlayerSlot>,
    enemies: Vec<EnemySlot>,
    scheduler: Scheduler<CharacterTask>,
    spawns: Vec<SpawnRequest>,
    next_id: CharacterId,
}

impl CharacterManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> CharacterId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a player and enter its initial state
    pub fn spawn_player(
        &mut self,
        name: &str,
        stats: PlayerStats,
        input_index: Option<usize>,
        physics: &mut PhysicsWorld,
        spawn: Vec2,
        time: StepTime,
    ) -> Result<CharacterId, FsmError> {
        let id = self.allocate_id();

        let body = physics.add_rigid_body(presets::character_body(spawn.x, spawn.y));
        physics.add_collider(presets::character_collider(stats.width, stats.height), body);

        let mut controller = Player::with_standard_animations(id, name, stats);
        controller.initialize(&mut RapierBody::new(physics, body), &mut self.scheduler, time)?;

        info!("Spawned player {} ({}) at {}", id, name, spawn);
        self.players.push(PlayerSlot {
            controller,
            body,
            input_index,
        });
        Ok(id)
    }

    /// Spawn a skeleton and enter its initial state
    pub fn spawn_enemy(
        &mut self,
        stats: EnemyStats,
        physics: &mut PhysicsWorld,
        spawn: Vec2,
        time: StepTime,
    ) -> Result<CharacterId, FsmError> {
        let id = self.allocate_id();

        let body = physics.add_rigid_body(presets::character_body(spawn.x, spawn.y));
        physics.add_collider(presets::character_collider(stats.width, stats.height), body);

        let mut controller = Enemy::skeleton(id, stats);
        controller.initialize(&mut RapierBody::new(physics, body), time)?;

        info!("Spawned enemy {} at {}", id, spawn);
        self.enemies.push(EnemySlot { controller, body });
        Ok(id)
    }

    /// Fire due tasks, then step every controller
    pub fn update(
        &mut self,
        physics: &mut PhysicsWorld,
        controls: &InputManager,
        time: StepTime,
    ) -> Result<(), FsmError> {
        for due in self.scheduler.advance(time.now) {
            match self
                .players
                .iter_mut()
                .find(|slot| slot.controller.id() == due.owner)
            {
                Some(slot) => slot.controller.apply_task(due.task),
                None => warn!("Dropping {:?} for unknown character {}", due.task, due.owner),
            }
        }

        for slot in &mut self.players {
            let input: &dyn InputQuery = match slot.input_index.and_then(|index| controls.player(index)) {
                Some(player_input) => player_input,
                None => &NeutralInput,
            };

            let mut body = RapierBody::new(physics, slot.body);
            slot.controller
                .tick(&mut body, input, &mut self.scheduler, time)?;
            self.spawns.extend(slot.controller.drain_spawn_requests());
        }

        for slot in &mut self.enemies {
            let mut body = RapierBody::new(physics, slot.body);
            slot.controller.tick(&mut body, time)?;
        }

        Ok(())
    }

    /// Stun an enemy. Returns false if there is no such enemy or it can't be stunned right now.
    pub fn stun_enemy(
        &mut self,
        id: CharacterId,
        physics: &mut PhysicsWorld,
        time: StepTime,
    ) -> Result<bool, FsmError> {
        let Some(slot) = self.enemies.iter_mut().find(|slot| slot.controller.id() == id) else {
            return Ok(false);
        };
        slot.controller
            .stun(&mut RapierBody::new(physics, slot.body), time)
    }

    /// Remove a character, its body and every task it still has pending
    pub fn remove(&mut self, id: CharacterId, physics: &mut PhysicsWorld) -> bool {
        let body = if let Some(pos) = self.players.iter().position(|slot| slot.controller.id() == id) {
            self.players.remove(pos).body
        } else if let Some(pos) = self.enemies.iter().position(|slot| slot.controller.id() == id) {
            self.enemies.remove(pos).body
        } else {
            return false;
        };

        self.scheduler.cancel_owner(id);
        physics.remove_rigid_body(body);
        info!("Removed character {}", id);
        true
    }

    /// Take the spawn requests raised since the last call
    pub fn drain_spawn_requests(&mut self) -> Vec<SpawnRequest> {
        std::mem::take(&mut self.spawns)
    }

    /// Get a player by ID
    pub fn player(&self, id: CharacterId) -> Option<&Player> {
        self.players
            .iter()
            .map(|slot| &slot.controller)
            .find(|player| player.id() == id)
    }

    /// Get an enemy by ID
    pub fn enemy(&self, id: CharacterId) -> Option<&Enemy> {
        self.enemies
            .iter()
            .map(|slot| &slot.controller)
            .find(|enemy| enemy.id() == id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().map(|slot| &slot.controller)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().map(|slot| &slot.controller)
    }

    /// Total number of characters
    pub fn count(&self) -> usize {
        self.players.len() + self.enemies.len()
    }

    pub fn scheduler(&self) -> &Scheduler<CharacterTask> {
        &self.scheduler
    }
}
