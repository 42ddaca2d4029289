use anyhow::{Context, Result};
use glam::Vec2;
use log::info;
use winit::event::{ElementState, MouseButton};

use rusted_fsm::engine::game_loop::{GameLoop, FIXED_TIMESTEP_DURATION};
use rusted_fsm::engine::input::{Action, InputManager};
use rusted_fsm::engine::physics::{presets, PhysicsWorld};
use rusted_fsm::game::characters::{CharacterManager, EnemyStats, PlayerStats, SpawnRequest};

/// Length of the scripted demo in seconds
const DEMO_LENGTH: f32 = 4.0;

/// One scripted input change
#[derive(Debug, Clone, Copy)]
enum Cue {
    Press(Action),
    Release(Action),
    Click(MouseButton),
    StunEnemy,
}

/// Input timeline replayed by the demo, in seconds
const SCRIPT: &[(f32, Cue)] = &[
    (0.3, Cue::Press(Action::MoveRight)),
    (0.9, Cue::Release(Action::MoveRight)),
    // Three quick attacks through the mouse binding walk the combo
    (1.0, Cue::Click(MouseButton::Left)),
    (1.5, Cue::Click(MouseButton::Left)),
    (2.1, Cue::Click(MouseButton::Left)),
    (2.4, Cue::Press(Action::Dash)),
    (2.45, Cue::Release(Action::Dash)),
    (2.8, Cue::Press(Action::Jump)),
    (2.85, Cue::Release(Action::Jump)),
    (3.3, Cue::Click(MouseButton::Right)),
    (3.5, Cue::StunEnemy),
];

/// Floor across the arena and a wall on the right
fn build_arena(physics: &mut PhysicsWorld) {
    let floor = physics.add_rigid_body(presets::platform_body(0.0, -0.5));
    physics.add_collider(presets::platform_collider(40.0, 1.0), floor);

    let wall = physics.add_rigid_body(presets::platform_body(12.5, 4.0));
    physics.add_collider(presets::platform_collider(1.0, 8.0), wall);
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted FSM demo...");

    let mut physics = PhysicsWorld::new();
    build_arena(&mut physics);

    let mut game_loop = GameLoop::new();
    let mut input = InputManager::new(1);
    let mut characters = CharacterManager::new();

    let start = game_loop.step();
    let hero = characters
        .spawn_player("hero", PlayerStats::standard(), Some(0), &mut physics, Vec2::new(0.0, 1.0), start)
        .context("Failed to spawn player")?;
    let skeleton = characters
        .spawn_enemy(EnemyStats::standard(), &mut physics, Vec2::new(6.0, 1.0), start)
        .context("Failed to spawn skeleton")?;
    physics.step();

    let mut cues = SCRIPT.iter().peekable();
    let mut last_states = (None, None);

    while game_loop.now() < DEMO_LENGTH {
        for _ in 0..game_loop.begin_frame(FIXED_TIMESTEP_DURATION) {
            let time = game_loop.step();

            while let Some((_, cue)) = cues.next_if(|(at, _)| *at <= time.now) {
                match *cue {
                    Cue::Press(action) => {
                        if let Some(player) = input.player_mut(0) {
                            player.press(action);
                        }
                    }
                    Cue::Release(action) => {
                        if let Some(player) = input.player_mut(0) {
                            player.release(action);
                        }
                    }
                    Cue::Click(button) => {
                        input.process_mouse_button(button, ElementState::Pressed);
                        input.process_mouse_button(button, ElementState::Released);
                    }
                    Cue::StunEnemy => {
                        characters
                            .stun_enemy(skeleton, &mut physics, time)
                            .context("Failed to stun skeleton")?;
                    }
                }
            }

            characters
                .update(&mut physics, &input, time)
                .context("Character update failed")?;
            physics.step();
            input.update();

            for request in characters.drain_spawn_requests() {
                match request {
                    SpawnRequest::Clone { position, .. } => {
                        info!("t={:.2} clone spawned at {}", time.now, position)
                    }
                    SpawnRequest::Sword { velocity, .. } => {
                        info!("t={:.2} sword thrown with velocity {}", time.now, velocity)
                    }
                }
            }

            let states = (
                characters.player(hero).and_then(|player| player.state()),
                characters.enemy(skeleton).and_then(|enemy| enemy.state()),
            );
            if states != last_states {
                info!("t={:.2} hero: {:?}, skeleton: {:?}", time.now, states.0, states.1);
                last_states = states;
            }
        }
    }

    if let Some(player) = characters.player(hero) {
        info!(
            "Hero finished in {:?} after {} transitions (combo at {})",
            player.state(),
            player.transition_count(),
            player.combo_index()
        );
    }

    characters.remove(skeleton, &mut physics);
    characters.remove(hero, &mut physics);
    info!("Demo finished after {} steps", game_loop.step_count());

    Ok(())
}
