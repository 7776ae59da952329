use web_time::Instant;

use crate::camera::CameraPose;
use crate::collision::{CollisionOracle, FlatGround, PhysicsWorld};
use crate::config::{GameConfig, MAX_FRAME_DT};
use crate::input::InputState;
use crate::level::Level;
use crate::light::FlickeringLight;
use crate::player::{Player, PlayerCue};
use crate::pursuer::Pursuer;
use crate::scare::{ScareCue, ScareTrigger};

/// Anything the host should react to this frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameCue {
    Player(PlayerCue),
    Scare(ScareCue),
}

/// Session context: one player, one pursuer carrying the scare trigger, the
/// lights, and the collision world.
pub struct GameState {
    pub player: Player,
    pub pursuer: Pursuer,
    pub scare: ScareTrigger,
    pub lights: Vec<FlickeringLight>,
    world: Box<dyn CollisionOracle>,
    cues: Vec<GameCue>,
    elapsed: f32,
    last_update: Instant,
}

impl GameState {
    pub fn new(level: &Level, config: GameConfig) -> Self {
        let world: Box<dyn CollisionOracle> =
            match PhysicsWorld::new(&level.collision_vertices, &level.collision_indices) {
                Some(world) => Box::new(world),
                None => {
                    log::warn!("Level has no usable collision mesh, using a flat floor");
                    Box::new(FlatGround::default())
                }
            };
        Self::with_world(level, config, world)
    }

    pub fn with_world(level: &Level, config: GameConfig, world: Box<dyn CollisionOracle>) -> Self {
        let lights = level
            .light_positions
            .iter()
            .enumerate()
            .map(|(i, &p)| FlickeringLight::new(p, config.flicker.clone(), i as u64 + 1))
            .collect();

        log::info!(
            "Session start: player at {:?}, pursuer at {:?}",
            level.player_spawn,
            level.pursuer_spawn
        );

        Self {
            player: Player::new(level.player_spawn, config.player),
            pursuer: Pursuer::new(level.pursuer_spawn, &config.pursuer),
            scare: ScareTrigger::new(&config.scare),
            lights,
            world,
            cues: Vec::new(),
            elapsed: 0.0,
            last_update: Instant::now(),
        }
    }

    /// Wall-clock driven frame.
    pub fn update(&mut self, input: &mut InputState) -> CameraPose {
        let now = Instant::now();
        let dt = (now - self.last_update).as_secs_f32().min(MAX_FRAME_DT);
        self.last_update = now;
        self.step(dt, input)
    }

    /// One simulation step: input, player, pursuer, scare, lights.
    pub fn step(&mut self, dt: f32, input: &mut InputState) -> CameraPose {
        for event in input.drain_events() {
            self.player.handle_event(event);
        }

        let pose = self.player.step(dt, self.world.as_ref());

        self.pursuer.step(dt, self.player.position());
        self.scare.update(dt, &mut self.player, &mut self.pursuer);

        for light in &mut self.lights {
            light.update(dt);
        }

        for cue in self.player.take_cues() {
            if cue == PlayerCue::ReleaseCursor {
                input.cursor_grabbed = false;
            }
            self.cues.push(GameCue::Player(cue));
        }
        self.cues
            .extend(self.scare.take_cues().into_iter().map(GameCue::Scare));

        self.elapsed += dt;
        pose
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn take_cues(&mut self) -> Vec<GameCue> {
        std::mem::take(&mut self.cues)
    }

    /// True once the scare has fired and the screen is fully black.
    pub fn is_over(&self) -> bool {
        self.scare.fade().is_some_and(|f| f.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_walking_into_pursuer_ends_in_scare() {
        let level = Level::test_chamber();
        let mut game = GameState::new(&level, GameConfig::default());
        let mut input = InputState::new();

        input.handle_key_press(KeyCode::KeyW);
        let mut cues = Vec::new();
        for _ in 0..(30.0 / DT) as usize {
            game.step(DT, &mut input);
            cues.extend(game.take_cues());
            if game.is_over() {
                break;
            }
        }

        assert!(game.is_over());
        assert!(game.player.is_movement_disabled());
        assert!(game.pursuer.is_halted());
        assert!(!input.cursor_grabbed);
        assert!(cues.contains(&GameCue::Scare(ScareCue::PlayScream)));
        assert!(cues.contains(&GameCue::Player(PlayerCue::ReleaseCursor)));
        assert!(cues.contains(&GameCue::Scare(ScareCue::FadeFinished)));

        // Frozen in place after the scare.
        let frozen = game.player.position();
        input.handle_key_press(KeyCode::KeyD);
        input.handle_mouse_move(40.0, 0.0);
        for _ in 0..30 {
            game.step(DT, &mut input);
        }
        assert_eq!(game.player.position(), frozen);
    }

    #[test]
    fn test_mesh_world_supports_the_player() {
        let level = Level::test_chamber();
        let mut game = GameState::new(&level, GameConfig::default());
        let mut input = InputState::new();
        for _ in 0..30 {
            game.step(DT, &mut input);
        }
        assert!(game.player.is_grounded());
        assert!(game.player.position().y.abs() < 1e-3);
    }

    #[test]
    fn test_empty_level_falls_back_to_flat_floor() {
        let mut level = Level::test_chamber();
        level.collision_vertices.clear();
        level.collision_indices.clear();
        let mut game = GameState::new(&level, GameConfig::default());
        let mut input = InputState::new();
        for _ in 0..10 {
            game.step(DT, &mut input);
        }
        assert!(game.player.is_grounded());
    }

    #[test]
    fn test_wall_clock_update_clamps_dt() {
        let level = Level::test_chamber();
        let mut game = GameState::with_world(&level, GameConfig::default(), Box::new(FlatGround::default()));
        let mut input = InputState::new();
        game.update(&mut input);
        assert!(game.elapsed() <= MAX_FRAME_DT);
    }

    #[test]
    fn test_input_events_reach_player() {
        let level = Level::test_chamber();
        let mut game = GameState::with_world(&level, GameConfig::default(), Box::new(FlatGround::default()));
        let mut input = InputState::new();
        game.step(DT, &mut input);
        game.step(DT, &mut input);

        input.handle_key_press(KeyCode::ShiftLeft);
        game.step(DT, &mut input);
        assert!(game.player.flags().sprinting);

        input.handle_key_press(KeyCode::Space);
        game.step(DT, &mut input);
        assert!(!game.player.is_grounded());
        assert!(game.take_cues().contains(&GameCue::Player(PlayerCue::Jumped)));
    }
}
