//! Headless walk-through: scripted keyboard and mouse input against the test
//! chamber at a fixed 60 Hz until the scare fades to black.
//! Usage: nightwalk [config.json]

use anyhow::Context;
use nightwalk::{GameConfig, GameCue, GameState, InputState, Level};
use winit::keyboard::KeyCode;

const DT: f32 = 1.0 / 60.0;
const MAX_SECONDS: f32 = 30.0;

enum ScriptAction {
    Press(KeyCode),
    Release(KeyCode),
    Mouse(f32, f32),
}

/// (time in seconds, action), sorted by time.
fn script() -> Vec<(f32, ScriptAction)> {
    use ScriptAction::*;
    vec![
        (0.0, Press(KeyCode::KeyW)),
        (0.2, Press(KeyCode::ShiftLeft)),
        (0.4, Press(KeyCode::Space)),
        (0.45, Release(KeyCode::Space)),
        (0.6, Press(KeyCode::Space)),
        (0.65, Release(KeyCode::Space)),
        (0.8, Press(KeyCode::ControlLeft)),
        (1.0, Release(KeyCode::ControlLeft)),
        (1.0, Release(KeyCode::ShiftLeft)),
        (1.1, Mouse(30.0, -10.0)),
        (1.2, Mouse(-30.0, 10.0)),
        (1.3, Press(KeyCode::KeyQ)),
        (1.35, Release(KeyCode::KeyQ)),
        (1.5, Press(KeyCode::KeyA)),
        (1.8, Release(KeyCode::KeyA)),
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading config from {path}"))?,
        None => GameConfig::default(),
    };

    let level = Level::test_chamber();
    let mut game = GameState::new(&level, config);
    let mut input = InputState::new();

    let script = script();
    let mut next = 0;
    let mut frame: u32 = 0;

    while !game.is_over() && game.elapsed() < MAX_SECONDS {
        while let Some((at, action)) = script.get(next)
            && *at <= game.elapsed()
        {
            match action {
                ScriptAction::Press(key) => input.handle_key_press(*key),
                ScriptAction::Release(key) => input.handle_key_release(*key),
                ScriptAction::Mouse(dx, dy) => input.handle_mouse_move(*dx, *dy),
            }
            next += 1;
        }

        let pose = game.step(DT, &mut input);

        for cue in game.take_cues() {
            match cue {
                GameCue::Player(cue) => log::info!("[{:.2}s] player: {:?}", game.elapsed(), cue),
                GameCue::Scare(cue) => log::info!("[{:.2}s] scare: {:?}", game.elapsed(), cue),
            }
        }

        if frame % 30 == 0 {
            let player = &game.player;
            log::info!(
                "[{:.2}s] mode {:?} pos {:.2} grounded {} fov {:.1} pursuer {:.2}",
                game.elapsed(),
                player.snapshot().mode(),
                player.position(),
                player.is_grounded(),
                pose.fov_degrees,
                game.pursuer.position
            );
        }
        frame += 1;
    }

    if game.is_over() {
        log::info!("Caught after {:.2}s", game.elapsed());
    } else {
        log::warn!("Script ran out after {:.2}s without a scare", game.elapsed());
    }
    Ok(())
}
