//! Nightwalk locomotion core
//!
//! First-person movement and camera feel for a short horror walk: ground
//! movement with walk/sprint/crouch, multi-jump with an air slam, a decaying
//! dash on cooldown, and camera tilt, head-bob, landing bounce and FOV pulse.
//! A pursuer closes in and a proximity scare freezes the player.
//!
//! # Architecture
//!
//! - **Input**: keyboard and mouse state turned into action events
//! - **Player**: consumes events, steps movement against a [`CollisionOracle`]
//!   and produces a [`CameraPose`] each frame
//! - **Game**: owns the session and drives player, pursuer, scare and lights
//!
//! Side effects the host must perform (audio, cursor release, fade overlay)
//! come out as cue queues drained once per frame.

pub mod camera;
pub mod collision;
pub mod config;
pub mod dash;
pub mod game;
pub mod input;
pub mod level;
pub mod light;
pub mod locomotion;
pub mod player;
pub mod pursuer;
pub mod scare;
pub mod vertical;

pub use camera::{CameraFeelState, CameraPose, CameraUniform, LandingBounce};
pub use collision::{CollisionOracle, FlatGround, MoveOutcome, PhysicsWorld};
pub use config::{ConfigError, FlickerConfig, GameConfig, PlayerConfig, PursuerConfig, ScareConfig};
pub use dash::{DashController, DashPhase, DashRun};
pub use game::{GameCue, GameState};
pub use input::{ActionEdge, InputEvent, InputState};
pub use level::Level;
pub use locomotion::{LocomotionFlags, LocomotionSnapshot, MovementMode};
pub use player::{Player, PlayerCue};
pub use pursuer::Pursuer;
pub use scare::{ScareCue, ScareTrigger, ScreenFade};
