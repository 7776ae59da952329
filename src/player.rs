use glam::{Vec2, Vec3};

use crate::camera::{CameraFeelState, CameraPose, forward_axis, right_axis};
use crate::collision::CollisionOracle;
use crate::config::PlayerConfig;
use crate::dash::DashController;
use crate::input::{ActionEdge, InputEvent};
use crate::locomotion::{LocomotionFlags, LocomotionSnapshot};
use crate::vertical::VerticalMotion;

/// Signals for collaborators the player does not own (audio, cursor, FX).
/// Drained by the host once per frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlayerCue {
    StopFootsteps,
    ReleaseCursor,
    Jumped,
    Landed,
    Slammed,
    DashStarted,
    DashEnded,
}

/// First-person body: locomotion state, input handling and the per-step
/// simulation. State changes only inside [`Player::step`], the input
/// handlers, and [`Player::disable_movement`].
pub struct Player {
    config: PlayerConfig,
    position: Vec3,
    /// Degrees, positive turns right.
    yaw: f32,
    vertical: VerticalMotion,
    move_input: Vec2,
    look_input: Vec2,
    grounded: bool,
    was_grounded: bool,
    flags: LocomotionFlags,
    height: f32,
    dash: DashController,
    camera: CameraFeelState,
    clock: f32,
    cues: Vec<PlayerCue>,
}

impl Player {
    pub fn new(spawn_position: Vec3, config: PlayerConfig) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("Player created with {err}");
        }
        Self {
            position: spawn_position,
            yaw: 0.0,
            vertical: VerticalMotion::new(),
            move_input: Vec2::ZERO,
            look_input: Vec2::ZERO,
            grounded: false,
            was_grounded: false,
            flags: LocomotionFlags::default(),
            height: config.standing_height,
            dash: DashController::new(),
            camera: CameraFeelState::new(&config),
            clock: 0.0,
            cues: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical.velocity
    }

    pub fn jumps_used(&self) -> u32 {
        self.vertical.jumps_used
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn flags(&self) -> LocomotionFlags {
        self.flags
    }

    pub fn is_movement_disabled(&self) -> bool {
        self.flags.movement_disabled
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    pub fn look_input(&self) -> Vec2 {
        self.look_input
    }

    pub fn dash(&self) -> &DashController {
        &self.dash
    }

    pub fn camera(&self) -> &CameraFeelState {
        &self.camera
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose(self.position, self.yaw)
    }

    /// Simulation time in seconds since spawn.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn forward(&self) -> Vec3 {
        forward_axis(self.yaw)
    }

    pub fn right(&self) -> Vec3 {
        right_axis(self.yaw)
    }

    pub fn snapshot(&self) -> LocomotionSnapshot {
        LocomotionSnapshot {
            flags: self.flags,
            grounded: self.grounded,
            was_grounded: self.was_grounded,
            move_input: self.move_input,
            look_input: self.look_input,
        }
    }

    pub fn take_cues(&mut self) -> Vec<PlayerCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(v) => self.on_move(v),
            InputEvent::Look(v) => self.on_look(v),
            InputEvent::Jump(edge) => self.on_jump(edge),
            InputEvent::Sprint(edge) => self.on_sprint(edge),
            InputEvent::Crouch(edge) => self.on_crouch(edge),
            InputEvent::Dash(edge) => self.on_dash(edge),
        }
    }

    // --- Input ---

    /// Held until the next move event.
    pub fn on_move(&mut self, value: Vec2) {
        if self.flags.movement_disabled {
            return;
        }
        self.move_input = value.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    pub fn on_look(&mut self, value: Vec2) {
        if self.flags.movement_disabled {
            return;
        }
        self.look_input = value;
    }

    pub fn on_jump(&mut self, edge: ActionEdge) {
        if edge != ActionEdge::Started || self.flags.movement_disabled || self.flags.dashing {
            return;
        }
        // Crouching does not block jumping.
        if self.vertical.try_jump(self.grounded, &self.config) {
            log::debug!(
                "Jump {} of {} (v = {:.3})",
                self.vertical.jumps_used,
                self.config.max_jumps,
                self.vertical.velocity
            );
            self.cues.push(PlayerCue::Jumped);
        }
    }

    pub fn on_sprint(&mut self, edge: ActionEdge) {
        if self.flags.movement_disabled {
            return;
        }
        self.flags.sprinting = matches!(edge, ActionEdge::Started | ActionEdge::Performed);
    }

    pub fn on_crouch(&mut self, edge: ActionEdge) {
        if self.flags.movement_disabled {
            return;
        }
        match edge {
            ActionEdge::Started => {
                if !self.grounded {
                    self.vertical.slam(&self.config);
                    log::info!("Slam (v = {})", self.vertical.velocity);
                    self.cues.push(PlayerCue::Slammed);
                }
                self.flags.crouching = true;
                self.height = self.config.crouch_height;
                self.camera.base_eye_height = self.config.crouch_eye_height;
            }
            ActionEdge::Canceled => {
                self.flags.crouching = false;
                self.height = self.config.standing_height;
                self.camera.base_eye_height = self.config.standing_eye_height;
            }
            ActionEdge::Performed => {}
        }
    }

    pub fn on_dash(&mut self, edge: ActionEdge) {
        if edge != ActionEdge::Started || self.flags.movement_disabled {
            return;
        }
        let (right, forward) = (self.right(), self.forward());
        if self
            .dash
            .try_start(self.clock, self.move_input, right, forward, &self.config)
        {
            self.flags.dashing = true;
            log::info!("Dash started at t = {:.3}", self.clock);
            self.cues.push(PlayerCue::DashStarted);
        }
    }

    /// One-way freeze used by the scare sequence. Repeated calls do nothing.
    /// A dash in flight is cut off so the body stops on this frame.
    pub fn disable_movement(&mut self) {
        if self.flags.movement_disabled {
            return;
        }
        self.flags.movement_disabled = true;
        self.move_input = Vec2::ZERO;
        self.look_input = Vec2::ZERO;

        if self.dash.cancel() {
            self.flags.dashing = false;
            self.cues.push(PlayerCue::DashEnded);
        }

        self.cues.push(PlayerCue::StopFootsteps);
        self.cues.push(PlayerCue::ReleaseCursor);
        log::info!("Movement disabled at {:?}", self.position);
    }

    // --- Simulation ---

    /// Advances the body by `dt` seconds. Look and tilt run first, then
    /// motion, then the eye-height and FOV effects.
    pub fn step(&mut self, dt: f32, world: &dyn CollisionOracle) -> CameraPose {
        let before = self.snapshot();
        let yaw_delta = self.camera.pre_move(&before, &self.config, dt);
        self.yaw = (self.yaw + yaw_delta).rem_euclid(360.0);

        if !self.flags.movement_disabled {
            self.was_grounded = self.grounded;
            if self.flags.dashing {
                self.step_dash(dt, world);
            } else {
                self.step_normal(dt, world);
            }
            if self.grounded && !self.was_grounded {
                log::debug!("Landed at {:?}", self.position);
                self.cues.push(PlayerCue::Landed);
            }
        }

        let after = self.snapshot();
        self.camera.post_move(&after, &self.config, dt);
        self.clock += dt;
        self.camera_pose()
    }

    fn step_normal(&mut self, dt: f32, world: &dyn CollisionOracle) {
        self.vertical
            .apply_gravity(self.grounded, self.config.gravity, dt);

        let speed = self.flags.ground_speed(&self.config).unwrap_or(0.0);
        let wish = self.right() * self.move_input.x + self.forward() * self.move_input.y;
        let horizontal = world.move_body(self.position, self.height, wish * speed * dt);
        self.position = horizontal.position;
        self.grounded = horizontal.grounded;

        let fall = Vec3::new(0.0, self.vertical.velocity * dt, 0.0);
        let vertical = world.move_body(self.position, self.height, fall);
        self.position = vertical.position;
        self.grounded = vertical.grounded;
    }

    fn step_dash(&mut self, dt: f32, world: &dyn CollisionOracle) {
        let Some(step) = self.dash.step(dt) else {
            self.flags.dashing = false;
            return;
        };

        let outcome = world.move_body(self.position, self.height, step.displacement);
        self.position = outcome.position;
        self.grounded = outcome.grounded;

        if step.finished {
            self.flags.dashing = false;
            log::info!("Dash ended at t = {:.3}", self.clock + dt);
            self.cues.push(PlayerCue::DashEnded);
        }
    }
}
