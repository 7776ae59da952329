//! Camera feel: look, roll tilt, head-bob, landing bounce and the dash FOV
//! pulse, combined into one camera pose per step.
//!
//! The composer reads a [`LocomotionSnapshot`] and only ever writes its own
//! [`CameraFeelState`]. Look yaw is returned to the caller for the body
//! instead of being applied to the camera, so pitch and yaw stay orthogonal.
//! Within a step, [`CameraFeelState::pre_move`] runs before the body moves and
//! [`CameraFeelState::post_move`] after it; the camera's local transform has
//! no other writer.

use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::config::{PITCH_LIMIT, PlayerConfig};
use crate::locomotion::{LocomotionSnapshot, MovementMode, is_moving};

const NEAR_PLANE: f32 = 0.05;
const FAR_PLANE: f32 = 200.0;

/// `Mathf.Lerp`-style easing: `t` is clamped so a long frame cannot
/// overshoot.
fn ease(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t.clamp(0.0, 1.0)
}

/// Short dip-and-recover of eye height after touching down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingBounce {
    pub elapsed: f32,
    pub duration: f32,
    pub dip: f32,
}

impl LandingBounce {
    pub fn new(dip: f32, duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            dip,
        }
    }

    /// Eye offset below baseline, zero at both ends of the window.
    pub fn offset(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        -self.dip * (PI * t).sin()
    }

    /// Returns true once the window has elapsed.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraFeelState {
    /// Degrees, positive looks down, clamped to ±90.
    pub vertical_look_angle: f32,
    /// Roll in degrees.
    pub current_tilt: f32,
    pub bob_phase: f32,
    pub base_eye_height: f32,
    /// Current local eye height above the feet.
    pub eye_height: f32,
    pub current_fov: f32,
    pub bounce: Option<LandingBounce>,
}

impl CameraFeelState {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            vertical_look_angle: 0.0,
            current_tilt: 0.0,
            bob_phase: 0.0,
            base_eye_height: config.standing_eye_height,
            eye_height: config.standing_eye_height,
            current_fov: config.base_fov,
            bounce: None,
        }
    }

    /// Look pitch and roll tilt. Returns the yaw delta (degrees) for the body.
    pub fn pre_move(&mut self, snapshot: &LocomotionSnapshot, config: &PlayerConfig, dt: f32) -> f32 {
        if snapshot.mode() == MovementMode::Disabled {
            return 0.0;
        }

        let look = snapshot.look_input;
        self.vertical_look_angle =
            (self.vertical_look_angle - look.y * config.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let target_tilt = -snapshot.move_input.x * config.tilt_amount;
        self.current_tilt = ease(self.current_tilt, target_tilt, dt * config.tilt_speed);

        look.x * config.sensitivity
    }

    /// Landing bounce, head-bob and FOV, after the body has moved.
    pub fn post_move(&mut self, snapshot: &LocomotionSnapshot, config: &PlayerConfig, dt: f32) {
        let mode = snapshot.mode();

        if snapshot.just_landed() && self.bounce.is_none() && mode != MovementMode::Disabled {
            self.bounce = Some(LandingBounce::new(config.landing_dip, config.landing_recovery));
        }

        if let Some(bounce) = &mut self.bounce {
            // Bounce owns eye height for its window; bob waits.
            let finished = bounce.advance(dt);
            self.eye_height = self.base_eye_height + bounce.offset();
            if finished {
                self.bounce = None;
                self.eye_height = self.base_eye_height;
            }
        } else if !matches!(mode, MovementMode::Disabled | MovementMode::Dashing) {
            self.head_bob(snapshot, config, dt);
        }

        let target_fov = if mode == MovementMode::Dashing {
            config.dash_fov
        } else {
            config.base_fov
        };
        self.current_fov = ease(self.current_fov, target_fov, dt * config.fov_ease_speed);
    }

    fn head_bob(&mut self, snapshot: &LocomotionSnapshot, config: &PlayerConfig, dt: f32) {
        if !snapshot.grounded {
            return;
        }

        if is_moving(snapshot.move_input) {
            self.bob_phase += dt * config.bob_frequency;
            let amount = snapshot.flags.bob_amount(config);
            self.eye_height = self.base_eye_height + self.bob_phase.sin() * amount;
        } else {
            self.bob_phase = 0.0;
            self.eye_height = ease(self.eye_height, self.base_eye_height, dt * config.bob_frequency);
        }
    }

    /// Camera rotation relative to the body: pitch, then roll.
    pub fn local_rotation(&self) -> Quat {
        Quat::from_rotation_x(-self.vertical_look_angle.to_radians())
            * Quat::from_rotation_z(self.current_tilt.to_radians())
    }

    /// Builds the world-space pose for a body at `position` facing `yaw`.
    pub fn pose(&self, position: Vec3, yaw: f32) -> CameraPose {
        CameraPose {
            eye_position: position + Vec3::new(0.0, self.eye_height, 0.0),
            rotation: body_rotation(yaw) * self.local_rotation(),
            fov_degrees: self.current_fov,
        }
    }
}

/// Yaw in degrees, positive turns right.
pub fn body_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(-yaw.to_radians())
}

pub fn forward_axis(yaw: f32) -> Vec3 {
    let yaw = yaw.to_radians();
    Vec3::new(yaw.sin(), 0.0, -yaw.cos())
}

pub fn right_axis(yaw: f32) -> Vec3 {
    let yaw = yaw.to_radians();
    Vec3::new(yaw.cos(), 0.0, yaw.sin())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye_position: Vec3,
    pub rotation: Quat,
    pub fov_degrees: f32,
}

impl CameraPose {
    pub fn look_direction(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.eye_position).inverse()
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    pub fn uniform(&self, aspect: f32) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection(aspect) * self.view_matrix()).to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}
