//! Vertical velocity: gravity, ground stick, jump charges and the crouch-slam.

use crate::config::{PlayerConfig, STICK_VELOCITY};

/// Launch speed that peaks exactly at `jump_height` under `gravity`
/// (v = sqrt(2 h |g|)). May be NaN for a malformed config; callers sanitize.
pub fn jump_impulse(jump_height: f32, gravity: f32) -> f32 {
    (jump_height * -2.0 * gravity).sqrt()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VerticalMotion {
    /// Signed; negative is falling.
    pub velocity: f32,
    pub jumps_used: u32,
}

impl VerticalMotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ground stick while supported, free fall otherwise.
    pub fn apply_gravity(&mut self, grounded: bool, gravity: f32, dt: f32) {
        if grounded && self.velocity <= 0.0 {
            self.velocity = STICK_VELOCITY;
            self.jumps_used = 0;
        } else {
            self.velocity += gravity * dt;
        }
        self.sanitize();
    }

    /// Returns whether the jump happened. A grounded jump starts a fresh
    /// budget; airborne jumps spend charges until `max_jumps` are used.
    pub fn try_jump(&mut self, grounded: bool, config: &PlayerConfig) -> bool {
        if !grounded && self.jumps_used >= config.max_jumps {
            return false;
        }
        self.velocity = jump_impulse(config.jump_height, config.gravity);
        self.jumps_used = if grounded {
            1
        } else {
            self.jumps_used.saturating_add(1)
        };
        self.sanitize();
        true
    }

    /// Overwrites velocity with the slam velocity regardless of its sign.
    pub fn slam(&mut self, config: &PlayerConfig) {
        self.velocity = config.slam_velocity;
        self.sanitize();
    }

    /// Resets a non-finite velocity to zero. Returns true if it had to.
    pub fn sanitize(&mut self) -> bool {
        if self.velocity.is_finite() {
            return false;
        }
        log::warn!("Non-finite vertical velocity {}, resetting", self.velocity);
        self.velocity = 0.0;
        true
    }
}
