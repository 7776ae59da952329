//! Timed dash with linearly decaying speed and a cooldown.
//!
//! A dash is an explicit record advanced once per simulation step rather than
//! a suspended routine. Distance depends only on the configured speed and
//! duration, not on how the duration is sliced into steps.

use glam::{Vec2, Vec3};

use crate::config::{DASH_END_SPEED_FRACTION, PlayerConfig};
use crate::locomotion::is_moving;

/// `lerp(dash_speed, dash_speed * 0.2, t / duration)`, clamped to the dash.
/// A non-positive duration is already over.
pub fn dash_speed_at(dash_speed: f32, elapsed: f32, duration: f32) -> f32 {
    let end = dash_speed * DASH_END_SPEED_FRACTION;
    if !(duration > 0.0) {
        return end;
    }
    let t = (elapsed / duration).clamp(0.0, 1.0);
    dash_speed + (end - dash_speed) * t
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashRun {
    pub start_time: f32,
    pub duration: f32,
    /// Unit vector, frozen when the dash starts.
    pub direction: Vec3,
    pub speed: f32,
    pub elapsed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DashPhase {
    #[default]
    Idle,
    Dashing(DashRun),
}

/// Motion produced by one dash step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashStep {
    pub displacement: Vec3,
    /// The dash reached its duration on this step.
    pub finished: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DashController {
    phase: DashPhase,
    cooldown_until: f32,
}

impl DashController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DashPhase {
        self.phase
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.phase, DashPhase::Dashing(_))
    }

    pub fn cooldown_until(&self) -> f32 {
        self.cooldown_until
    }

    pub fn ready(&self, now: f32) -> bool {
        !self.is_dashing() && now >= self.cooldown_until
    }

    /// Starts a dash along the move input, or along `forward` when the input
    /// is inside the deadzone. Does nothing (and returns false) while a dash
    /// is running or the cooldown has not expired.
    pub fn try_start(
        &mut self,
        now: f32,
        move_input: Vec2,
        right: Vec3,
        forward: Vec3,
        config: &PlayerConfig,
    ) -> bool {
        if !self.ready(now) {
            return false;
        }

        let wish = right * move_input.x + forward * move_input.y;
        let direction = if is_moving(move_input) {
            wish.normalize_or(forward)
        } else {
            forward
        };

        self.cooldown_until = now + config.dash_cooldown;
        self.phase = DashPhase::Dashing(DashRun {
            start_time: now,
            // NaN or negative collapses to an instant dash.
            duration: config.dash_duration.max(0.0),
            direction,
            speed: config.dash_speed,
            elapsed: 0.0,
        });
        log::debug!("Dash started toward {:?}", direction);
        true
    }

    /// Advances a running dash by `dt`. Returns `None` while idle.
    pub fn step(&mut self, dt: f32) -> Option<DashStep> {
        let DashPhase::Dashing(run) = &mut self.phase else {
            return None;
        };

        let from = run.elapsed;
        let to = (run.elapsed + dt).min(run.duration);
        // Speed is linear in time, so the mean of the endpoints is exact.
        let mean_speed = 0.5
            * (dash_speed_at(run.speed, from, run.duration)
                + dash_speed_at(run.speed, to, run.duration));
        let displacement = run.direction * mean_speed * (to - from);
        run.elapsed = to;

        let finished = run.elapsed >= run.duration;
        if finished {
            self.phase = DashPhase::Idle;
            log::debug!("Dash finished");
        }

        Some(DashStep {
            displacement,
            finished,
        })
    }

    /// Ends a running dash immediately. The cooldown stays in place.
    pub fn cancel(&mut self) -> bool {
        let was_dashing = self.is_dashing();
        self.phase = DashPhase::Idle;
        was_dashing
    }
}
