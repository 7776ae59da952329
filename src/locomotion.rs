//! Locomotion flags and the precedence that decides which of them is in
//! control on a given step.
//!
//! The flags overlap on purpose: a player can be crouching while grounded, or
//! keep the sprint button held through a dash. [`LocomotionFlags::mode`] is the
//! single place that resolves them, in this order:
//!
//! 1. movement disabled (overrides everything, input is dropped)
//! 2. dashing (dash displacement is the only motion)
//! 3. crouch, then sprint, then walk for ground speed

use glam::Vec2;

use crate::config::{MOVE_DEADZONE, PlayerConfig};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocomotionFlags {
    pub crouching: bool,
    pub dashing: bool,
    pub sprinting: bool,
    pub movement_disabled: bool,
}

/// The behavior that owns motion this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementMode {
    Disabled,
    Dashing,
    Crouch,
    Sprint,
    Walk,
}

impl LocomotionFlags {
    pub fn mode(&self) -> MovementMode {
        if self.movement_disabled {
            MovementMode::Disabled
        } else if self.dashing {
            MovementMode::Dashing
        } else if self.crouching {
            MovementMode::Crouch
        } else if self.sprinting {
            MovementMode::Sprint
        } else {
            MovementMode::Walk
        }
    }

    /// Speed for normal ground movement, or `None` when normal movement is
    /// suppressed.
    pub fn ground_speed(&self, config: &PlayerConfig) -> Option<f32> {
        match self.mode() {
            MovementMode::Disabled | MovementMode::Dashing => None,
            MovementMode::Crouch => Some(config.crouch_speed),
            MovementMode::Sprint => Some(config.sprint_speed),
            MovementMode::Walk => Some(config.walk_speed),
        }
    }

    pub fn bob_amount(&self, config: &PlayerConfig) -> f32 {
        if self.crouching {
            config.crouch_bob_amount
        } else if self.sprinting {
            config.sprint_bob_amount
        } else {
            config.walk_bob_amount
        }
    }
}

/// Whether either axis of a move vector is outside the deadzone.
pub fn is_moving(move_input: Vec2) -> bool {
    move_input.x.abs() > MOVE_DEADZONE || move_input.y.abs() > MOVE_DEADZONE
}

/// Read-only view of the locomotion state handed to the camera each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionSnapshot {
    pub flags: LocomotionFlags,
    pub grounded: bool,
    pub was_grounded: bool,
    pub move_input: Vec2,
    pub look_input: Vec2,
}

impl LocomotionSnapshot {
    pub fn mode(&self) -> MovementMode {
        self.flags.mode()
    }

    pub fn just_landed(&self) -> bool {
        self.grounded && !self.was_grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_overrides_everything() {
        let flags = LocomotionFlags {
            crouching: true,
            dashing: true,
            sprinting: true,
            movement_disabled: true,
        };
        assert_eq!(flags.mode(), MovementMode::Disabled);
        assert_eq!(flags.ground_speed(&PlayerConfig::default()), None);
    }

    #[test]
    fn test_dash_suppresses_ground_speed() {
        let flags = LocomotionFlags {
            dashing: true,
            sprinting: true,
            ..Default::default()
        };
        assert_eq!(flags.mode(), MovementMode::Dashing);
        assert_eq!(flags.ground_speed(&PlayerConfig::default()), None);
    }

    #[test]
    fn test_crouch_beats_sprint() {
        let config = PlayerConfig::default();
        let flags = LocomotionFlags {
            crouching: true,
            sprinting: true,
            ..Default::default()
        };
        assert_eq!(flags.mode(), MovementMode::Crouch);
        assert_eq!(flags.ground_speed(&config), Some(config.crouch_speed));
        assert_eq!(flags.bob_amount(&config), config.crouch_bob_amount);
    }

    #[test]
    fn test_speed_ordering() {
        let config = PlayerConfig::default();
        let walk = LocomotionFlags::default().ground_speed(&config).unwrap();
        let sprint = LocomotionFlags {
            sprinting: true,
            ..Default::default()
        }
        .ground_speed(&config)
        .unwrap();
        let crouch = LocomotionFlags {
            crouching: true,
            ..Default::default()
        }
        .ground_speed(&config)
        .unwrap();
        assert!(crouch < walk && walk < sprint);
    }

    #[test]
    fn test_deadzone() {
        assert!(!is_moving(Vec2::new(0.05, -0.1)));
        assert!(is_moving(Vec2::new(0.0, 0.2)));
        assert!(is_moving(Vec2::new(-0.5, 0.0)));
    }
}
