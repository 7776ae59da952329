//! Proximity jump-scare: freezes the player, halts the pursuer and fades the
//! screen to black. Fires once.

use crate::config::ScareConfig;
use crate::player::Player;
use crate::pursuer::Pursuer;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScareCue {
    StopFootsteps,
    PlayScream,
    FadeStarted,
    FadeFinished,
}

/// Timed fade record; alpha goes 0 to 1 over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenFade {
    pub elapsed: f32,
    pub duration: f32,
}

impl ScreenFade {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
        }
    }

    pub fn alpha(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Returns true on the update that completes the fade.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.is_finished() {
            return false;
        }
        self.elapsed += dt;
        self.is_finished()
    }
}

pub struct ScareTrigger {
    pub scare_distance: f32,
    pub fade_duration: f32,
    has_scared: bool,
    fade: Option<ScreenFade>,
    cues: Vec<ScareCue>,
}

impl ScareTrigger {
    pub fn new(config: &ScareConfig) -> Self {
        Self {
            scare_distance: config.scare_distance,
            fade_duration: config.fade_duration,
            has_scared: false,
            fade: None,
            cues: Vec::new(),
        }
    }

    pub fn has_scared(&self) -> bool {
        self.has_scared
    }

    pub fn fade(&self) -> Option<&ScreenFade> {
        self.fade.as_ref()
    }

    /// Screen fade opacity, 0 before the scare.
    pub fn fade_alpha(&self) -> f32 {
        self.fade.map_or(0.0, |f| f.alpha())
    }

    pub fn take_cues(&mut self) -> Vec<ScareCue> {
        std::mem::take(&mut self.cues)
    }

    /// Advances a running fade, then checks the pursuer's distance to the
    /// player.
    pub fn update(&mut self, dt: f32, player: &mut Player, pursuer: &mut Pursuer) {
        if let Some(fade) = &mut self.fade
            && fade.advance(dt)
        {
            log::info!("Fade to black finished");
            self.cues.push(ScareCue::FadeFinished);
        }

        if self.has_scared {
            return;
        }

        if pursuer.position.distance(player.position()) < self.scare_distance {
            self.perform(player, pursuer);
        }
    }

    fn perform(&mut self, player: &mut Player, pursuer: &mut Pursuer) {
        self.has_scared = true;
        log::info!("Scare triggered at {:?}", player.position());

        pursuer.halt();
        player.disable_movement();

        self.cues.push(ScareCue::StopFootsteps);
        self.cues.push(ScareCue::PlayScream);

        self.fade = Some(ScreenFade::new(self.fade_duration));
        self.cues.push(ScareCue::FadeStarted);
    }
}
