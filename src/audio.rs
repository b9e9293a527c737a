//! Sound cues
//!
//! The simulation only names cues; a host-supplied backend makes noise.
//! `AudioManager` sits between the two and owns the mute preference and the
//! set of currently looping cues.

use serde::{Deserialize, Serialize};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Crowd ambience (looping)
    Crowd,
    /// Quarterback calling signals before the snap (looping)
    Quarterback,
    /// Ball carrier brought down
    Tackle,
    /// Play blown dead
    Whistle,
    /// Home team scored
    CrowdCheer,
    /// Visitor team scored
    CrowdBoo,
    /// Touchdown fanfare
    Touchdown,
    /// Ball kicked
    Kick,
    /// Pass or kick caught
    Catch,
    /// Chains moved
    FirstDown,
    /// Clock ran out
    Buzzer,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Crowd => "crowd",
            SoundCue::Quarterback => "quarterback",
            SoundCue::Tackle => "tackle",
            SoundCue::Whistle => "whistle",
            SoundCue::CrowdCheer => "crowd-cheer",
            SoundCue::CrowdBoo => "crowd-boo",
            SoundCue::Touchdown => "touchdown",
            SoundCue::Kick => "kick",
            SoundCue::Catch => "catch",
            SoundCue::FirstDown => "first-down",
            SoundCue::Buzzer => "buzzer",
        }
    }

    /// Relative volume; the ambience sits well under the effects
    pub fn default_volume(&self) -> f32 {
        match self {
            SoundCue::Crowd => 0.1,
            _ => 1.0,
        }
    }
}

/// Whatever actually plays sounds
pub trait AudioBackend {
    fn play(&mut self, cue: SoundCue, volume: f32, looping: bool);
    fn stop(&mut self, cue: SoundCue);
    fn vibrate(&mut self, millis: u32);
}

/// Backend that writes cues to the log
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: SoundCue, volume: f32, looping: bool) {
        log::debug!("sfx play {} vol={:.2} loop={}", cue.name(), volume, looping);
    }

    fn stop(&mut self, cue: SoundCue) {
        log::debug!("sfx stop {}", cue.name());
    }

    fn vibrate(&mut self, millis: u32) {
        log::debug!("vibrate {}ms", millis);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    muted: bool,
    vibrate: bool,
    looping: Vec<SoundCue>,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 1.0,
            muted: false,
            vibrate: true,
            looping: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio. Muting silences running loops.
    pub fn set_muted(&mut self, muted: bool) {
        if muted && !self.muted {
            for cue in &self.looping {
                self.backend.stop(*cue);
            }
        }
        self.muted = muted;
    }

    pub fn set_vibrate(&mut self, vibrate: bool) {
        self.vibrate = vibrate;
    }

    pub fn is_looping(&self, cue: SoundCue) -> bool {
        self.looping.contains(&cue)
    }

    /// Play a cue. Starting an already-looping cue does nothing.
    pub fn play(&mut self, cue: SoundCue, looping: bool) {
        if looping {
            if self.is_looping(cue) {
                return;
            }
            self.looping.push(cue);
        }
        if self.muted {
            return;
        }
        let volume = self.master_volume * cue.default_volume();
        self.backend.play(cue, volume, looping);
    }

    pub fn stop(&mut self, cue: SoundCue) {
        let was_looping = self.is_looping(cue);
        self.looping.retain(|c| *c != cue);
        if was_looping && !self.muted {
            self.backend.stop(cue);
        }
    }

    pub fn vibrate(&mut self, millis: u32) {
        if self.vibrate {
            self.backend.vibrate(millis);
        }
    }

    /// Stop every loop (game over / shutdown)
    pub fn release(&mut self) {
        for cue in std::mem::take(&mut self.looping) {
            if !self.muted {
                self.backend.stop(cue);
            }
        }
    }
}
