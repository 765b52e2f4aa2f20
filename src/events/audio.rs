//! Messages exchanged with the audio thread.
//!
//! Game systems write [`AudioCmd`] messages; a forwarding system ships them
//! over a channel to the audio thread, which answers with [`AudioMessage`]s.

use bevy_ecs::message::Message;

/// Sound effect names used by the scene systems.
pub mod sounds {
    pub const PRIZE: &str = "prize";
    pub const BOOP: &str = "boop2";
    pub const ENEMY_DEATH: &str = "enemy_death";
    pub const PLAYER_SHOOT: &str = "player_shoot";
    pub const ARROW_HIT: &str = "arrow_hit";
    pub const BOSS_IMMUNE: &str = "boss_immune";
    pub const PAUSE_ON: &str = "pause_on";
    pub const PAUSE_OFF: &str = "pause_off";
}

/// Effect applied to a sound before playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundFilter {
    /// Repeats the sound after `delay_samples`, scaled by `decay` each time.
    Echo { delay_samples: u32, decay: f32 },
}

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    PlayFx {
        id: String,
        filters: Vec<SoundFilter>,
    },
    /// Mute or unmute the drum track of the level music.
    ToggleDrums,
    Shutdown,
}

impl AudioCmd {
    /// Plain sound effect.
    pub fn fx(id: &str) -> Self {
        AudioCmd::PlayFx {
            id: id.to_string(),
            filters: Vec::new(),
        }
    }

    /// Sound effect with an echo.
    pub fn fx_with_echo(id: &str, delay_samples: u32, decay: f32) -> Self {
        AudioCmd::PlayFx {
            id: id.to_string(),
            filters: vec![SoundFilter::Echo {
                delay_samples,
                decay,
            }],
        }
    }
}

/// Events sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    FxPlayed { id: String },
    DrumsToggled { on: bool },
}
