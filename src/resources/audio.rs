//! ECS resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] and message resources. Call
//! [`shutdown_audio`] during teardown to stop the thread.
//!
//! The thread drives an [`AudioBackend`]; the default [`LogAudioBackend`]
//! only logs, so a headless run keeps a full audio pipeline without a sound
//! device.

use crate::events::audio::{AudioCmd, AudioMessage, SoundFilter};
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;

/// Something that can actually make noise.
pub trait AudioBackend: Send + 'static {
    fn play(&mut self, id: &str, filters: &[SoundFilter]);
    /// Returns whether the drum track is now audible.
    fn toggle_drums(&mut self) -> bool;
}

/// Backend that logs every command.
#[derive(Debug, Default)]
pub struct LogAudioBackend {
    drums_on: bool,
}

impl AudioBackend for LogAudioBackend {
    fn play(&mut self, id: &str, filters: &[SoundFilter]) {
        debug!("[audio] play '{}' filters={:?}", id, filters);
    }

    fn toggle_drums(&mut self) -> bool {
        self.drums_on = !self.drums_on;
        debug!("[audio] drums {}", if self.drums_on { "on" } else { "off" });
        self.drums_on
    }
}

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the audio thread around `backend` and register bridge resources.
pub fn setup_audio(world: &mut World, backend: Box<dyn AudioBackend>) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg, backend));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
}

/// Request shutdown of the audio thread and join it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
