//! Audio plumbing between the ECS world and the audio thread.
//!
//! - [`audio_thread`] runs on its own OS thread and owns the
//!   [`AudioBackend`](crate::resources::audio::AudioBackend).
//! - [`forward_audio_cmds`] ships the frame's [`AudioCmd`]s to it.
//! - [`poll_audio_messages`] drains its replies into the ECS mailbox.
//! - [`update_bevy_audio_cmds`] / [`update_bevy_audio_messages`] advance the
//!   message queues once per frame.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::{AudioBackend, AudioBridge};
use crate::resources::session::GameSession;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::info;

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Option<Res<AudioBridge>>, mut reader: MessageReader<AudioCmd>) {
    let Some(bridge) = bridge else {
        // no audio thread; drop the frame's commands
        reader.clear();
        return;
    };
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Drain replies from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(bridge: Option<Res<AudioBridge>>, mut writer: MessageWriter<AudioMessage>) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

/// Keep the session's view of the music in sync with the audio thread.
pub fn track_drums(mut reader: MessageReader<AudioMessage>, mut session: ResMut<GameSession>) {
    for msg in reader.read() {
        if let AudioMessage::DrumsToggled { on } = msg {
            session.drums_on = *on;
        }
    }
}

/// Advance the ECS message queue for AudioCmd.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Advance the ECS message queue for AudioMessage.
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Entry point of the dedicated audio thread.
///
/// Blocks on the command channel and exits on [`AudioCmd::Shutdown`] or when
/// every sender is gone.
pub fn audio_thread(
    rx_cmd: Receiver<AudioCmd>,
    tx_msg: Sender<AudioMessage>,
    mut backend: Box<dyn AudioBackend>,
) {
    info!("[audio] thread starting (id={:?})", std::thread::current().id());

    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::PlayFx { id, filters } => {
                backend.play(&id, &filters);
                let _ = tx_msg.send(AudioMessage::FxPlayed { id });
            }
            AudioCmd::ToggleDrums => {
                let on = backend.toggle_drums();
                let _ = tx_msg.send(AudioMessage::DrumsToggled { on });
            }
            AudioCmd::Shutdown => break,
        }
    }

    info!("[audio] thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::audio::SoundFilter;
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        played: Arc<Mutex<Vec<(String, Vec<SoundFilter>)>>>,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, id: &str, filters: &[SoundFilter]) {
            self.played.lock().unwrap().push((id.to_string(), filters.to_vec()));
        }

        fn toggle_drums(&mut self) -> bool {
            true
        }
    }

    #[test]
    fn test_audio_thread_plays_and_replies() {
        let (tx_cmd, rx_cmd) = unbounded();
        let (tx_msg, rx_msg) = unbounded();
        let recorder = Recorder::default();
        let played = recorder.played.clone();

        tx_cmd.send(AudioCmd::fx_with_echo("prize", 2000, 0.7)).unwrap();
        tx_cmd.send(AudioCmd::ToggleDrums).unwrap();
        tx_cmd.send(AudioCmd::Shutdown).unwrap();
        audio_thread(rx_cmd, tx_msg, Box::new(recorder));

        let played = played.lock().unwrap();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].0, "prize");
        assert_eq!(
            played[0].1,
            vec![SoundFilter::Echo {
                delay_samples: 2000,
                decay: 0.7
            }]
        );
        let replies: Vec<_> = rx_msg.try_iter().collect();
        assert_eq!(
            replies,
            vec![
                AudioMessage::FxPlayed { id: "prize".into() },
                AudioMessage::DrumsToggled { on: true }
            ]
        );
    }
}
