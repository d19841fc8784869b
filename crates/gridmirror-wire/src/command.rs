//! Outgoing commands for following a channel's membership

use serde_json::{json, Value};

use gridmirror_core::ChannelId;

use crate::{Command, EventName, RpcFrame};

/// Voice-state events followed for the tracked channel
pub const VOICE_STATE_EVENTS: [EventName; 3] = [
    EventName::VoiceStateCreate,
    EventName::VoiceStateUpdate,
    EventName::VoiceStateDelete,
];

/// Ask for the currently selected voice channel and its members
pub fn get_selected_voice_channel(nonce: &str) -> RpcFrame {
    RpcFrame::command(Command::GetSelectedVoiceChannel, json!({}), nonce)
}

/// Follow channel switches of the local user
pub fn subscribe_channel_select(nonce: &str) -> RpcFrame {
    RpcFrame::command(Command::Subscribe, json!({}), nonce).with_event(EventName::VoiceChannelSelect)
}

/// Subscribe to every voice-state event of `channel`
pub fn subscribe_voice_states(channel: ChannelId, nonce: &str) -> Vec<RpcFrame> {
    scoped(Command::Subscribe, channel, nonce)
}

/// Drop the voice-state subscriptions of `channel`
pub fn unsubscribe_voice_states(channel: ChannelId, nonce: &str) -> Vec<RpcFrame> {
    scoped(Command::Unsubscribe, channel, nonce)
}

/// Commands moving voice-state subscriptions from `from` to `to`
pub fn switch_subscriptions(
    from: Option<ChannelId>,
    to: Option<ChannelId>,
    nonce: &str,
) -> Vec<RpcFrame> {
    if from == to {
        return Vec::new();
    }
    let mut frames = Vec::new();
    if let Some(from) = from {
        frames.extend(unsubscribe_voice_states(from, nonce));
    }
    if let Some(to) = to {
        frames.extend(subscribe_voice_states(to, nonce));
    }
    frames
}

fn scoped(cmd: Command, channel: ChannelId, nonce: &str) -> Vec<RpcFrame> {
    VOICE_STATE_EVENTS
        .iter()
        .map(|evt| RpcFrame::command(cmd, channel_args(channel), nonce).with_event(*evt))
        .collect()
}

fn channel_args(channel: ChannelId) -> Value {
    json!({ "channel_id": channel.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_voice_states() {
        let frames = subscribe_voice_states(ChannelId::new(9), "n");
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert_eq!(frame.cmd, Command::Subscribe);
            assert!(frame.evt.unwrap().is_channel_scoped());
            assert_eq!(frame.args["channel_id"], "9");
        }
    }

    #[test]
    fn test_switch_subscriptions() {
        let a = ChannelId::new(1);
        let b = ChannelId::new(2);

        assert!(switch_subscriptions(Some(a), Some(a), "n").is_empty());

        let frames = switch_subscriptions(Some(a), Some(b), "n");
        assert_eq!(frames.len(), 6);
        assert!(frames[..3].iter().all(|f| f.cmd == Command::Unsubscribe));
        assert!(frames[3..].iter().all(|f| f.cmd == Command::Subscribe));

        assert_eq!(switch_subscriptions(None, Some(b), "n").len(), 3);
        assert_eq!(switch_subscriptions(Some(a), None, "n").len(), 3);
    }

    #[test]
    fn test_get_selected_voice_channel() {
        let frame = get_selected_voice_channel("abc");
        assert_eq!(frame.cmd, Command::GetSelectedVoiceChannel);
        assert!(frame.answers("abc"));
        assert_eq!(subscribe_channel_select("abc").evt, Some(EventName::VoiceChannelSelect));
    }
}
