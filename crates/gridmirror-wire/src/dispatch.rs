//! Dispatch translation
//!
//! Voice-state dispatches do not name their channel; they are delivered
//! because of a subscription scoped to one. The connection layer passes the
//! subscribed channel in and gets roster events back.

use serde::Deserialize;
use tracing::warn;

use gridmirror_core::{ChannelId, GridError, GridResult};
use gridmirror_roster::RosterEvent;

use crate::{ChannelSnapshot, Command, EventName, RpcFrame, VoiceStatePayload};

/// What a received frame means for the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Handshake finished
    Ready,
    /// The local user moved to another voice channel (or left voice);
    /// the selected channel has to be fetched again
    ChannelSwitch { channel: Option<ChannelId> },
    /// Membership snapshot from a selected-channel response
    Snapshot(Option<ChannelSnapshot>),
    /// Incremental roster changes
    Roster(Vec<RosterEvent>),
    /// Nothing roster-relevant
    Ignored,
}

#[derive(Debug, Deserialize)]
struct ChannelSelectPayload {
    #[serde(default)]
    channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Translate a received frame; `channel` is the channel voice-state
/// subscriptions are currently scoped to
pub fn translate(frame: &RpcFrame, channel: Option<ChannelId>) -> GridResult<Dispatch> {
    if frame.is_error() {
        let error = ErrorPayload::deserialize(&frame.data).unwrap_or(ErrorPayload {
            code: 0,
            message: frame.data.to_string(),
        });
        return Err(GridError::InvalidFrame(format!(
            "{} failed ({}): {}",
            frame.cmd.as_str(),
            error.code,
            error.message
        )));
    }

    match frame.cmd {
        Command::GetSelectedVoiceChannel => {
            ChannelSnapshot::from_value(&frame.data).map(Dispatch::Snapshot)
        }
        Command::Dispatch => translate_dispatch(frame, channel),
        _ => Ok(Dispatch::Ignored),
    }
}

fn translate_dispatch(frame: &RpcFrame, channel: Option<ChannelId>) -> GridResult<Dispatch> {
    let Some(evt) = frame.evt else {
        return Err(GridError::InvalidFrame("dispatch without evt".to_string()));
    };

    match evt {
        EventName::Ready => Ok(Dispatch::Ready),
        EventName::VoiceChannelSelect => {
            let payload = ChannelSelectPayload::deserialize(&frame.data)
                .map_err(|e| GridError::InvalidFrame(e.to_string()))?;
            let channel = payload
                .channel_id
                .map(|id| id.parse::<ChannelId>())
                .transpose()?;
            Ok(Dispatch::ChannelSwitch { channel })
        }
        EventName::VoiceStateCreate | EventName::VoiceStateUpdate | EventName::VoiceStateDelete => {
            let Some(channel) = channel else {
                warn!(evt = evt.as_str(), "voice state without a subscribed channel");
                return Ok(Dispatch::Ignored);
            };
            let payload = VoiceStatePayload::from_value(&frame.data)?;
            let member = payload.member()?;

            let events = match evt {
                EventName::VoiceStateCreate => vec![RosterEvent::Join { channel, member }],
                EventName::VoiceStateDelete => vec![RosterEvent::Leave {
                    channel,
                    participant: member.id,
                }],
                _ => vec![
                    RosterEvent::Rename {
                        channel,
                        participant: member.id,
                        display_name: member.display_name.clone(),
                    },
                    RosterEvent::ModeChange {
                        channel,
                        participant: member.id,
                        video: member.video,
                    },
                ],
            };
            Ok(Dispatch::Roster(events))
        }
        EventName::Error => Ok(Dispatch::Ignored),
    }
}
