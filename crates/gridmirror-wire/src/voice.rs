//! Voice-state and channel payloads

use serde::Deserialize;
use serde_json::Value;

use gridmirror_core::{ChannelId, GridError, GridResult, Member, ParticipantId};
use gridmirror_roster::ChannelDirectory;

#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceFlags {
    #[serde(default)]
    pub self_video: bool,
    #[serde(default)]
    pub self_stream: bool,
}

/// One member's voice state, as carried by voice-state dispatches and by the
/// selected-channel response
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceStatePayload {
    #[serde(default)]
    pub nick: Option<String>,
    pub user: UserPayload,
    #[serde(default)]
    pub voice_state: VoiceFlags,
}

impl VoiceStatePayload {
    pub fn from_value(value: &Value) -> GridResult<Self> {
        Self::deserialize(value).map_err(|e| GridError::InvalidFrame(e.to_string()))
    }

    /// Name shown on the member's tile
    pub fn display_name(&self) -> &str {
        self.nick
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.user.global_name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or(&self.user.username)
    }

    /// Camera or screen share running
    pub fn video(&self) -> bool {
        self.voice_state.self_video || self.voice_state.self_stream
    }

    pub fn member(&self) -> GridResult<Member> {
        let id: ParticipantId = self.user.id.parse()?;
        Ok(Member::new(id, self.display_name(), self.video()))
    }
}

#[derive(Debug, Deserialize)]
struct ChannelPayload {
    id: String,
    #[serde(default)]
    voice_states: Vec<VoiceStatePayload>,
}

/// Full membership of one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub channel: ChannelId,
    pub members: Vec<Member>,
}

impl ChannelSnapshot {
    /// Decode the selected-channel response body; `null` means no channel
    pub fn from_value(data: &Value) -> GridResult<Option<Self>> {
        if data.is_null() {
            return Ok(None);
        }

        let payload = ChannelPayload::deserialize(data)
            .map_err(|e| GridError::InvalidFrame(e.to_string()))?;
        let channel: ChannelId = payload.id.parse()?;
        let members = payload
            .voice_states
            .iter()
            .map(VoiceStatePayload::member)
            .collect::<GridResult<Vec<_>>>()?;

        Ok(Some(ChannelSnapshot { channel, members }))
    }
}

impl ChannelDirectory for ChannelSnapshot {
    fn members(&self, channel: ChannelId) -> Option<Vec<Member>> {
        (channel == self.channel).then(|| self.members.clone())
    }
}
