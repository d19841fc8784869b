//! Roster events
//!
//! Every event is scoped to the channel it was reported for. Events for any
//! channel other than the tracked one are dropped by the tracker.

use gridmirror_core::{ChannelId, Member, ParticipantId};

/// Membership change reported by the calling application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// A member connected to the channel
    Join { channel: ChannelId, member: Member },
    /// A member disconnected
    Leave {
        channel: ChannelId,
        participant: ParticipantId,
    },
    /// Display name changed
    Rename {
        channel: ChannelId,
        participant: ParticipantId,
        display_name: String,
    },
    /// Camera or stream toggled
    ModeChange {
        channel: ChannelId,
        participant: ParticipantId,
        video: bool,
    },
}

impl RosterEvent {
    /// Channel the event is scoped to
    pub fn channel(&self) -> ChannelId {
        match self {
            RosterEvent::Join { channel, .. }
            | RosterEvent::Leave { channel, .. }
            | RosterEvent::Rename { channel, .. }
            | RosterEvent::ModeChange { channel, .. } => *channel,
        }
    }

    /// Participant the event concerns
    pub fn participant(&self) -> ParticipantId {
        match self {
            RosterEvent::Join { member, .. } => member.id,
            RosterEvent::Leave { participant, .. }
            | RosterEvent::Rename { participant, .. }
            | RosterEvent::ModeChange { participant, .. } => *participant,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RosterEvent::Join { .. } => "join",
            RosterEvent::Leave { .. } => "leave",
            RosterEvent::Rename { .. } => "rename",
            RosterEvent::ModeChange { .. } => "mode-change",
        }
    }
}
