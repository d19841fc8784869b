//! Published roster snapshots
//!
//! The tracker rebuilds a snapshot after every change and swaps it in whole.
//! Readers clone the `Arc` under a short read lock, so a tick never observes a
//! sequence that is halfway through a rebuild.

use std::sync::Arc;

use parking_lot::RwLock;

use gridmirror_core::{ChannelId, ParticipantId, VideoMode};

/// Immutable view of the tracked channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSnapshot {
    /// Tracked channel, `None` when no channel is selected or resolvable
    pub channel: Option<ChannelId>,
    /// Audio-only participants in call-window order
    pub audio_order: Vec<ParticipantId>,
    /// Video-active participants in call-window order
    pub video_order: Vec<ParticipantId>,
}

impl RosterSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Current mode of a participant
    pub fn mode_of(&self, id: ParticipantId) -> VideoMode {
        if self.video_order.contains(&id) {
            VideoMode::VideoActive
        } else if self.audio_order.contains(&id) {
            VideoMode::AudioOnly
        } else {
            VideoMode::Absent
        }
    }

    /// Participants occupying grid tiles, in tile order.
    ///
    /// Audio-only participants follow the video-active ones when non-video
    /// participants are shown.
    pub fn visible_order(&self, show_non_video: bool) -> Vec<ParticipantId> {
        let mut visible = self.video_order.clone();
        if show_non_video {
            visible.extend_from_slice(&self.audio_order);
        }
        visible
    }

    pub fn len(&self) -> usize {
        self.audio_order.len() + self.video_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio_order.is_empty() && self.video_order.is_empty()
    }
}

/// Shared slot holding the latest published snapshot
pub(crate) type SnapshotCell = Arc<RwLock<Arc<RosterSnapshot>>>;

/// Read handle onto a tracker's published snapshots
#[derive(Debug, Clone)]
pub struct RosterReader {
    cell: SnapshotCell,
}

impl RosterReader {
    pub(crate) fn new(cell: SnapshotCell) -> Self {
        Self { cell }
    }

    /// Latest complete snapshot
    pub fn snapshot(&self) -> Arc<RosterSnapshot> {
        Arc::clone(&self.cell.read())
    }
}
