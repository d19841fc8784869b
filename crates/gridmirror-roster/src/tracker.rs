//! Roster tracker - ordered membership of a single channel

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use gridmirror_core::{ChannelId, Member, ParticipantId, VideoMode};

use crate::{CollationKey, RosterEvent, RosterReader, RosterSnapshot};

/// Source of a channel's full current membership
pub trait ChannelDirectory {
    /// Members of `channel`, or `None` if the channel no longer exists
    fn members(&self, channel: ChannelId) -> Option<Vec<Member>>;
}

impl ChannelDirectory for HashMap<ChannelId, Vec<Member>> {
    fn members(&self, channel: ChannelId) -> Option<Vec<Member>> {
        self.get(&channel).cloned()
    }
}

/// Directory that resolves nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDirectory;

impl ChannelDirectory for NoDirectory {
    fn members(&self, _channel: ChannelId) -> Option<Vec<Member>> {
        None
    }
}

#[derive(Debug, Clone)]
struct Tracked {
    display_name: String,
    key: CollationKey,
    mode: VideoMode,
}

/// Tracks who is audio-only and who is video-active in one channel.
///
/// The tracker is the single writer; every change publishes a fresh
/// [`RosterSnapshot`] visible through [`RosterReader`].
#[derive(Debug)]
pub struct RosterTracker {
    channel: Option<ChannelId>,
    participants: HashMap<ParticipantId, Tracked>,
    audio_order: Vec<ParticipantId>,
    video_order: Vec<ParticipantId>,
    published: Arc<RwLock<Arc<RosterSnapshot>>>,
}

impl RosterTracker {
    pub fn new() -> Self {
        RosterTracker {
            channel: None,
            participants: HashMap::new(),
            audio_order: Vec::new(),
            video_order: Vec::new(),
            published: Arc::new(RwLock::new(Arc::new(RosterSnapshot::empty()))),
        }
    }

    /// Handle for readers on other tasks
    pub fn reader(&self) -> RosterReader {
        RosterReader::new(Arc::clone(&self.published))
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<RosterSnapshot> {
        Arc::clone(&self.published.read())
    }

    pub fn channel(&self) -> Option<ChannelId> {
        self.channel
    }

    /// Switch the tracked channel and reseed from its membership.
    ///
    /// Re-selecting the current channel is a no-op. An unresolvable channel
    /// leaves the roster empty.
    pub fn set_channel(
        &mut self,
        channel: Option<ChannelId>,
        directory: &(impl ChannelDirectory + ?Sized),
    ) {
        if channel.is_some() && channel == self.channel {
            return;
        }

        self.channel = channel;
        self.participants.clear();
        self.audio_order.clear();
        self.video_order.clear();

        let members = channel.and_then(|c| directory.members(c));
        match (&channel, &members) {
            (Some(c), None) => debug!(channel = %c, "channel not resolvable, roster empty"),
            (None, _) => debug!("no channel selected"),
            _ => {}
        }

        for member in members.unwrap_or_default() {
            self.insert(member);
        }
        self.sort_audio();
        self.sort_video();

        debug!(
            channel = ?self.channel,
            audio = self.audio_order.len(),
            video = self.video_order.len(),
            "roster reseeded"
        );
        self.publish();
    }

    /// Apply one event. Returns whether the roster changed.
    pub fn apply_event(&mut self, event: &RosterEvent) -> bool {
        if self.channel != Some(event.channel()) {
            trace!(kind = event.kind(), channel = %event.channel(), "event for untracked channel");
            return false;
        }

        let changed = match event {
            RosterEvent::Join { member, .. } => self.join(member.clone()),
            RosterEvent::Leave { participant, .. } => self.leave(*participant),
            RosterEvent::Rename {
                participant,
                display_name,
                ..
            } => self.rename(*participant, display_name),
            RosterEvent::ModeChange {
                participant, video, ..
            } => self.change_mode(*participant, VideoMode::from_video_flag(*video)),
        };

        if changed {
            debug!(
                kind = event.kind(),
                participant = %event.participant(),
                audio = self.audio_order.len(),
                video = self.video_order.len(),
                "roster updated"
            );
            self.publish();
        }
        changed
    }

    fn join(&mut self, member: Member) -> bool {
        let mode = member.mode();
        self.remove(member.id);
        self.insert(member);
        self.sort_order(mode);
        true
    }

    fn leave(&mut self, id: ParticipantId) -> bool {
        self.remove(id).is_some()
    }

    fn rename(&mut self, id: ParticipantId, display_name: &str) -> bool {
        let Some(tracked) = self.participants.get_mut(&id) else {
            return false;
        };
        if tracked.display_name == display_name {
            return false;
        }

        tracked.display_name = display_name.to_string();
        tracked.key = CollationKey::new(display_name);
        let mode = tracked.mode;
        self.sort_order(mode);
        true
    }

    fn change_mode(&mut self, id: ParticipantId, mode: VideoMode) -> bool {
        let Some(tracked) = self.participants.get_mut(&id) else {
            return false;
        };
        if tracked.mode == mode {
            return false;
        }

        let from = tracked.mode;
        tracked.mode = mode;
        self.order_mut(from).retain(|p| *p != id);
        self.order_mut(mode).push(id);
        self.sort_order(mode);
        true
    }

    fn insert(&mut self, member: Member) {
        let mode = member.mode();
        self.order_mut(mode).push(member.id);
        self.participants.insert(
            member.id,
            Tracked {
                key: CollationKey::new(&member.display_name),
                display_name: member.display_name,
                mode,
            },
        );
    }

    fn remove(&mut self, id: ParticipantId) -> Option<Tracked> {
        let tracked = self.participants.remove(&id)?;
        self.order_mut(tracked.mode).retain(|p| *p != id);
        Some(tracked)
    }

    fn order_mut(&mut self, mode: VideoMode) -> &mut Vec<ParticipantId> {
        match mode {
            VideoMode::VideoActive => &mut self.video_order,
            // Absent participants are never stored; audio is the fallback
            VideoMode::AudioOnly | VideoMode::Absent => &mut self.audio_order,
        }
    }

    fn sort_order(&mut self, mode: VideoMode) {
        match mode {
            VideoMode::VideoActive => self.sort_video(),
            VideoMode::AudioOnly | VideoMode::Absent => self.sort_audio(),
        }
    }

    fn sort_audio(&mut self) {
        let participants = &self.participants;
        sort_by_name(&mut self.audio_order, participants);
    }

    fn sort_video(&mut self) {
        let participants = &self.participants;
        sort_by_name(&mut self.video_order, participants);
    }

    fn publish(&self) {
        let snapshot = RosterSnapshot {
            channel: self.channel,
            audio_order: self.audio_order.clone(),
            video_order: self.video_order.clone(),
        };
        *self.published.write() = Arc::new(snapshot);
    }
}

impl Default for RosterTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Equal names fall back to id order so the result is deterministic
fn sort_by_name(order: &mut [ParticipantId], participants: &HashMap<ParticipantId, Tracked>) {
    order.sort_by(|a, b| {
        let ka = participants.get(a).map(|t| &t.key);
        let kb = participants.get(b).map(|t| &t.key);
        ka.cmp(&kb).then_with(|| a.cmp(b))
    });
}
