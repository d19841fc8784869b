//! Participants and their presentation mode

use crate::ParticipantId;

/// How a participant currently appears in the call window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoMode {
    /// Connected, shown as an avatar tile without video
    AudioOnly,
    /// Connected with camera or stream running
    VideoActive,
    /// Not in the tracked channel
    Absent,
}

impl VideoMode {
    /// Mode for a member reporting the given video flag
    #[inline]
    pub fn from_video_flag(video: bool) -> Self {
        if video {
            VideoMode::VideoActive
        } else {
            VideoMode::AudioOnly
        }
    }
}

impl Default for VideoMode {
    fn default() -> Self {
        Self::Absent
    }
}

/// A channel member as reported by the calling application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: ParticipantId,
    /// Name shown in the call window (nickname if set)
    pub display_name: String,
    /// Reported video flag
    pub video: bool,
}

impl Member {
    pub fn new(id: ParticipantId, display_name: impl Into<String>, video: bool) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            video,
        }
    }

    #[inline]
    pub fn mode(&self) -> VideoMode {
        VideoMode::from_video_flag(self.video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(VideoMode::from_video_flag(true), VideoMode::VideoActive);
        assert_eq!(VideoMode::from_video_flag(false), VideoMode::AudioOnly);
        assert_eq!(VideoMode::default(), VideoMode::Absent);
    }

    #[test]
    fn test_member_mode() {
        let member = Member::new(ParticipantId::new(7), "Ann", true);
        assert_eq!(member.mode(), VideoMode::VideoActive);
        assert_eq!(member.display_name, "Ann");
    }
}
