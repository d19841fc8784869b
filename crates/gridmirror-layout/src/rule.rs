//! Tile count fed to the solver
//!
//! A caller alone on camera shares the grid with an invitation prompt, so the
//! call window lays out two tiles. The prompt is shown when nobody else could
//! fill the second tile: there are no audio-only participants, or they are
//! hidden and no other video participant exists.

/// Number of tiles the call window lays out for `visible` participants
pub fn layout_count(
    visible: usize,
    audio_only: usize,
    video_active: usize,
    show_non_video: bool,
) -> usize {
    let prompt_shown = audio_only == 0 || (!show_non_video && video_active <= 1);
    if visible == 1 && prompt_shown {
        2
    } else {
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solo_caller_reserves_second_tile() {
        assert_eq!(layout_count(1, 0, 1, false), 2);
        assert_eq!(layout_count(1, 0, 1, true), 2);
    }

    #[test]
    fn test_solo_video_with_hidden_audio_listeners() {
        assert_eq!(layout_count(1, 3, 1, false), 2);
    }

    #[test]
    fn test_solo_visible_with_shown_audio_listener() {
        // One audio-only participant is the only tile
        assert_eq!(layout_count(1, 1, 0, true), 1);
    }

    #[test]
    fn test_multiple_participants_unchanged() {
        assert_eq!(layout_count(0, 0, 0, false), 0);
        assert_eq!(layout_count(3, 0, 3, false), 3);
        assert_eq!(layout_count(4, 2, 2, true), 4);
    }
}
