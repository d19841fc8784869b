//! Scene synchronizer - applies the grid to the host's elements once per tick
//!
//! Every managed element is overwritten on every pass, changed or not. The
//! pass is a pure function of its inputs, so running it twice leaves the
//! scene exactly as running it once.

use tracing::trace;

use gridmirror_core::{ParticipantId, Size, VideoMode};
use gridmirror_layout::{GridConstants, GridLayout};
use gridmirror_roster::RosterSnapshot;

use crate::{crop_for, fit_to_aspect, tile_rect, BoundsPolicy, SceneElement, SlotAssignment};

/// Operator choices that shape the pass
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// No title bar above the grid
    pub full_screen: bool,
    /// Audio-only participants occupy tiles after the video participants
    pub show_non_video: bool,
    /// Participant whose own preview the call window mirrors
    pub self_participant: Option<ParticipantId>,
    /// Toggle the element below each managed element for audio-only occupants
    pub show_indicators: bool,
    pub constants: GridConstants,
}

/// Per-tick inputs
#[derive(Debug, Clone, Copy)]
pub struct SyncFrame<'a> {
    /// Participants occupying tiles, in tile order
    pub visible: &'a [ParticipantId],
    pub roster: &'a RosterSnapshot,
    /// `None` while the capture is not rendered
    pub layout: Option<&'a GridLayout>,
    pub container: Size,
}

/// Outcome of one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub managed: usize,
    pub shown: usize,
    pub hidden: usize,
    pub indicators_shown: usize,
}

/// Maps the slot assignment onto managed scene elements
#[derive(Debug, Clone, Default)]
pub struct SceneSynchronizer {
    options: SyncOptions,
}

impl SceneSynchronizer {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SyncOptions) {
        self.options = options;
    }

    /// Run one pass over `elements`.
    ///
    /// Elements are walked from last to first; the n-th managed element met
    /// shows the participant in slot n.
    pub fn sync(
        &self,
        frame: &SyncFrame<'_>,
        assignment: &SlotAssignment,
        elements: &mut [SceneElement],
    ) -> SyncReport {
        let mut report = SyncReport::default();
        let indicators = self.options.show_indicators && !self.options.show_non_video;

        for pos in (0..elements.len()).rev() {
            if !elements[pos].managed {
                continue;
            }
            let slot = report.managed;
            report.managed += 1;

            let participant = assignment.get(slot);
            let rank = participant.and_then(|p| frame.visible.iter().position(|v| *v == p));

            if indicators && pos > 0 && !elements[pos - 1].managed {
                let audio_only = participant
                    .is_some_and(|p| frame.roster.mode_of(p) == VideoMode::AudioOnly);
                elements[pos - 1].visible = audio_only;
                if audio_only {
                    report.indicators_shown += 1;
                }
            }

            let element = &mut elements[pos];
            match (frame.layout, rank) {
                (Some(layout), Some(rank)) => {
                    self.show(element, rank, participant, frame, layout);
                    report.shown += 1;
                }
                _ => {
                    trace!(element = %element.name, slot, ?participant, "hidden");
                    element.visible = false;
                    report.hidden += 1;
                }
            }
        }

        report
    }

    fn show(
        &self,
        element: &mut SceneElement,
        rank: usize,
        participant: Option<ParticipantId>,
        frame: &SyncFrame<'_>,
        layout: &GridLayout,
    ) {
        let constants = &self.options.constants;
        let tile = tile_rect(rank, layout, constants, self.options.full_screen);
        let region = fit_to_aspect(tile, element.bounds_aspect());

        element.visible = true;
        element.policy = BoundsPolicy::FILL_TOP_LEFT;
        element.crop = crop_for(region, constants.crop_inset, frame.container);

        let mirrored = self.options.self_participant.is_some_and(|self_id| {
            participant == Some(self_id) && frame.roster.mode_of(self_id) == VideoMode::VideoActive
        });
        element.scale = element.scale.with_mirror(mirrored);

        trace!(
            element = %element.name,
            rank,
            crop = ?element.crop,
            mirrored = element.scale.is_mirrored(),
            "shown"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmirror_core::{ChannelId, Crop, Scale};
    use gridmirror_layout::solve_for_container;
    use proptest::prelude::*;

    fn pid(n: u64) -> ParticipantId {
        ParticipantId::new(n)
    }

    fn roster() -> RosterSnapshot {
        RosterSnapshot {
            channel: Some(ChannelId::new(1)),
            audio_order: vec![pid(9)],
            video_order: vec![pid(1), pid(2), pid(3)],
        }
    }

    /// Scene with indicator/managed pairs; the last pair is slot 0
    fn scene(pairs: usize) -> Vec<SceneElement> {
        let mut elements = vec![SceneElement::unmanaged("background")];
        for i in (0..pairs).rev() {
            elements.push(SceneElement::unmanaged(format!("muted {i}")));
            elements.push(SceneElement::managed(format!("cam {i}"), (320.0, 180.0)));
        }
        elements
    }

    fn managed(elements: &[SceneElement], slot: usize) -> &SceneElement {
        elements.iter().rev().filter(|e| e.managed).nth(slot).unwrap()
    }

    fn indicator(elements: &[SceneElement], slot: usize) -> &SceneElement {
        let pos = elements
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, e)| e.managed)
            .nth(slot)
            .map(|(i, _)| i)
            .unwrap();
        &elements[pos - 1]
    }

    fn run(
        sync: &SceneSynchronizer,
        roster: &RosterSnapshot,
        assignment: &SlotAssignment,
        elements: &mut [SceneElement],
        container: Size,
    ) -> SyncReport {
        let visible = roster.visible_order(sync.options().show_non_video);
        let layout = solve_for_container(
            visible.len(),
            container,
            sync.options().full_screen,
            &sync.options().constants,
        );
        let frame = SyncFrame {
            visible: &visible,
            roster,
            layout: layout.as_ref(),
            container,
        };
        sync.sync(&frame, assignment, elements)
    }

    #[test]
    fn test_assigned_participants_shown() {
        let sync = SceneSynchronizer::new(SyncOptions {
            full_screen: true,
            ..Default::default()
        });
        let assignment = SlotAssignment::new(vec![Some(pid(2)), Some(pid(1)), None], 10);
        let mut elements = scene(3);

        let report = run(&sync, &roster(), &assignment, &mut elements, Size::new(1280, 720));

        assert_eq!(report.managed, 3);
        assert_eq!(report.shown, 2);
        assert_eq!(report.hidden, 1);
        assert!(managed(&elements, 0).visible);
        assert!(managed(&elements, 1).visible);
        assert!(!managed(&elements, 2).visible);
        assert_eq!(managed(&elements, 0).policy, BoundsPolicy::FILL_TOP_LEFT);

        // pid(2) has rank 1, to the right of pid(1)
        assert!(managed(&elements, 0).crop.left > managed(&elements, 1).crop.left);
        assert_eq!(managed(&elements, 0).crop.top, managed(&elements, 1).crop.top);
    }

    #[test]
    fn test_no_layout_hides_without_touching_crop() {
        let sync = SceneSynchronizer::default();
        let assignment = SlotAssignment::new(vec![Some(pid(1))], 10);
        let mut elements = scene(1);
        let marker = Crop::new(1, 2, 3, 4);
        elements[2].crop = marker;
        elements[2].scale = Scale::new(-0.5, 0.5);

        let report = run(&sync, &roster(), &assignment, &mut elements, Size::ZERO);

        assert_eq!(report.hidden, 1);
        assert!(!elements[2].visible);
        assert_eq!(elements[2].crop, marker);
        assert_eq!(elements[2].scale, Scale::new(-0.5, 0.5));
    }

    #[test]
    fn test_idempotent() {
        let sync = SceneSynchronizer::new(SyncOptions {
            self_participant: Some(pid(1)),
            show_indicators: true,
            ..Default::default()
        });
        let assignment = SlotAssignment::new(vec![Some(pid(1)), Some(pid(9)), Some(pid(3))], 10);
        let mut elements = scene(3);
        let roster = roster();
        let container = Size::new(1920, 1080);

        let first = run(&sync, &roster, &assignment, &mut elements, container);
        let after_first = elements.clone();
        let second = run(&sync, &roster, &assignment, &mut elements, container);

        assert_eq!(first, second);
        assert_eq!(elements, after_first);
    }

    #[test]
    fn test_self_view_mirrored_once() {
        let sync = SceneSynchronizer::new(SyncOptions {
            self_participant: Some(pid(1)),
            ..Default::default()
        });
        let assignment = SlotAssignment::new(vec![Some(pid(1)), Some(pid(2))], 10);
        let mut elements = scene(2);
        let roster = roster();

        for _ in 0..3 {
            run(&sync, &roster, &assignment, &mut elements, Size::new(1280, 720));
        }
        assert_eq!(managed(&elements, 0).scale.x, -1.0);
        assert_eq!(managed(&elements, 1).scale.x, 1.0);
    }

    #[test]
    fn test_mirror_cleared_when_slot_reassigned() {
        let sync = SceneSynchronizer::new(SyncOptions {
            self_participant: Some(pid(1)),
            ..Default::default()
        });
        let mut elements = scene(1);
        let roster = roster();
        let container = Size::new(1280, 720);

        run(&sync, &roster, &SlotAssignment::new(vec![Some(pid(1))], 10), &mut elements, container);
        assert!(managed(&elements, 0).scale.is_mirrored());

        run(&sync, &roster, &SlotAssignment::new(vec![Some(pid(2))], 10), &mut elements, container);
        assert!(!managed(&elements, 0).scale.is_mirrored());
    }

    #[test]
    fn test_mirror_cleared_when_self_view_disabled() {
        let mut sync = SceneSynchronizer::new(SyncOptions {
            self_participant: Some(pid(1)),
            ..Default::default()
        });
        let assignment = SlotAssignment::new(vec![Some(pid(1))], 10);
        let mut elements = scene(1);
        let roster = roster();
        let container = Size::new(1280, 720);

        run(&sync, &roster, &assignment, &mut elements, container);
        assert!(managed(&elements, 0).scale.is_mirrored());

        sync.set_options(SyncOptions::default());
        run(&sync, &roster, &assignment, &mut elements, container);
        assert!(!managed(&elements, 0).scale.is_mirrored());
        assert_eq!(managed(&elements, 0).scale.x, 1.0);
    }

    #[test]
    fn test_audio_only_slot_hidden_with_indicator() {
        let sync = SceneSynchronizer::new(SyncOptions {
            show_indicators: true,
            ..Default::default()
        });
        let assignment = SlotAssignment::new(vec![Some(pid(1)), Some(pid(2)), Some(pid(9))], 10);
        let mut elements = scene(3);

        let report = run(&sync, &roster(), &assignment, &mut elements, Size::new(1280, 720));

        assert!(!managed(&elements, 2).visible);
        assert!(indicator(&elements, 2).visible);
        assert!(!indicator(&elements, 0).visible);
        assert_eq!(report.indicators_shown, 1);
    }

    #[test]
    fn test_indicators_untouched_when_non_video_shown() {
        let sync = SceneSynchronizer::new(SyncOptions {
            show_indicators: true,
            show_non_video: true,
            ..Default::default()
        });
        let assignment = SlotAssignment::new(vec![Some(pid(9))], 10);
        let mut elements = scene(1);
        elements[1].visible = false;

        run(&sync, &roster(), &assignment, &mut elements, Size::new(1280, 720));

        // Audio-only participant gets a tile of their own instead
        assert!(managed(&elements, 0).visible);
        assert!(!indicator(&elements, 0).visible);
    }

    #[test]
    fn test_slot_beyond_assignment_hidden() {
        let sync = SceneSynchronizer::default();
        let assignment = SlotAssignment::new(vec![Some(pid(1))], 1);
        let mut elements = scene(2);

        let report = run(&sync, &roster(), &assignment, &mut elements, Size::new(1280, 720));
        assert_eq!(report.shown, 1);
        assert!(!managed(&elements, 1).visible);
    }

    proptest! {
        #[test]
        fn prop_sync_twice_changes_nothing(
            video in 0u64..8,
            audio in 0u64..4,
            slots in proptest::collection::vec(proptest::option::of(1u64..14), 0..10),
            pairs in 1usize..10,
            show_non_video in any::<bool>(),
            show_indicators in any::<bool>(),
        ) {
            let roster = RosterSnapshot {
                channel: Some(ChannelId::new(1)),
                audio_order: (1..=audio).map(|n| pid(100 + n)).collect(),
                video_order: (1..=video).map(pid).collect(),
            };
            let sync = SceneSynchronizer::new(SyncOptions {
                show_non_video,
                show_indicators,
                self_participant: Some(pid(1)),
                ..Default::default()
            });
            let assignment = SlotAssignment::new(
                slots.into_iter().map(|s| s.map(|n| if n > 8 { pid(92 + n) } else { pid(n) })).collect(),
                64,
            );
            let mut elements = scene(pairs);

            let first = run(&sync, &roster, &assignment, &mut elements, Size::new(1280, 720));
            let snapshot = elements.clone();
            let second = run(&sync, &roster, &assignment, &mut elements, Size::new(1280, 720));

            prop_assert_eq!(first, second);
            prop_assert_eq!(elements, snapshot);
            prop_assert_eq!(first.shown + first.hidden, pairs);
        }
    }
}
