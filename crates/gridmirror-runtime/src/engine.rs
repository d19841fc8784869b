//! gridmirror Engine - per-tick orchestration
//!
//! The host calls [`Engine::tick`] from its own video tick. A tick reads one
//! roster snapshot, picks the visible participants, solves the grid and
//! synchronises the host's elements. Nothing in a tick blocks or fails.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use gridmirror_core::{GridError, GridResult, ParticipantId, Size};
use gridmirror_layout::{layout_count, solve_for_container, GridLayout};
use gridmirror_roster::{RosterReader, RosterTracker};
use gridmirror_scene::{SceneElement, SceneSynchronizer, SlotAssignment, SyncFrame, SyncReport};

use crate::{spawn_roster_task, EngineConfig, RosterCommand, RosterTaskExit};

/// The compositing host's scene, as seen by the engine
pub trait SceneHost {
    /// Current size of the call-window capture; zero until it renders
    fn container_size(&self) -> Size;

    /// Elements in z-order, bottom first
    fn elements_mut(&mut self) -> &mut [SceneElement];
}

#[derive(Clone, Debug, Default)]
pub struct RuntimeStats {
    pub ticks: u64,
    pub layout_changes: u64,
    /// Participants visible at the last tick
    pub visible: usize,
    pub shown: usize,
    pub hidden: usize,
    pub last_tick_duration: Duration,
}

/// Outcome of one tick
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub visible: Vec<ParticipantId>,
    /// Tile count handed to the solver
    pub layout_count: usize,
    pub layout: Option<GridLayout>,
    pub sync: SyncReport,
}

pub struct Engine {
    config: EngineConfig,
    reader: RosterReader,
    synchronizer: SceneSynchronizer,
    assignment: SlotAssignment,
    last_layout: Option<GridLayout>,
    stats: RuntimeStats,
}

impl Engine {
    pub fn new(config: EngineConfig, reader: RosterReader) -> Self {
        Engine {
            synchronizer: SceneSynchronizer::new(config.sync_options()),
            assignment: config.assignment(),
            config,
            reader,
            last_layout: None,
            stats: RuntimeStats::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the operator settings; takes effect on the next tick
    pub fn reconfigure(&mut self, config: EngineConfig) -> GridResult<()> {
        config.validate()?;
        self.synchronizer.set_options(config.sync_options());
        self.assignment = config.assignment();
        self.config = config;
        debug!(slots = self.assignment.len(), "engine reconfigured");
        Ok(())
    }

    /// Point one slot at a participant, or clear it
    pub fn assign(&mut self, slot: usize, participant: Option<ParticipantId>) -> GridResult<()> {
        if slot >= self.config.max_slots {
            return Err(GridError::InvalidConfig(format!(
                "slot {slot} beyond max_slots {}",
                self.config.max_slots
            )));
        }
        let mut slots = self.config.slots.clone();
        if slots.len() <= slot {
            slots.resize(slot + 1, None);
        }
        slots[slot] = participant;
        self.config.slots = slots;
        self.assignment = self.config.assignment();
        Ok(())
    }

    pub fn assignment(&self) -> &SlotAssignment {
        &self.assignment
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    pub fn tick(&mut self, host: &mut impl SceneHost) -> TickReport {
        let start = Instant::now();
        self.stats.ticks += 1;

        let roster = self.reader.snapshot();
        let show_non_video = self.config.show_non_video;
        let visible = roster.visible_order(show_non_video);
        let count = layout_count(
            visible.len(),
            roster.audio_order.len(),
            roster.video_order.len(),
            show_non_video,
        );

        let container = host.container_size();
        let layout = solve_for_container(count, container, self.config.full_screen, &self.config.grid);
        if layout != self.last_layout {
            self.stats.layout_changes += 1;
            debug!(
                count,
                width = container.width,
                height = container.height,
                rows = ?layout.map(|l| l.rows),
                cols = ?layout.map(|l| l.cols),
                "layout changed"
            );
            self.last_layout = layout;
        }

        let frame = SyncFrame {
            visible: &visible,
            roster: &roster,
            layout: layout.as_ref(),
            container,
        };
        let sync = self.synchronizer.sync(&frame, &self.assignment, host.elements_mut());

        self.stats.visible = visible.len();
        self.stats.shown = sync.shown;
        self.stats.hidden = sync.hidden;
        self.stats.last_tick_duration = start.elapsed();

        TickReport {
            visible,
            layout_count: count,
            layout,
            sync,
        }
    }

    /// Tick `host` every `tick_interval` until `shutdown` resolves
    pub async fn run<H: SceneHost>(&mut self, host: &mut H, shutdown: impl Future<Output = ()>) {
        let mut interval = tokio::time::interval(self.config.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => {
                    self.tick(host);
                }
            }
        }
    }
}

/// Connection-side handle to the roster task
pub struct EngineHandle {
    sender: mpsc::Sender<RosterCommand>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<RosterTaskExit>,
}

impl EngineHandle {
    pub async fn send(&self, command: RosterCommand) -> GridResult<()> {
        self.sender
            .send(command)
            .await
            .map_err(|_| GridError::ChannelClosed)
    }

    /// Stop the roster task and wait for it. Commands already queued are
    /// still applied.
    pub async fn shutdown(self) -> GridResult<RosterTaskExit> {
        let EngineHandle { sender, stop, task } = self;
        // The task may already be gone after a closed channel
        let _ = stop.send(());
        drop(sender);
        task.await.map_err(|e| GridError::TaskFailed(e.to_string()))
    }
}

/// Spawn the roster task and build the engine reading from it.
///
/// Must be called inside a tokio runtime.
pub fn start(config: EngineConfig) -> GridResult<(Engine, EngineHandle)> {
    config.validate()?;

    let tracker = RosterTracker::new();
    let reader = tracker.reader();
    let (sender, rx) = mpsc::channel(config.event_buffer);
    let (stop, shutdown) = oneshot::channel();
    let task = spawn_roster_task(tracker, rx, shutdown);

    Ok((Engine::new(config, reader), EngineHandle { sender, stop, task }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmirror_core::{ChannelId, Member};
    use gridmirror_roster::RosterEvent;
    use gridmirror_wire::ChannelSnapshot;

    const CHANNEL: ChannelId = ChannelId(3);

    struct Host {
        size: Size,
        elements: Vec<SceneElement>,
    }

    impl SceneHost for Host {
        fn container_size(&self) -> Size {
            self.size
        }

        fn elements_mut(&mut self) -> &mut [SceneElement] {
            &mut self.elements
        }
    }

    fn host(size: Size) -> Host {
        Host {
            size,
            elements: vec![
                SceneElement::managed("cam 1", (320.0, 180.0)),
                SceneElement::managed("cam 0", (320.0, 180.0)),
            ],
        }
    }

    fn pid(n: u64) -> ParticipantId {
        ParticipantId::new(n)
    }

    fn config(slots: Vec<Option<ParticipantId>>) -> EngineConfig {
        EngineConfig {
            slots,
            ..EngineConfig::default()
        }
    }

    fn seeded(members: Vec<Member>) -> RosterTracker {
        let mut tracker = RosterTracker::new();
        tracker.set_channel(
            Some(CHANNEL),
            &ChannelSnapshot {
                channel: CHANNEL,
                members,
            },
        );
        tracker
    }

    #[test]
    fn test_tick_solo_caller() {
        let tracker = seeded(vec![Member::new(pid(1), "Ann", true)]);
        let mut engine = Engine::new(config(vec![Some(pid(1))]), tracker.reader());
        let mut host = host(Size::new(1280, 720));

        let report = engine.tick(&mut host);
        assert_eq!(report.visible, vec![pid(1)]);
        assert_eq!(report.layout_count, 2);
        assert_eq!(report.sync.shown, 1);
        assert_eq!(report.sync.hidden, 1);
        assert!(host.elements[1].visible);
        assert!(!host.elements[0].visible);
        assert_eq!(engine.stats().ticks, 1);
        assert_eq!(engine.stats().layout_changes, 1);
    }

    #[test]
    fn test_tick_without_container_hides_everything() {
        let tracker = seeded(vec![Member::new(pid(1), "Ann", true)]);
        let mut engine = Engine::new(config(vec![Some(pid(1))]), tracker.reader());
        let mut host = host(Size::ZERO);

        let report = engine.tick(&mut host);
        assert!(report.layout.is_none());
        assert_eq!(report.sync.hidden, 2);
        assert!(host.elements.iter().all(|e| !e.visible));
        assert_eq!(engine.stats().layout_changes, 0);
    }

    #[test]
    fn test_tick_follows_roster_changes() {
        let mut tracker = seeded(vec![
            Member::new(pid(1), "Ann", true),
            Member::new(pid(2), "Bob", false),
        ]);
        let mut engine = Engine::new(config(vec![Some(pid(2))]), tracker.reader());
        let mut host = host(Size::new(1280, 720));

        let report = engine.tick(&mut host);
        assert_eq!(report.sync.shown, 0);

        tracker.apply_event(&RosterEvent::ModeChange {
            channel: CHANNEL,
            participant: pid(2),
            video: true,
        });
        let report = engine.tick(&mut host);
        assert_eq!(report.visible, vec![pid(1), pid(2)]);
        assert_eq!(report.layout_count, 2);
        assert_eq!(report.sync.shown, 1);
        assert!(host.elements[1].visible);
    }

    #[test]
    fn test_assign_and_reconfigure() {
        let tracker = seeded(vec![
            Member::new(pid(1), "Ann", true),
            Member::new(pid(2), "Bob", true),
        ]);
        let mut engine = Engine::new(EngineConfig::default(), tracker.reader());
        let mut host = host(Size::new(1280, 720));

        assert_eq!(engine.tick(&mut host).sync.shown, 0);

        engine.assign(1, Some(pid(2))).unwrap();
        assert_eq!(engine.assignment().get(0), None);
        assert_eq!(engine.assignment().get(1), Some(pid(2)));
        assert_eq!(engine.tick(&mut host).sync.shown, 1);
        assert!(host.elements[0].visible);

        assert!(engine.assign(64, Some(pid(1))).is_err());

        let mut bad = EngineConfig::default();
        bad.max_slots = 0;
        assert!(engine.reconfigure(bad).is_err());

        engine.reconfigure(config(vec![Some(pid(1)), Some(pid(2))])).unwrap();
        assert_eq!(engine.tick(&mut host).sync.shown, 2);
    }

    #[test]
    fn test_reconfigure_without_self_unmirrors() {
        let tracker = seeded(vec![Member::new(pid(1), "Ann", true)]);
        let mut with_self = config(vec![Some(pid(1))]);
        with_self.self_participant = Some(pid(1));
        let mut engine = Engine::new(with_self, tracker.reader());
        let mut host = host(Size::new(1280, 720));

        engine.tick(&mut host);
        assert_eq!(host.elements[1].scale.x, -1.0);

        engine.reconfigure(config(vec![Some(pid(1))])).unwrap();
        engine.tick(&mut host);
        assert_eq!(host.elements[1].scale.x, 1.0);
    }

    #[tokio::test]
    async fn test_start_and_shutdown() {
        let (mut engine, handle) = start(config(vec![Some(pid(1))])).unwrap();
        let mut host = host(Size::new(1280, 720));

        handle
            .send(RosterCommand::SelectChannel {
                channel: Some(CHANNEL),
                snapshot: Some(ChannelSnapshot {
                    channel: CHANNEL,
                    members: vec![Member::new(pid(1), "Ann", true)],
                }),
            })
            .await
            .unwrap();

        let exit = handle.shutdown().await.unwrap();
        assert_eq!(exit.stats.channel_switches, 1);

        let report = engine.tick(&mut host);
        assert_eq!(report.visible, vec![pid(1)]);
        assert_eq!(report.sync.shown, 1);
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let mut config = config(Vec::new());
        config.tick_interval = Duration::from_millis(5);
        let (mut engine, handle) = start(config).unwrap();
        let mut host = host(Size::new(1280, 720));

        engine
            .run(&mut host, tokio::time::sleep(Duration::from_millis(30)))
            .await;
        assert!(engine.stats().ticks >= 1);

        handle.shutdown().await.unwrap();
    }
}
