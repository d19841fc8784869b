//! Simulated host scene and scenario setup

use std::sync::Arc;

use gridmirror_core::{ChannelId, Member, ParticipantId, Size};
use gridmirror_roster::{RosterEvent, RosterSnapshot, RosterTracker};
use gridmirror_runtime::{Engine, EngineConfig, SceneHost, TickReport};
use gridmirror_scene::SceneElement;
use gridmirror_wire::ChannelSnapshot;

/// Bounding box given to managed elements unless overridden
pub const DEFAULT_BOUNDS: (f32, f32) = (320.0, 180.0);

/// In-memory stand-in for a compositing host's scene.
///
/// Built bottom-first: a background, then for each slot (highest first) an
/// optional indicator followed by its managed element. The topmost managed
/// element is slot 0.
pub struct SimulatedHost {
    size: Size,
    elements: Vec<SceneElement>,
    managed_positions: Vec<usize>,
}

impl SimulatedHost {
    pub fn new(size: Size, slots: usize, bounds: (f32, f32), indicators: bool) -> Self {
        let mut elements = vec![SceneElement::unmanaged("background")];
        for slot in (0..slots).rev() {
            if indicators {
                elements.push(SceneElement::unmanaged(format!("indicator {slot}")));
            }
            elements.push(SceneElement::managed(format!("slot {slot}"), bounds));
        }

        let mut managed_positions: Vec<usize> = elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.managed)
            .map(|(i, _)| i)
            .collect();
        managed_positions.reverse();

        SimulatedHost {
            size,
            elements,
            managed_positions,
        }
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub fn elements(&self) -> &[SceneElement] {
        &self.elements
    }

    /// Managed element bound to `slot`
    pub fn slot(&self, slot: usize) -> &SceneElement {
        &self.elements[self.managed_positions[slot]]
    }

    pub fn slot_mut(&mut self, slot: usize) -> &mut SceneElement {
        &mut self.elements[self.managed_positions[slot]]
    }

    /// Element directly below the managed element of `slot`, if it is an indicator
    pub fn indicator(&self, slot: usize) -> Option<&SceneElement> {
        let pos = self.managed_positions[slot];
        pos.checked_sub(1)
            .map(|below| &self.elements[below])
            .filter(|e| !e.managed && e.name.starts_with("indicator"))
    }

    pub fn slots(&self) -> usize {
        self.managed_positions.len()
    }
}

impl SceneHost for SimulatedHost {
    fn container_size(&self) -> Size {
        self.size
    }

    fn elements_mut(&mut self) -> &mut [SceneElement] {
        &mut self.elements
    }
}

/// A tracker, an engine reading from it and a simulated scene
pub struct Scenario {
    pub channel: ChannelId,
    pub tracker: RosterTracker,
    pub engine: Engine,
    pub host: SimulatedHost,
}

impl Scenario {
    pub fn tick(&mut self) -> TickReport {
        self.engine.tick(&mut self.host)
    }

    pub fn roster(&self) -> Arc<RosterSnapshot> {
        self.tracker.snapshot()
    }

    pub fn join(&mut self, id: u64, name: &str, video: bool) -> bool {
        self.tracker.apply_event(&RosterEvent::Join {
            channel: self.channel,
            member: Member::new(ParticipantId::new(id), name, video),
        })
    }

    pub fn leave(&mut self, id: u64) -> bool {
        self.tracker.apply_event(&RosterEvent::Leave {
            channel: self.channel,
            participant: ParticipantId::new(id),
        })
    }

    pub fn set_video(&mut self, id: u64, video: bool) -> bool {
        self.tracker.apply_event(&RosterEvent::ModeChange {
            channel: self.channel,
            participant: ParticipantId::new(id),
            video,
        })
    }

    pub fn rename(&mut self, id: u64, name: &str) -> bool {
        self.tracker.apply_event(&RosterEvent::Rename {
            channel: self.channel,
            participant: ParticipantId::new(id),
            display_name: name.to_string(),
        })
    }
}

/// Scenario builder for integration tests
pub struct ScenarioBuilder {
    channel: ChannelId,
    members: Vec<Member>,
    config: EngineConfig,
    container: Size,
    slots: usize,
    bounds: (f32, f32),
    indicators: bool,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        ScenarioBuilder {
            channel: ChannelId::new(1),
            members: Vec::new(),
            config: EngineConfig::default(),
            container: Size::new(1280, 720),
            slots: 4,
            bounds: DEFAULT_BOUNDS,
            indicators: false,
        }
    }

    pub fn with_member(mut self, id: u64, name: &str, video: bool) -> Self {
        self.members
            .push(Member::new(ParticipantId::new(id), name, video));
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind slots to participant ids, in slot order
    pub fn with_assignment(mut self, slots: &[Option<u64>]) -> Self {
        self.config.slots = slots.iter().map(|s| s.map(ParticipantId::new)).collect();
        self
    }

    pub fn with_container(mut self, width: u32, height: u32) -> Self {
        self.container = Size::new(width, height);
        self
    }

    /// Number of managed elements in the scene
    pub fn with_slots(mut self, slots: usize) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_bounds(mut self, bounds: (f32, f32)) -> Self {
        self.bounds = bounds;
        self
    }

    /// Place an indicator element below every managed element
    pub fn with_indicators(mut self) -> Self {
        self.indicators = true;
        self
    }

    pub fn build(self) -> Scenario {
        let mut tracker = RosterTracker::new();
        tracker.set_channel(
            Some(self.channel),
            &ChannelSnapshot {
                channel: self.channel,
                members: self.members,
            },
        );
        let engine = Engine::new(self.config, tracker.reader());
        let host = SimulatedHost::new(self.container, self.slots, self.bounds, self.indicators);

        Scenario {
            channel: self.channel,
            tracker,
            engine,
            host,
        }
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}
