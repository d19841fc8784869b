//! Slot assignment - which participant each managed element shows

use gridmirror_core::ParticipantId;

/// Upper bound on configurable slots
pub const MAX_SLOTS: usize = 64;

/// Ordered slot → participant table, owned by the configuration surface
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotAssignment {
    slots: Vec<Option<ParticipantId>>,
}

impl SlotAssignment {
    /// Build from configured slots; entries past `max_slots` are dropped
    pub fn new(mut slots: Vec<Option<ParticipantId>>, max_slots: usize) -> Self {
        slots.truncate(max_slots.min(MAX_SLOTS));
        Self { slots }
    }

    /// Participant bound to `slot`, `None` if unbound or out of range
    #[inline]
    pub fn get(&self, slot: usize) -> Option<ParticipantId> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot currently bound to `participant`
    pub fn slot_of(&self, participant: ParticipantId) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(participant))
    }
}
