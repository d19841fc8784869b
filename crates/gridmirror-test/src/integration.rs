//! End-to-end scenarios
//!
//! Each scenario wires a real tracker, engine and simulated scene together:
//! - Grid selection for a full call
//! - The solo-caller second tile
//! - Audio-only occupants and their indicators
//! - Wire frames flowing through the roster task into a tick

use gridmirror_core::Size;
use gridmirror_runtime::EngineConfig;

use crate::simulator::{Scenario, ScenarioBuilder};

// ============================================================================
// SCENARIOS
// ============================================================================

/// Four cameras in a full-screen 1280x720 call window, one per slot
pub fn four_tile_call() -> Scenario {
    ScenarioBuilder::new()
        .with_config(EngineConfig {
            full_screen: true,
            ..EngineConfig::default()
        })
        .with_member(1, "Ann", true)
        .with_member(2, "Bob", true)
        .with_member(3, "Cy", true)
        .with_member(4, "Dee", true)
        .with_assignment(&[Some(1), Some(2), Some(3), Some(4)])
        .build()
}

/// One camera, nobody else in the channel
pub fn solo_caller() -> Scenario {
    ScenarioBuilder::new()
        .with_member(1, "Ann", true)
        .with_assignment(&[Some(1), None])
        .with_slots(2)
        .build()
}

/// Two cameras and one audio-only participant bound to slot 2, with indicators
pub fn muted_slot_call() -> Scenario {
    ScenarioBuilder::new()
        .with_config(EngineConfig {
            show_indicators: true,
            ..EngineConfig::default()
        })
        .with_member(1, "Ann", true)
        .with_member(2, "Bob", true)
        .with_member(3, "Cy", false)
        .with_assignment(&[Some(1), Some(2), Some(3)])
        .with_slots(3)
        .with_indicators()
        .build()
}

/// A large call for benchmarking: `count` cameras, every slot bound
pub fn crowded_call(count: u64) -> Scenario {
    let slots: Vec<Option<u64>> = (1..=count).map(Some).collect();
    let mut builder = ScenarioBuilder::new()
        .with_assignment(&slots)
        .with_slots(slots.len())
        .with_container(1920, 1080);
    for id in 1..=count {
        builder = builder.with_member(id, &format!("member {id:03}"), id % 3 != 0);
    }
    builder.build()
}

pub fn resize_to_nothing(scenario: &mut Scenario) {
    scenario.host.resize(Size::ZERO);
}
