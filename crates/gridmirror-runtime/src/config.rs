//! Engine configuration
//!
//! Loaded from JSON. Every field has a default, so `{}` is a valid config.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use gridmirror_core::{GridError, GridResult, ParticipantId};
use gridmirror_layout::GridConstants;
use gridmirror_scene::{SlotAssignment, SyncOptions, MAX_SLOTS};

use crate::TelemetryConfig;

/// gridmirror engine configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// The call window has no title bar
    pub full_screen: bool,
    /// Audio-only participants get tiles after the video participants
    pub show_non_video: bool,
    /// Local participant; their tile is mirrored while their camera is on
    pub self_participant: Option<ParticipantId>,
    /// Show the indicator element below a slot occupied by an audio-only participant
    pub show_indicators: bool,
    /// Operator-chosen participant per slot, in slot order
    pub slots: Vec<Option<ParticipantId>>,
    pub max_slots: usize,
    /// Advisory interval for hosts that let the engine drive its own timer
    #[serde(with = "duration_text")]
    pub tick_interval: Duration,
    /// Capacity of the roster command channel
    pub event_buffer: usize,
    pub grid: GridConstants,
    pub telemetry: TelemetryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            full_screen: false,
            show_non_video: false,
            self_participant: None,
            show_indicators: false,
            slots: Vec::new(),
            max_slots: MAX_SLOTS,
            tick_interval: Duration::from_millis(100),
            event_buffer: 256,
            grid: GridConstants::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document
    pub fn from_json(text: &str) -> GridResult<Self> {
        let config: EngineConfig =
            serde_json::from_str(text).map_err(|e| GridError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GridError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> GridResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GridError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.max_slots == 0 || self.max_slots > MAX_SLOTS {
            return Err(GridError::InvalidConfig(format!(
                "max_slots must be within 1..={MAX_SLOTS}, got {}",
                self.max_slots
            )));
        }
        if self.slots.len() > self.max_slots {
            return Err(GridError::InvalidConfig(format!(
                "{} slots configured, at most {} allowed",
                self.slots.len(),
                self.max_slots
            )));
        }
        if self.event_buffer == 0 {
            return Err(GridError::InvalidConfig("event_buffer must be positive".to_string()));
        }
        if self.tick_interval.is_zero() {
            return Err(GridError::InvalidConfig("tick_interval must be positive".to_string()));
        }

        let grid = &self.grid;
        if !(grid.aspect.is_finite() && grid.aspect > 0.0) {
            return Err(GridError::InvalidConfig(format!(
                "grid aspect must be positive, got {}",
                grid.aspect
            )));
        }
        let lengths = [
            ("spacing", grid.spacing),
            ("margin_top", grid.margin_top),
            ("margin_sides", grid.margin_sides),
            ("margin_bottom", grid.margin_bottom),
            ("title_bar_height", grid.title_bar_height),
            ("crop_inset", grid.crop_inset),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GridError::InvalidConfig(format!(
                    "grid {name} must be a non-negative length, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            full_screen: self.full_screen,
            show_non_video: self.show_non_video,
            self_participant: self.self_participant,
            show_indicators: self.show_indicators,
            constants: self.grid,
        }
    }

    pub fn assignment(&self) -> SlotAssignment {
        SlotAssignment::new(self.slots.clone(), self.max_slots)
    }
}

/// Durations written the way people read them: "100ms", "1s 500ms"
mod duration_text {
    use std::time::Duration;

    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(D::Error::custom)
    }
}
