//! Replay a recorded RPC session against a simulated scene and print where
//! each managed element ends up.
//!
//! The recording holds one received frame per line, as the calling
//! application sent it.

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use gridmirror_core::{GridError, Size};
use gridmirror_runtime::{init_tracing, start, EngineConfig, RosterCommand, SceneHost};
use gridmirror_scene::SceneElement;
use gridmirror_wire::{translate, Dispatch, RpcFrame};

#[derive(Debug, Parser)]
#[clap(name = "gridmirror-replay")]
struct Opt {
    /// Recorded frames, one JSON object per line
    #[clap(long)]
    frames: PathBuf,

    /// Engine configuration (JSON); defaults apply when omitted
    #[clap(long)]
    config: Option<PathBuf>,

    /// Capture width in pixels
    #[clap(long, default_value_t = 1280)]
    width: u32,

    /// Capture height in pixels
    #[clap(long, default_value_t = 720)]
    height: u32,

    /// Number of managed elements in the scene
    #[clap(long, default_value_t = 4)]
    elements: usize,
}

struct ReplayHost {
    size: Size,
    elements: Vec<SceneElement>,
}

impl SceneHost for ReplayHost {
    fn container_size(&self) -> Size {
        self.size
    }

    fn elements_mut(&mut self) -> &mut [SceneElement] {
        &mut self.elements
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opt::parse();

    let config = match &opts.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    init_tracing(&config.telemetry)?;

    let text = std::fs::read_to_string(&opts.frames)?;
    let (mut engine, handle) = start(config)?;

    let mut subscribed = None;
    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let dispatch = match RpcFrame::parse(line).and_then(|frame| translate(&frame, subscribed)) {
            Ok(dispatch) => dispatch,
            Err(e) => {
                warn!(line = number + 1, error = %e, "frame skipped");
                continue;
            }
        };

        match &dispatch {
            Dispatch::Snapshot(snapshot) => subscribed = snapshot.as_ref().map(|s| s.channel),
            Dispatch::ChannelSwitch { channel: None } => subscribed = None,
            _ => {}
        }
        for command in RosterCommand::from_dispatch(dispatch) {
            handle.send(command).await?;
        }
    }

    let exit = handle.shutdown().await?;
    println!(
        "channel {:?}: {} commands, {} events applied, {} ignored",
        exit.tracker.channel(),
        exit.stats.commands,
        exit.stats.events_applied,
        exit.stats.events_ignored
    );

    let mut host = ReplayHost {
        size: Size::new(opts.width, opts.height),
        elements: (0..opts.elements)
            .rev()
            .map(|slot| SceneElement::managed(format!("slot {slot}"), (16.0, 9.0)))
            .collect(),
    };
    let report = engine.tick(&mut host);
    println!(
        "visible {} (layout count {}), grid {}",
        report.visible.len(),
        report.layout_count,
        report
            .layout
            .map(|l| format!("{}x{} tiles of {:.1}x{:.1}", l.rows, l.cols, l.tile_width, l.tile_height))
            .unwrap_or_else(|| "none".to_string())
    );

    for (slot, element) in host.elements.iter().rev().enumerate() {
        let participant = engine
            .assignment()
            .get(slot)
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        if element.visible {
            let crop = element.crop;
            println!(
                "slot {slot} [{participant}]: crop l={} t={} r={} b={} mirrored={}",
                crop.left,
                crop.top,
                crop.right,
                crop.bottom,
                element.scale.is_mirrored()
            );
        } else {
            println!("slot {slot} [{participant}]: hidden");
        }
    }

    if report.sync.managed == 0 {
        return Err(GridError::InvalidConfig("scene has no managed elements".to_string()).into());
    }
    Ok(())
}
