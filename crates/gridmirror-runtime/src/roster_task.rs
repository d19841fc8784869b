//! Roster-owning task
//!
//! The connection layer never touches the tracker. It sends commands over a
//! bounded channel; this task applies them in order and is the only writer.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use gridmirror_core::ChannelId;
use gridmirror_roster::{NoDirectory, RosterEvent, RosterTracker};
use gridmirror_wire::{ChannelSnapshot, Dispatch};

/// Input to the roster task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterCommand {
    /// Track `channel`, seeding from `snapshot` when it describes that channel
    SelectChannel {
        channel: Option<ChannelId>,
        snapshot: Option<ChannelSnapshot>,
    },
    Event(RosterEvent),
}

impl RosterCommand {
    /// Commands implied by a translated frame.
    ///
    /// A switch to another channel yields nothing: the connection layer
    /// fetches the selected channel again and the answer arrives as a
    /// snapshot. Leaving voice clears the roster right away.
    pub fn from_dispatch(dispatch: Dispatch) -> Vec<RosterCommand> {
        match dispatch {
            Dispatch::Snapshot(Some(snapshot)) => vec![RosterCommand::SelectChannel {
                channel: Some(snapshot.channel),
                snapshot: Some(snapshot),
            }],
            Dispatch::Snapshot(None) | Dispatch::ChannelSwitch { channel: None } => {
                vec![RosterCommand::SelectChannel {
                    channel: None,
                    snapshot: None,
                }]
            }
            Dispatch::Roster(events) => events.into_iter().map(RosterCommand::Event).collect(),
            Dispatch::ChannelSwitch { .. } | Dispatch::Ready | Dispatch::Ignored => Vec::new(),
        }
    }
}

/// Counters kept by the roster task
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterStats {
    pub commands: u64,
    pub events_applied: u64,
    pub events_ignored: u64,
    pub channel_switches: u64,
}

/// What the task hands back when it stops
#[derive(Debug)]
pub struct RosterTaskExit {
    pub tracker: RosterTracker,
    pub stats: RosterStats,
}

/// Apply one command to the tracker
pub fn apply_command(tracker: &mut RosterTracker, command: &RosterCommand, stats: &mut RosterStats) {
    stats.commands += 1;
    match command {
        RosterCommand::SelectChannel { channel, snapshot } => {
            if channel.is_some() && *channel == tracker.channel() {
                return;
            }
            stats.channel_switches += 1;
            match snapshot {
                Some(snapshot) => tracker.set_channel(*channel, snapshot),
                None => tracker.set_channel(*channel, &NoDirectory),
            }
        }
        RosterCommand::Event(event) => {
            if tracker.apply_event(event) {
                stats.events_applied += 1;
            } else {
                stats.events_ignored += 1;
            }
        }
    }
}

/// Run the tracker on its own task until the channel closes or `shutdown`
/// fires. On shutdown, commands already queued are applied before exiting.
pub fn spawn_roster_task(
    mut tracker: RosterTracker,
    mut rx: mpsc::Receiver<RosterCommand>,
    mut shutdown: oneshot::Receiver<()>,
) -> JoinHandle<RosterTaskExit> {
    tokio::spawn(async move {
        let mut stats = RosterStats::default();
        info!("roster task started");

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    rx.close();
                    while let Ok(command) = rx.try_recv() {
                        apply_command(&mut tracker, &command, &mut stats);
                    }
                    debug!("roster task shutting down");
                    break;
                }
                command = rx.recv() => match command {
                    Some(command) => apply_command(&mut tracker, &command, &mut stats),
                    None => {
                        warn!(
                            channel = ?tracker.channel(),
                            "roster channel closed, connection lost; keeping last roster"
                        );
                        break;
                    }
                },
            }
        }

        info!(
            commands = stats.commands,
            applied = stats.events_applied,
            switches = stats.channel_switches,
            "roster task stopped"
        );
        RosterTaskExit { tracker, stats }
    })
}
