//! Identity types
//!
//! The calling application assigns 64-bit snowflake identifiers to users and
//! channels. On the wire and in configuration files they travel as decimal
//! strings, because they do not fit a JSON double.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GridError;

/// Participant identity - stable, externally assigned user id
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    #[inline]
    pub fn new(id: u64) -> Self {
        ParticipantId(id)
    }
}

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Participant({})", self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ParticipantId {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_snowflake(s).map(ParticipantId)
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.to_string()
    }
}

/// Channel identity - the voice channel whose grid is mirrored
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelId(pub u64);

impl ChannelId {
    #[inline]
    pub fn new(id: u64) -> Self {
        ChannelId(id)
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel({})", self.0)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChannelId {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_snowflake(s).map(ChannelId)
    }
}

impl TryFrom<String> for ChannelId {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChannelId> for String {
    fn from(id: ChannelId) -> Self {
        id.to_string()
    }
}

fn parse_snowflake(s: &str) -> Result<u64, GridError> {
    s.trim()
        .parse::<u64>()
        .map_err(|_| GridError::InvalidId(s.to_string()))
}
