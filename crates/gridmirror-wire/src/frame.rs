//! RPC frame envelope
//!
//! Every frame exchanged with the calling application is one JSON object:
//!
//! ```text
//! { "cmd": "DISPATCH", "evt": "VOICE_STATE_CREATE", "data": {...}, "nonce": null }
//! ```
//!
//! Commands sent by us carry `args` and a `nonce`; responses echo the nonce.
//! Dispatches are unsolicited and carry no nonce.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use gridmirror_core::{GridError, GridResult};

/// Frame command
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Dispatch,
    Authorize,
    Authenticate,
    Subscribe,
    Unsubscribe,
    GetSelectedVoiceChannel,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DISPATCH" => Some(Command::Dispatch),
            "AUTHORIZE" => Some(Command::Authorize),
            "AUTHENTICATE" => Some(Command::Authenticate),
            "SUBSCRIBE" => Some(Command::Subscribe),
            "UNSUBSCRIBE" => Some(Command::Unsubscribe),
            "GET_SELECTED_VOICE_CHANNEL" => Some(Command::GetSelectedVoiceChannel),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Dispatch => "DISPATCH",
            Command::Authorize => "AUTHORIZE",
            Command::Authenticate => "AUTHENTICATE",
            Command::Subscribe => "SUBSCRIBE",
            Command::Unsubscribe => "UNSUBSCRIBE",
            Command::GetSelectedVoiceChannel => "GET_SELECTED_VOICE_CHANNEL",
        }
    }
}

/// Frame event name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventName {
    Ready,
    Error,
    VoiceChannelSelect,
    VoiceStateCreate,
    VoiceStateUpdate,
    VoiceStateDelete,
}

impl EventName {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "READY" => Some(EventName::Ready),
            "ERROR" => Some(EventName::Error),
            "VOICE_CHANNEL_SELECT" => Some(EventName::VoiceChannelSelect),
            "VOICE_STATE_CREATE" => Some(EventName::VoiceStateCreate),
            "VOICE_STATE_UPDATE" => Some(EventName::VoiceStateUpdate),
            "VOICE_STATE_DELETE" => Some(EventName::VoiceStateDelete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventName::Ready => "READY",
            EventName::Error => "ERROR",
            EventName::VoiceChannelSelect => "VOICE_CHANNEL_SELECT",
            EventName::VoiceStateCreate => "VOICE_STATE_CREATE",
            EventName::VoiceStateUpdate => "VOICE_STATE_UPDATE",
            EventName::VoiceStateDelete => "VOICE_STATE_DELETE",
        }
    }

    /// Scoped to a single channel through `args.channel_id`
    pub fn is_channel_scoped(self) -> bool {
        matches!(
            self,
            EventName::VoiceStateCreate | EventName::VoiceStateUpdate | EventName::VoiceStateDelete
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawFrame {
    cmd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    evt: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    data: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    args: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nonce: Option<String>,
}

/// A decoded frame
#[derive(Debug, Clone, PartialEq)]
pub struct RpcFrame {
    pub cmd: Command,
    pub evt: Option<EventName>,
    pub data: Value,
    pub args: Value,
    pub nonce: Option<String>,
}

impl RpcFrame {
    /// Outgoing command frame
    pub fn command(cmd: Command, args: Value, nonce: impl Into<String>) -> Self {
        RpcFrame {
            cmd,
            evt: None,
            data: Value::Null,
            args,
            nonce: Some(nonce.into()),
        }
    }

    pub fn with_event(mut self, evt: EventName) -> Self {
        self.evt = Some(evt);
        self
    }

    /// Parse a frame received as text
    pub fn parse(text: &str) -> GridResult<Self> {
        let raw: RawFrame =
            serde_json::from_str(text).map_err(|e| GridError::InvalidFrame(e.to_string()))?;

        let cmd = Command::from_name(&raw.cmd).ok_or(GridError::UnknownCommand(raw.cmd))?;
        let evt = match raw.evt {
            Some(name) => Some(EventName::from_name(&name).ok_or(GridError::UnknownEvent(name))?),
            None => None,
        };

        Ok(RpcFrame {
            cmd,
            evt,
            data: raw.data,
            args: raw.args,
            nonce: raw.nonce,
        })
    }

    /// Serialize for sending
    pub fn to_json(&self) -> GridResult<String> {
        let raw = RawFrame {
            cmd: self.cmd.as_str().to_string(),
            evt: self.evt.map(|e| e.as_str().to_string()),
            data: self.data.clone(),
            args: self.args.clone(),
            nonce: self.nonce.clone(),
        };
        serde_json::to_string(&raw).map_err(|e| GridError::InvalidFrame(e.to_string()))
    }

    pub fn is_dispatch(&self) -> bool {
        self.cmd == Command::Dispatch
    }

    pub fn is_error(&self) -> bool {
        self.evt == Some(EventName::Error)
    }

    /// Response to the command sent with `nonce`
    pub fn answers(&self, nonce: &str) -> bool {
        self.nonce.as_deref() == Some(nonce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_parse_dispatch() {
        let frame = RpcFrame::parse(
            r#"{"cmd":"DISPATCH","evt":"VOICE_STATE_DELETE","data":{"nick":"ann"},"nonce":null}"#,
        )
        .unwrap();

        assert!(frame.is_dispatch());
        assert_eq!(frame.evt, Some(EventName::VoiceStateDelete));
        assert_eq!(frame.data["nick"], "ann");
        assert_eq!(frame.nonce, None);
    }

    #[test]
    fn test_unknown_names_rejected() {
        let err = RpcFrame::parse(r#"{"cmd":"FROBNICATE"}"#).unwrap_err();
        assert!(matches!(err, GridError::UnknownCommand(ref c) if c == "FROBNICATE"));

        let err = RpcFrame::parse(r#"{"cmd":"DISPATCH","evt":"GUILD_CREATE"}"#).unwrap_err();
        assert!(matches!(err, GridError::UnknownEvent(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            RpcFrame::parse("{not json"),
            Err(GridError::InvalidFrame(_))
        ));
    }

    #[test]
    fn test_command_encoding() {
        let frame = RpcFrame::command(Command::Subscribe, json!({"channel_id": "5"}), "n-1")
            .with_event(EventName::VoiceStateCreate);
        let text = frame.to_json().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["cmd"], "SUBSCRIBE");
        assert_eq!(value["evt"], "VOICE_STATE_CREATE");
        assert_eq!(value["args"]["channel_id"], "5");
        assert_eq!(value["nonce"], "n-1");
        assert!(value.get("data").is_none());

        assert_eq!(RpcFrame::parse(&text).unwrap(), frame);
        assert!(frame.answers("n-1"));
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(text in "\\PC{0,64}") {
            let _ = RpcFrame::parse(&text);
        }

        #[test]
        fn prop_parse_any_cmd_object(cmd in "[A-Z_]{1,24}") {
            let text = format!(r#"{{"cmd":"{cmd}"}}"#);
            match RpcFrame::parse(&text) {
                Ok(frame) => prop_assert_eq!(frame.cmd.as_str(), cmd.as_str()),
                Err(e) => prop_assert!(matches!(e, GridError::UnknownCommand(_))),
            }
        }
    }
}
