//! The closed set of bridge commands and their typed requests.

use std::fmt;
use std::str::FromStr;

use musicbox_common::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cookie::CookieDetails;

/// A command the UI surface may send to the host.
///
/// The set is fixed at compile time; there is no runtime registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    GetAppVersion,
    GetAppName,
    GetCookies,
    SetCookie,
    RemoveCookie,
    ClearAllCookies,
    GetAllCookies,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::GetAppVersion,
        Command::GetAppName,
        Command::GetCookies,
        Command::SetCookie,
        Command::RemoveCookie,
        Command::ClearAllCookies,
        Command::GetAllCookies,
    ];

    /// Wire name used in IPC envelopes.
    pub fn name(self) -> &'static str {
        match self {
            Command::GetAppVersion => "get-app-version",
            Command::GetAppName => "get-app-name",
            Command::GetCookies => "get-cookies",
            Command::SetCookie => "set-cookie",
            Command::RemoveCookie => "remove-cookie",
            Command::ClearAllCookies => "clear-all-cookies",
            Command::GetAllCookies => "get-all-cookies",
        }
    }

    /// Number of positional arguments the command takes.
    pub fn arity(self) -> usize {
        match self {
            Command::GetCookies | Command::SetCookie => 1,
            Command::RemoveCookie => 2,
            Command::GetAppVersion
            | Command::GetAppName
            | Command::ClearAllCookies
            | Command::GetAllCookies => 0,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| BridgeError::UnknownCommand(s.to_string()))
    }
}

/// A typed request, one per [`Command`], carrying that command's arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    GetAppVersion,
    GetAppName,
    GetCookies { url: String },
    SetCookie(CookieDetails),
    RemoveCookie { url: String, name: String },
    ClearAllCookies,
    GetAllCookies,
}

impl Request {
    pub fn command(&self) -> Command {
        match self {
            Request::GetAppVersion => Command::GetAppVersion,
            Request::GetAppName => Command::GetAppName,
            Request::GetCookies { .. } => Command::GetCookies,
            Request::SetCookie(_) => Command::SetCookie,
            Request::RemoveCookie { .. } => Command::RemoveCookie,
            Request::ClearAllCookies => Command::ClearAllCookies,
            Request::GetAllCookies => Command::GetAllCookies,
        }
    }

    /// Decode the ordered argument list of a wire request.
    pub fn from_wire(command: Command, args: Vec<Value>) -> Result<Self, BridgeError> {
        if args.len() != command.arity() {
            return Err(BridgeError::InvalidArgument(format!(
                "{command} expects {} argument(s), got {}",
                command.arity(),
                args.len()
            )));
        }

        let mut args = args.into_iter();
        let request = match command {
            Command::GetAppVersion => Request::GetAppVersion,
            Command::GetAppName => Request::GetAppName,
            Command::ClearAllCookies => Request::ClearAllCookies,
            Command::GetAllCookies => Request::GetAllCookies,
            Command::GetCookies => Request::GetCookies {
                url: string_arg(command, "url", args.next())?,
            },
            Command::RemoveCookie => Request::RemoveCookie {
                url: string_arg(command, "url", args.next())?,
                name: string_arg(command, "name", args.next())?,
            },
            Command::SetCookie => {
                let value = args.next().unwrap_or(Value::Null);
                let details = serde_json::from_value::<CookieDetails>(value).map_err(|e| {
                    BridgeError::InvalidArgument(format!("{command}: malformed cookie: {e}"))
                })?;
                Request::SetCookie(details)
            }
        };
        Ok(request)
    }
}

fn string_arg(command: Command, field: &str, value: Option<Value>) -> Result<String, BridgeError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        other => Err(BridgeError::InvalidArgument(format!(
            "{command}: `{field}` must be a string, got {}",
            other.map_or_else(|| "nothing".to_string(), |v| v.to_string())
        ))),
    }
}
