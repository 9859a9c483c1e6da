use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Optional role requested with `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameArg {
    Percival,
    Mordred,
    Oberon,
    Morgana,
}

impl GameArg {
    pub const ALL: [GameArg; 4] = [
        GameArg::Percival,
        GameArg::Mordred,
        GameArg::Oberon,
        GameArg::Morgana,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameArg::Percival => "percival",
            GameArg::Mordred => "mordred",
            GameArg::Oberon => "oberon",
            GameArg::Morgana => "morgana",
        }
    }
}

impl fmt::Display for GameArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameArg::ALL
            .into_iter()
            .find(|arg| arg.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Parses the argument string of `start`. Returns the first unknown word on failure.
pub fn parse_game_args(arg: &str) -> Result<BTreeSet<GameArg>, String> {
    arg.to_lowercase().split_whitespace().map(str::parse).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicCommand {
    Info,
    Highscore,
    Join,
    Leave,
    Start(String),
    Team(Vec<String>),
    Kill(String),
}

impl PublicCommand {
    /// Returns `None` for chatter and for prefixed words that are not commands.
    pub fn parse(prefix: &str, msg: &str) -> Option<Self> {
        let body = msg.strip_prefix(prefix)?;
        let (word, arg) = match body.split_once(' ') {
            Some((word, arg)) => (word, arg.trim()),
            None => (body, ""),
        };
        let command = match word.to_lowercase().as_str() {
            "info" => PublicCommand::Info,
            "highscore" => PublicCommand::Highscore,
            "join" => PublicCommand::Join,
            "leave" => PublicCommand::Leave,
            "start" => PublicCommand::Start(arg.to_string()),
            "team" => PublicCommand::Team(arg.split_whitespace().map(str::to_string).collect()),
            "kill" => PublicCommand::Kill(arg.to_string()),
            _ => return None,
        };
        Some(command)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrivateCommand {
    Accept,
    Reject,
    Success,
    Fail,
    Identify,
}

impl PrivateCommand {
    pub const UNSUPPORTED_REPLY: &'static str = "Unsupported command. Supported commands via private message are accept, reject, success, fail, identify.";

    pub fn parse(msg: &str) -> Option<Self> {
        match msg.trim().to_lowercase().as_str() {
            "accept" | "a" => Some(PrivateCommand::Accept),
            "reject" | "r" => Some(PrivateCommand::Reject),
            "success" | "s" => Some(PrivateCommand::Success),
            "fail" | "f" => Some(PrivateCommand::Fail),
            "identify" => Some(PrivateCommand::Identify),
            _ => None,
        }
    }
}
