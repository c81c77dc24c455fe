//! The spoken command alphabet

use serde::{Deserialize, Serialize};

/// One of the four commands a player can say
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Jump,
    Duck,
    Left,
    Right,
}

impl Command {
    /// The full alphabet, in a stable order
    pub const ALL: [Command; 4] = [Command::Jump, Command::Duck, Command::Left, Command::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Jump => "JUMP",
            Command::Duck => "DUCK",
            Command::Left => "LEFT",
            Command::Right => "RIGHT",
        }
    }

    /// Parse a normalized token. Anything outside the alphabet is `None`.
    ///
    /// French tokens are accepted as aliases.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "jump" | "saute" | "sauter" => Some(Command::Jump),
            "duck" | "baisse" | "baisser" => Some(Command::Duck),
            "left" | "gauche" => Some(Command::Left),
            "right" | "droite" => Some(Command::Right),
            _ => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
