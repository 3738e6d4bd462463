use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BridgeError;

/// The language an actor is implemented in.
///
/// Discriminants are the codes returned across the boundary and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Language {
    Python = 0,
    Java = 1,
    Cpp = 2,
}

impl Language {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }
}

impl TryFrom<i32> for Language {
    type Error = BridgeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Language::Python),
            1 => Ok(Language::Java),
            2 => Ok(Language::Cpp),
            other => Err(BridgeError::malformed(format!(
                "unknown language code {}",
                other
            ))),
        }
    }
}

impl FromStr for Language {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "cpp" | "c++" => Ok(Language::Cpp),
            _ => Err(BridgeError::malformed(format!("unknown language '{}'", s))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
