use std::fmt;
use std::str::FromStr;

/// How a chat or analysis request is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatMode {
    /// One upstream call.
    #[default]
    Basic,
    /// Three perspective calls merged by a synthesis call.
    Pro,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Basic => "basic",
            ChatMode::Pro => "pro",
        }
    }
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(ChatMode::Basic),
            "pro" => Ok(ChatMode::Pro),
            _ => Err("Mode must be either 'basic' or 'pro'".to_string()),
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
