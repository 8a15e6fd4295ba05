//! Bot status classification.
//!
//! External sources report status as free-form strings ("ACTIVE", "paused",
//! "running (paper)"). Classification happens once, here, at the boundary
//! where those strings enter the system; the persisted document always
//! carries the canonical form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Operational status of a bot as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotStatus {
    Active,
    Running,
    Idle,
    Paused,
    Error,
    Stopped,
    Offline,
    /// Anything the classifier does not recognize.
    #[default]
    Unknown,
}

impl BotStatus {
    /// Classify a free-form status string, case-insensitively.
    ///
    /// Matching is by substring, so decorated values like
    /// "Running (paper)" still classify.
    pub fn classify(raw: &str) -> Self {
        let s = raw.trim().to_ascii_lowercase();
        if s.contains("active") {
            Self::Active
        } else if s.contains("running") {
            Self::Running
        } else if s.contains("paused") {
            Self::Paused
        } else if s.contains("idle") {
            Self::Idle
        } else if s.contains("error") {
            Self::Error
        } else if s.contains("stopped") {
            Self::Stopped
        } else if s.contains("offline") {
            Self::Offline
        } else {
            Self::Unknown
        }
    }

    /// Canonical string form, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Running => "Running",
            Self::Idle => "Idle",
            Self::Paused => "Paused",
            Self::Error => "Error",
            Self::Stopped => "Stopped",
            Self::Offline => "Offline",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether the bot is currently doing work.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Active | Self::Running)
    }
}

impl std::fmt::Display for BotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BotStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::classify(s))
    }
}

impl Serialize for BotStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BotStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::classify(&raw))
    }
}
