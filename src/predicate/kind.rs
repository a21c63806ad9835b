//! Date-time kinds for kind-matching rules.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a moment relates to a time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeKind {
    /// No time zone information.
    Unspecified,
    /// Coordinated universal time.
    Utc,
    /// The local time zone.
    Local,
}

impl DateTimeKind {
    /// Parse a kind from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "unspecified" => Some(Self::Unspecified),
            "utc" => Some(Self::Utc),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

impl std::fmt::Display for DateTimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateTimeKind::Unspecified => write!(f, "unspecified"),
            DateTimeKind::Utc => write!(f, "utc"),
            DateTimeKind::Local => write!(f, "local"),
        }
    }
}

/// A point in time tagged with its [`DateTimeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    Unspecified(NaiveDateTime),
    Utc(DateTime<Utc>),
    Local(DateTime<Local>),
}

impl Moment {
    pub fn kind(&self) -> DateTimeKind {
        match self {
            Moment::Unspecified(_) => DateTimeKind::Unspecified,
            Moment::Utc(_) => DateTimeKind::Utc,
            Moment::Local(_) => DateTimeKind::Local,
        }
    }
}

impl From<NaiveDateTime> for Moment {
    fn from(value: NaiveDateTime) -> Self {
        Moment::Unspecified(value)
    }
}

impl From<DateTime<Utc>> for Moment {
    fn from(value: DateTime<Utc>) -> Self {
        Moment::Utc(value)
    }
}

impl From<DateTime<Local>> for Moment {
    fn from(value: DateTime<Local>) -> Self {
        Moment::Local(value)
    }
}
