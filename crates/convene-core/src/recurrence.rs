//! Recurrence tags.
//!
//! A recurring meeting is still a single concrete start/end pair; the tag only
//! drives labelling. Occurrences are never expanded.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// How often a meeting repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Normalizes an optional tag, defaulting missing or unknown input to `None`.
    ///
    /// Matching ignores surrounding whitespace and ASCII case.
    pub fn normalize(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::None;
        };
        match tag.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Self::None,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            other => {
                debug!(tag = other, "unrecognized recurrence tag, treating as none");
                Self::None
            }
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Returns true for weekly and monthly meetings.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns a short label for meeting cards, if the meeting repeats.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Weekly => Some("Repeats weekly"),
            Self::Monthly => Some("Repeats monthly"),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Option<&str>> for Recurrence {
    fn from(tag: Option<&str>) -> Self {
        Self::normalize(tag)
    }
}

// Lenient on input: a stored record with an odd tag still loads.
impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(Self::normalize(tag.as_deref()))
    }
}
