//! ContactType classification.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed classification of where a contact can be reached.
///
/// Used both as a display attribute of a merged contact and as the key of
/// the type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactType {
    Telegram,
    WhatsApp,
    Viber,
    Signal,
    Threema,
    Phone,
    Email,
}

impl ContactType {
    /// Every contact type, in display order.
    pub const ALL: [ContactType; 7] = [
        ContactType::Telegram,
        ContactType::WhatsApp,
        ContactType::Viber,
        ContactType::Signal,
        ContactType::Threema,
        ContactType::Phone,
        ContactType::Email,
    ];

    /// Canonical wire name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Telegram => "TELEGRAM",
            Self::WhatsApp => "WHATS_APP",
            Self::Viber => "VIBER",
            Self::Signal => "SIGNAL",
            Self::Threema => "THREEMA",
            Self::Phone => "PHONE",
            Self::Email => "EMAIL",
        }
    }
}

impl FromStr for ContactType {
    type Err = ValidationError;

    /// Parse a contact type name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownContactType(s.to_string()))
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
