//! Identity policy deciding which records describe the same person.

use crate::models::{non_empty, ContactRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static NON_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\D+").expect("Failed to compile non-digit regex"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

/// A field that can establish identity between two records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MergeKey {
    /// Digits of the normalized phone number
    NormalizedNumber,

    /// Trimmed, lower-cased email address
    Email,

    /// Lower-cased "first surname"; only used when no other key is present
    FullName,
}

/// Default identity policy: number, then email, then full name.
pub const DEFAULT_MERGE_POLICY: [MergeKey; 3] =
    [MergeKey::NormalizedNumber, MergeKey::Email, MergeKey::FullName];

impl MergeKey {
    /// Weak keys only apply to records that yield no strong key.
    pub fn is_weak(&self) -> bool {
        matches!(self, Self::FullName)
    }

    /// Config name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NormalizedNumber => "number",
            Self::Email => "email",
            Self::FullName => "full_name",
        }
    }

    /// Extract the normalized identity value of `record` for this key.
    pub fn value_for(&self, record: &ContactRecord) -> Option<String> {
        let value = match self {
            Self::NormalizedNumber => non_empty(&record.normalized_number)
                .map(|number| NON_DIGIT_RE.replace_all(number, "").into_owned()),
            Self::Email => non_empty(&record.email).map(|email| email.trim().to_lowercase()),
            Self::FullName => {
                let parts: Vec<String> = [&record.first_name, &record.surname]
                    .into_iter()
                    .filter_map(non_empty)
                    .map(normalize_name)
                    .filter(|part| !part.is_empty())
                    .collect();
                Some(parts.join(" "))
            }
        };
        value.filter(|v| !v.is_empty())
    }
}

impl FromStr for MergeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "number" | "normalized_number" | "phone" => Ok(Self::NormalizedNumber),
            "email" => Ok(Self::Email),
            "full_name" | "name" => Ok(Self::FullName),
            other => Err(format!("unknown merge key '{}'", other)),
        }
    }
}

impl fmt::Display for MergeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-case a name and collapse internal whitespace.
fn normalize_name(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(name.trim(), " ")
        .to_lowercase()
}

/// Ordered, duplicate-free list of merge keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePolicy {
    keys: Vec<MergeKey>,
}

impl MergePolicy {
    /// Create a policy from keys in priority order.
    ///
    /// # Errors
    ///
    /// Fails when `keys` is empty or names a key twice.
    pub fn new(keys: Vec<MergeKey>) -> Result<Self, String> {
        if keys.is_empty() {
            return Err("at least one merge key is required".to_string());
        }
        for (i, key) in keys.iter().enumerate() {
            if keys[..i].contains(key) {
                return Err(format!("merge key '{}' listed twice", key));
            }
        }
        Ok(Self { keys })
    }

    /// Parse a comma separated key list such as `"number,email,full_name"`.
    pub fn parse(list: &str) -> Result<Self, String> {
        let keys = list
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(MergeKey::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(keys)
    }

    pub fn keys(&self) -> &[MergeKey] {
        &self.keys
    }

    /// Identity values of `record` under this policy.
    ///
    /// Weak keys contribute only when no strong key produced a value.
    pub fn identities(&self, record: &ContactRecord) -> Vec<(MergeKey, String)> {
        let strong: Vec<(MergeKey, String)> = self
            .keys
            .iter()
            .filter(|key| !key.is_weak())
            .filter_map(|key| key.value_for(record).map(|value| (*key, value)))
            .collect();

        if !strong.is_empty() {
            return strong;
        }

        self.keys
            .iter()
            .filter(|key| key.is_weak())
            .filter_map(|key| key.value_for(record).map(|value| (*key, value)))
            .collect()
    }
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            keys: DEFAULT_MERGE_POLICY.to_vec(),
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.keys.iter().map(MergeKey::as_str).collect();
        f.write_str(&names.join(","))
    }
}
