//! Resource model.
//!
//! Resources are the people who perform tasks. Each resource carries a
//! "DNA" profile: a skill map plus speed and quality scores on a 1-10
//! scale where 5 is the baseline.
//!
//! Skill maps are persisted as loosely-typed JSON text. [`SkillMap::parse`]
//! turns that text into a typed map, falling back to an empty map when the
//! text cannot be read.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A human resource that can be assigned to tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Short display name, if any.
    pub nickname: Option<String>,
    /// Skill proficiencies.
    pub skills: SkillMap,
    /// Work speed (1-10, 5 = baseline).
    pub speed_score: i32,
    /// Work quality (1-10).
    pub quality_score: i32,
    /// Inactive resources are never recommended.
    pub active: bool,
}

impl Resource {
    /// Creates an active resource with a baseline profile.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            nickname: None,
            skills: SkillMap::new(),
            speed_score: 5,
            quality_score: 5,
            active: true,
        }
    }

    /// Sets the full name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the nickname.
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, name: impl Into<String>, level: i32) -> Self {
        self.skills.insert(name, level);
        self
    }

    /// Replaces the skill map with one parsed from stored text.
    pub fn with_skills_text(mut self, text: &str) -> Self {
        self.skills = SkillMap::parse(text);
        self
    }

    /// Sets the speed score.
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed_score = speed;
        self
    }

    /// Sets the quality score.
    pub fn with_quality(mut self, quality: i32) -> Self {
        self.quality_score = quality;
        self
    }

    /// Marks the resource inactive.
    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }

    /// Nickname if set, otherwise the full name.
    pub fn display_name(&self) -> &str {
        match &self.nickname {
            Some(n) if !n.is_empty() => n,
            _ => &self.name,
        }
    }
}

/// Skill name → proficiency level (1-10). Absent skills are level 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillMap(BTreeMap<String, i32>);

impl SkillMap {
    /// Creates an empty skill map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stored skill map such as `{"Python": 9, "SQL": 7}`.
    ///
    /// Numeric levels are truncated to integers and non-numeric entries are
    /// skipped. Empty, malformed, or non-object text yields an empty map.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::new();
        }

        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(serde_json::Value::Object(entries)) => Self(
                entries
                    .into_iter()
                    .filter_map(|(name, value)| value.as_f64().map(|lvl| (name, lvl as i32)))
                    .collect(),
            ),
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "skill map is not an object, using empty map");
                Self::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "unreadable skill map, using empty map");
                Self::new()
            }
        }
    }

    /// Sets a skill level.
    pub fn insert(&mut self, name: impl Into<String>, level: i32) {
        self.0.insert(name.into(), level);
    }

    /// Level for a skill (0 if absent).
    pub fn level(&self, name: &str) -> i32 {
        self.0.get(name).copied().unwrap_or(0)
    }

    /// Iterates skills in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of skills.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no skills.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i32)> for SkillMap {
    fn from_iter<I: IntoIterator<Item = (S, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
