//! Renderer-ready profile view-model.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{lenient, StatCard};

/// Category name to percentage of time spent, e.g. `journaling -> 40.0`.
pub type ActivityDistribution = BTreeMap<String, f64>;

/// Distribution as sent by the server.
///
/// Shares may be numbers or numeric strings; entries that are neither are
/// dropped, so the renderer sees them as 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionPayload(ActivityDistribution);

impl DistributionPayload {
    pub fn into_inner(self) -> ActivityDistribution {
        self.0
    }
}

impl<'de> Deserialize<'de> for DistributionPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(category, share)| {
                    lenient::as_number(&share).map(|share| (category, share))
                })
                .collect(),
        ))
    }
}

/// User preferences, defaulted field by field when the server omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub language: String,
    pub notifications: bool,
    pub theme: String,
    pub privacy: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            notifications: true,
            theme: "light".to_string(),
            privacy: "friends".to_string(),
        }
    }
}

/// One time bucket of the mood trend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodPoint {
    #[serde(
        alias = "date",
        alias = "day",
        alias = "label",
        deserialize_with = "lenient::label"
    )]
    pub bucket: String,
    #[serde(
        alias = "mood",
        alias = "value",
        deserialize_with = "lenient::optional_number"
    )]
    pub score: Option<f64>,
}

/// Kind of activity in the recent feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Journal,
    Ai,
    Exercise,
    #[default]
    #[serde(other)]
    Other,
}

impl ActivityKind {
    /// Glyph shown next to the activity.
    pub fn icon(&self) -> &'static str {
        match self {
            ActivityKind::Journal => "📝",
            ActivityKind::Ai => "🤖",
            ActivityKind::Exercise => "💪",
            ActivityKind::Other => "📊",
        }
    }
}

/// Activity ids come back as numbers from some stores and strings from others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityId {
    Number(i64),
    Text(String),
}

impl Default for ActivityId {
    fn default() -> Self {
        ActivityId::Text(String::new())
    }
}

/// Points awarded for an activity; either a count or a preformatted label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Points {
    Count(i64),
    Label(String),
}

impl Default for Points {
    fn default() -> Self {
        Points::Count(0)
    }
}

/// One entry in the recent activity feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityItem {
    pub id: ActivityId,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(deserialize_with = "lenient::label")]
    pub activity: String,
    #[serde(deserialize_with = "lenient::label")]
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub points: Points,
}

/// Aggregate of independently sourced profile fields.
///
/// Built fresh for every aggregation cycle; `Default` is the fully reset state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewModel {
    pub stats: Vec<StatCard>,
    pub preferences: Preferences,
    pub mood_trend: Vec<MoodPoint>,
    pub activity_distribution: ActivityDistribution,
    pub recent_activity: Vec<ActivityItem>,
    pub journal_entries: Vec<Value>,
    pub ai_conversations: Vec<Value>,
}

impl ProfileViewModel {
    /// True when every field holds its reset value.
    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }

    /// Share of a distribution category, 0 when the server omitted it.
    pub fn distribution_share(&self, category: &str) -> f64 {
        self.activity_distribution.get(category).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preferences_default_matches_signup_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.language, "en");
        assert!(prefs.notifications);
        assert_eq!(prefs.theme, "light");
        assert_eq!(prefs.privacy, "friends");
    }

    #[test]
    fn partial_preferences_fill_missing_fields() {
        let prefs: Preferences = serde_json::from_value(json!({"theme": "dark"})).unwrap();
        assert_eq!(prefs.theme, "dark");
        assert_eq!(prefs.language, "en");
    }

    #[test]
    fn mood_point_accepts_common_aliases() {
        let point: MoodPoint = serde_json::from_value(json!({"date": "2024-01-02", "mood": 7.5})).unwrap();
        assert_eq!(point.bucket, "2024-01-02");
        assert_eq!(point.score, Some(7.5));

        let point: MoodPoint = serde_json::from_value(json!({"day": "Mon"})).unwrap();
        assert_eq!(point.bucket, "Mon");
        assert_eq!(point.score, None);
    }

    #[test]
    fn activity_item_parses_feed_entry() {
        let item: ActivityItem = serde_json::from_value(json!({
            "id": 42,
            "type": "journal",
            "activity": "Wrote a journal entry",
            "time": "2 hours ago",
            "points": "+10"
        }))
        .unwrap();

        assert_eq!(item.id, ActivityId::Number(42));
        assert_eq!(item.kind, ActivityKind::Journal);
        assert_eq!(item.kind.icon(), "📝");
        assert_eq!(item.description, None);
        assert_eq!(item.points, Points::Label("+10".to_string()));
    }

    #[test]
    fn unknown_activity_kind_maps_to_other() {
        let item: ActivityItem =
            serde_json::from_value(json!({"id": "a1", "type": "yoga", "points": 5})).unwrap();
        assert_eq!(item.kind, ActivityKind::Other);
        assert_eq!(item.kind.icon(), "📊");
        assert_eq!(item.points, Points::Count(5));
    }

    #[test]
    fn default_view_model_is_reset() {
        let vm = ProfileViewModel::default();
        assert!(vm.is_reset());
        assert!(vm.stats.is_empty());
        assert_eq!(vm.preferences, Preferences::default());
    }

    #[test]
    fn distribution_share_defaults_to_zero() {
        let mut vm = ProfileViewModel::default();
        vm.activity_distribution.insert("journaling".to_string(), 40.0);
        assert_eq!(vm.distribution_share("journaling"), 40.0);
        assert_eq!(vm.distribution_share("aiConversations"), 0.0);
    }

    #[test]
    fn view_model_serializes_camel_case() {
        let value = serde_json::to_value(ProfileViewModel::default()).unwrap();
        assert!(value.get("moodTrend").is_some());
        assert!(value.get("activityDistribution").is_some());
        assert!(value.get("recentActivity").is_some());
        assert!(value.get("journalEntries").is_some());
        assert!(value.get("aiConversations").is_some());
    }

    #[test]
    fn mood_point_reads_string_scores() {
        let point: MoodPoint = serde_json::from_value(json!({"date": 3, "mood": "7"})).unwrap();
        assert_eq!(point.bucket, "3");
        assert_eq!(point.score, Some(7.0));

        let point: MoodPoint = serde_json::from_value(json!({"date": "Tue", "mood": "great"})).unwrap();
        assert_eq!(point.score, None);
    }

    #[test]
    fn distribution_payload_keeps_numeric_shares_only() {
        let payload: DistributionPayload = serde_json::from_value(json!({
            "journaling": "60",
            "aiConversations": 40,
            "exercise": "n/a"
        }))
        .unwrap();
        let distribution = payload.into_inner();

        assert_eq!(distribution.get("journaling"), Some(&60.0));
        assert_eq!(distribution.get("aiConversations"), Some(&40.0));
        assert!(!distribution.contains_key("exercise"));
    }
}
