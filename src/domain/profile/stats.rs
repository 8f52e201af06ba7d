//! Stat cards shown at the top of the profile.

use serde::{Deserialize, Serialize};

use super::lenient;

pub const JOURNAL_ENTRIES_LABEL: &str = "Journal Entries";
pub const AI_CONVERSATIONS_LABEL: &str = "AI Conversations";

const JOURNAL_ENTRIES_COLOR: &str = "from-blue-500 to-blue-600";
const AI_CONVERSATIONS_COLOR: &str = "from-green-500 to-green-600";

/// Icon the renderer draws on a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatIcon {
    Calendar,
    User,
}

/// One counter card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub icon: StatIcon,
    pub color: String,
}

impl StatCard {
    fn journal_entries(count: impl ToString) -> Self {
        Self {
            label: JOURNAL_ENTRIES_LABEL.to_string(),
            value: count.to_string(),
            icon: StatIcon::Calendar,
            color: JOURNAL_ENTRIES_COLOR.to_string(),
        }
    }

    fn ai_conversations(count: impl ToString) -> Self {
        Self {
            label: AI_CONVERSATIONS_LABEL.to_string(),
            value: count.to_string(),
            icon: StatIcon::User,
            color: AI_CONVERSATIONS_COLOR.to_string(),
        }
    }
}

/// Counters as reported by the stats endpoint.
///
/// Only used to spot disagreement with the fetched collections, so counters
/// that are missing or not readable as whole numbers are simply `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportedStats {
    #[serde(deserialize_with = "lenient::optional_count")]
    pub journal_entries: Option<u64>,
    #[serde(deserialize_with = "lenient::optional_count")]
    pub ai_conversations: Option<u64>,
}

impl ReportedStats {
    /// Cards built from the endpoint's own counters, unreadable ones as zero.
    pub fn to_cards(&self) -> Vec<StatCard> {
        vec![
            StatCard::journal_entries(self.journal_entries.unwrap_or(0)),
            StatCard::ai_conversations(self.ai_conversations.unwrap_or(0)),
        ]
    }
}

/// Cards derived from the fetched collections.
///
/// These always win over [`ReportedStats::to_cards`]: the counters on screen
/// are the lengths of the lists the client actually holds.
pub fn derived_stats(journal_entries: usize, ai_conversations: usize) -> Vec<StatCard> {
    vec![
        StatCard::journal_entries(journal_entries),
        StatCard::ai_conversations(ai_conversations),
    ]
}
