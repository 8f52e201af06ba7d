//! The seven backend resources a profile aggregation cycle reads from.

use serde::Serialize;
use std::fmt;

use super::ReportingPeriod;

/// Fixed page size for the recent activity feed.
pub const RECENT_ACTIVITY_LIMIT: u32 = 10;

/// One of the independently failable profile resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileEndpoint {
    Stats,
    Preferences,
    MoodTrend,
    ActivityDistribution,
    RecentActivity,
    JournalEntries,
    AiConversations,
}

impl ProfileEndpoint {
    /// Every endpoint, in the order requests are issued.
    pub const ALL: [ProfileEndpoint; 7] = [
        ProfileEndpoint::Stats,
        ProfileEndpoint::Preferences,
        ProfileEndpoint::MoodTrend,
        ProfileEndpoint::ActivityDistribution,
        ProfileEndpoint::RecentActivity,
        ProfileEndpoint::JournalEntries,
        ProfileEndpoint::AiConversations,
    ];

    /// Path relative to the gateway base URL.
    pub fn path(&self) -> &'static str {
        match self {
            ProfileEndpoint::Stats => "/profile/stats",
            ProfileEndpoint::Preferences => "/profile/preferences",
            ProfileEndpoint::MoodTrend => "/profile/mood-trend",
            ProfileEndpoint::ActivityDistribution => "/profile/activity-distribution",
            ProfileEndpoint::RecentActivity => "/profile/recent-activity",
            ProfileEndpoint::JournalEntries => "/journal/entries",
            ProfileEndpoint::AiConversations => "/ai/conversations",
        }
    }

    /// Name of the body field holding this endpoint's payload.
    pub fn payload_field(&self) -> &'static str {
        match self {
            ProfileEndpoint::Stats => "stats",
            ProfileEndpoint::Preferences => "preferences",
            ProfileEndpoint::MoodTrend => "moodTrend",
            ProfileEndpoint::ActivityDistribution => "distribution",
            ProfileEndpoint::RecentActivity => "activities",
            ProfileEndpoint::JournalEntries => "entries",
            ProfileEndpoint::AiConversations => "conversations",
        }
    }

    /// Query parameters for this endpoint within a cycle for `period`.
    pub fn query(&self, period: ReportingPeriod) -> Vec<(&'static str, String)> {
        match self {
            ProfileEndpoint::MoodTrend | ProfileEndpoint::ActivityDistribution => {
                vec![("period", period.as_str().to_string())]
            }
            ProfileEndpoint::RecentActivity => {
                vec![("limit", RECENT_ACTIVITY_LIMIT.to_string())]
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ProfileEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A fully resolved request for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRequest {
    pub endpoint: ProfileEndpoint,
    pub query: Vec<(&'static str, String)>,
}

impl EndpointRequest {
    pub fn new(endpoint: ProfileEndpoint, period: ReportingPeriod) -> Self {
        Self {
            endpoint,
            query: endpoint.query(period),
        }
    }

    /// Path plus encoded query string, e.g. `/profile/mood-trend?period=week`.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.endpoint.path().to_string();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.endpoint.path(), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_endpoint_has_distinct_path_and_field() {
        let paths: HashSet<_> = ProfileEndpoint::ALL.iter().map(|e| e.path()).collect();
        let fields: HashSet<_> = ProfileEndpoint::ALL.iter().map(|e| e.payload_field()).collect();
        assert_eq!(paths.len(), 7);
        assert_eq!(fields.len(), 7);
    }

    #[test]
    fn trend_and_distribution_carry_period() {
        let req = EndpointRequest::new(ProfileEndpoint::MoodTrend, ReportingPeriod::Month);
        assert_eq!(req.path_and_query(), "/profile/mood-trend?period=month");

        let req = EndpointRequest::new(ProfileEndpoint::ActivityDistribution, ReportingPeriod::Year);
        assert_eq!(req.path_and_query(), "/profile/activity-distribution?period=year");
    }

    #[test]
    fn recent_activity_is_limited_to_ten() {
        let req = EndpointRequest::new(ProfileEndpoint::RecentActivity, ReportingPeriod::Week);
        assert_eq!(req.path_and_query(), "/profile/recent-activity?limit=10");
    }

    #[test]
    fn remaining_endpoints_are_unparameterized() {
        for endpoint in [
            ProfileEndpoint::Stats,
            ProfileEndpoint::Preferences,
            ProfileEndpoint::JournalEntries,
            ProfileEndpoint::AiConversations,
        ] {
            let req = EndpointRequest::new(endpoint, ReportingPeriod::Year);
            assert!(req.query.is_empty(), "{} should have no query", endpoint);
            assert_eq!(req.path_and_query(), endpoint.path());
        }
    }
}
