//! Turns the seven raw endpoint responses into one view-model.
//!
//! Pure: no I/O, no clock, no shared state. Identical responses always
//! produce an identical view-model.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::domain::profile::{
    derived_stats, ActivityItem, DistributionPayload, Envelope, MoodPoint, Preferences,
    ProfileEndpoint, ProfileViewModel, ReportedStats,
};
use crate::ports::RawResponse;

use super::errors::{AggregationError, FieldDiagnostic};

/// A populated view-model plus the per-field failures met along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub view: ProfileViewModel,
    pub diagnostics: Vec<FieldDiagnostic>,
}

/// Builds the view-model for one cycle.
///
/// 1. Every endpoint must be transport-ok, otherwise the whole cycle fails.
/// 2. Every body must parse as an envelope, otherwise the whole cycle fails.
/// 3. Each field is then adopted or reset on its own: a `false` flag or a
///    payload of an unexpected shape resets only that field.
/// 4. Stats are recomputed from the fetched collections, replacing whatever
///    the stats endpoint reported.
pub fn assemble_view_model(responses: &[RawResponse]) -> Result<Assembly, AggregationError> {
    let mut by_endpoint: HashMap<ProfileEndpoint, &RawResponse> = HashMap::new();
    for response in responses {
        by_endpoint.insert(response.endpoint, response);
    }

    for endpoint in ProfileEndpoint::ALL {
        let response = by_endpoint
            .get(&endpoint)
            .ok_or(AggregationError::MissingResponse(endpoint))?;
        if !response.is_transport_ok() {
            return Err(AggregationError::Transport {
                endpoint,
                status: response.status,
            });
        }
    }

    let mut envelopes = HashMap::new();
    for endpoint in ProfileEndpoint::ALL {
        let body = &by_endpoint[&endpoint].body;
        let envelope =
            Envelope::parse(body).map_err(|e| AggregationError::malformed(endpoint, e))?;
        envelopes.insert(endpoint, envelope);
    }

    let mut fields = FieldAdopter {
        envelopes: &envelopes,
        diagnostics: Vec::new(),
    };

    let reported: Option<ReportedStats> = fields.adopt_optional(ProfileEndpoint::Stats);
    let journal_entries = fields.adopt(ProfileEndpoint::JournalEntries);
    let ai_conversations = fields.adopt(ProfileEndpoint::AiConversations);
    let preferences: Preferences = fields.adopt(ProfileEndpoint::Preferences);
    let mood_trend: Vec<MoodPoint> = fields.adopt(ProfileEndpoint::MoodTrend);
    let activity_distribution = fields
        .adopt::<DistributionPayload>(ProfileEndpoint::ActivityDistribution)
        .into_inner();
    let recent_activity: Vec<ActivityItem> = fields.adopt(ProfileEndpoint::RecentActivity);

    let mut view = ProfileViewModel {
        stats: reported.map(|r| r.to_cards()).unwrap_or_default(),
        preferences,
        mood_trend,
        activity_distribution,
        recent_activity,
        journal_entries,
        ai_conversations,
    };

    let derived = derived_stats(view.journal_entries.len(), view.ai_conversations.len());
    if !view.stats.is_empty() && view.stats != derived {
        tracing::debug!(
            journal_entries = view.journal_entries.len(),
            ai_conversations = view.ai_conversations.len(),
            "Stats endpoint disagrees with fetched collections, using collection counts"
        );
    }
    view.stats = derived;

    Ok(Assembly {
        view,
        diagnostics: fields.diagnostics,
    })
}

struct FieldAdopter<'a> {
    envelopes: &'a HashMap<ProfileEndpoint, Envelope>,
    diagnostics: Vec<FieldDiagnostic>,
}

impl FieldAdopter<'_> {
    /// Payload when `success` is true, default (plus a diagnostic) otherwise.
    fn adopt<T>(&mut self, endpoint: ProfileEndpoint) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.adopt_optional(endpoint).unwrap_or_default()
    }

    fn adopt_optional<T>(&mut self, endpoint: ProfileEndpoint) -> Option<T>
    where
        T: DeserializeOwned + Default,
    {
        let envelope = &self.envelopes[&endpoint];

        if !envelope.success {
            tracing::error!(
                endpoint = %endpoint,
                error = envelope.error_message(),
                "Failed to fetch profile field"
            );
            self.reject(endpoint, envelope.error_message().to_string());
            return None;
        }

        match envelope.payload(endpoint.payload_field()) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::error!(
                    endpoint = %endpoint,
                    error = %e,
                    "Unexpected profile payload shape, using default"
                );
                self.reject(endpoint, format!("unexpected payload shape: {}", e));
                None
            }
        }
    }

    fn reject(&mut self, endpoint: ProfileEndpoint, message: String) {
        self.diagnostics.push(FieldDiagnostic { endpoint, message });
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::domain::profile::{ActivityKind, StatCard, StatIcon};
    use proptest::prelude::*;
    use serde_json::json;

    fn stat_pairs(stats: &[StatCard]) -> Vec<(&str, &str)> {
        stats
            .iter()
            .map(|s| (s.label.as_str(), s.value.as_str()))
            .collect()
    }

    #[test]
    fn all_success_adopts_every_payload() {
        let assembly = assemble_view_model(&all_success()).unwrap();
        let view = assembly.view;

        assert!(assembly.diagnostics.is_empty());
        assert_eq!(view.preferences.language, "es");
        assert!(!view.preferences.notifications);
        assert_eq!(view.mood_trend.len(), 2);
        assert_eq!(view.mood_trend[1].score, Some(7.5));
        assert_eq!(view.distribution_share("journaling"), 60.0);
        assert_eq!(view.recent_activity.len(), 1);
        assert_eq!(view.recent_activity[0].kind, ActivityKind::Journal);
        assert_eq!(view.journal_entries.len(), 2);
        assert_eq!(view.ai_conversations.len(), 1);
    }

    #[test]
    fn derived_stats_overwrite_reported_stats() {
        // Stats endpoint claims 12 / 7, collections hold 2 / 1.
        let view = assemble_view_model(&all_success()).unwrap().view;

        assert_eq!(
            stat_pairs(&view.stats),
            vec![("Journal Entries", "2"), ("AI Conversations", "1")]
        );
        assert_eq!(view.stats[0].icon, StatIcon::Calendar);
        assert_eq!(view.stats[1].color, "from-green-500 to-green-600");
    }

    #[test]
    fn absent_payload_fields_fall_back_to_defaults() {
        let responses: Vec<RawResponse> = ProfileEndpoint::ALL
            .iter()
            .map(|&e| RawResponse::new(e, 200, r#"{"success":true}"#))
            .collect();

        let assembly = assemble_view_model(&responses).unwrap();

        assert!(assembly.diagnostics.is_empty());
        assert_eq!(assembly.view.preferences, Preferences::default());
        assert!(assembly.view.mood_trend.is_empty());
        assert!(assembly.view.activity_distribution.is_empty());
        assert!(assembly.view.recent_activity.is_empty());
        assert_eq!(
            stat_pairs(&assembly.view.stats),
            vec![("Journal Entries", "0"), ("AI Conversations", "0")]
        );
    }

    #[test]
    fn any_transport_failure_fails_the_cycle() {
        let responses = replace(all_success(), ProfileEndpoint::RecentActivity, 500, "oops");

        let err = assemble_view_model(&responses).unwrap_err();

        assert_eq!(
            err,
            AggregationError::Transport {
                endpoint: ProfileEndpoint::RecentActivity,
                status: 500
            }
        );
    }

    #[test]
    fn unparseable_body_is_a_cycle_exception() {
        let responses = replace(all_success(), ProfileEndpoint::MoodTrend, 200, "<html>");

        let err = assemble_view_model(&responses).unwrap_err();

        assert!(matches!(
            err,
            AggregationError::MalformedBody {
                endpoint: ProfileEndpoint::MoodTrend,
                ..
            }
        ));
        assert!(!err.is_transport_failure());
    }

    #[test]
    fn missing_endpoint_response_is_reported() {
        let mut responses = all_success();
        responses.retain(|r| r.endpoint != ProfileEndpoint::Preferences);

        let err = assemble_view_model(&responses).unwrap_err();

        assert_eq!(err, AggregationError::MissingResponse(ProfileEndpoint::Preferences));
    }

    #[test]
    fn application_failure_resets_only_that_field() {
        let failed = json!({"success": false, "error": "mood service down"}).to_string();
        let responses = replace(all_success(), ProfileEndpoint::MoodTrend, 200, failed);

        let assembly = assemble_view_model(&responses).unwrap();

        assert!(assembly.view.mood_trend.is_empty());
        assert_eq!(assembly.view.preferences.language, "es");
        assert_eq!(assembly.view.recent_activity.len(), 1);
        assert_eq!(assembly.view.journal_entries.len(), 2);
        assert_eq!(assembly.diagnostics.len(), 1);
        assert_eq!(assembly.diagnostics[0].endpoint, ProfileEndpoint::MoodTrend);
        assert_eq!(assembly.diagnostics[0].message, "mood service down");
    }

    #[test]
    fn failed_preferences_fall_back_to_defaults() {
        let failed = json!({"success": false}).to_string();
        let responses = replace(all_success(), ProfileEndpoint::Preferences, 200, failed);

        let view = assemble_view_model(&responses).unwrap().view;

        assert_eq!(view.preferences, Preferences::default());
    }

    #[test]
    fn failed_journal_entries_zero_the_journal_counter() {
        let failed = json!({"success": false, "error": "nope"}).to_string();
        let responses = replace(all_success(), ProfileEndpoint::JournalEntries, 200, failed);

        let view = assemble_view_model(&responses).unwrap().view;

        assert!(view.journal_entries.is_empty());
        assert_eq!(
            stat_pairs(&view.stats),
            vec![("Journal Entries", "0"), ("AI Conversations", "1")]
        );
    }

    #[test]
    fn failed_stats_endpoint_still_shows_derived_counters() {
        let failed = json!({"success": false, "error": "stats offline"}).to_string();
        let responses = replace(all_success(), ProfileEndpoint::Stats, 200, failed);

        let assembly = assemble_view_model(&responses).unwrap();

        assert_eq!(
            stat_pairs(&assembly.view.stats),
            vec![("Journal Entries", "2"), ("AI Conversations", "1")]
        );
        assert_eq!(assembly.diagnostics[0].endpoint, ProfileEndpoint::Stats);
    }

    #[test]
    fn mistyped_payload_resets_only_that_field() {
        let bad = json!({"success": true, "entries": {"not": "a list"}}).to_string();
        let responses = replace(all_success(), ProfileEndpoint::JournalEntries, 200, bad);

        let assembly = assemble_view_model(&responses).unwrap();
        let view = &assembly.view;

        assert!(view.journal_entries.is_empty());
        assert_eq!(assembly.diagnostics.len(), 1);
        assert_eq!(assembly.diagnostics[0].endpoint, ProfileEndpoint::JournalEntries);
        assert!(assembly.diagnostics[0]
            .message
            .starts_with("unexpected payload shape"));

        // The six siblings still reflect their payloads.
        assert_eq!(view.preferences.language, "es");
        assert_eq!(view.mood_trend.len(), 2);
        assert_eq!(view.distribution_share("journaling"), 60.0);
        assert_eq!(view.recent_activity.len(), 1);
        assert_eq!(view.ai_conversations.len(), 1);
        assert_eq!(
            stat_pairs(&view.stats),
            vec![("Journal Entries", "0"), ("AI Conversations", "1")]
        );
    }

    #[test]
    fn string_and_float_stats_counters_keep_the_cycle() {
        for stats in [
            json!({"journalEntries": "12", "aiConversations": "7"}),
            json!({"journalEntries": 12.0, "aiConversations": 7.0}),
            json!("twelve"),
        ] {
            let body = json!({"success": true, "stats": stats}).to_string();
            let responses = replace(all_success(), ProfileEndpoint::Stats, 200, body);

            let view = assemble_view_model(&responses).unwrap().view;

            assert_eq!(
                stat_pairs(&view.stats),
                vec![("Journal Entries", "2"), ("AI Conversations", "1")]
            );
            assert_eq!(view.preferences.language, "es");
            assert_eq!(view.recent_activity.len(), 1);
        }
    }

    #[test]
    fn string_mood_scores_are_adopted() {
        let body = json!({
            "success": true,
            "moodTrend": [{"date": "Mon", "mood": "7"}, {"date": "Tue", "mood": 8}]
        })
        .to_string();
        let responses = replace(all_success(), ProfileEndpoint::MoodTrend, 200, body);

        let assembly = assemble_view_model(&responses).unwrap();

        assert!(assembly.diagnostics.is_empty());
        assert_eq!(assembly.view.mood_trend[0].score, Some(7.0));
        assert_eq!(assembly.view.mood_trend[1].score, Some(8.0));
    }

    #[test]
    fn odd_payload_shapes_keep_the_six_other_fields() {
        let odd_bodies = [
            (ProfileEndpoint::Stats, json!({"success": true, "stats": true})),
            (ProfileEndpoint::Preferences, json!({"success": true, "preferences": "dark"})),
            (ProfileEndpoint::MoodTrend, json!({"success": true, "moodTrend": {"Mon": 5}})),
            (ProfileEndpoint::ActivityDistribution, json!({"success": true, "distribution": [60, 40]})),
            (ProfileEndpoint::RecentActivity, json!({"success": true, "activities": "none"})),
            (ProfileEndpoint::JournalEntries, json!({"success": true, "entries": 2})),
            (ProfileEndpoint::AiConversations, json!({"success": true, "conversations": {"c1": {}}})),
        ];
        let baseline = assemble_view_model(&all_success()).unwrap().view;

        for (endpoint, body) in odd_bodies {
            let responses = replace(all_success(), endpoint, 200, body.to_string());

            let assembly = assemble_view_model(&responses).unwrap();
            let view = &assembly.view;

            assert_eq!(assembly.diagnostics.len(), 1, "{}", endpoint);
            assert_eq!(assembly.diagnostics[0].endpoint, endpoint);
            if endpoint != ProfileEndpoint::Preferences {
                assert_eq!(view.preferences, baseline.preferences, "{}", endpoint);
            }
            if endpoint != ProfileEndpoint::MoodTrend {
                assert_eq!(view.mood_trend, baseline.mood_trend, "{}", endpoint);
            }
            if endpoint != ProfileEndpoint::ActivityDistribution {
                assert_eq!(view.activity_distribution, baseline.activity_distribution, "{}", endpoint);
            }
            if endpoint != ProfileEndpoint::RecentActivity {
                assert_eq!(view.recent_activity, baseline.recent_activity, "{}", endpoint);
            }
            if endpoint != ProfileEndpoint::JournalEntries {
                assert_eq!(view.journal_entries, baseline.journal_entries, "{}", endpoint);
            }
            if endpoint != ProfileEndpoint::AiConversations {
                assert_eq!(view.ai_conversations, baseline.ai_conversations, "{}", endpoint);
            }
            assert_eq!(
                view.stats,
                derived_stats(view.journal_entries.len(), view.ai_conversations.len())
            );
        }
    }

    #[test]
    fn null_collection_payloads_default_without_diagnostics() {
        let responses = replace(
            all_success(),
            ProfileEndpoint::AiConversations,
            200,
            r#"{"success":true,"conversations":null}"#,
        );
        let responses = replace(
            responses,
            ProfileEndpoint::RecentActivity,
            200,
            r#"{"success":true,"activities":null}"#,
        );
        let responses = replace(
            responses,
            ProfileEndpoint::MoodTrend,
            200,
            r#"{"success":true,"moodTrend":null}"#,
        );
        let responses = replace(
            responses,
            ProfileEndpoint::ActivityDistribution,
            200,
            r#"{"success":true,"distribution":null}"#,
        );

        let assembly = assemble_view_model(&responses).unwrap();
        let view = &assembly.view;

        assert!(assembly.diagnostics.is_empty());
        assert!(view.ai_conversations.is_empty());
        assert!(view.recent_activity.is_empty());
        assert!(view.mood_trend.is_empty());
        assert!(view.activity_distribution.is_empty());
        assert_eq!(view.journal_entries.len(), 2);
        assert_eq!(
            stat_pairs(&view.stats),
            vec![("Journal Entries", "2"), ("AI Conversations", "0")]
        );
    }

    #[test]
    fn response_order_does_not_matter() {
        let mut reversed = all_success();
        reversed.reverse();

        assert_eq!(
            assemble_view_model(&reversed).unwrap(),
            assemble_view_model(&all_success()).unwrap()
        );
    }

    proptest! {
        #[test]
        fn stats_always_count_fetched_collections(entries in 0usize..40, conversations in 0usize..40) {
            let entries_body = json!({
                "success": true,
                "entries": (0..entries).map(|i| json!({"id": i})).collect::<Vec<_>>()
            }).to_string();
            let conversations_body = json!({
                "success": true,
                "conversations": (0..conversations).map(|i| json!({"id": i})).collect::<Vec<_>>()
            }).to_string();
            let responses = replace(all_success(), ProfileEndpoint::JournalEntries, 200, entries_body);
            let responses = replace(responses, ProfileEndpoint::AiConversations, 200, conversations_body);

            let view = assemble_view_model(&responses).unwrap().view;

            prop_assert_eq!(view.stats[0].value.clone(), entries.to_string());
            prop_assert_eq!(view.stats[1].value.clone(), conversations.to_string());
        }

        #[test]
        fn assembly_is_idempotent(failing in proptest::sample::subsequence(ProfileEndpoint::ALL.to_vec(), 0..7)) {
            let mut responses = all_success();
            for endpoint in &failing {
                responses = replace(responses, *endpoint, 200, r#"{"success":false}"#);
            }

            let first = assemble_view_model(&responses).unwrap();
            let second = assemble_view_model(&responses).unwrap();

            prop_assert_eq!(first.diagnostics.len(), failing.len());
            prop_assert_eq!(first, second);
        }
    }
}
