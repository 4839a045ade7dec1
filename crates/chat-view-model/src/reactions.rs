use crate::collaborators::IdentityResolver;
use crate::types::{ReactionMap, DISPLAYED_REACTIONS};
use crate::{Error, Result};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

/// How the "+N" counter next to the inline reactions is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Total reaction events minus the number of displayed symbols. This mixes
    /// events with symbol counts; kept as the default for compatibility with
    /// existing clients.
    #[default]
    TotalMinusCap,
    /// Reaction events not covered by the displayed symbols.
    HiddenEvents,
}

impl OverflowPolicy {
    fn overflow(self, total_reaction_events: usize, visible: &[ReactionEntry]) -> usize {
        match self {
            OverflowPolicy::TotalMinusCap => total_reaction_events.saturating_sub(DISPLAYED_REACTIONS),
            OverflowPolicy::HiddenEvents => {
                let shown: usize = visible.iter().map(ReactionEntry::count).sum();
                total_reaction_events.saturating_sub(shown)
            }
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "total-minus-cap" => Ok(OverflowPolicy::TotalMinusCap),
            "hidden-events" => Ok(OverflowPolicy::HiddenEvents),
            other => Err(Error::UnknownOverflowPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionEntry {
    pub reaction: String,
    /// In the participant set's iteration order.
    pub participant_ids: Vec<String>,
}

impl ReactionEntry {
    pub fn count(&self) -> usize {
        self.participant_ids.len()
    }
}

/// Ranked reactions of one message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReactionSummary {
    entries: Vec<ReactionEntry>,
    total_reaction_events: usize,
    overflow_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantLabel {
    pub participant_id: String,
    /// Empty when the participant could not be resolved.
    pub display_name: String,
}

/// One row of the reaction detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionDetail {
    pub reaction: String,
    pub count: usize,
    pub participants: Vec<ParticipantLabel>,
}

/// Summarize with the default overflow policy.
pub fn summarize(reactions: Option<&ReactionMap>) -> ReactionSummary {
    summarize_with(reactions, OverflowPolicy::default())
}

pub fn summarize_with(reactions: Option<&ReactionMap>, policy: OverflowPolicy) -> ReactionSummary {
    let Some(reactions) = reactions else {
        return ReactionSummary::default();
    };

    let mut entries: Vec<ReactionEntry> = reactions
        .iter()
        .filter(|(reaction, participants)| {
            if participants.is_empty() {
                tracing::debug!(reaction = %reaction, "dropping reaction with no participants");
                return false;
            }
            true
        })
        .map(|(reaction, participants)| ReactionEntry {
            reaction: reaction.clone(),
            participant_ids: participants.iter().cloned().collect(),
        })
        .collect();

    // sort_by is stable: equal counts keep insertion order
    entries.sort_by(|a, b| b.count().cmp(&a.count()));

    let total_reaction_events: usize = entries.iter().map(ReactionEntry::count).sum();
    let overflow_count = (entries.len() > DISPLAYED_REACTIONS)
        .then(|| policy.overflow(total_reaction_events, &entries[..DISPLAYED_REACTIONS]));

    ReactionSummary {
        entries,
        total_reaction_events,
        overflow_count,
    }
}

impl ReactionSummary {
    pub fn entries(&self) -> &[ReactionEntry] {
        &self.entries
    }

    /// The inline reactions, a prefix of `entries`.
    pub fn visible(&self) -> &[ReactionEntry] {
        &self.entries[..self.entries.len().min(DISPLAYED_REACTIONS)]
    }

    pub fn total_reaction_events(&self) -> usize {
        self.total_reaction_events
    }

    /// Present only when there are more symbols than fit inline.
    pub fn overflow_count(&self) -> Option<usize> {
        self.overflow_count
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Detail panel rows for every reaction, in ranked order.
    pub fn details(&self, resolver: Option<&dyn IdentityResolver>) -> Vec<ReactionDetail> {
        self.entries
            .iter()
            .map(|entry| detail_of(entry, resolver))
            .collect()
    }

    pub fn detail_for(
        &self,
        reaction: &str,
        resolver: Option<&dyn IdentityResolver>,
    ) -> Option<ReactionDetail> {
        self.entries
            .iter()
            .find(|entry| entry.reaction == reaction)
            .map(|entry| detail_of(entry, resolver))
    }
}

fn detail_of(entry: &ReactionEntry, resolver: Option<&dyn IdentityResolver>) -> ReactionDetail {
    ReactionDetail {
        reaction: entry.reaction.clone(),
        count: entry.count(),
        participants: participant_labels(&entry.participant_ids, resolver),
    }
}

/// Pair participant ids with resolved names, keeping their order.
pub fn participant_labels(
    participant_ids: &[String],
    resolver: Option<&dyn IdentityResolver>,
) -> Vec<ParticipantLabel> {
    participant_ids
        .iter()
        .map(|id| ParticipantLabel {
            participant_id: id.clone(),
            display_name: resolver
                .and_then(|r| r.display_name(id))
                .unwrap_or_default(),
        })
        .collect()
}

impl Serialize for ReactionSummary {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ReactionSummary", 4)?;
        state.serialize_field("entries", &self.entries)?;
        state.serialize_field("totalReactionEvents", &self.total_reaction_events)?;
        state.serialize_field("visible", self.visible())?;
        state.serialize_field("overflowCount", &self.overflow_count)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map(entries: &[(&str, &[&str])]) -> ReactionMap {
        entries
            .iter()
            .map(|(reaction, ids)| (*reaction, ids.iter().copied()))
            .collect()
    }

    fn symbols(entries: &[ReactionEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.reaction.as_str()).collect()
    }

    #[test]
    fn absent_and_empty_maps_give_empty_summary() {
        let absent = summarize(None);
        assert!(absent.is_empty());
        assert_eq!(absent.total_reaction_events(), 0);
        assert!(absent.visible().is_empty());
        assert_eq!(absent.overflow_count(), None);

        assert_eq!(summarize(Some(&ReactionMap::new())), absent);
    }

    #[test]
    fn empty_sets_are_dropped_before_ranking() {
        let reactions = map(&[("👍", &["p1"]), ("🙈", &[]), ("😂", &["p2", "p3"])]);
        let summary = summarize(Some(&reactions));
        assert_eq!(symbols(summary.entries()), vec!["😂", "👍"]);
        assert_eq!(summary.total_reaction_events(), 3);
    }

    #[test]
    fn empty_sets_do_not_count_toward_overflow() {
        let reactions = map(&[
            ("a", &["p1"]),
            ("b", &["p1"]),
            ("c", &["p1"]),
            ("d", &[]),
        ]);
        let summary = summarize(Some(&reactions));
        assert_eq!(summary.entries().len(), 3);
        assert_eq!(summary.overflow_count(), None);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let reactions = map(&[
            ("🎉", &["p1"]),
            ("👍", &["p1", "p2"]),
            ("😂", &["p3"]),
            ("❤️", &["p4", "p5"]),
        ]);
        let summary = summarize(Some(&reactions));
        assert_eq!(symbols(summary.entries()), vec!["👍", "❤️", "🎉", "😂"]);
    }

    #[test]
    fn legacy_overflow_subtracts_cap() {
        let reactions = map(&[
            ("a", &["1", "2"]),
            ("b", &["3"]),
            ("c", &["4"]),
            ("d", &["5"]),
            ("e", &["6"]),
        ]);
        let summary = summarize(Some(&reactions));
        assert_eq!(summary.total_reaction_events(), 6);
        assert_eq!(summary.overflow_count(), Some(3));

        let corrected = summarize_with(Some(&reactions), OverflowPolicy::HiddenEvents);
        assert_eq!(corrected.overflow_count(), Some(2));
        assert_eq!(corrected.entries(), summary.entries());
    }

    #[test]
    fn detail_resolves_names_with_placeholder() {
        let reactions = map(&[("👍", &["p2", "p1", "ghost"])]);
        let summary = summarize(Some(&reactions));

        let mut names = HashMap::new();
        names.insert("p1".to_string(), "Ann".to_string());
        names.insert("p2".to_string(), "Bob".to_string());

        let resolver: &dyn IdentityResolver = &names;
        let detail = summary.detail_for("👍", Some(resolver)).unwrap();
        assert_eq!(detail.count, 3);
        let labels: Vec<(&str, &str)> = detail
            .participants
            .iter()
            .map(|l| (l.participant_id.as_str(), l.display_name.as_str()))
            .collect();
        assert_eq!(labels, vec![("p2", "Bob"), ("p1", "Ann"), ("ghost", "")]);

        let unresolved = summary.detail_for("👍", None).unwrap();
        assert!(unresolved.participants.iter().all(|l| l.display_name.is_empty()));

        assert!(summary.detail_for("😂", None).is_none());
    }

    #[test]
    fn details_cover_hidden_entries() {
        let reactions = map(&[
            ("a", &["1"]),
            ("b", &["2"]),
            ("c", &["3"]),
            ("d", &["4"]),
        ]);
        let summary = summarize(Some(&reactions));
        assert_eq!(summary.visible().len(), 3);
        assert_eq!(summary.details(None).len(), 4);
    }

    #[test]
    fn overflow_policy_parses() {
        assert_eq!(
            "hidden-events".parse::<OverflowPolicy>().unwrap(),
            OverflowPolicy::HiddenEvents
        );
        assert_eq!(
            "total-minus-cap".parse::<OverflowPolicy>().unwrap(),
            OverflowPolicy::TotalMinusCap
        );
        assert!("events".parse::<OverflowPolicy>().is_err());
    }

    #[test]
    fn summary_serializes_visible_prefix() {
        let reactions = map(&[("👍", &["p1", "p2"]), ("😂", &["p3"])]);
        let json = serde_json::to_value(summarize(Some(&reactions))).unwrap();
        assert_eq!(json["totalReactionEvents"], 3);
        assert_eq!(json["visible"].as_array().unwrap().len(), 2);
        assert_eq!(json["entries"][0]["participantIds"][1], "p2");
        assert!(json["overflowCount"].is_null());
    }
}
