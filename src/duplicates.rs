//! Likely-duplicate review for the admin.
//!
//! Names that differ by a typo ("Budi Santoso" / "Budi Santosoo") usually
//! mean the same person filled in the form twice. This module groups such
//! records so a human can decide what to delete; nothing is merged here.

use serde::Serialize;

use crate::record::{AttendeeRecord, RecordId};
use crate::similarity::{SimilarityRule, names_equal};

/// The part of a record shown in the review list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMember {
    pub id: RecordId,
    pub name: String,
}

impl From<&AttendeeRecord> for GroupMember {
    fn from(record: &AttendeeRecord) -> Self {
        GroupMember {
            id: record.id.clone(),
            name: record.name.clone(),
        }
    }
}

/// Result of a duplicate scan
///
/// Each group starts with its earliest record; every other member of a
/// group is listed in `flagged_ids`, in the order the groups were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReport {
    pub groups: Vec<Vec<GroupMember>>,
    pub flagged_ids: Vec<RecordId>,
}

impl SimilarityReport {
    pub fn is_flagged(&self, id: &RecordId) -> bool {
        self.flagged_ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group records whose names look like typo variants of each other
///
/// Records are visited in insertion order. Each record not yet claimed by a
/// group leads a candidate group and pulls in every later unclaimed record
/// whose name is similar to its own; names equal to the leader's (ignoring
/// case) are left alone since they are exact duplicates, not typos. This is
/// a greedy approximation of connected components: a name similar only to a
/// non-leader member is not pulled in.
///
/// Runs O(n²) distance computations, which is fine for guest lists in the
/// hundreds. Any prefilter added for larger lists must keep the same group
/// leaders and member order.
pub fn find_similar_groups(records: &[AttendeeRecord]) -> SimilarityReport {
    find_similar_groups_with(records, &SimilarityRule::default())
}

/// [`find_similar_groups`] with explicit thresholds
pub fn find_similar_groups_with(records: &[AttendeeRecord], rule: &SimilarityRule) -> SimilarityReport {
    let mut report = SimilarityReport::default();
    let mut processed = vec![false; records.len()];

    for (i, leader) in records.iter().enumerate() {
        if processed[i] {
            continue;
        }
        processed[i] = true;

        let mut group = vec![GroupMember::from(leader)];
        for (j, candidate) in records.iter().enumerate().skip(i + 1) {
            if processed[j] || names_equal(&leader.name, &candidate.name) {
                continue;
            }
            if rule.is_similar(&leader.name, &candidate.name) {
                group.push(GroupMember::from(candidate));
                processed[j] = true;
            }
        }

        if group.len() > 1 {
            report
                .flagged_ids
                .extend(group.iter().skip(1).map(|member| member.id.clone()));
            report.groups.push(group);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str, name: &str) -> AttendeeRecord {
        let now = Utc::now();
        AttendeeRecord {
            id: RecordId::from(id),
            name: name.to_string(),
            guests: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(members: &[GroupMember]) -> Vec<&str> {
        members.iter().map(|member| member.id.as_str()).collect()
    }

    #[test]
    fn typo_pair_is_grouped_and_later_one_flagged() {
        let records = vec![
            record("1", "Budi Santoso"),
            record("2", "Budi Santosoo"),
            record("3", "Siti"),
        ];
        let report = find_similar_groups(&records);

        assert_eq!(report.groups.len(), 1);
        assert_eq!(ids(&report.groups[0]), ["1", "2"]);
        assert_eq!(report.flagged_ids, vec![RecordId::from("2")]);
        assert!(!report.is_flagged(&RecordId::from("3")));
    }

    #[test]
    fn empty_and_single_inputs_have_no_groups() {
        assert_eq!(find_similar_groups(&[]), SimilarityReport::default());
        assert_eq!(
            find_similar_groups(&[record("1", "Budi")]),
            SimilarityReport::default()
        );
    }

    #[test]
    fn exact_duplicates_are_not_typo_groups() {
        let records = vec![record("1", "Ahmad"), record("2", "AHMAD"), record("3", "ahmad")];
        assert!(find_similar_groups(&records).is_empty());
    }

    #[test]
    fn exact_duplicate_of_leader_can_lead_its_own_group() {
        let records = vec![
            record("1", "Ahmad"),
            record("2", "Ahmat"),
            record("3", "ahmad"),
            record("4", "Ahmadd"),
        ];
        let report = find_similar_groups(&records);

        // "Ahmad" claims 2 and 4; 3 is skipped as an exact duplicate and is
        // left with nobody unclaimed to group with.
        assert_eq!(report.groups.len(), 1);
        assert_eq!(ids(&report.groups[0]), ["1", "2", "4"]);
        assert_eq!(
            report.flagged_ids,
            vec![RecordId::from("2"), RecordId::from("4")]
        );
    }

    #[test]
    fn grouping_is_greedy_around_the_leader() {
        // "Anna" ~ "Annie" (2 edits), "Annie" ~ "Bonnie" (2 edits),
        // but "Anna" and "Bonnie" are 4 edits apart.
        let records = vec![record("1", "Anna"), record("2", "Annie"), record("3", "Bonnie")];
        let report = find_similar_groups(&records);

        assert_eq!(report.groups.len(), 1);
        assert_eq!(ids(&report.groups[0]), ["1", "2"]);
        assert_eq!(report.flagged_ids, vec![RecordId::from("2")]);
    }

    #[test]
    fn separate_clusters_are_reported_in_order() {
        let records = vec![
            record("a", "Rudi Hartono"),
            record("b", "Dewi Lestari"),
            record("c", "Rudy Hartono"),
            record("d", "Dewi Lestary"),
            record("e", "Joko"),
        ];
        let report = find_similar_groups(&records);

        assert_eq!(report.groups.len(), 2);
        assert_eq!(ids(&report.groups[0]), ["a", "c"]);
        assert_eq!(ids(&report.groups[1]), ["b", "d"]);
        assert_eq!(
            report.flagged_ids,
            vec![RecordId::from("c"), RecordId::from("d")]
        );
    }

    #[test]
    fn names_are_compared_untrimmed() {
        let records = vec![record("1", "Siti"), record("2", "   Siti   ")];
        // six added spaces, longer name has 10 chars
        assert!(find_similar_groups(&records).is_empty());
    }

    #[test]
    fn repeated_scans_are_identical() {
        let records = vec![
            record("1", "Budi Santoso"),
            record("2", "Budi Santosoo"),
            record("3", "Budhi Santoso"),
        ];
        assert_eq!(find_similar_groups(&records), find_similar_groups(&records));
    }

    #[test]
    fn report_serializes_for_the_admin_page() {
        let records = vec![record("1", "Budi Santoso"), record("2", "Budi Santosoo")];
        let json = serde_json::to_value(find_similar_groups(&records)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "groups": [[{"id": "1", "name": "Budi Santoso"}, {"id": "2", "name": "Budi Santosoo"}]],
                "flaggedIds": ["2"],
            })
        );
    }
}
