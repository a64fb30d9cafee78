//! Output payloads consumed by the presentation layer.
//!
//! Field names and shapes are a contract with the UI; serialization is
//! camelCase JSON.

use crate::{
    gap_analysis::MemberGaps,
    matrix::{CombinationCode, InteractionMatrix, MatrixKind},
    recommendation::CompletionProfile,
    roster::Roster,
    summary::MemberActivitySummary,
    types::MemberId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixPayload {
    pub kind:       MatrixKind,
    /// Row labels, unique within the payload. They key `totals` and
    /// `summaries`.
    pub members:    Vec<String>,
    /// Member ids aligned with `members`.
    pub member_ids: Vec<MemberId>,
    pub matrix:     Vec<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals:     Option<MatrixTotals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend:     Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summaries:  Option<CombinationSummaries>,
}

/// Row and column sums keyed by member label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixTotals {
    pub given:           BTreeMap<String, u32>,
    pub received:        BTreeMap<String, u32>,
    pub unique_given:    BTreeMap<String, u32>,
    pub unique_received: BTreeMap<String, u32>,
}

/// Off-diagonal cell counts per member for each combination code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationSummaries {
    pub neither:       BTreeMap<String, u32>,
    pub oto_only:      BTreeMap<String, u32>,
    pub referral_only: BTreeMap<String, u32>,
    pub both:          BTreeMap<String, u32>,
}

impl MatrixPayload {
    /// Referral and one-to-one payloads carry totals.
    pub fn counts(kind: MatrixKind, roster: &Roster, matrix: &InteractionMatrix) -> Self {
        let labels = roster.labels();
        let mut totals = MatrixTotals::default();
        for (i, label) in labels.iter().enumerate() {
            totals.given.insert(label.clone(), matrix.row_total(i));
            totals.received.insert(label.clone(), matrix.column_total(i));
            totals.unique_given.insert(label.clone(), matrix.row_presence(i));
            totals.unique_received.insert(label.clone(), matrix.column_presence(i));
        }
        Self {
            kind,
            members:    labels,
            member_ids: member_ids(roster),
            matrix:     matrix.rows().to_vec(),
            totals:     Some(totals),
            legend:     None,
            summaries:  None,
        }
    }

    /// The combination payload carries the legend and per-member summaries.
    pub fn combination(roster: &Roster, matrix: &InteractionMatrix) -> Self {
        let labels = roster.labels();
        let mut summaries = CombinationSummaries::default();
        for (i, label) in labels.iter().enumerate() {
            let mut counts = [0u32; 4];
            for (j, &value) in matrix.row(i).iter().enumerate() {
                if i != j {
                    counts[CombinationCode::from_value(value).value() as usize] += 1;
                }
            }
            summaries.neither.insert(label.clone(), counts[0]);
            summaries.oto_only.insert(label.clone(), counts[1]);
            summaries.referral_only.insert(label.clone(), counts[2]);
            summaries.both.insert(label.clone(), counts[3]);
        }
        Self {
            kind:       MatrixKind::Combination,
            members:    labels,
            member_ids: member_ids(roster),
            matrix:     matrix.rows().to_vec(),
            totals:     None,
            legend:     Some(combination_legend()),
            summaries:  Some(summaries),
        }
    }
}

fn member_ids(roster: &Roster) -> Vec<MemberId> {
    roster.members().iter().map(|m| m.id.clone()).collect()
}

pub fn combination_legend() -> BTreeMap<String, String> {
    CombinationCode::ALL
        .iter()
        .map(|code| (code.value().to_string(), code.label().to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub id:   MemberId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRates {
    pub oto_completion:             u8,
    pub referral_given_coverage:    u8,
    pub referral_received_coverage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapLists {
    pub missing_one_to_ones:    Vec<MemberRef>,
    pub missing_referrals_to:   Vec<MemberRef>,
    pub missing_referrals_from: Vec<MemberRef>,
    pub priority_connections:   Vec<MemberRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAnalyticsPayload {
    pub member:           MemberRef,
    pub completion_rates: CompletionRates,
    pub gaps:             GapLists,
    pub recommendations:  Vec<String>,
    pub activity:         MemberActivitySummary,
}

impl MemberAnalyticsPayload {
    pub fn build(
        roster:   &Roster,
        profile:  &CompletionProfile,
        activity: &MemberActivitySummary,
    ) -> Self {
        let gaps: &MemberGaps = &profile.gaps;
        Self {
            member: MemberRef {
                id:   activity.member_id.clone(),
                name: activity.full_name.clone(),
            },
            completion_rates: CompletionRates {
                oto_completion:             gaps.oto_completion_pct,
                referral_given_coverage:    gaps.referral_given_coverage_pct,
                referral_received_coverage: gaps.referral_received_coverage_pct,
            },
            gaps: GapLists {
                missing_one_to_ones:    member_refs(roster, &gaps.missing_one_to_ones),
                missing_referrals_to:   member_refs(roster, &gaps.missing_referrals_to),
                missing_referrals_from: member_refs(roster, &gaps.missing_referrals_from),
                priority_connections:   member_refs(roster, &gaps.priority_connections),
            },
            recommendations: profile.recommendations.clone(),
            activity:        activity.clone(),
        }
    }
}

fn member_refs(roster: &Roster, ids: &[MemberId]) -> Vec<MemberRef> {
    ids.iter()
        .filter_map(|id| roster.member_by_id(id))
        .map(|m| MemberRef { id: m.id.clone(), name: m.full_name.clone() })
        .collect()
}
