//! Recommendation text for one member.
//!
//! Output order is fixed:
//!   1. Meeting gaps      ("Schedule one-to-ones with ...")
//!   2. Referral gaps     ("Focus on giving referrals to ...")
//!   3. Referral sources  ("Build stronger relationships with ...")
//!   4. Follow-up suggestion
//!   5. Attendance suggestion
//!
//! Lines 4 and 5 are always present, so a fully connected member still
//! gets a non-empty list. No randomness: same gaps, same text.

use crate::{
    config::RecommendationConfig,
    gap_analysis::MemberGaps,
    roster::Roster,
    types::MemberId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionProfile {
    #[serde(flatten)]
    pub gaps:            MemberGaps,
    pub recommendations: Vec<String>,
}

impl CompletionProfile {
    pub fn member_id(&self) -> &str {
        &self.gaps.member_id
    }
}

pub fn build_profile(gaps: MemberGaps, roster: &Roster, config: &RecommendationConfig) -> CompletionProfile {
    let recommendations = recommend(&gaps, roster, config);
    CompletionProfile { gaps, recommendations }
}

pub fn recommend(gaps: &MemberGaps, roster: &Roster, config: &RecommendationConfig) -> Vec<String> {
    let mut out = Vec::with_capacity(5);

    if !gaps.missing_one_to_ones.is_empty() {
        let picks = meeting_targets(gaps, config.meeting_names);
        let names = names_of(roster, &picks, picks.len());
        if !names.is_empty() {
            out.push(format!("Schedule one-to-ones with {}", names.join(", ")));
        }
    }

    let names = names_of(roster, &gaps.missing_referrals_to, config.referral_names);
    if !names.is_empty() {
        out.push(format!("Focus on giving referrals to {}", names.join(", ")));
    }

    let names = names_of(roster, &gaps.missing_referrals_from, config.relationship_names);
    if !names.is_empty() {
        out.push(format!(
            "Build stronger relationships with {} to receive more referrals",
            names.join(", ")
        ));
    }

    out.push(config.follow_up_text.clone());
    out.push(config.attendance_text.clone());
    out
}

/// Priority connections first, topped up from the plain meeting gaps.
fn meeting_targets(gaps: &MemberGaps, limit: usize) -> Vec<MemberId> {
    let mut picks: Vec<MemberId> = gaps.priority_connections.iter().take(limit).cloned().collect();
    for id in &gaps.missing_one_to_ones {
        if picks.len() >= limit {
            break;
        }
        if !picks.contains(id) {
            picks.push(id.clone());
        }
    }
    picks
}

fn names_of(roster: &Roster, ids: &[MemberId], limit: usize) -> Vec<String> {
    ids.iter()
        .take(limit)
        .filter_map(|id| roster.member_by_id(id))
        .map(|m| m.full_name.clone())
        .collect()
}
