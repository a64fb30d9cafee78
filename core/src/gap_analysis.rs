//! Completion & gap analysis.
//!
//! For each member `m` and each interaction type, coverage is the share
//! of the other N-1 members with a non-zero cell. Only presence counts:
//! three meetings with one partner cover that partner once.
//!
//! Reads: referral row `m` (given), referral column `m` (received),
//! one-to-one row `m`. The combination matrix is not consulted.

use crate::{
    matrix::MatrixSet,
    roster::Roster,
    types::{MemberId, MemberIndex},
};
use serde::{Deserialize, Serialize};

/// Coverage percentages and missing connections for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberGaps {
    pub member_id:                      MemberId,
    pub oto_completion_pct:             u8,
    pub referral_given_coverage_pct:    u8,
    pub referral_received_coverage_pct: u8,
    pub missing_one_to_ones:            Vec<MemberId>,
    pub missing_referrals_to:           Vec<MemberId>,
    pub missing_referrals_from:         Vec<MemberId>,
    /// No meeting yet and a referral gap in at least one direction.
    /// Members with no interaction of any kind come first; ties keep
    /// roster order.
    pub priority_connections:           Vec<MemberId>,
}

/// Gap analysis for every member, in roster order.
pub fn analyze_chapter(roster: &Roster, matrices: &MatrixSet) -> Vec<MemberGaps> {
    (0..roster.len())
        .map(|m| analyze_member(roster, matrices, m))
        .collect()
}

pub fn analyze_member(roster: &Roster, matrices: &MatrixSet, m: MemberIndex) -> MemberGaps {
    let n = roster.len();
    let others = n.saturating_sub(1);

    let mut met = 0usize;
    let mut referred_to = 0usize;
    let mut referred_from = 0usize;

    let mut missing_one_to_ones = Vec::new();
    let mut missing_referrals_to = Vec::new();
    let mut missing_referrals_from = Vec::new();
    let mut untouched = Vec::new();
    let mut partial = Vec::new();

    for (j, member) in roster.members().iter().enumerate() {
        if j == m {
            continue;
        }
        let has_oto = matrices.one_to_one.get(m, j) > 0;
        let has_given = matrices.referral.get(m, j) > 0;
        let has_received = matrices.referral.get(j, m) > 0;

        if has_oto {
            met += 1;
        } else {
            missing_one_to_ones.push(member.id.clone());
        }
        if has_given {
            referred_to += 1;
        } else {
            missing_referrals_to.push(member.id.clone());
        }
        if has_received {
            referred_from += 1;
        } else {
            missing_referrals_from.push(member.id.clone());
        }

        if !has_oto && !has_given && !has_received {
            untouched.push(member.id.clone());
        } else if !has_oto && !(has_given && has_received) {
            partial.push(member.id.clone());
        }
    }

    untouched.extend(partial);

    MemberGaps {
        member_id:                      roster.members()[m].id.clone(),
        oto_completion_pct:             coverage_pct(met, others),
        referral_given_coverage_pct:    coverage_pct(referred_to, others),
        referral_received_coverage_pct: coverage_pct(referred_from, others),
        missing_one_to_ones,
        missing_referrals_to,
        missing_referrals_from,
        priority_connections:           untouched,
    }
}

/// `round(100 * covered / possible)` with half-up rounding; 0 when there
/// is nobody else to cover.
pub fn coverage_pct(covered: usize, possible: usize) -> u8 {
    if possible == 0 {
        return 0;
    }
    let covered = covered.min(possible);
    ((200 * covered + possible) / (2 * possible)) as u8
}
