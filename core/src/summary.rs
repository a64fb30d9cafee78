//! Per-member activity summary: raw counts, distinct partners, TYFCB
//! and a weighted activity score.

use crate::{
    config::PerformanceConfig,
    event::TyfcbOrigin,
    matrix::MatrixSet,
    roster::Roster,
    tyfcb::TyfcbSummary,
    types::{MemberId, MemberIndex},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberActivitySummary {
    pub member_id:                 MemberId,
    pub full_name:                 String,
    pub referrals_given:           u32,
    pub referrals_received:        u32,
    pub unique_referrals_given:    u32,
    pub unique_referrals_received: u32,
    /// Meetings attended; a member meeting the same partner twice counts 2.
    pub one_to_ones:               u32,
    pub unique_one_to_ones:        u32,
    pub tyfcb_within_amount:       f64,
    pub tyfcb_within_count:        u32,
    pub tyfcb_outside_amount:      f64,
    pub tyfcb_outside_count:       u32,
    pub activity_score:            u32,
}

pub fn summarize_members(
    roster:   &Roster,
    matrices: &MatrixSet,
    tyfcb:    &TyfcbSummary,
    config:   &PerformanceConfig,
) -> Vec<MemberActivitySummary> {
    (0..roster.len())
        .map(|m| summarize_member(roster, matrices, tyfcb, config, m))
        .collect()
}

pub fn summarize_member(
    roster:   &Roster,
    matrices: &MatrixSet,
    tyfcb:    &TyfcbSummary,
    config:   &PerformanceConfig,
    m:        MemberIndex,
) -> MemberActivitySummary {
    let member = &roster.members()[m];
    let referrals_given = matrices.referral.row_total(m);
    let referrals_received = matrices.referral.column_total(m);
    let one_to_ones = matrices.one_to_one.row_total(m);

    let within = tyfcb.entry(&member.id, TyfcbOrigin::WithinChapter);
    let outside = tyfcb.entry(&member.id, TyfcbOrigin::OutsideChapter);

    MemberActivitySummary {
        member_id:                 member.id.clone(),
        full_name:                 member.full_name.clone(),
        referrals_given,
        referrals_received,
        unique_referrals_given:    matrices.referral.row_presence(m),
        unique_referrals_received: matrices.referral.column_presence(m),
        one_to_ones,
        unique_one_to_ones:        matrices.one_to_one.row_presence(m),
        tyfcb_within_amount:       within.map_or(0.0, |e| e.amount),
        tyfcb_within_count:        within.map_or(0, |e| e.count),
        tyfcb_outside_amount:      outside.map_or(0.0, |e| e.amount),
        tyfcb_outside_count:       outside.map_or(0, |e| e.count),
        activity_score: activity_score(
            config,
            roster.len().saturating_sub(1),
            one_to_ones,
            referrals_given,
            referrals_received,
        ),
    }
}

/// Meetings are scored against the number of possible partners;
/// referrals against a sliding scale that always leaves headroom.
pub fn activity_score(
    config:             &PerformanceConfig,
    possible_partners:  usize,
    one_to_ones:        u32,
    referrals_given:    u32,
    referrals_received: u32,
) -> u32 {
    let oto = if possible_partners == 0 {
        0.0
    } else {
        (one_to_ones as f64 / possible_partners as f64 * config.oto_weight).min(config.oto_weight)
    };

    let scale = config
        .referral_scale_floor
        .max(referrals_given.saturating_add(config.referral_scale_headroom))
        .max(1) as f64;
    let given = (referrals_given as f64 / scale * config.referral_given_weight)
        .min(config.referral_given_weight);
    let received = (referrals_received as f64 / scale * config.referral_received_weight)
        .min(config.referral_received_weight);

    (oto + given + received).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_saturates_each_component() {
        let cfg = PerformanceConfig::default();
        // 10 meetings with 4 partners caps at 30; 40 given on a scale of 50.
        assert_eq!(activity_score(&cfg, 4, 10, 40, 0), 30 + 28);
    }

    #[test]
    fn lone_member_scores_only_referrals() {
        let cfg = PerformanceConfig::default();
        assert_eq!(activity_score(&cfg, 0, 5, 0, 0), 0);
        assert_eq!(activity_score(&cfg, 0, 0, 10, 10), 35);
    }
}
