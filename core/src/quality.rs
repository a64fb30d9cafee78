//! Data-quality report over one period's raw events.
//!
//! This is a read-only census: it counts problems but drops nothing.
//! Dropping happens in the matrix and TYFCB stages, which also emit the
//! matching `DataWarning`s.

use crate::{
    config::QualityConfig,
    event::PeriodEvents,
    roster::Roster,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionQuality {
    pub total:           u32,
    pub self_references: u32,
    pub duplicates:      u32,
    pub unknown_members: u32,
}

impl InteractionQuality {
    fn issues(&self) -> u32 {
        self.self_references + self.duplicates + self.unknown_members
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyfcbQuality {
    pub total:                u32,
    pub non_positive_amounts: u32,
    pub unknown_members:      u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    pub overall_quality_score: f64,
    pub total_records:         u32,
    pub total_issues:          u32,
    pub referrals:             InteractionQuality,
    pub one_to_ones:           InteractionQuality,
    pub tyfcbs:                TyfcbQuality,
}

pub fn assess_quality(roster: &Roster, events: &PeriodEvents, config: &QualityConfig) -> DataQualityReport {
    let known = |id: &str| roster.index_of(id).is_some();

    let mut referrals = InteractionQuality::default();
    let mut seen_referrals = HashSet::new();
    for r in &events.referrals {
        referrals.total += 1;
        if r.giver_id == r.receiver_id {
            referrals.self_references += 1;
        } else if !known(r.giver_id.as_str()) || !known(r.receiver_id.as_str()) {
            referrals.unknown_members += 1;
        }
        if let Some(date) = r.date {
            if !seen_referrals.insert((r.giver_id.as_str(), r.receiver_id.as_str(), date)) {
                referrals.duplicates += 1;
            }
        }
    }

    let mut one_to_ones = InteractionQuality::default();
    let mut seen_meetings = HashSet::new();
    for o in &events.one_to_ones {
        one_to_ones.total += 1;
        if o.member_a_id == o.member_b_id {
            one_to_ones.self_references += 1;
        } else if !known(o.member_a_id.as_str()) || !known(o.member_b_id.as_str()) {
            one_to_ones.unknown_members += 1;
        }
        if let Some(date) = o.date {
            if !seen_meetings.insert((o.pair_key(), date)) {
                one_to_ones.duplicates += 1;
            }
        }
    }

    if !config.flag_duplicates {
        referrals.duplicates = 0;
        one_to_ones.duplicates = 0;
    }

    let mut tyfcbs = TyfcbQuality::default();
    for t in &events.tyfcbs {
        tyfcbs.total += 1;
        if !t.amount.is_finite() || t.amount <= 0.0 {
            tyfcbs.non_positive_amounts += 1;
        } else if !known(t.member_id.as_str()) {
            tyfcbs.unknown_members += 1;
        }
    }

    let total_records = referrals.total + one_to_ones.total + tyfcbs.total;
    let total_issues = (referrals.issues()
        + one_to_ones.issues()
        + tyfcbs.non_positive_amounts
        + tyfcbs.unknown_members)
        .min(total_records);

    let overall_quality_score = if total_records == 0 {
        100.0
    } else {
        (total_records - total_issues) as f64 / total_records as f64 * 100.0
    };

    DataQualityReport {
        overall_quality_score,
        total_records,
        total_issues,
        referrals,
        one_to_ones,
        tyfcbs,
    }
}
