//! TYFCB aggregation: closed-business totals split by origin.
//!
//! RULES:
//!   - One entry per (member, origin) with at least one event. Members
//!     with no events in a bucket are absent from it.
//!   - Entries are listed in roster order.
//!   - Bucket totals are recomputed from the entries, never carried
//!     separately.

use crate::{
    event::{EventKind, TyfcbEvent, TyfcbOrigin},
    roster::Roster,
    types::MemberId,
    warning::{DataWarning, InvalidReason, WarningLog},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyfcbEntry {
    pub member_id: MemberId,
    pub amount:    f64,
    pub count:     u32,
}

impl TyfcbEntry {
    /// Mean amount per event; `None` when there are no events.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.amount / self.count as f64)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyfcbSummary {
    pub within_chapter:        Vec<TyfcbEntry>,
    pub outside_chapter:       Vec<TyfcbEntry>,
    pub total_within_chapter:  f64,
    pub total_outside_chapter: f64,
}

impl TyfcbSummary {
    pub fn bucket(&self, origin: TyfcbOrigin) -> &[TyfcbEntry] {
        match origin {
            TyfcbOrigin::WithinChapter  => &self.within_chapter,
            TyfcbOrigin::OutsideChapter => &self.outside_chapter,
        }
    }

    pub fn total(&self, origin: TyfcbOrigin) -> f64 {
        match origin {
            TyfcbOrigin::WithinChapter  => self.total_within_chapter,
            TyfcbOrigin::OutsideChapter => self.total_outside_chapter,
        }
    }

    pub fn entry(&self, member_id: &str, origin: TyfcbOrigin) -> Option<&TyfcbEntry> {
        self.bucket(origin).iter().find(|e| e.member_id == member_id)
    }

    pub fn grand_total(&self) -> f64 {
        self.total_within_chapter + self.total_outside_chapter
    }

    pub fn event_count(&self, origin: TyfcbOrigin) -> u32 {
        self.bucket(origin).iter().map(|e| e.count).sum()
    }
}

pub fn aggregate_tyfcb(
    roster:   &Roster,
    events:   &[TyfcbEvent],
    warnings: &mut WarningLog,
) -> TyfcbSummary {
    let n = roster.len();
    let mut within: Vec<(f64, u32)> = vec![(0.0, 0); n];
    let mut outside: Vec<(f64, u32)> = vec![(0.0, 0); n];

    for event in events {
        if !event.amount.is_finite() || event.amount <= 0.0 {
            warnings.record(DataWarning::invalid(
                EventKind::Tyfcb,
                InvalidReason::NonPositiveAmount { amount: event.amount },
            ));
            continue;
        }
        let Some(index) = roster.index_of(&event.member_id) else {
            warnings.record(DataWarning::unknown_member(EventKind::Tyfcb, &event.member_id));
            continue;
        };
        let slot = match event.origin {
            TyfcbOrigin::WithinChapter  => &mut within[index],
            TyfcbOrigin::OutsideChapter => &mut outside[index],
        };
        slot.0 += event.amount;
        slot.1 += 1;
    }

    let within_chapter = collect_entries(roster, &within);
    let outside_chapter = collect_entries(roster, &outside);
    let total_within_chapter = sum_entries(&within_chapter);
    let total_outside_chapter = sum_entries(&outside_chapter);

    log::debug!(
        "tyfcb: within={total_within_chapter:.2} ({} members) outside={total_outside_chapter:.2} ({} members)",
        within_chapter.len(),
        outside_chapter.len()
    );

    TyfcbSummary {
        within_chapter,
        outside_chapter,
        total_within_chapter,
        total_outside_chapter,
    }
}

fn collect_entries(roster: &Roster, sums: &[(f64, u32)]) -> Vec<TyfcbEntry> {
    roster
        .members()
        .iter()
        .zip(sums)
        .filter(|(_, (_, count))| *count > 0)
        .map(|(member, (amount, count))| TyfcbEntry {
            member_id: member.id.clone(),
            amount:    *amount,
            count:     *count,
        })
        .collect()
}

fn sum_entries(entries: &[TyfcbEntry]) -> f64 {
    entries.iter().map(|e| e.amount).sum()
}
