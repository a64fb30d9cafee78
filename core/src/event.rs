//! Raw interaction events for one report period.
//!
//! Events arrive exactly as the data-access layer produced them. Nothing
//! here is trusted: self-references, unknown member ids and bad amounts
//! are filtered by the stage that consumes the event, which records a
//! `DataWarning` and moves on.

use crate::types::{MemberId, ReportPeriod};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed referral from `giver_id` to `receiver_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralEvent {
    pub giver_id:      MemberId,
    pub receiver_id:   MemberId,
    #[serde(default)]
    pub report_period: ReportPeriod,
    /// Only used to spot duplicate slips in the quality report.
    #[serde(default)]
    pub date:          Option<NaiveDate>,
}

impl ReferralEvent {
    pub fn new(giver_id: &str, receiver_id: &str, report_period: &str) -> Self {
        Self {
            giver_id:      giver_id.into(),
            receiver_id:   receiver_id.into(),
            report_period: report_period.into(),
            date:          None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// An undirected meeting between two members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneToOneEvent {
    pub member_a_id:   MemberId,
    pub member_b_id:   MemberId,
    #[serde(default)]
    pub report_period: ReportPeriod,
    #[serde(default)]
    pub date:          Option<NaiveDate>,
}

impl OneToOneEvent {
    pub fn new(member_a_id: &str, member_b_id: &str, report_period: &str) -> Self {
        Self {
            member_a_id:   member_a_id.into(),
            member_b_id:   member_b_id.into(),
            report_period: report_period.into(),
            date:          None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Order-independent key for the pair, used for duplicate detection.
    pub fn pair_key(&self) -> (&str, &str) {
        if self.member_a_id <= self.member_b_id {
            (self.member_a_id.as_str(), self.member_b_id.as_str())
        } else {
            (self.member_b_id.as_str(), self.member_a_id.as_str())
        }
    }
}

/// Where the closed business came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TyfcbOrigin {
    WithinChapter,
    OutsideChapter,
}

/// "Thank you for closed business" reported by `member_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyfcbEvent {
    pub member_id:     MemberId,
    pub amount:        f64,
    pub origin:        TyfcbOrigin,
    #[serde(default)]
    pub report_period: ReportPeriod,
    #[serde(default)]
    pub date:          Option<NaiveDate>,
}

impl TyfcbEvent {
    pub fn new(member_id: &str, amount: f64, origin: TyfcbOrigin, report_period: &str) -> Self {
        Self {
            member_id: member_id.into(),
            amount,
            origin,
            report_period: report_period.into(),
            date: None,
        }
    }
}

/// All interaction events supplied for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodEvents {
    #[serde(default)]
    pub referrals:   Vec<ReferralEvent>,
    #[serde(default)]
    pub one_to_ones: Vec<OneToOneEvent>,
    #[serde(default)]
    pub tyfcbs:      Vec<TyfcbEvent>,
}

impl PeriodEvents {
    pub fn len(&self) -> usize {
        self.referrals.len() + self.one_to_ones.len() + self.tyfcbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which event stream a warning came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Referral,
    OneToOne,
    Tyfcb,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Referral => "referral",
            EventKind::OneToOne => "one-to-one",
            EventKind::Tyfcb    => "tyfcb",
        };
        f.write_str(name)
    }
}
