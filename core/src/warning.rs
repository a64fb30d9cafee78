//! Data-quality warnings.
//!
//! RULE: A warning never aborts a computation. The offending event is
//! dropped, a `DataWarning` is recorded, and the stage carries on.
//! Every warning is returned to the caller alongside the primary result.

use crate::{event::EventKind, types::{MemberId, ReportPeriod}};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataWarning {
    /// The event names a member id that is not on the roster.
    #[error("{kind} event references unknown member '{member_id}'")]
    UnknownMemberReference {
        kind:      EventKind,
        member_id: MemberId,
    },

    /// The event is malformed and cannot be counted.
    #[error("invalid {kind} event: {reason}")]
    InvalidEvent {
        kind:   EventKind,
        reason: InvalidReason,
    },
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum InvalidReason {
    #[error("member '{member_id}' interacts with themselves")]
    SelfReference { member_id: MemberId },

    #[error("amount {amount} is not positive")]
    NonPositiveAmount { amount: f64 },

    #[error("event belongs to period '{actual}', expected '{expected}'")]
    PeriodMismatch {
        expected: ReportPeriod,
        actual:   ReportPeriod,
    },
}

impl DataWarning {
    pub fn unknown_member(kind: EventKind, member_id: &str) -> Self {
        DataWarning::UnknownMemberReference { kind, member_id: member_id.into() }
    }

    pub fn invalid(kind: EventKind, reason: InvalidReason) -> Self {
        DataWarning::InvalidEvent { kind, reason }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            DataWarning::UnknownMemberReference { kind, .. } => *kind,
            DataWarning::InvalidEvent { kind, .. }           => *kind,
        }
    }
}

/// Accumulates warnings for one analysis and mirrors each to the log.
#[derive(Debug, Clone, Default)]
pub struct WarningLog {
    entries: Vec<DataWarning>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, warning: DataWarning) {
        log::warn!("dropped event: {warning}");
        self.entries.push(warning);
    }

    pub fn entries(&self) -> &[DataWarning] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unknown_member_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|w| matches!(w, DataWarning::UnknownMemberReference { .. }))
            .count()
    }

    pub fn invalid_event_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|w| matches!(w, DataWarning::InvalidEvent { .. }))
            .count()
    }

    pub fn into_vec(self) -> Vec<DataWarning> {
        self.entries
    }
}
