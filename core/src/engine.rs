//! The period analysis engine.
//!
//! EXECUTION ORDER (fixed, never reordered):
//!   1. Roster normalization
//!   2. Period filter        (events tagged with another period dropped)
//!   3. Data-quality census  (counts only, drops nothing)
//!   4. Matrix builder       (referral, one-to-one, combination)
//!   5. TYFCB aggregation
//!   6. Activity summaries
//!   7. Gap analysis
//!   8. Recommendations
//!
//! RULES:
//!   - `analyze_period` is a pure function of its arguments.
//!   - No stage reads anything a later stage produces.
//!   - Warnings accumulate across stages and are returned, never thrown.

use crate::{
    config::AnalyticsConfig,
    error::{AnalyticsError, AnalyticsResult},
    event::{EventKind, PeriodEvents},
    gap_analysis,
    matrix::{build_matrices, MatrixKind, MatrixSet},
    payload::{MatrixPayload, MemberAnalyticsPayload},
    quality::{assess_quality, DataQualityReport},
    recommendation::{build_profile, CompletionProfile},
    roster::{Chapter, RawMember, Roster},
    summary::{summarize_members, MemberActivitySummary},
    tyfcb::{aggregate_tyfcb, TyfcbSummary},
    types::{ChapterId, MemberIndex, ReportPeriod},
    warning::{DataWarning, InvalidReason, WarningLog},
};
use serde::{Deserialize, Serialize};

/// Chapter identity as supplied with an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub id:   ChapterId,
    pub name: String,
}

/// Everything needed to analyze one chapter for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodInput {
    pub chapter: ChapterInfo,
    pub period:  ReportPeriod,
    pub members: Vec<RawMember>,
    #[serde(flatten)]
    pub events:  PeriodEvents,
}

/// The result of one period analysis.
#[derive(Debug, Clone)]
pub struct PeriodAnalysis {
    pub period:   ReportPeriod,
    pub roster:   Roster,
    pub matrices: MatrixSet,
    pub tyfcb:    TyfcbSummary,
    pub activity: Vec<MemberActivitySummary>,
    pub profiles: Vec<CompletionProfile>,
    pub quality:  DataQualityReport,
    pub warnings: Vec<DataWarning>,
}

impl PeriodAnalysis {
    pub fn chapter(&self) -> &Chapter {
        self.roster.chapter()
    }

    pub fn matrix_payload(&self, kind: MatrixKind) -> MatrixPayload {
        match kind {
            MatrixKind::Combination => {
                MatrixPayload::combination(&self.roster, &self.matrices.combination)
            }
            _ => MatrixPayload::counts(kind, &self.roster, self.matrices.get(kind)),
        }
    }

    pub fn profile(&self, member_id: &str) -> Option<&CompletionProfile> {
        self.roster.index_of(member_id).map(|i| &self.profiles[i])
    }

    pub fn member_analytics(&self, member_id: &str) -> AnalyticsResult<MemberAnalyticsPayload> {
        let index = self
            .roster
            .index_of(member_id)
            .ok_or_else(|| AnalyticsError::MemberNotFound { key: member_id.to_string() })?;
        Ok(self.member_payload(index))
    }

    /// Lookup by display name; case and titles are ignored.
    pub fn member_analytics_by_name(&self, full_name: &str) -> AnalyticsResult<MemberAnalyticsPayload> {
        let index = self
            .roster
            .index_of_name(full_name)
            .ok_or_else(|| AnalyticsError::MemberNotFound { key: full_name.to_string() })?;
        Ok(self.member_payload(index))
    }

    pub fn all_member_analytics(&self) -> Vec<MemberAnalyticsPayload> {
        (0..self.roster.len()).map(|i| self.member_payload(i)).collect()
    }

    fn member_payload(&self, index: MemberIndex) -> MemberAnalyticsPayload {
        MemberAnalyticsPayload::build(&self.roster, &self.profiles[index], &self.activity[index])
    }
}

pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn analyze(&self, input: &PeriodInput) -> AnalyticsResult<PeriodAnalysis> {
        self.analyze_period(&input.chapter, &input.period, &input.members, &input.events)
    }

    pub fn analyze_period(
        &self,
        chapter: &ChapterInfo,
        period:  &str,
        members: &[RawMember],
        events:  &PeriodEvents,
    ) -> AnalyticsResult<PeriodAnalysis> {
        let roster = Roster::normalize(&chapter.id, &chapter.name, members)?;
        let mut warnings = WarningLog::new();

        let events = filter_period(period, events, &mut warnings);
        let quality = assess_quality(&roster, &events, &self.config.quality);

        let matrices = build_matrices(&roster, &events.referrals, &events.one_to_ones, &mut warnings);
        let tyfcb = aggregate_tyfcb(&roster, &events.tyfcbs, &mut warnings);
        let activity = summarize_members(&roster, &matrices, &tyfcb, &self.config.performance);

        let profiles: Vec<CompletionProfile> = gap_analysis::analyze_chapter(&roster, &matrices)
            .into_iter()
            .map(|gaps| build_profile(gaps, &roster, &self.config.recommendations))
            .collect();

        log::info!(
            "chapter={} period={period}: {} members, {} events, {} warnings, quality {:.1}%",
            chapter.id,
            roster.len(),
            events.len(),
            warnings.len(),
            quality.overall_quality_score
        );

        Ok(PeriodAnalysis {
            period: period.to_string(),
            roster,
            matrices,
            tyfcb,
            activity,
            profiles,
            quality,
            warnings: warnings.into_vec(),
        })
    }
}

/// Keep events for `period`. Untagged events (empty period) are kept.
fn filter_period(period: &str, events: &PeriodEvents, warnings: &mut WarningLog) -> PeriodEvents {
    let mut keep = |kind: EventKind, tag: &str| -> bool {
        if tag.is_empty() || tag == period {
            return true;
        }
        warnings.record(DataWarning::invalid(
            kind,
            InvalidReason::PeriodMismatch { expected: period.into(), actual: tag.into() },
        ));
        false
    };

    let referrals: Vec<_> = events
        .referrals
        .iter()
        .filter(|e| keep(EventKind::Referral, e.report_period.as_str()))
        .cloned()
        .collect();
    let one_to_ones: Vec<_> = events
        .one_to_ones
        .iter()
        .filter(|e| keep(EventKind::OneToOne, e.report_period.as_str()))
        .cloned()
        .collect();
    let tyfcbs: Vec<_> = events
        .tyfcbs
        .iter()
        .filter(|e| keep(EventKind::Tyfcb, e.report_period.as_str()))
        .cloned()
        .collect();

    PeriodEvents { referrals, one_to_ones, tyfcbs }
}
