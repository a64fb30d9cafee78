//! End-to-end period analysis tests.

use chapter_core::{
    engine::{AnalyticsEngine, ChapterInfo, PeriodInput},
    error::AnalyticsError,
    event::{OneToOneEvent, PeriodEvents, ReferralEvent, TyfcbEvent, TyfcbOrigin},
    matrix::MatrixKind,
    roster::RawMember,
    warning::{DataWarning, InvalidReason},
};
use chrono::NaiveDate;

// ── Helpers ──────────────────────────────────────────────────────────────────

const PERIOD: &str = "2024-08";

fn chapter() -> ChapterInfo {
    ChapterInfo { id: "ch-1".into(), name: "Downtown".into() }
}

fn members() -> Vec<RawMember> {
    vec![
        RawMember::new("A", "Alice Avery"),
        RawMember::new("B", "Bob Brown"),
        RawMember::new("C", "Cara Chen"),
    ]
}

fn scenario_events() -> PeriodEvents {
    PeriodEvents {
        referrals: vec![ReferralEvent::new("A", "B", PERIOD)],
        one_to_ones: vec![
            OneToOneEvent::new("A", "B", PERIOD),
            OneToOneEvent::new("B", "C", PERIOD),
        ],
        tyfcbs: vec![
            TyfcbEvent::new("A", 100.0, TyfcbOrigin::WithinChapter, PERIOD),
            TyfcbEvent::new("A", 50.0, TyfcbOrigin::WithinChapter, PERIOD),
            TyfcbEvent::new("B", 200.0, TyfcbOrigin::OutsideChapter, PERIOD),
        ],
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn full_pipeline_on_scenario() {
    init_logging();
    let engine = AnalyticsEngine::default();
    let analysis = engine
        .analyze_period(&chapter(), PERIOD, &members(), &scenario_events())
        .unwrap();

    assert!(analysis.warnings.is_empty());
    assert_eq!(analysis.matrices.size(), 3);
    assert_eq!(analysis.tyfcb.total_within_chapter, 150.0);
    assert_eq!(analysis.tyfcb.total_outside_chapter, 200.0);
    assert_eq!(analysis.profiles.len(), 3);
    assert_eq!(analysis.activity.len(), 3);

    let a = &analysis.activity[0];
    assert_eq!(a.referrals_given, 1);
    assert_eq!(a.one_to_ones, 1);
    assert_eq!(a.tyfcb_within_amount, 150.0);
    assert_eq!(a.tyfcb_within_count, 2);
    assert_eq!(a.tyfcb_outside_count, 0);

    assert_eq!(analysis.quality.total_records, 6);
    assert_eq!(analysis.quality.total_issues, 0);
    assert_eq!(analysis.quality.overall_quality_score, 100.0);
}

#[test]
fn events_from_other_periods_are_dropped() {
    let mut events = scenario_events();
    events.referrals.push(ReferralEvent::new("C", "A", "2024-07"));
    events.one_to_ones.push(OneToOneEvent::new("A", "C", ""));

    let analysis = AnalyticsEngine::default()
        .analyze_period(&chapter(), PERIOD, &members(), &events)
        .unwrap();

    assert_eq!(analysis.matrices.referral.get(2, 0), 0);
    // Untagged events are kept.
    assert_eq!(analysis.matrices.one_to_one.get(0, 2), 1);
    assert_eq!(
        analysis.warnings,
        vec![DataWarning::InvalidEvent {
            kind: chapter_core::event::EventKind::Referral,
            reason: InvalidReason::PeriodMismatch {
                expected: PERIOD.into(),
                actual: "2024-07".into(),
            },
        }]
    );
}

#[test]
fn empty_roster_surfaces_as_no_data() {
    let err = AnalyticsEngine::default()
        .analyze_period(&chapter(), PERIOD, &[], &scenario_events())
        .unwrap_err();
    assert!(err.is_no_data());
}

#[test]
fn combination_payload_carries_legend_and_summaries() {
    let analysis = AnalyticsEngine::default()
        .analyze_period(&chapter(), PERIOD, &members(), &scenario_events())
        .unwrap();
    let payload = analysis.matrix_payload(MatrixKind::Combination);

    assert_eq!(payload.members, vec!["Alice Avery", "Bob Brown", "Cara Chen"]);
    assert_eq!(payload.matrix, vec![vec![0, 3, 0], vec![1, 0, 1], vec![0, 1, 0]]);
    assert!(payload.totals.is_none());

    let legend = payload.legend.as_ref().unwrap();
    assert_eq!(legend["0"], "Neither");
    assert_eq!(legend["1"], "OTO only");
    assert_eq!(legend["2"], "Referral only");
    assert_eq!(legend["3"], "Both");

    let summaries = payload.summaries.as_ref().unwrap();
    assert_eq!(summaries.both["Alice Avery"], 1);
    assert_eq!(summaries.neither["Alice Avery"], 1);
    assert_eq!(summaries.oto_only["Bob Brown"], 2);
}

#[test]
fn referral_payload_carries_totals_without_legend() {
    let analysis = AnalyticsEngine::default()
        .analyze_period(&chapter(), PERIOD, &members(), &scenario_events())
        .unwrap();
    let payload = analysis.matrix_payload(MatrixKind::Referral);
    assert!(payload.legend.is_none());

    let totals = payload.totals.as_ref().unwrap();
    assert_eq!(totals.given["Alice Avery"], 1);
    assert_eq!(totals.received["Bob Brown"], 1);
    assert_eq!(totals.unique_received["Cara Chen"], 0);

    let json = serde_json::to_value(&payload).unwrap();
    assert!(json.get("legend").is_none());
    assert!(json["totals"].get("uniqueGiven").is_some());
}

/// Members sharing a display name keep separate payload entries.
#[test]
fn shared_names_keep_separate_payload_entries() {
    let members = vec![
        RawMember::new("A", "John Smith"),
        RawMember::new("B", "John Smith"),
        RawMember::new("C", "Cara Chen"),
    ];
    let events = PeriodEvents {
        referrals: vec![
            ReferralEvent::new("A", "C", PERIOD),
            ReferralEvent::new("A", "C", PERIOD),
            ReferralEvent::new("A", "B", PERIOD),
        ],
        one_to_ones: vec![OneToOneEvent::new("A", "B", PERIOD)],
        tyfcbs: vec![],
    };
    let analysis = AnalyticsEngine::default()
        .analyze_period(&chapter(), PERIOD, &members, &events)
        .unwrap();

    let referral = analysis.matrix_payload(MatrixKind::Referral);
    assert_eq!(referral.members, vec!["John Smith", "John Smith (2)", "Cara Chen"]);
    assert_eq!(referral.member_ids, vec!["A", "B", "C"]);
    let totals = referral.totals.as_ref().unwrap();
    assert_eq!(totals.given.len(), 3);
    assert_eq!(totals.given.values().sum::<u32>(), 3);
    assert_eq!(totals.given["John Smith"], 3);
    assert_eq!(totals.given["John Smith (2)"], 0);
    assert_eq!(totals.unique_given["John Smith"], 2);
    assert_eq!(totals.received["John Smith (2)"], 1);
    assert_eq!(totals.received["Cara Chen"], 2);

    let combination = analysis.matrix_payload(MatrixKind::Combination);
    assert_eq!(combination.members, referral.members);
    let summaries = combination.summaries.as_ref().unwrap();
    assert_eq!(summaries.both["John Smith"], 1);
    assert_eq!(summaries.both["John Smith (2)"], 0);
    assert_eq!(summaries.referral_only["John Smith"], 1);
    assert_eq!(summaries.oto_only["John Smith (2)"], 1);
    assert_eq!(summaries.neither["Cara Chen"], 2);
}

#[test]
fn member_analytics_by_id_and_name() {
    let analysis = AnalyticsEngine::default()
        .analyze_period(&chapter(), PERIOD, &members(), &scenario_events())
        .unwrap();

    let by_id = analysis.member_analytics("C").unwrap();
    let by_name = analysis.member_analytics_by_name("  cara CHEN").unwrap();
    assert_eq!(by_id, by_name);
    assert_eq!(by_id.completion_rates.oto_completion, 50);
    assert_eq!(by_id.gaps.missing_one_to_ones[0].name, "Alice Avery");
    assert_eq!(by_id.gaps.priority_connections.len(), 1);
    assert_eq!(by_id.recommendations.len(), 5);

    let missing = analysis.member_analytics("nobody").unwrap_err();
    assert!(matches!(missing, AnalyticsError::MemberNotFound { .. }));
}

#[test]
fn period_input_parses_from_camel_case_json() {
    let json = r#"{
        "chapter": { "id": "ch-1", "name": "Downtown" },
        "period": "2024-08",
        "members": [
            { "id": "A", "fullName": "Alice Avery" },
            { "fullName": "Bob Brown" }
        ],
        "referrals": [ { "giverId": "A", "receiverId": "name:bob brown", "reportPeriod": "2024-08" } ],
        "tyfcbs": [ { "memberId": "A", "amount": 12.5, "origin": "outside_chapter" } ]
    }"#;
    let input: PeriodInput = serde_json::from_str(json).unwrap();
    assert!(input.events.one_to_ones.is_empty());

    let analysis = AnalyticsEngine::default().analyze(&input).unwrap();
    assert_eq!(analysis.matrices.referral.get(0, 1), 1);
    assert_eq!(analysis.tyfcb.total_outside_chapter, 12.5);
}

/// Dated duplicates and bad records are reported in the quality census.
#[test]
fn quality_report_counts_issues() {
    let day = NaiveDate::from_ymd_opt(2024, 8, 6).unwrap();
    let events = PeriodEvents {
        referrals: vec![
            ReferralEvent::new("A", "B", PERIOD).on(day),
            ReferralEvent::new("A", "B", PERIOD).on(day),
            ReferralEvent::new("A", "A", PERIOD),
        ],
        one_to_ones: vec![
            OneToOneEvent::new("A", "B", PERIOD).on(day),
            OneToOneEvent::new("B", "A", PERIOD).on(day),
            OneToOneEvent::new("A", "ghost", PERIOD),
        ],
        tyfcbs: vec![TyfcbEvent::new("A", -1.0, TyfcbOrigin::WithinChapter, PERIOD)],
    };
    let analysis = AnalyticsEngine::default()
        .analyze_period(&chapter(), PERIOD, &members(), &events)
        .unwrap();
    let q = &analysis.quality;

    assert_eq!(q.total_records, 7);
    assert_eq!(q.referrals.duplicates, 1);
    assert_eq!(q.referrals.self_references, 1);
    assert_eq!(q.one_to_ones.duplicates, 1);
    assert_eq!(q.one_to_ones.unknown_members, 1);
    assert_eq!(q.tyfcbs.non_positive_amounts, 1);
    assert_eq!(q.total_issues, 5);
    assert!((q.overall_quality_score - 200.0 / 7.0).abs() < 1e-9);

    // Duplicates are reported, not removed.
    assert_eq!(analysis.matrices.referral.get(0, 1), 2);
    assert_eq!(analysis.warnings.len(), 3);
}
