//! Matrix builder tests.

use chapter_core::{
    event::{EventKind, OneToOneEvent, ReferralEvent},
    matrix::{build_matrices, CombinationCode, MatrixSet},
    roster::{RawMember, Roster},
    warning::{DataWarning, InvalidReason, WarningLog},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

const PERIOD: &str = "2024-08";

fn roster_abc() -> Roster {
    Roster::normalize(
        "ch-1",
        "Downtown",
        &[
            RawMember::new("A", "Alice Avery"),
            RawMember::new("B", "Bob Brown"),
            RawMember::new("C", "Cara Chen"),
        ],
    )
    .unwrap()
}

fn rows(m: &chapter_core::matrix::InteractionMatrix) -> Vec<Vec<u32>> {
    m.rows().to_vec()
}

fn build(
    roster: &Roster,
    referrals: &[ReferralEvent],
    otos: &[OneToOneEvent],
) -> (MatrixSet, WarningLog) {
    let mut warnings = WarningLog::new();
    let set = build_matrices(roster, referrals, otos, &mut warnings);
    (set, warnings)
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Roster [A, B, C]; A→B; A-B and B-C meetings.
#[test]
fn three_member_scenario() {
    let roster = roster_abc();
    let (set, warnings) = build(
        &roster,
        &[ReferralEvent::new("A", "B", PERIOD)],
        &[
            OneToOneEvent::new("A", "B", PERIOD),
            OneToOneEvent::new("B", "C", PERIOD),
        ],
    );

    assert!(warnings.is_empty());
    assert_eq!(rows(&set.referral), vec![vec![0, 1, 0], vec![0, 0, 0], vec![0, 0, 0]]);
    assert_eq!(rows(&set.one_to_one), vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
    assert_eq!(rows(&set.combination), vec![vec![0, 3, 0], vec![1, 0, 1], vec![0, 1, 0]]);
}

/// Repeat meetings accumulate; the combination only sees presence.
#[test]
fn repeated_events_accumulate_counts() {
    let roster = roster_abc();
    let (set, _) = build(
        &roster,
        &[
            ReferralEvent::new("C", "A", PERIOD),
            ReferralEvent::new("C", "A", PERIOD),
        ],
        &[
            OneToOneEvent::new("A", "C", PERIOD),
            OneToOneEvent::new("C", "A", PERIOD),
            OneToOneEvent::new("A", "C", PERIOD),
        ],
    );

    assert_eq!(set.referral.get(2, 0), 2);
    assert_eq!(set.one_to_one.get(0, 2), 3);
    assert_eq!(set.one_to_one.get(2, 0), 3);
    assert_eq!(set.combination.get(2, 0), CombinationCode::Both.value());
    assert_eq!(set.combination.get(0, 2), CombinationCode::OtoOnly.value());
}

/// Unknown ids and self-references are dropped with warnings, never fatal.
#[test]
fn bad_events_are_dropped_with_warnings() {
    let roster = roster_abc();
    let (set, warnings) = build(
        &roster,
        &[
            ReferralEvent::new("A", "A", PERIOD),
            ReferralEvent::new("A", "Z", PERIOD),
            ReferralEvent::new("B", "C", PERIOD),
        ],
        &[
            OneToOneEvent::new("Q", "B", PERIOD),
            OneToOneEvent::new("C", "C", PERIOD),
        ],
    );

    assert_eq!(set.referral.row_total(1), 1);
    assert_eq!(set.referral.row_total(0), 0);
    assert!(set.one_to_one.rows().iter().flatten().all(|&v| v == 0));

    assert_eq!(warnings.len(), 4);
    assert_eq!(warnings.unknown_member_count(), 2);
    assert_eq!(warnings.invalid_event_count(), 2);
    assert_eq!(
        warnings.entries()[0],
        DataWarning::InvalidEvent {
            kind: EventKind::Referral,
            reason: InvalidReason::SelfReference { member_id: "A".into() },
        }
    );
    assert_eq!(
        warnings.entries()[1],
        DataWarning::UnknownMemberReference { kind: EventKind::Referral, member_id: "Z".into() }
    );
    assert_eq!(
        warnings.entries()[2],
        DataWarning::UnknownMemberReference { kind: EventKind::OneToOne, member_id: "Q".into() }
    );
}

#[test]
fn all_matrices_share_dimension_and_zero_diagonal() {
    let roster = roster_abc();
    let (set, _) = build(
        &roster,
        &[ReferralEvent::new("A", "C", PERIOD), ReferralEvent::new("B", "A", PERIOD)],
        &[OneToOneEvent::new("A", "C", PERIOD)],
    );

    for m in [&set.referral, &set.one_to_one, &set.combination] {
        assert_eq!(m.size(), 3);
        assert!(m.rows().iter().all(|r| r.len() == 3));
        assert!(m.has_zero_diagonal());
    }
    assert!(set.one_to_one.is_symmetric());
}

/// A single-member chapter still yields 1×1 zero matrices.
#[test]
fn single_member_matrices() {
    let roster = Roster::normalize("ch-1", "Solo", &[RawMember::new("A", "Alice Avery")]).unwrap();
    let (set, warnings) = build(&roster, &[ReferralEvent::new("A", "A", PERIOD)], &[]);

    assert_eq!(rows(&set.combination), vec![vec![0]]);
    assert_eq!(warnings.invalid_event_count(), 1);
}

/// Every combination cell is a function of the two source cells.
#[test]
fn combination_is_a_pure_derivation() {
    let roster = roster_abc();
    let (set, _) = build(
        &roster,
        &[ReferralEvent::new("B", "C", PERIOD)],
        &[OneToOneEvent::new("A", "B", PERIOD)],
    );
    for i in 0..set.size() {
        for j in 0..set.size() {
            let expected = if i == j {
                0
            } else {
                CombinationCode::from_presence(
                    set.referral.get(i, j) > 0,
                    set.one_to_one.get(i, j) > 0,
                )
                .value()
            };
            assert_eq!(set.combination.get(i, j), expected);
        }
    }
}
