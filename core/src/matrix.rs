//! Interaction matrices.
//!
//! EXECUTION ORDER (fixed):
//!   1. Referral matrix     (directed, raw events)
//!   2. One-to-one matrix   (symmetric, raw events)
//!   3. Combination matrix  (derived from 1 and 2, never from events)
//!
//! RULES:
//!   - All three matrices are N×N in roster order.
//!   - The diagonal is always zero.
//!   - An event that cannot be placed is dropped with a warning.

use crate::{
    event::{EventKind, OneToOneEvent, ReferralEvent},
    roster::Roster,
    types::MemberIndex,
    warning::{DataWarning, InvalidReason, WarningLog},
};
use serde::{Deserialize, Serialize};

/// A square count matrix indexed by roster position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionMatrix {
    cells: Vec<Vec<u32>>,
}

impl InteractionMatrix {
    pub fn zeroed(size: usize) -> Self {
        Self { cells: vec![vec![0; size]; size] }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: MemberIndex, col: MemberIndex) -> u32 {
        self.cells[row][col]
    }

    pub fn row(&self, row: MemberIndex) -> &[u32] {
        &self.cells[row]
    }

    pub fn column(&self, col: MemberIndex) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().map(move |r| r[col])
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.cells
    }

    pub fn row_total(&self, row: MemberIndex) -> u32 {
        self.cells[row].iter().sum()
    }

    pub fn column_total(&self, col: MemberIndex) -> u32 {
        self.column(col).sum()
    }

    /// Number of non-zero cells in a row.
    pub fn row_presence(&self, row: MemberIndex) -> u32 {
        self.cells[row].iter().filter(|&&v| v > 0).count() as u32
    }

    /// Number of non-zero cells in a column.
    pub fn column_presence(&self, col: MemberIndex) -> u32 {
        self.column(col).filter(|&v| v > 0).count() as u32
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (0..n).all(|j| self.cells[i][j] == self.cells[j][i]))
    }

    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.size()).all(|i| self.cells[i][i] == 0)
    }

    fn increment(&mut self, row: MemberIndex, col: MemberIndex) {
        if row != col {
            self.cells[row][col] = self.cells[row][col].saturating_add(1);
        }
    }

    fn set(&mut self, row: MemberIndex, col: MemberIndex, value: u32) {
        self.cells[row][col] = value;
    }

    fn clear_diagonal(&mut self) {
        for i in 0..self.size() {
            self.cells[i][i] = 0;
        }
    }
}

/// Which relationship a matrix describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    Referral,
    OneToOne,
    Combination,
}

/// Cell values of the combination matrix. The numbers are part of the
/// user-facing legend and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum CombinationCode {
    Neither      = 0,
    OtoOnly      = 1,
    ReferralOnly = 2,
    Both         = 3,
}

impl CombinationCode {
    pub const ALL: [CombinationCode; 4] = [
        CombinationCode::Neither,
        CombinationCode::OtoOnly,
        CombinationCode::ReferralOnly,
        CombinationCode::Both,
    ];

    pub fn from_presence(has_referral: bool, has_oto: bool) -> Self {
        match (has_referral, has_oto) {
            (true, true)   => CombinationCode::Both,
            (true, false)  => CombinationCode::ReferralOnly,
            (false, true)  => CombinationCode::OtoOnly,
            (false, false) => CombinationCode::Neither,
        }
    }

    /// Decode a stored cell. Unknown values read as `Neither`.
    pub fn from_value(value: u32) -> Self {
        match value {
            1 => CombinationCode::OtoOnly,
            2 => CombinationCode::ReferralOnly,
            3 => CombinationCode::Both,
            _ => CombinationCode::Neither,
        }
    }

    pub fn value(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            CombinationCode::Neither      => "Neither",
            CombinationCode::OtoOnly      => "OTO only",
            CombinationCode::ReferralOnly => "Referral only",
            CombinationCode::Both         => "Both",
        }
    }
}

/// The three matrices for one period, sharing dimension and order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixSet {
    pub referral:    InteractionMatrix,
    pub one_to_one:  InteractionMatrix,
    pub combination: InteractionMatrix,
}

impl MatrixSet {
    pub fn size(&self) -> usize {
        self.referral.size()
    }

    pub fn get(&self, kind: MatrixKind) -> &InteractionMatrix {
        match kind {
            MatrixKind::Referral    => &self.referral,
            MatrixKind::OneToOne    => &self.one_to_one,
            MatrixKind::Combination => &self.combination,
        }
    }
}

/// Build all three matrices from one period's referral and meeting events.
pub fn build_matrices(
    roster:      &Roster,
    referrals:   &[ReferralEvent],
    one_to_ones: &[OneToOneEvent],
    warnings:    &mut WarningLog,
) -> MatrixSet {
    let before = warnings.len();
    let referral = build_referral_matrix(roster, referrals, warnings);
    let one_to_one = build_one_to_one_matrix(roster, one_to_ones, warnings);
    let combination = derive_combination(&referral, &one_to_one);

    log::debug!(
        "matrices: n={} referrals={} one_to_ones={} dropped={}",
        roster.len(),
        referrals.len(),
        one_to_ones.len(),
        warnings.len() - before
    );

    MatrixSet { referral, one_to_one, combination }
}

pub fn build_referral_matrix(
    roster:    &Roster,
    referrals: &[ReferralEvent],
    warnings:  &mut WarningLog,
) -> InteractionMatrix {
    let mut matrix = InteractionMatrix::zeroed(roster.len());
    for event in referrals {
        if let Some((giver, receiver)) = resolve_pair(
            roster,
            EventKind::Referral,
            &event.giver_id,
            &event.receiver_id,
            warnings,
        ) {
            matrix.increment(giver, receiver);
        }
    }
    matrix.clear_diagonal();
    matrix
}

pub fn build_one_to_one_matrix(
    roster:      &Roster,
    one_to_ones: &[OneToOneEvent],
    warnings:    &mut WarningLog,
) -> InteractionMatrix {
    let mut matrix = InteractionMatrix::zeroed(roster.len());
    for event in one_to_ones {
        if let Some((a, b)) = resolve_pair(
            roster,
            EventKind::OneToOne,
            &event.member_a_id,
            &event.member_b_id,
            warnings,
        ) {
            matrix.increment(a, b);
            matrix.increment(b, a);
        }
    }
    matrix.clear_diagonal();
    matrix
}

/// Encode joint presence per ordered pair. Only ever computed from the
/// two source matrices, which `build_matrices` sizes from one roster.
pub(crate) fn derive_combination(
    referral:   &InteractionMatrix,
    one_to_one: &InteractionMatrix,
) -> InteractionMatrix {
    let n = referral.size();

    let mut matrix = InteractionMatrix::zeroed(n);
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let code = CombinationCode::from_presence(
                referral.get(i, j) > 0,
                one_to_one.get(i, j) > 0,
            );
            matrix.set(i, j, code.value());
        }
    }
    matrix
}

/// Map both ends of an event to roster indices, or record why not.
/// Self-reference is checked before membership.
fn resolve_pair(
    roster:   &Roster,
    kind:     EventKind,
    first:    &str,
    second:   &str,
    warnings: &mut WarningLog,
) -> Option<(MemberIndex, MemberIndex)> {
    if first == second {
        warnings.record(DataWarning::invalid(
            kind,
            InvalidReason::SelfReference { member_id: first.into() },
        ));
        return None;
    }
    let Some(a) = roster.index_of(first) else {
        warnings.record(DataWarning::unknown_member(kind, first));
        return None;
    };
    let Some(b) = roster.index_of(second) else {
        warnings.record(DataWarning::unknown_member(kind, second));
        return None;
    };
    Some((a, b))
}
