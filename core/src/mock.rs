//! MOCK DATA ONLY: placeholder profiles for empty dashboard states.
//!
//! Nothing in this module is analytics. `MockMemberProfile` is its own
//! type with `is_mock` always set, so it cannot be passed where a
//! `CompletionProfile` or `MemberAnalyticsPayload` is expected. The
//! engine never calls into this module.

use crate::{
    rng::{stream_for, MockRng},
    roster::{Member, RawMember},
    types::MemberId,
};
use serde::{Deserialize, Serialize};

pub const MOCK_LABEL: &str = "Sample data (not real analytics)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockMemberProfile {
    pub is_mock:                        bool,
    pub label:                          String,
    pub member_id:                      MemberId,
    pub full_name:                      String,
    pub oto_completion_pct:             u8,
    pub referral_given_coverage_pct:    u8,
    pub referral_received_coverage_pct: u8,
    pub referrals_given:                u32,
    pub referrals_received:             u32,
    pub one_to_ones:                    u32,
    pub tyfcb_amount:                   f64,
    pub activity_score:                 u32,
}

/// Plausible placeholder numbers for `member`. Same seed, same profile.
pub fn mock_profile(member: &Member, seed: u64) -> MockMemberProfile {
    let mut rng = MockRng::new(seed, stream_for(&member.id));

    let referrals_given = rng.between(0, 15);
    let referrals_received = rng.between(0, 15);
    let one_to_ones = rng.between(0, 12);
    // Whole currency units; placeholder amounts never need cents.
    let tyfcb_amount = (rng.next_f64() * 50_000.0).round();

    MockMemberProfile {
        is_mock:                        true,
        label:                          MOCK_LABEL.into(),
        member_id:                      member.id.clone(),
        full_name:                      member.full_name.clone(),
        oto_completion_pct:             rng.between(20, 95) as u8,
        referral_given_coverage_pct:    rng.between(10, 80) as u8,
        referral_received_coverage_pct: rng.between(10, 80) as u8,
        referrals_given,
        referrals_received,
        one_to_ones,
        tyfcb_amount,
        activity_score:                 rng.between(40, 95),
    }
}

/// A demo roster of `size` placeholder members with ids `demo-1..`.
pub fn demo_roster(size: usize, seed: u64) -> Vec<RawMember> {
    let mut rng = MockRng::new(seed, stream_for("demo-roster"));
    (1..=size)
        .map(|i| {
            let first = FIRST_NAMES[rng.next_u64_below(FIRST_NAMES.len() as u64) as usize];
            let last = LAST_NAMES[rng.next_u64_below(LAST_NAMES.len() as u64) as usize];
            RawMember::new(&format!("demo-{i}"), &format!("{first} {last}"))
        })
        .collect()
}

const FIRST_NAMES: &[&str] = &[
    "Aisha", "Ben", "Carla", "Dev", "Elena", "Farid", "Grace", "Hiro",
    "Ines", "Jonah", "Kavya", "Liam", "Mei", "Nadia", "Omar", "Priya",
    "Quinn", "Rosa", "Sami", "Tara", "Usman", "Vera", "Wes", "Yara",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Bakr", "Costa", "Dubois", "Evans", "Fischer", "Gomez", "Haddad",
    "Ito", "Jensen", "Khan", "Lopez", "Mensah", "Novak", "Okafor", "Patel",
    "Reyes", "Silva", "Tanaka", "Varga", "Walsh", "Young", "Zhou",
];
