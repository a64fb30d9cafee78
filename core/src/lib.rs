//! Chapter interaction matrices and network gap analysis.
//!
//! Turns one report period's roster and interaction events into the
//! referral, one-to-one and combination matrices, a TYFCB summary split
//! by origin, and per-member completion profiles with recommendations.
//! Start at [`engine::AnalyticsEngine`].

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod gap_analysis;
pub mod matrix;
pub mod mock;
pub mod payload;
pub mod quality;
pub mod recommendation;
pub mod rng;
pub mod roster;
pub mod summary;
pub mod tyfcb;
pub mod types;
pub mod warning;
