//! Shared primitive types used across the entire engine.

/// A stable, unique identifier for a chapter member.
pub type MemberId = String;

/// A stable identifier for a chapter.
pub type ChapterId = String;

/// The report period an interaction set covers, e.g. `"2024-08"`.
pub type ReportPeriod = String;

/// Position of a member in the roster; doubles as matrix row/column.
pub type MemberIndex = usize;
