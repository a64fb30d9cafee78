//! Roster normalization.
//!
//! The roster fixes the member order for a report period. Index `i` in
//! every matrix is `roster.members()[i]`, so the order must never depend
//! on anything but the order members were first seen in.
//!
//! Dedup rules:
//!   - An entry with an id is a duplicate iff that id was already kept.
//!   - An entry without an id is a duplicate iff its normalized name
//!     matches a member already kept. Otherwise it gets the derived id
//!     `name:<normalized name>`.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    types::{ChapterId, MemberId, MemberIndex},
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const NAME_PREFIXES: &[&str] = &["mr.", "mrs.", "ms.", "dr.", "prof."];
const NAME_SUFFIXES: &[&str] = &["jr.", "sr.", "ii", "iii", "iv"];

/// A member as supplied by the data-access layer, before dedup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMember {
    #[serde(default)]
    pub id:         Option<MemberId>,
    pub full_name:  String,
    #[serde(default)]
    pub chapter_id: Option<ChapterId>,
}

impl RawMember {
    pub fn new(id: &str, full_name: &str) -> Self {
        Self { id: Some(id.into()), full_name: full_name.into(), chapter_id: None }
    }

    pub fn without_id(full_name: &str) -> Self {
        Self { id: None, full_name: full_name.into(), chapter_id: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id:         MemberId,
    pub full_name:  String,
    pub chapter_id: ChapterId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id:      ChapterId,
    pub name:    String,
    pub members: Vec<Member>,
}

/// The ordered, deduplicated member list for one chapter and period.
#[derive(Debug, Clone)]
pub struct Roster {
    chapter: Chapter,
    by_id:   HashMap<MemberId, MemberIndex>,
    by_name: HashMap<String, MemberIndex>,
}

impl Roster {
    /// Deduplicate `raw` into a stable roster.
    ///
    /// Entries tagged with a different chapter are skipped. Fails with
    /// `EmptyRoster` if nothing survives.
    pub fn normalize(
        chapter_id:   &str,
        chapter_name: &str,
        raw:          &[RawMember],
    ) -> AnalyticsResult<Self> {
        let mut members: Vec<Member> = Vec::with_capacity(raw.len());
        let mut by_id: HashMap<MemberId, MemberIndex> = HashMap::new();
        let mut by_name: HashMap<String, MemberIndex> = HashMap::new();
        let mut duplicates = 0usize;

        for entry in raw {
            if let Some(other) = entry.chapter_id.as_deref() {
                if other != chapter_id {
                    log::warn!(
                        "roster {chapter_id}: skipping '{}' tagged with chapter {other}",
                        entry.full_name
                    );
                    continue;
                }
            }

            let name_key = normalize_name(&entry.full_name);
            if name_key.is_empty() {
                log::debug!("roster {chapter_id}: skipping entry with blank name");
                continue;
            }

            let explicit_id = entry
                .id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty());

            let id = match explicit_id {
                Some(id) => id.to_string(),
                None => {
                    if by_name.contains_key(&name_key) {
                        duplicates += 1;
                        continue;
                    }
                    derived_member_id(&name_key)
                }
            };

            if by_id.contains_key(&id) {
                duplicates += 1;
                continue;
            }

            let index = members.len();
            by_id.insert(id.clone(), index);
            // First holder of a name keeps the lookup; later namesakes are
            // still reachable by id.
            by_name.entry(name_key).or_insert(index);
            members.push(Member {
                id,
                full_name:  display_name(&entry.full_name),
                chapter_id: chapter_id.to_string(),
            });
        }

        if members.is_empty() {
            return Err(AnalyticsError::EmptyRoster { chapter_id: chapter_id.to_string() });
        }

        log::debug!(
            "roster {chapter_id}: {} members ({} raw, {duplicates} duplicates)",
            members.len(),
            raw.len()
        );

        Ok(Self {
            chapter: Chapter {
                id:   chapter_id.to_string(),
                name: chapter_name.to_string(),
                members,
            },
            by_id,
            by_name,
        })
    }

    pub fn chapter(&self) -> &Chapter {
        &self.chapter
    }

    pub fn members(&self) -> &[Member] {
        &self.chapter.members
    }

    /// Matrix dimension N. Never zero.
    pub fn len(&self) -> usize {
        self.chapter.members.len()
    }

    /// Always false; an empty roster is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.chapter.members.is_empty()
    }

    pub fn member(&self, index: MemberIndex) -> Option<&Member> {
        self.chapter.members.get(index)
    }

    pub fn index_of(&self, member_id: &str) -> Option<MemberIndex> {
        self.by_id.get(member_id).copied()
    }

    /// Look a member up by display name, tolerant of case and titles.
    pub fn index_of_name(&self, full_name: &str) -> Option<MemberIndex> {
        self.by_name.get(&normalize_name(full_name)).copied()
    }

    pub fn member_by_id(&self, member_id: &str) -> Option<&Member> {
        self.index_of(member_id).and_then(|i| self.member(i))
    }

    /// One display label per member, in roster order. Names shared by
    /// several members get a ` (2)`, ` (3)`, ... suffix on the repeats so
    /// labels can key per-member maps.
    pub fn labels(&self) -> Vec<String> {
        let mut taken: HashSet<String> = HashSet::with_capacity(self.len());
        let mut labels = Vec::with_capacity(self.len());
        for member in &self.chapter.members {
            let mut label = member.full_name.clone();
            let mut n = 1;
            while taken.contains(&label) {
                n += 1;
                label = format!("{} ({n})", member.full_name);
            }
            taken.insert(label.clone());
            labels.push(label);
        }
        labels
    }
}

/// Lower-case, collapse whitespace, drop one leading title and one
/// trailing generational suffix.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut parts: Vec<&str> = lowered.split_whitespace().collect();

    if parts.len() > 1 && NAME_PREFIXES.contains(&parts[0]) {
        parts.remove(0);
    }
    if parts.len() > 1 && parts.last().is_some_and(|p| NAME_SUFFIXES.contains(p)) {
        parts.pop();
    }

    parts.join(" ")
}

fn display_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn derived_member_id(name_key: &str) -> MemberId {
    format!("name:{name_key}")
}
