//! Roster comparison: newest joiners and members-since-marker.
//!
//! All functions are pure. Members without a join date cannot participate
//! in either computation; they are excluded and the exclusion count travels
//! back to the caller in the report instead of being swallowed.

use meetup_client::{Member, MemberId};

/// The `n` most recently joined members, oldest of the `n` first.
pub struct NewestReport {
    pub members: Vec<Member>,
    pub dropped: usize,
}

/// Whether the watch marker was present in the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerMatch {
    Found,
    NotFound,
}

/// Members that joined after the watch marker, oldest first.
///
/// When the marker id is absent from the roster (it aged out of the API
/// window, or the sweep is inconsistent) `members` holds the entire filtered
/// roster and `marker` is [`MarkerMatch::NotFound`]; the caller picks the
/// recovery policy.
pub struct DeltaReport {
    pub marker: MarkerMatch,
    pub members: Vec<Member>,
    pub dropped: usize,
}

/// Filter to members with a join date and stable-sort newest first.
/// Ties keep their server-supplied order.
fn joined_desc(roster: &[Member]) -> (Vec<Member>, usize) {
    let mut kept: Vec<Member> = roster
        .iter()
        .filter(|m| m.joined.is_some())
        .cloned()
        .collect();
    let dropped = roster.len() - kept.len();
    kept.sort_by(|a, b| b.joined.cmp(&a.joined));
    (kept, dropped)
}

/// Flip a newest-first slice to display order. A stable ascending re-sort
/// rather than a reversal, so tied members stay in server order.
fn ascending(mut members: Vec<Member>) -> Vec<Member> {
    members.sort_by(|a, b| a.joined.cmp(&b.joined));
    members
}

pub fn newest_first(roster: &[Member], n: usize) -> NewestReport {
    let (mut kept, dropped) = joined_desc(roster);
    kept.truncate(n);
    NewestReport {
        members: ascending(kept),
        dropped,
    }
}

pub fn new_since(roster: &[Member], marker: &MemberId) -> DeltaReport {
    let (kept, dropped) = joined_desc(roster);
    match kept.iter().position(|m| m.id.as_ref() == Some(marker)) {
        Some(pos) => DeltaReport {
            marker: MarkerMatch::Found,
            members: ascending(kept[..pos].to_vec()),
            dropped,
        },
        None => DeltaReport {
            marker: MarkerMatch::NotFound,
            members: ascending(kept),
            dropped,
        },
    }
}
