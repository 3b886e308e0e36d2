use std::fmt;

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable member identifier.
///
/// The legacy API serves numeric ids, but the field is documented as opaque,
/// so both forms are accepted and round-tripped unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberId {
    Int(i64),
    Str(String),
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberId::Int(id) => write!(f, "{id}"),
            MemberId::Str(id) => write!(f, "{id}"),
        }
    }
}

/// A single member record as returned by the members listing.
///
/// Every field the tracker cares about is optional; the API omits them for
/// some profiles and records are filtered at the point of use rather than
/// patched with defaults. Unrecognized fields are preserved in `extra` so a
/// persisted roster carries the payload verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// When the member joined the group, epoch milliseconds on the wire.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub joined: Option<DateTime<Utc>>,
    /// Last group activity, epoch milliseconds on the wire.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub visited: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Pagination block attached to every members listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub count: usize,
    pub total_count: usize,
    /// Absolute URL of the next page; empty when the cursor is exhausted.
    #[serde(default)]
    pub next: String,
}

/// One page of the members listing.
#[derive(Debug, Clone, Deserialize)]
pub struct MembersPage {
    pub meta: PageMeta,
    pub results: Vec<Member>,
}

/// Group lookup response. Only the id is needed.
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub id: i64,
}

/// Advisory rate-limit headroom reported via response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    pub reset_secs: Option<u32>,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_u32(headers, "X-RateLimit-Limit"),
            remaining: header_u32(headers, "X-RateLimit-Remaining"),
            reset_secs: header_u32(headers, "X-RateLimit-Reset"),
        }
    }
}

fn header_u32(headers: &HeaderMap, name: &str) -> Option<u32> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
