//! One full roster sync: sweep the API, persist, read back.

use anyhow::{Context, Result};
use chrono::Local;
use meetup_client::{Member, MeetupClient};

use crate::snapshot::SnapshotStore;

/// Retrieve the complete roster and persist it as a new snapshot.
///
/// The roster handed back is the one re-read from disk, so downstream
/// consumers always see exactly what was persisted. Nothing is written when
/// the sweep fails partway.
pub async fn sync_roster(
    client: &MeetupClient,
    store: &SnapshotStore,
    group: &str,
    group_id: i64,
) -> Result<Vec<Member>> {
    let members = client
        .all_members(group_id)
        .await
        .context("member sync failed")?;

    let path = store.write(group, Local::now(), &members)?;
    let roster = store.read(&path)?;
    tracing::info!(count = roster.len(), path = %path.display(), "snapshot persisted");
    Ok(roster)
}
