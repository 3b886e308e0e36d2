//! Long-running watch mode: re-sync on a fixed cadence and report members
//! who joined since the last check.
//!
//! The loop sleeps in short slices and re-checks elapsed wall-clock time,
//! so the process stays responsive to external termination. A failed cycle
//! is logged and retried at the next scheduled wake-up; only startup errors
//! kill the process.

use std::time::Duration as StdDuration;

use anyhow::Result;
use chrono::{Duration, Local};
use meetup_client::{Member, MeetupClient, MemberId};

use crate::delta::{self, MarkerMatch};
use crate::report;
use crate::snapshot::SnapshotStore;
use crate::sync;

pub struct WatchConfig {
    /// Minimum time between member checks.
    pub interval: Duration,
    /// Sleep slice between wall-clock re-checks.
    pub poll_slice: StdDuration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: Duration::hours(6),
            poll_slice: StdDuration::from_secs(15 * 60),
        }
    }
}

/// Process-local cell holding the id of the newest member seen so far.
///
/// The watch loop only talks to this trait, so a durable implementation can
/// be swapped in without touching the loop's control flow.
pub trait MarkerStore {
    fn get(&self) -> Option<&MemberId>;
    fn set(&mut self, id: MemberId);
}

#[derive(Debug, Default)]
pub struct InMemoryMarker {
    current: Option<MemberId>,
}

impl MarkerStore for InMemoryMarker {
    fn get(&self) -> Option<&MemberId> {
        self.current.as_ref()
    }

    fn set(&mut self, id: MemberId) {
        self.current = Some(id);
    }
}

pub struct WatchLoop<'a> {
    client: &'a MeetupClient,
    store: &'a SnapshotStore,
    group: &'a str,
    group_id: i64,
    config: WatchConfig,
    marker: Box<dyn MarkerStore>,
}

impl<'a> WatchLoop<'a> {
    pub fn new(
        client: &'a MeetupClient,
        store: &'a SnapshotStore,
        group: &'a str,
        group_id: i64,
        config: WatchConfig,
        marker: Box<dyn MarkerStore>,
    ) -> Self {
        Self {
            client,
            store,
            group,
            group_id,
            config,
            marker,
        }
    }

    /// Run forever, starting from the roster of the initial sync.
    pub async fn run(mut self, initial: Vec<Member>) -> Result<()> {
        self.show_newest(&initial);

        let mut last_check = Local::now();
        loop {
            if Local::now() - last_check < self.config.interval {
                tokio::time::sleep(self.config.poll_slice).await;
                continue;
            }

            // Record the wake-up before the sync so a failing cycle waits a
            // full interval before the retry.
            last_check = Local::now();
            if let Err(err) = self.check_once().await {
                tracing::error!("check failed, retrying next cycle: {err:#}");
            }
        }
    }

    /// Display the ten most recent joiners and pin the marker to the newest.
    fn show_newest(&mut self, roster: &[Member]) {
        let newest = delta::newest_first(roster, 10);
        if newest.dropped > 0 {
            tracing::info!(dropped = newest.dropped, "filtered out members missing join dates");
        }

        tracing::info!(count = newest.members.len(), "showing most recent joiners");
        report::print_members(&newest.members);
        self.advance_marker(&newest.members);
    }

    async fn check_once(&mut self) -> Result<()> {
        tracing::info!(group = self.group, "checking for new members");
        let roster =
            sync::sync_roster(self.client, self.store, self.group, self.group_id).await?;

        let Some(marker) = self.marker.get().cloned() else {
            // No marker could be pinned yet (empty or id-less roster at
            // startup); repeat the newest-first treatment until one sticks.
            self.show_newest(&roster);
            return Ok(());
        };

        let since = delta::new_since(&roster, &marker);
        if since.dropped > 0 {
            tracing::info!(dropped = since.dropped, "filtered out members missing join dates");
        }
        if since.marker == MarkerMatch::NotFound {
            // Marker aged out of the API window or the sweep is
            // inconsistent. Treat the whole roster as new; the marker
            // re-pins to the current newest member below.
            tracing::warn!(%marker, "watch marker not in roster; treating entire roster as new");
        }

        if since.members.is_empty() {
            tracing::info!(%marker, "no new members");
            return Ok(());
        }

        tracing::info!(count = since.members.len(), since = %marker, "new members joined");
        report::print_members(&since.members);
        self.advance_marker(&since.members);
        Ok(())
    }

    /// Move the marker to the id of the newest (last, ascending) member.
    /// Members without an id leave the marker untouched.
    fn advance_marker(&mut self, ascending: &[Member]) {
        if let Some(id) = ascending.last().and_then(|m| m.id.clone()) {
            self.marker.set(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_marker_starts_unset() {
        let marker = InMemoryMarker::default();
        assert!(marker.get().is_none());
    }

    #[test]
    fn test_in_memory_marker_keeps_latest_value() {
        let mut marker = InMemoryMarker::default();
        marker.set(MemberId::Int(1));
        marker.set(MemberId::Int(2));
        assert_eq!(marker.get(), Some(&MemberId::Int(2)));
    }
}
