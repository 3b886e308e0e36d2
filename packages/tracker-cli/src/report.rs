//! Console listing of members.

use chrono::Local;
use meetup_client::Member;

/// Print one line per member to stdout: display name and local join time.
///
/// Members missing a join or visit date are skipped, with the skip count
/// logged rather than silently dropped.
pub fn print_members(members: &[Member]) {
    let presentable: Vec<&Member> = members
        .iter()
        .filter(|m| m.joined.is_some() && m.visited.is_some())
        .collect();
    let dropped = members.len() - presentable.len();
    if dropped > 0 {
        tracing::info!(dropped, "filtered out members missing join or visit dates");
    }

    for member in presentable {
        if let Some(joined) = member.joined {
            let name = member.name.as_deref().unwrap_or("");
            println!(
                "{:<24}{}",
                name,
                joined.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            );
        }
    }
}
