//! Monthly histograms of join and last-visit dates, exported as PNG.
//!
//! Bucketing is a pure function over the roster; rendering is a thin
//! plotters shell around the computed counts.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use meetup_client::Member;
use plotters::prelude::*;

/// Counts per calendar month, first bucket oldest. `labels[i]` may be empty
/// when the month is intentionally untitled on the axis.
pub struct MonthlyHistogram {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

/// Months since year zero; adjacent months differ by exactly one.
fn month_index(date: DateTime<Local>) -> i32 {
    date.year() * 12 + date.month() as i32 - 1
}

fn month_label(index: i32) -> String {
    let year = index.div_euclid(12);
    let month = (index.rem_euclid(12) + 1) as u32;
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b-%y").to_string())
        .unwrap_or_default()
}

/// Join-date histogram from the earliest join month through the current
/// (partial) month. Only every sixth calendar month is labeled. `None` when
/// no member carries a join date.
pub fn joined_histogram(members: &[Member], now: DateTime<Local>) -> Option<MonthlyHistogram> {
    let joined: Vec<DateTime<Local>> = members
        .iter()
        .filter_map(|m| m.joined)
        .map(|t| t.with_timezone(&Local))
        .collect();
    let start = month_index(*joined.iter().min()?);
    let end = month_index(now).max(start);

    let mut counts = vec![0u64; (end - start + 1) as usize];
    for date in &joined {
        let idx = month_index(*date) - start;
        // A join date past the current month has no bucket; ignore it.
        if let Some(slot) = usize::try_from(idx).ok().and_then(|i| counts.get_mut(i)) {
            *slot += 1;
        }
    }

    let labels = (start..=end)
        .map(|i| {
            if (i.rem_euclid(12) + 1) % 6 == 1 {
                month_label(i)
            } else {
                String::new()
            }
        })
        .collect();
    Some(MonthlyHistogram { labels, counts })
}

/// Last-visit histogram over a fixed 52-week lookback window. Visits older
/// than the window clip into the first bucket, whose label carries a `<`
/// prefix. Every month is labeled.
pub fn visited_histogram(members: &[Member], now: DateTime<Local>) -> MonthlyHistogram {
    let start = month_index(now - Duration::weeks(52));
    let end = month_index(now);
    let span = end - start;

    let mut counts = vec![0u64; (span + 1) as usize];
    for visit in members.iter().filter_map(|m| m.visited) {
        let idx = (month_index(visit.with_timezone(&Local)) - start).clamp(0, span);
        counts[idx as usize] += 1;
    }

    let mut labels: Vec<String> = (start..=end).map(month_label).collect();
    if let Some(first) = labels.first_mut() {
        *first = format!("<{first}");
    }
    MonthlyHistogram { labels, counts }
}

/// Export both charts for a roster.
///
/// Members missing either date are excluded from both charts, matching the
/// console listing's presentation filter.
pub fn generate(
    roster: &[Member],
    group: &str,
    output_dir: &Path,
    now: DateTime<Local>,
) -> Result<()> {
    let complete: Vec<Member> = roster
        .iter()
        .filter(|m| m.joined.is_some() && m.visited.is_some())
        .cloned()
        .collect();
    let dropped = roster.len() - complete.len();
    if dropped > 0 {
        tracing::info!(dropped, "filtered out members missing join or visit dates");
    }

    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;
    let stamp = now.format("%Y-%m-%dT%H:%M");

    match joined_histogram(&complete, now) {
        Some(hist) => {
            let path = output_dir.join(format!("{group}-joined-meetup-{stamp}.png"));
            render(&hist, "Joined MeetUp", &path)?;
            tracing::info!(path = %path.display(), "joined chart written");
        }
        None => tracing::warn!("no join dates to chart"),
    }

    let hist = visited_histogram(&complete, now);
    let path = output_dir.join(format!("{group}-visited-meetup-{stamp}.png"));
    render(&hist, "Last Visited MeetUp", &path)?;
    tracing::info!(path = %path.display(), "visited chart written");

    Ok(())
}

fn render(hist: &MonthlyHistogram, title: &str, path: &Path) -> Result<()> {
    let buckets = hist.counts.len();
    let y_max = hist.counts.iter().copied().max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d((0..buckets).into_segmented(), 0u64..y_max + y_max / 10 + 1)?;

    let labels = &hist.labels;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Members")
        .x_labels(buckets)
        .x_label_formatter(&|coord| match coord {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.filled())
            .margin(1)
            .data(hist.counts.iter().enumerate().map(|(i, c)| (i, *c))),
    )?;

    root.present()?;
    Ok(())
}
