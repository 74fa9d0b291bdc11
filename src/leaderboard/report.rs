use serde::Deserialize;

use crate::leaderboard::rank::{LeaderboardEntry, RankChange};
use crate::markdown::{TableBuilder, Text};
use crate::{fmt, str};

const CLUB_BASE_URL: &str = "https://www.strava.com/clubs";

/// Suppress the diff column below this many meters; totals wobble by a few
/// meters between fetches and the noise drowns the signal.
const DIFF_NOISE_FLOOR_METERS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    /// Rank, name and distance only.
    Plain,
    /// Adds the rank-change glyph and the distance gained since last run.
    Diff,
}

/// Renders the full chat post: title line, fenced table, join-link footer.
pub fn build_post(
    title: &str,
    club_id: &str,
    style: ReportStyle,
    entries: &[LeaderboardEntry],
) -> String {
    let lines = table_lines(style, entries);

    fmt!(
        "{title}\n```\n{}\n```\nJoin the club at {CLUB_BASE_URL}/{club_id}",
        lines.join("\n")
    )
}

fn table_lines(style: ReportStyle, entries: &[LeaderboardEntry]) -> Vec<String> {
    let mut builder = TableBuilder::new();

    if style == ReportStyle::Diff {
        let glyphs = entries
            .iter()
            .map(|e| str!(rank_change_glyph(e.rank_change)))
            .collect();
        builder = builder.add_column(Text::new("", glyphs));
    }

    builder = builder
        .add_column(
            Text::new("#", entries.iter().map(|e| str!(e.rank)).collect()).right_aligned(),
        )
        .add_column(Text::new(
            "Name",
            entries.iter().map(|e| str!(e.name)).collect(),
        ))
        .add_column(
            Text::new(
                "Distance",
                entries.iter().map(|e| format_km(e.distance)).collect(),
            )
            .right_aligned(),
        );

    if style == ReportStyle::Diff {
        let diffs = entries.iter().map(|e| format_diff_km(e.diff)).collect();
        builder = builder.add_column(Text::new("", diffs));
    }

    builder.build()
}

fn rank_change_glyph(change: RankChange) -> &'static str {
    match change {
        RankChange::Up => "▲",
        RankChange::Down => "▼",
        RankChange::Same => "",
    }
}

/// Meters to kilometers with one decimal, truncated rather than rounded so
/// a distance never reads ahead of what was actually run.
fn format_km(meters: f64) -> String {
    let km = (meters / 100.0).trunc() / 10.0;
    fmt!("{:.1} km", km)
}

fn format_diff_km(diff_meters: f64) -> String {
    if diff_meters.abs() < DIFF_NOISE_FLOOR_METERS {
        return String::new();
    }

    let km = (diff_meters / 100.0).trunc() / 10.0;
    if diff_meters > 0.0 {
        fmt!("(+{:.1})", km)
    } else {
        fmt!("({:.1})", km)
    }
}
