//! Per-player statistics and the leaderboard, derived from match records.
//!
//! Everything here is a pure function of the records passed in; nothing is
//! cached or stored.

use std::collections::HashMap;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tictactoe_engine::Outcome;
use tracing::{debug, info, instrument};

use crate::MatchRecord;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    name: String,
    wins: u32,
    losses: u32,
    ratio: f64,
    longest_win_streak: u32,
    total_duration: u64,
    games: u32,
}

/// Summary for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    wins: u32,
    losses: u32,
    draws: u32,
    total_duration: u64,
    games: u32,
}

/// Builds the leaderboard: one entry per exact player name, sorted by
/// descending win ratio.
///
/// Entries with equal ratios keep the order in which their players first
/// appear in `records`.
#[instrument(skip(records), fields(count = records.len()))]
pub fn compute_leaderboard(records: &[MatchRecord]) -> Vec<LeaderboardEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&MatchRecord>> = HashMap::new();
    for record in records {
        let name = record.name().as_str();
        groups
            .entry(name)
            .or_insert_with(|| {
                order.push(name);
                Vec::new()
            })
            .push(record);
    }

    let mut entries: Vec<LeaderboardEntry> = order
        .into_iter()
        .filter_map(|name| groups.get(name).map(|group| summarize(name, group)))
        .collect();
    entries.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));

    info!(players = entries.len(), "Leaderboard computed");
    entries
}

/// Statistics for the player named exactly `name`; zeros if there are none.
#[instrument(skip(records), fields(count = records.len()))]
pub fn player_stats(records: &[MatchRecord], name: &str) -> PlayerStats {
    let mut stats = PlayerStats::default();
    for record in records.iter().filter(|r| r.name() == name) {
        match record.winner() {
            Outcome::Human => stats.wins = stats.wins.saturating_add(1),
            Outcome::Opponent => stats.losses = stats.losses.saturating_add(1),
            Outcome::Draw => stats.draws = stats.draws.saturating_add(1),
        }
        stats.total_duration = stats.total_duration.saturating_add(*record.duration_seconds());
        stats.games = stats.games.saturating_add(1);
    }
    debug!(name, games = stats.games, wins = stats.wins, "Player stats computed");
    stats
}

/// Wins over decided games; `0.0` when every game was a draw.
pub fn win_ratio(wins: u32, losses: u32) -> f64 {
    let decided = u64::from(wins) + u64::from(losses);
    if decided == 0 {
        0.0
    } else {
        f64::from(wins) / decided as f64
    }
}

/// Longest run of consecutive human wins. Losses and draws both end a run.
pub fn longest_win_streak<'a>(chronological: impl IntoIterator<Item = &'a MatchRecord>) -> u32 {
    let mut current: u32 = 0;
    let mut longest = 0;
    for record in chronological {
        if *record.winner() == Outcome::Human {
            current = current.saturating_add(1);
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn summarize(name: &str, group: &[&MatchRecord]) -> LeaderboardEntry {
    let mut chronological = group.to_vec();
    chronological.sort_by_key(|record| *record.played_at());

    let count = |outcome: Outcome| {
        saturating_count(group.iter().filter(|r| *r.winner() == outcome).count())
    };
    let wins = count(Outcome::Human);
    let losses = count(Outcome::Opponent);

    LeaderboardEntry {
        name: name.to_string(),
        wins,
        losses,
        ratio: win_ratio(wins, losses),
        longest_win_streak: longest_win_streak(chronological.iter().copied()),
        total_duration: group
            .iter()
            .fold(0u64, |total, r| total.saturating_add(*r.duration_seconds())),
        games: saturating_count(group.len()),
    }
}

/// Counts wider than `u32` are clamped rather than wrapped.
fn saturating_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_count_clamps() {
        assert_eq!(saturating_count(0), 0);
        assert_eq!(saturating_count(7), 7);
        assert_eq!(saturating_count(u32::MAX as usize), u32::MAX);
        if let Some(past) = (u32::MAX as usize).checked_add(1) {
            assert_eq!(saturating_count(past), u32::MAX);
        }
        assert_eq!(saturating_count(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_win_ratio_at_limits() {
        assert_eq!(win_ratio(u32::MAX, 0), 1.0);
        assert_eq!(win_ratio(u32::MAX, u32::MAX), 0.5);
    }
}
