use std::cmp::Ordering;
use std::collections::HashMap;

use crate::store::Totals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankChange {
    Up,
    Same,
    Down,
}

/// One athlete's line on a single run's report. Derived fresh each run from
/// the old and new totals; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub rank: usize,
    pub rank_change: RankChange,
    pub distance: f64,
    pub diff: f64,
}

/// Ranks athlete ids by distance descending. Equal distances are broken by
/// ascending id so repeated runs over the same totals agree. Rank 1 is the
/// greatest distance.
pub fn rank(totals: &Totals) -> HashMap<String, usize> {
    let mut ids: Vec<&String> = totals.keys().collect();

    ids.sort_by(|a, b| {
        totals[*b]
            .distance
            .partial_cmp(&totals[*a].distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(b))
    });

    ids.into_iter()
        .enumerate()
        .map(|(position, id)| (id.clone(), position + 1))
        .collect()
}

/// Produces one entry per athlete in `new`, ordered by rank. An athlete
/// missing from `old` is compared against a rank one past the bottom of the
/// new board and a prior distance of zero.
pub fn compute_entries(old: &Totals, new: &Totals) -> Vec<LeaderboardEntry> {
    let old_ranks = rank(old);
    let new_ranks = rank(new);

    let sentinel_rank = new.len() + 1;

    let mut entries: Vec<LeaderboardEntry> = new
        .iter()
        .map(|(id, total)| {
            let new_rank = new_ranks[id];
            let old_rank = old_ranks.get(id).copied().unwrap_or(sentinel_rank);
            let old_distance = old.get(id).map(|t| t.distance).unwrap_or(0.0);

            let rank_change = match new_rank.cmp(&old_rank) {
                Ordering::Less => RankChange::Up,
                Ordering::Greater => RankChange::Down,
                Ordering::Equal => RankChange::Same,
            };

            LeaderboardEntry {
                id: id.clone(),
                name: total.name.clone(),
                rank: new_rank,
                rank_change,
                distance: total.distance,
                diff: total.distance - old_distance,
            }
        })
        .collect();

    entries.sort_by_key(|entry| entry.rank);
    entries
}
