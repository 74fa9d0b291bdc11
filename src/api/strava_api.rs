use serde::Deserialize;
use tracing::info;

use crate::error::FetchError;
use crate::fmt;

const BASE_URL: &str = "https://www.strava.com";

// The club leaderboard is the endpoint the website itself polls; it answers
// plain JSON only when asked the way the site's own XHR does.
const ACCEPT_HEADER: &str =
    "text/javascript, application/javascript, application/ecmascript, application/x-ecmascript";

#[derive(Debug, Clone, Deserialize)]
pub struct RawLeaderboardEntry {
    pub athlete_id: u64,
    pub athlete_firstname: String,
    pub athlete_lastname: String,
    pub distance: f64,
    pub moving_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    pub data: Vec<RawLeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AthleteRecord {
    pub id: String,
    pub name: String,
    pub distance: f64,
    pub moving_time: Option<i64>,
}

#[tracing::instrument(level = "trace")]
pub(crate) async fn get_club_leaderboard(
    club_id: &str,
    week_offset: u32,
) -> Result<Vec<AthleteRecord>, FetchError> {
    let url = fmt!("{BASE_URL}/clubs/{club_id}/leaderboard?week_offset={week_offset}");
    info!(club_id, url, "Fetching club leaderboard");

    let response = reqwest::Client::new()
        .get(url)
        .header("Accept", ACCEPT_HEADER)
        .header("X-Requested-With", "XMLHttpRequest")
        .send()
        .await?
        .error_for_status()?;

    let body = response.text().await?;
    let board: LeaderboardResponse = serde_json::from_str(&body)?;
    let records = normalize(board);

    info!(
        club_id,
        count = records.len(),
        "Fetched club leaderboard from Strava"
    );

    Ok(records)
}

/// Maps raw leaderboard entries to the uniform record shape and orders them
/// by distance descending (ties broken by athlete id for reproducibility).
pub(crate) fn normalize(board: LeaderboardResponse) -> Vec<AthleteRecord> {
    let mut records: Vec<AthleteRecord> = board
        .data
        .into_iter()
        .map(|entry| AthleteRecord {
            id: entry.athlete_id.to_string(),
            name: fmt!("{} {}", entry.athlete_firstname, entry.athlete_lastname),
            distance: entry.distance,
            moving_time: entry.moving_time,
        })
        .collect();

    records.sort_by(|a, b| {
        b.distance
            .partial_cmp(&a.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_joins_name_parts_and_stringifies_id() {
        let board: LeaderboardResponse = serde_json::from_str(
            r#"{"data": [
                {"athlete_id": 42, "athlete_firstname": "Anna", "athlete_lastname": "Svensson",
                 "distance": 12345.6, "moving_time": 3600}
            ]}"#,
        )
        .unwrap();

        let records = normalize(board);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "42");
        assert_eq!(records[0].name, "Anna Svensson");
        assert_eq!(records[0].distance, 12345.6);
        assert_eq!(records[0].moving_time, Some(3600));
    }

    #[test]
    fn normalize_orders_by_distance_descending() {
        let board: LeaderboardResponse = serde_json::from_str(
            r#"{"data": [
                {"athlete_id": 1, "athlete_firstname": "A", "athlete_lastname": "A", "distance": 5000.0},
                {"athlete_id": 2, "athlete_firstname": "B", "athlete_lastname": "B", "distance": 8000.0},
                {"athlete_id": 3, "athlete_firstname": "C", "athlete_lastname": "C", "distance": 6500.0}
            ]}"#,
        )
        .unwrap();

        let ids: Vec<String> = normalize(board).into_iter().map(|r| r.id).collect();

        assert_eq!(ids, ["2", "3", "1"]);
    }

    #[test]
    fn normalize_breaks_distance_ties_by_id() {
        let board: LeaderboardResponse = serde_json::from_str(
            r#"{"data": [
                {"athlete_id": 9, "athlete_firstname": "A", "athlete_lastname": "A", "distance": 5000.0},
                {"athlete_id": 2, "athlete_firstname": "B", "athlete_lastname": "B", "distance": 5000.0}
            ]}"#,
        )
        .unwrap();

        let ids: Vec<String> = normalize(board).into_iter().map(|r| r.id).collect();

        assert_eq!(ids, ["2", "9"]);
    }
}
