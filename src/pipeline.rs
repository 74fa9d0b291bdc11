use tracing::{error, info};

use crate::api::strava_api;
use crate::config::AppConfig;
use crate::error::StoreError;
use crate::leaderboard::{rank, report};
use crate::notify::slack;
use crate::store::totals_store;
use crate::Error;

/// One full leaderboard run: fetch, merge, rank, format, post, persist.
#[tracing::instrument(level = "info", skip(cfg))]
pub async fn run(cfg: &AppConfig) -> Result<(), Error> {
    // Fetch before touching the store: a failed fetch must leave the last
    // persisted totals exactly as they were.
    let records = strava_api::get_club_leaderboard(&cfg.club_id, cfg.week_offset).await?;

    let old_totals = totals_store::load(&cfg.store_path)?;
    let new_totals = totals_store::merged(&old_totals, &records);

    let entries = rank::compute_entries(&old_totals, &new_totals);
    let post = report::build_post(&cfg.title, &cfg.club_id, cfg.report_style, &entries);

    // A failed post is logged and dropped. The save still happens: skipping
    // it would re-merge this week's distances on the next run.
    if let Err(e) = slack::post(cfg, &post).await {
        error!(error = ?e, "Failed to post leaderboard to Slack");
    }

    totals_store::save(&cfg.store_path, &new_totals)?;

    info!(
        athletes = new_totals.len(),
        fetched = records.len(),
        "Leaderboard run complete"
    );
    Ok(())
}

/// Period rollover: archive the live totals under a dated name and clear
/// them, ready for the next period's first merge.
#[tracing::instrument(level = "info", skip(cfg))]
pub fn rollover(cfg: &AppConfig) -> Result<(), StoreError> {
    match totals_store::archive_and_reset(&cfg.store_path)? {
        Some(archive_path) => {
            info!(archive = %archive_path.display(), "Rollover complete")
        }
        None => info!("Rollover complete, nothing to archive"),
    }
    Ok(())
}
