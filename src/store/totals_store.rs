use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::strava_api::AthleteRecord;
use crate::error::StoreError;
use crate::util::dates;

/// Cumulative distance per athlete id, as persisted between runs.
/// A BTreeMap keeps the file output stable across runs.
pub type Totals = BTreeMap<String, AthleteTotal>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteTotal {
    pub name: String,
    pub distance: f64,
}

pub fn load(path: &Path) -> Result<Totals, StoreError> {
    if !path.exists() {
        info!(path = %path.display(), "No totals file yet, starting from an empty store");
        return Ok(Totals::new());
    }

    let file = File::open(path)?;
    let reader = io::BufReader::new(file);
    let totals: Totals = serde_json::from_reader(reader)?;

    info!(
        path = %path.display(),
        athletes = totals.len(),
        "Loaded totals store"
    );
    Ok(totals)
}

/// Returns a new store with each record's distance added onto the athlete's
/// prior cumulative distance (0 for a first appearance). The stored name is
/// updated to the latest observed value.
pub fn merged(old: &Totals, records: &[AthleteRecord]) -> Totals {
    let mut totals = old.clone();

    for record in records {
        let total = totals
            .entry(record.id.clone())
            .or_insert_with(|| AthleteTotal {
                name: record.name.clone(),
                distance: 0.0,
            });
        total.distance += record.distance;
        total.name = record.name.clone();
    }

    totals
}

pub fn save(path: &Path, totals: &Totals) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(totals)?;

    // Write-then-rename keeps a crash mid-write from clobbering the live file.
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;

    info!(
        path = %path.display(),
        athletes = totals.len(),
        "Saved totals store"
    );
    Ok(())
}

/// Period rollover: copy the live file to a dated sibling, then clear the
/// live store to empty. Returns the archive path, or None when there was no
/// live file to archive.
pub fn archive_and_reset(path: &Path) -> Result<Option<PathBuf>, StoreError> {
    let archived = if path.exists() {
        let archive_path = archive_path_for(path, &dates::local_date_yyyy_mm_dd());
        fs::copy(path, &archive_path)?;
        info!(
            path = %path.display(),
            archive = %archive_path.display(),
            "Archived totals store"
        );
        Some(archive_path)
    } else {
        info!(path = %path.display(), "No totals file to archive");
        None
    };

    save(path, &Totals::new())?;
    Ok(archived)
}

fn archive_path_for(path: &Path, date: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("totals");
    path.with_file_name(format!("{stem}-{date}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, distance: f64) -> AthleteRecord {
        AthleteRecord {
            id: id.to_string(),
            name: name.to_string(),
            distance,
            moving_time: None,
        }
    }

    fn temp_store_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stravaboard-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn merging_accumulates_across_runs() {
        let empty = Totals::new();
        let after_first = merged(&empty, &[record("1", "Anna", 5.0)]);
        let after_second = merged(&after_first, &[record("1", "Anna", 3.0)]);

        let at_once = merged(&empty, &[record("1", "Anna", 8.0)]);

        assert_eq!(after_second["1"].distance, 8.0);
        assert_eq!(after_second, at_once);
    }

    #[test]
    fn merging_keeps_latest_name() {
        let old = merged(&Totals::new(), &[record("1", "Anna", 5.0)]);
        let new = merged(&old, &[record("1", "Anna Svensson", 2.0)]);

        assert_eq!(new["1"].name, "Anna Svensson");
        assert_eq!(new["1"].distance, 7.0);
    }

    #[test]
    fn merging_leaves_absent_athletes_untouched() {
        let old = merged(&Totals::new(), &[record("1", "Anna", 5.0)]);
        let new = merged(&old, &[record("2", "Bert", 4.0)]);

        assert_eq!(new["1"].distance, 5.0);
        assert_eq!(new["2"].distance, 4.0);
    }

    #[test]
    fn load_returns_empty_store_for_missing_file() {
        let path = temp_store_path("missing");
        let totals = load(&path).unwrap();
        assert!(totals.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_store_path("roundtrip");
        let totals = merged(
            &Totals::new(),
            &[record("1", "Anna", 10000.0), record("2", "Bert", 5000.0)],
        );

        save(&path, &totals).unwrap();
        let loaded = load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, totals);
    }

    #[test]
    fn archive_and_reset_clears_live_store() {
        let path = temp_store_path("rollover");
        let totals = merged(&Totals::new(), &[record("1", "Anna", 10000.0)]);
        save(&path, &totals).unwrap();

        let archive_path = archive_and_reset(&path).unwrap().expect("archive created");

        let live = load(&path).unwrap();
        let archived = load(&archive_path).unwrap();
        fs::remove_file(&path).unwrap();
        fs::remove_file(&archive_path).unwrap();

        assert!(live.is_empty());
        assert_eq!(archived, totals);
    }

    #[test]
    fn archive_path_keeps_directory_and_stem() {
        let path = Path::new("/var/data/totals.json");
        assert_eq!(
            archive_path_for(path, "2026-08-03"),
            PathBuf::from("/var/data/totals-2026-08-03.json")
        );
    }
}
