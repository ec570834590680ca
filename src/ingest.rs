//! Record ingestion
//!
//! Loads already-collected per-game record files from disk: JSONL comment
//! threads, JSONL play-by-play logs, and a JSON schedule of tip-off times.
//! One malformed line fails the whole game with an error naming the file and
//! line; other games in a batch are unaffected. Fetching from any network
//! source lives outside this crate.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::clock;
use crate::{Comment, DataConfig, GameRecords, Result, ScoringEvent, TimelineError};

/// Schedule of tip-off times keyed by game id
pub type Schedule = HashMap<String, i64>;

/// Load the JSON schedule map of game id to tip-off unix seconds
pub fn load_schedule<P: AsRef<Path>>(path: P) -> Result<Schedule> {
    let file = File::open(path.as_ref())?;
    let schedule: Schedule = serde_json::from_reader(BufReader::new(file))?;
    Ok(schedule)
}

/// Load a game's comment thread from JSONL
pub fn load_comments<P: AsRef<Path>>(path: P, game_id: &str) -> Result<Vec<Comment>> {
    read_jsonl(path.as_ref(), game_id)
}

/// Load a game's play-by-play log from JSONL
pub fn load_events<P: AsRef<Path>>(path: P, game_id: &str) -> Result<Vec<ScoringEvent>> {
    read_jsonl(path.as_ref(), game_id)
}

/// Load and validate the full record bundle for one game
pub fn load_game(game_id: &str, data: &DataConfig, schedule: &Schedule) -> Result<GameRecords> {
    let start_utc = *schedule
        .get(game_id)
        .ok_or_else(|| TimelineError::UnknownGame(game_id.to_string()))?;

    let comments_path = Path::new(&data.comments_dir).join(format!("{}.jsonl", game_id));
    let pbp_path = Path::new(&data.pbp_dir).join(format!("{}.jsonl", game_id));

    let comments = load_comments(&comments_path, game_id)?;
    let events = load_events(&pbp_path, game_id)?;
    log::info!(
        "Loaded {} comments and {} events for game {}",
        comments.len(),
        events.len(),
        game_id
    );

    Ok(GameRecords {
        game_id: game_id.to_string(),
        start_utc,
        comments,
        events,
    })
}

/// Path of the timeline output file for one game
pub fn timeline_path(output_dir: &str, game_id: &str) -> PathBuf {
    Path::new(output_dir).join(format!("{}.jsonl", game_id))
}

fn read_jsonl<T: DeserializeOwned>(path: &Path, game_id: &str) -> Result<Vec<T>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    parse_jsonl(reader, path, game_id)
}

/// Parse line-delimited JSON records; blank lines are skipped, a malformed
/// line is fatal for this game and reports its exact location
fn parse_jsonl<T: DeserializeOwned, R: BufRead>(
    reader: R,
    path: &Path,
    game_id: &str,
) -> Result<Vec<T>> {
    let mut records = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| TimelineError::Ingest {
            game_id: game_id.to_string(),
            path: path.display().to_string(),
            line: lineno + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Convert the league feed's clock format ("PT11M40.00S") to "MM:SS".
///
/// Anything unrecognizable maps to "12:00", the top of a period, which is
/// what the feed itself emits for period boundaries.
pub fn parse_nba_clock(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix("PT") {
        let rest = rest.trim_end_matches('S');
        if let Some((minutes, seconds)) = rest.split_once('M') {
            if let (Ok(m), Ok(s)) = (minutes.parse::<f64>(), seconds.parse::<f64>()) {
                return format!("{:02}:{:02}", m as u32, s as u32);
            }
        }
    }
    "12:00".to_string()
}

/// Points scored on a play, recovered from its description
pub fn points_from_description(description: &str) -> u32 {
    if !description.contains("Made") {
        return 0;
    }
    if description.contains("3PT") {
        3
    } else if description.contains("2PT") {
        2
    } else if description.contains("Free Throw") {
        1
    } else if !description.contains("PT") {
        // Made shot with no point marker: a two by default
        2
    } else {
        0
    }
}

/// A single-team scoring burst found in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigRun {
    pub period: u32,
    /// Countdown clock where the run begins
    pub clock: String,
    pub team: String,
    pub points: u32,
}

/// Scan the log for single-team runs of `min_points` or more inside a
/// rolling window of countdown seconds, within one period.
pub fn detect_big_runs(
    events: &[ScoringEvent],
    window_secs: u32,
    min_points: u32,
) -> Vec<BigRun> {
    let mut parsed: Vec<(u32, u32, &str, u32)> = Vec::new();
    for event in events {
        match clock::parse_mmss(&event.clock) {
            Ok(secs) => parsed.push((event.period, secs, event.team.as_str(), event.points)),
            Err(e) => log::warn!("Skipping event in run scan: {}", e),
        }
    }

    let mut runs: Vec<BigRun> = Vec::new();
    for (i, &(period, anchor_secs, _, _)) in parsed.iter().enumerate() {
        let mut totals: HashMap<&str, u32> = HashMap::new();
        for &(p, secs, team, points) in &parsed[i..] {
            // The clock counts down, so later events have smaller values
            if p != period || secs + window_secs < anchor_secs {
                break;
            }
            if !team.is_empty() {
                *totals.entry(team).or_insert(0) += points;
            }
        }
        for (team, points) in totals {
            if points >= min_points
                && !runs
                    .iter()
                    .any(|r| r.period == period && r.team == team)
            {
                runs.push(BigRun {
                    period,
                    clock: clock::format_mmss(anchor_secs),
                    team: team.to_string(),
                    points,
                });
            }
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn make_event(period: u32, clock: &str, team: &str, points: u32) -> ScoringEvent {
        ScoringEvent {
            period,
            clock: clock.to_string(),
            team: team.to_string(),
            points,
            description: "Made shot".to_string(),
        }
    }

    #[test]
    fn test_parse_jsonl_comments() {
        let data = concat!(
            r#"{"body": "lets go", "created_utc": 1700000000, "score": 4, "author": "a"}"#,
            "\n\n",
            r#"{"body": "defense!", "created_at": 1700000060, "score": 2, "author": "b"}"#,
            "\n",
        );
        let comments: Vec<Comment> =
            parse_jsonl(Cursor::new(data), Path::new("x.jsonl"), "g1").unwrap();

        // Both the upstream field name and our own are accepted
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].created_at, 1700000000);
        assert_eq!(comments[1].body, "defense!");
    }

    #[test]
    fn test_parse_jsonl_reports_location() {
        let data = "{\"body\": \"ok\", \"created_utc\": 1}\nnot json\n";
        let result: Result<Vec<Comment>> =
            parse_jsonl(Cursor::new(data), Path::new("bad.jsonl"), "g1");

        match result {
            Err(TimelineError::Ingest { game_id, path, line, .. }) => {
                assert_eq!(game_id, "g1");
                assert_eq!(path, "bad.jsonl");
                assert_eq!(line, 2);
            }
            other => panic!("expected ingest error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_parse_jsonl_events_accept_desc_alias() {
        let data = r#"{"period": 1, "clock": "11:40", "team": "LAL", "points": 2, "desc": "Made layup"}"#;
        let events: Vec<ScoringEvent> =
            parse_jsonl(Cursor::new(data), Path::new("x.jsonl"), "g1").unwrap();
        assert_eq!(events[0].description, "Made layup");
    }

    #[test]
    fn test_parse_nba_clock() {
        assert_eq!(parse_nba_clock("PT11M40.00S"), "11:40");
        assert_eq!(parse_nba_clock("PT03M07.00S"), "03:07");
        assert_eq!(parse_nba_clock("PT12M00.00S"), "12:00");
        assert_eq!(parse_nba_clock(""), "12:00");
        assert_eq!(parse_nba_clock("garbage"), "12:00");
    }

    #[test]
    fn test_points_from_description() {
        assert_eq!(points_from_description("Jones 3PT Jump Shot Made"), 3);
        assert_eq!(points_from_description("Smith 2PT Driving Layup Made"), 2);
        assert_eq!(points_from_description("Free Throw 2 of 2 Made"), 1);
        assert_eq!(points_from_description("Hook Shot Made"), 2);
        assert_eq!(points_from_description("3PT Jump Shot Missed"), 0);
        assert_eq!(points_from_description("Defensive Rebound"), 0);
    }

    #[test]
    fn test_detect_big_runs() {
        let events = vec![
            make_event(1, "10:00", "LAL", 3),
            make_event(1, "09:20", "LAL", 2),
            make_event(1, "08:45", "LAL", 3),
            make_event(2, "11:00", "DAL", 2),
        ];
        let runs = detect_big_runs(&events, 120, 8);

        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].team, "LAL");
        assert_eq!(runs[0].points, 8);
        assert_eq!(runs[0].period, 1);
        assert_eq!(runs[0].clock, "10:00");
    }

    #[test]
    fn test_runs_do_not_cross_periods() {
        let events = vec![
            make_event(1, "00:30", "DAL", 5),
            make_event(2, "11:50", "DAL", 5),
        ];
        let runs = detect_big_runs(&events, 120, 8);
        assert!(runs.is_empty());
    }

    #[test]
    fn test_runs_respect_window() {
        // 5 points early, 5 points four minutes later: never 8 in any
        // 2-minute stretch
        let events = vec![
            make_event(1, "11:00", "LAL", 5),
            make_event(1, "07:00", "LAL", 5),
        ];
        let runs = detect_big_runs(&events, 120, 8);
        assert!(runs.is_empty());
    }
}
