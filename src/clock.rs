//! Game clock conversion
//!
//! Maps absolute unix time to the period/countdown clock representation and
//! back. The countdown label is deliberately one tick behind nominal (an
//! offset of 0 renders "11:59", not "12:00") to stay byte-compatible with the
//! historical timeline data this pipeline was built against.

use crate::{Result, TimelineError};

/// Seconds in one regulation period (12 minutes)
pub const PERIOD_SECONDS: i64 = 720;

/// Periods in regulation play
pub const REGULATION_PERIODS: u32 = 4;

/// Where an absolute-time offset falls relative to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Before tip-off
    PreGame,
    /// Regulation period 1-4
    Regulation(u32),
    /// Overtime period, 1-based
    Overtime(u32),
}

/// Classify an offset from tip-off. There is no ceiling on overtime periods;
/// every additional 720 seconds opens the next one.
pub fn phase(delta: i64) -> GamePhase {
    if delta < 0 {
        return GamePhase::PreGame;
    }
    let period = (delta / PERIOD_SECONDS) as u32 + 1;
    if period > REGULATION_PERIODS {
        GamePhase::Overtime(period - REGULATION_PERIODS)
    } else {
        GamePhase::Regulation(period)
    }
}

/// Period label: "Q1".."Q4", then "OT1", "OT2", ...
pub fn period_label(period: u32) -> String {
    if period > REGULATION_PERIODS {
        format!("OT{}", period - REGULATION_PERIODS)
    } else {
        format!("Q{}", period)
    }
}

/// Countdown clock string for a number of seconds into a period.
///
/// One tick behind nominal: 0 seconds in renders "11:59". Every component
/// that prints a clock for an instant must go through this function so labels
/// never disagree between call sites.
pub fn countdown_at(secs_into_period: i64) -> String {
    let mm = (11 - secs_into_period / 60).max(0);
    let ss = (59 - secs_into_period % 60).max(0);
    format!("{:02}:{:02}", mm, ss)
}

/// Convert an absolute timestamp to a game clock label.
///
/// Pre-game timestamps fall back to a real-time minute bin ("MM:00–MM:59")
/// rather than a game clock.
pub fn game_clock_label(timestamp: i64, event_start: i64) -> String {
    let delta = timestamp - event_start;
    if delta < 0 {
        let mm = delta.div_euclid(60).max(0);
        return format!("{:02}:00–{:02}:59", mm, mm);
    }

    let period = (delta / PERIOD_SECONDS) as u32 + 1;
    let secs_into_period = delta % PERIOD_SECONDS;
    format!("{} {}", period_label(period), countdown_at(secs_into_period))
}

/// Parse a "MM:SS" countdown clock into seconds remaining
pub fn parse_mmss(clock: &str) -> Result<u32> {
    let (m, s) = clock
        .split_once(':')
        .ok_or_else(|| TimelineError::InvalidClock(clock.to_string()))?;
    let minutes: u32 = m
        .trim()
        .parse()
        .map_err(|_| TimelineError::InvalidClock(clock.to_string()))?;
    let seconds: u32 = s
        .trim()
        .parse()
        .map_err(|_| TimelineError::InvalidClock(clock.to_string()))?;
    if seconds >= 60 {
        return Err(TimelineError::InvalidClock(clock.to_string()));
    }
    Ok(minutes * 60 + seconds)
}

/// Format seconds as "MM:SS"
pub fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Elapsed seconds since tip-off for a logged (period, countdown) pair.
///
/// Approximate by construction: the logged countdown carries no sub-period
/// precision, so two events at the same clock reading map to the same
/// elapsed value. Strictly increasing across periods, overtime included.
pub fn elapsed_from_clock(period: u32, clock: &str) -> Result<u64> {
    let clock_secs = parse_mmss(clock)? as i64;
    let elapsed = (period as i64 - 1) * PERIOD_SECONDS + (PERIOD_SECONDS - clock_secs);
    Ok(elapsed.max(0) as u64)
}
