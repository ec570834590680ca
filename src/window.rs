//! Time windowing
//!
//! Buckets aligned comments and scoring events into fixed-length windows
//! keyed by elapsed seconds since tip-off, and derives the display metadata
//! (period, clock, running score) each window needs downstream.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use crate::clock::{self, PERIOD_SECONDS};
use crate::text::{self, TextNormalizer};
use crate::{Comment, ScoringEvent};

/// Default window length in seconds
pub const DEFAULT_WINDOW_SECONDS: u64 = 60;

/// A comment with its derived offset from tip-off
#[derive(Debug, Clone)]
pub struct AlignedComment {
    pub comment: Comment,
    /// Seconds since tip-off, clamped at 0; derived once, never recomputed
    pub elapsed: u64,
}

/// A scoring event with its derived offset from tip-off
#[derive(Debug, Clone)]
pub struct AlignedEvent {
    pub event: ScoringEvent,
    pub elapsed: u64,
}

/// One fixed-length bucket of comments and events.
///
/// Members keep their input insertion order; the window index lives in the
/// map key. Windows are read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Window {
    pub comments: Vec<AlignedComment>,
    pub events: Vec<AlignedEvent>,
}

impl Window {
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.events.is_empty()
    }
}

/// Normalize comment bodies and compute elapsed offsets.
///
/// Comments whose body is empty after cleaning carry no usable signal and are
/// skipped. Negative offsets (pre-game chatter) clamp to 0.
pub fn align_comments(
    comments: &[Comment],
    start_utc: i64,
    normalizer: &TextNormalizer,
) -> Vec<AlignedComment> {
    let mut aligned = Vec::with_capacity(comments.len());
    for comment in comments {
        let body = normalizer.clean(&comment.body);
        if body.is_empty() {
            log::debug!(
                "Skipping empty comment from {} at {}",
                comment.author,
                comment.created_at
            );
            continue;
        }
        let elapsed = (comment.created_at - start_utc).max(0) as u64;
        let mut comment = comment.clone();
        comment.body = body;
        aligned.push(AlignedComment { comment, elapsed });
    }
    aligned
}

/// Compute elapsed offsets for scoring events from their logged clock.
///
/// An event with an unparsable clock cannot be placed on the timeline and is
/// skipped; one bad record never aborts the game.
pub fn align_events(events: &[ScoringEvent]) -> Vec<AlignedEvent> {
    let mut aligned = Vec::with_capacity(events.len());
    for event in events {
        match clock::elapsed_from_clock(event.period, &event.clock) {
            Ok(elapsed) => aligned.push(AlignedEvent {
                event: event.clone(),
                elapsed,
            }),
            Err(e) => log::warn!("Skipping event with bad clock: {}", e),
        }
    }
    aligned
}

/// Bucket aligned records into fixed-length windows.
///
/// Membership is a pure function of elapsed time and window length, so
/// rebuilding from identical input yields identical windows. Windows are
/// created lazily on first member and members keep insertion order.
pub fn build_windows(
    comments: &[AlignedComment],
    events: &[AlignedEvent],
    window_length: u64,
) -> BTreeMap<u64, Window> {
    let mut windows: BTreeMap<u64, Window> = BTreeMap::new();

    for comment in comments {
        let index = comment.elapsed / window_length;
        windows
            .entry(index)
            .or_default()
            .comments
            .push(comment.clone());
    }

    for event in events {
        let index = event.elapsed / window_length;
        windows.entry(index).or_default().events.push(event.clone());
    }

    windows
}

/// Per-team cumulative score at a boundary
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scoreline {
    /// (team code, total points), teams in first-appearance order
    pub totals: Vec<(String, u32)>,
}

impl Scoreline {
    /// The team currently ahead, or None when tied or scoreless
    pub fn leader(&self) -> Option<&str> {
        let best = self.totals.iter().map(|(_, p)| *p).max()?;
        let mut at_best = self.totals.iter().filter(|(_, p)| *p == best);
        let leader = at_best.next()?;
        if at_best.next().is_some() {
            return None;
        }
        Some(&leader.0)
    }

    /// Compact score string, e.g. "54-50"; "0-0" when nothing has scored
    pub fn display(&self) -> String {
        if self.totals.is_empty() {
            return "0-0".to_string();
        }
        self.totals
            .iter()
            .map(|(_, p)| p.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Running team totals over the event log, queried at window boundaries.
///
/// Works on a sorted copy of the scoring plays; the caller's slices are never
/// reordered.
#[derive(Debug, Clone)]
pub struct ScoreTracker {
    /// (elapsed, team index, points), ascending by elapsed
    plays: Vec<(u64, usize, u32)>,
    /// Team codes in first-appearance order
    teams: Vec<String>,
}

impl ScoreTracker {
    pub fn new(events: &[AlignedEvent]) -> Self {
        let mut teams: Vec<String> = Vec::new();
        let mut plays = Vec::new();
        for aligned in events {
            if !aligned.event.is_scoring_play() {
                continue;
            }
            let team_idx = match teams.iter().position(|t| t == &aligned.event.team) {
                Some(i) => i,
                None => {
                    teams.push(aligned.event.team.clone());
                    teams.len() - 1
                }
            };
            plays.push((aligned.elapsed, team_idx, aligned.event.points));
        }
        // Stable sort keeps log order for plays at the same elapsed value
        plays.sort_by_key(|p| p.0);
        ScoreTracker { plays, teams }
    }

    /// Totals for scoring plays strictly before `elapsed`
    pub fn score_before(&self, elapsed: u64) -> Scoreline {
        self.accumulate(|play_elapsed| play_elapsed < elapsed)
    }

    /// Totals for scoring plays at or before `elapsed`
    pub fn score_through(&self, elapsed: u64) -> Scoreline {
        self.accumulate(|play_elapsed| play_elapsed <= elapsed)
    }

    fn accumulate<F: Fn(u64) -> bool>(&self, include: F) -> Scoreline {
        let mut points = vec![0u32; self.teams.len()];
        for &(play_elapsed, team_idx, pts) in &self.plays {
            if !include(play_elapsed) {
                break;
            }
            points[team_idx] += pts;
        }
        Scoreline {
            totals: self
                .teams
                .iter()
                .cloned()
                .zip(points)
                .collect(),
        }
    }
}

/// Display metadata for one window, derived purely from its index
#[derive(Debug, Clone)]
pub struct WindowContext {
    pub index: u64,
    pub period: u32,
    /// Countdown clock at the window's opening second
    pub clock_start: String,
    /// Running score entering the window
    pub score_before: Scoreline,
    /// Running score leaving the window
    pub score_after: Scoreline,
}

/// Derive a window's display metadata.
///
/// The clock uses the same countdown formula as the clock mapper, so a label
/// produced here never disagrees with one produced for a raw timestamp at the
/// same instant.
pub fn window_context(index: u64, window_length: u64, tracker: &ScoreTracker) -> WindowContext {
    let start_sec = index * window_length;
    let end_sec = start_sec + window_length - 1;
    let period = (start_sec / PERIOD_SECONDS as u64) as u32 + 1;
    let secs_into_period = (start_sec % PERIOD_SECONDS as u64) as i64;

    WindowContext {
        index,
        period,
        clock_start: clock::countdown_at(secs_into_period),
        score_before: tracker.score_before(start_sec),
        score_after: tracker.score_through(end_sec),
    }
}

/// Select a window's comments for display: top-K by score plus a random
/// sample of the rest, bullet-joined and character-capped.
pub fn select_comments<R: Rng>(
    window: &Window,
    top_k: usize,
    sample_extra: usize,
    max_chars: usize,
    rng: &mut R,
) -> String {
    let mut ranked: Vec<&AlignedComment> = window.comments.iter().collect();
    ranked.sort_by(|a, b| b.comment.score.cmp(&a.comment.score));

    let top_k = top_k.min(ranked.len());
    let (top, rest) = ranked.split_at(top_k);

    let mut chosen: Vec<&AlignedComment> = top.to_vec();
    let mut rest: Vec<&AlignedComment> = rest.to_vec();
    rest.shuffle(rng);
    chosen.extend(rest.into_iter().take(sample_extra));

    let joined = chosen
        .iter()
        .map(|c| format!("• {}", c.comment.body))
        .collect::<Vec<_>>()
        .join("\n");
    text::truncate_chars(&joined, max_chars)
}
