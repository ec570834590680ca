//! Timeline assembly
//!
//! Composes clock alignment, windowing, sentiment aggregation, and event
//! summarization into ordered timeline entries, one per window, per game and
//! across batches of games.

use crate::clock;
use crate::sentiment::SentimentAnalyzer;
use crate::summary::{Summarizer, SummaryContext};
use crate::text::TextNormalizer;
use crate::themes;
use crate::window::{self, ScoreTracker, Window, WindowContext};
use crate::{Config, GameRecords, GameTimeline, TimelineEntry};

/// Builds labeled timelines from validated game records.
///
/// Holds the process-wide analyzer and normalizer; everything it produces is
/// a pure function of the records passed in, so callers may shard work across
/// games or windows freely.
pub struct TimelineBuilder {
    normalizer: TextNormalizer,
    analyzer: SentimentAnalyzer,
    summarizer: Summarizer,
    window_length: u64,
    max_themes: usize,
}

impl TimelineBuilder {
    pub fn new(config: &Config) -> Self {
        TimelineBuilder {
            normalizer: TextNormalizer::new(),
            analyzer: SentimentAnalyzer::from_config(&config.sentiment),
            summarizer: Summarizer::new(config.summary.clone()),
            window_length: config.window.window_length,
            max_themes: themes::DEFAULT_MAX_THEMES,
        }
    }

    /// Label one window with its description and sentiment
    fn label_window(&self, ctx: &WindowContext, window: &Window) -> TimelineEntry {
        let summary_ctx = SummaryContext {
            events: &window.events,
            score_before: &ctx.score_before,
            score_after: &ctx.score_after,
        };
        TimelineEntry {
            ts: format!("{} {}", clock::period_label(ctx.period), ctx.clock_start),
            event: self.summarizer.summarize(&summary_ctx, &window.comments),
            fan_sentiment: self.analyzer.aggregate(&window.comments),
        }
    }

    /// Build the full timeline for one game, ascending by window index.
    ///
    /// No window is dropped: a window holding only comments still gets the
    /// summarizer's terminal fallback, and one holding only events still gets
    /// the aggregator's Mixed default.
    pub fn build_game(&self, records: &GameRecords) -> GameTimeline {
        let comments =
            window::align_comments(&records.comments, records.start_utc, &self.normalizer);
        let events = window::align_events(&records.events);

        log::info!(
            "Game {}: {} comments, {} events aligned",
            records.game_id,
            comments.len(),
            events.len()
        );

        let windows = window::build_windows(&comments, &events, self.window_length);
        let tracker = ScoreTracker::new(&events);

        let entries = windows
            .iter()
            .map(|(&index, win)| {
                let ctx = window::window_context(index, self.window_length, &tracker);
                self.label_window(&ctx, win)
            })
            .collect();

        let themes = themes::extract_themes(
            comments.iter().map(|c| c.comment.body.as_str()),
            self.max_themes,
        );

        GameTimeline {
            game_id: records.game_id.clone(),
            entries,
            themes,
        }
    }

    /// Build timelines for many games, grouped by game id in input order
    pub fn build_batch<'a, I>(&self, games: I) -> Vec<GameTimeline>
    where
        I: IntoIterator<Item = &'a GameRecords>,
    {
        games.into_iter().map(|g| self.build_game(g)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Comment, ScoringEvent, Sentiment};

    fn make_comment(body: &str, created_at: i64, score: i64) -> Comment {
        Comment {
            body: body.to_string(),
            created_at,
            score,
            author: "fan".to_string(),
        }
    }

    fn make_event(period: u32, clock: &str, team: &str, points: u32, desc: &str) -> ScoringEvent {
        ScoringEvent {
            period,
            clock: clock.to_string(),
            team: team.to_string(),
            points,
            description: desc.to_string(),
        }
    }

    fn records(comments: Vec<Comment>, events: Vec<ScoringEvent>) -> GameRecords {
        GameRecords {
            game_id: "2024-01-01-LAL-DAL".to_string(),
            start_utc: 1000,
            comments,
            events,
        }
    }

    #[test]
    fn test_entries_ascend_by_window() {
        let comments = vec![
            make_comment("late comment, great game", 1000 + 500, 3),
            make_comment("early amazing start", 1000 + 5, 8),
            make_comment("middle of nowhere shot", 1000 + 130, 1),
        ];
        let builder = TimelineBuilder::new(&Config::default());
        let timeline = builder.build_game(&records(comments, vec![]));

        let labels: Vec<&str> = timeline.entries.iter().map(|e| e.ts.as_str()).collect();
        assert_eq!(labels, vec!["Q1 11:59", "Q1 09:59", "Q1 03:59"]);
    }

    #[test]
    fn test_window_without_events_gets_fallback() {
        let comments = vec![make_comment("just vibes in here", 1000 + 10, 2)];
        let builder = TimelineBuilder::new(&Config::default());
        let timeline = builder.build_game(&records(comments, vec![]));

        assert_eq!(timeline.entries.len(), 1);
        assert!(timeline.entries[0]
            .event
            .starts_with("Game action continues."));
    }

    #[test]
    fn test_window_without_comments_is_mixed() {
        let events = vec![make_event(1, "11:40", "LAL", 2, "Made layup")];
        let builder = TimelineBuilder::new(&Config::default());
        let timeline = builder.build_game(&records(vec![], events));

        assert_eq!(timeline.entries.len(), 1);
        assert_eq!(timeline.entries[0].fan_sentiment, Sentiment::Mixed);
        assert_eq!(timeline.entries[0].event, "Made layup");
    }

    #[test]
    fn test_timestamp_crosses_periods() {
        let comments = vec![make_comment("second period already", 1000 + 750, 1)];
        let builder = TimelineBuilder::new(&Config::default());
        let timeline = builder.build_game(&records(comments, vec![]));

        // elapsed 750 falls in window 12, which opens at the top of Q2
        assert_eq!(timeline.entries[0].ts, "Q2 11:59");
    }

    #[test]
    fn test_sentiment_flows_through() {
        let comments = vec![
            make_comment("amazing incredible great win", 1000 + 10, 5),
            make_comment("awesome clutch play, love it", 1000 + 20, 4),
            make_comment("what a fantastic stretch", 1000 + 30, 3),
        ];
        let builder = TimelineBuilder::new(&Config::default());
        let timeline = builder.build_game(&records(comments, vec![]));

        assert_eq!(timeline.entries[0].fan_sentiment, Sentiment::Pos);
    }

    #[test]
    fn test_batch_preserves_game_grouping() {
        let builder = TimelineBuilder::new(&Config::default());
        let mut first = records(vec![make_comment("hello there", 1010, 1)], vec![]);
        first.game_id = "game-a".to_string();
        let mut second = records(vec![make_comment("other game", 1020, 1)], vec![]);
        second.game_id = "game-b".to_string();

        let timelines = builder.build_batch([&first, &second]);
        let ids: Vec<&str> = timelines.iter().map(|t| t.game_id.as_str()).collect();
        assert_eq!(ids, vec!["game-a", "game-b"]);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let comments = vec![
            make_comment("amazing start", 1005, 2),
            make_comment("slow stretch", 1075, 1),
        ];
        let events = vec![make_event(1, "11:00", "LAL", 2, "Made layup")];
        let builder = TimelineBuilder::new(&Config::default());

        let first = builder.build_game(&records(comments.clone(), events.clone()));
        let second = builder.build_game(&records(comments, events));

        let render = |t: &GameTimeline| {
            t.entries
                .iter()
                .map(|e| format!("{}|{}|{}", e.ts, e.event, e.fan_sentiment))
                .collect::<Vec<_>>()
        };
        assert_eq!(render(&first), render(&second));
    }
}
