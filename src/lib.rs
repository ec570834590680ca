//! Fan-commentary timeline generation
//!
//! Aligns game-thread comments with official play-by-play logs and produces a
//! fixed-interval timeline annotated with aggregate crowd sentiment and a
//! short rule-derived description of what happened on the floor.

pub mod clock;
pub mod ingest;
pub mod sentiment;
pub mod summary;
pub mod text;
pub mod themes;
pub mod timeline;
pub mod window;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single fan comment from a game thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Raw comment text; rewritten in place by normalization
    pub body: String,
    /// Absolute unix timestamp (seconds) when the comment was posted
    #[serde(alias = "created_utc")]
    pub created_at: i64,
    /// Net approval (upvotes minus downvotes)
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub author: String,
}

/// One entry from the official scoring log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringEvent {
    /// 1-4 regulation, 5+ overtime
    pub period: u32,
    /// Countdown clock within the period, "MM:SS"
    pub clock: String,
    /// Short team code, e.g. LAL/DAL
    pub team: String,
    /// Points scored on this event (0 for non-scoring plays)
    #[serde(default)]
    pub points: u32,
    /// Free-text play description
    #[serde(alias = "desc")]
    pub description: String,
}

impl ScoringEvent {
    /// Whether this event changed the score for an identifiable team
    pub fn is_scoring_play(&self) -> bool {
        self.points > 0 && !self.team.is_empty()
    }
}

/// Aggregate crowd sentiment for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Pos,
    Neg,
    Mixed,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Pos => write!(f, "pos"),
            Sentiment::Neg => write!(f, "neg"),
            Sentiment::Mixed => write!(f, "mixed"),
        }
    }
}

/// One labeled window of the output timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Timestamp label, e.g. "Q1 11:59" or "OT1 03:12"
    pub ts: String,
    /// Rule-derived event description, at most 28 whitespace tokens
    pub event: String,
    pub fan_sentiment: Sentiment,
}

/// The full labeled timeline for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTimeline {
    pub game_id: String,
    /// Entries in ascending window order
    pub entries: Vec<TimelineEntry>,
    /// Up to 5 recurring theme phrases from the whole thread
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,
}

/// Validated per-game input bundle produced at the ingestion boundary
#[derive(Debug, Clone)]
pub struct GameRecords {
    pub game_id: String,
    /// Scheduled tip-off in unix seconds
    pub start_utc: i64,
    pub comments: Vec<Comment>,
    pub events: Vec<ScoringEvent>,
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("Failed to parse {path} for game {game_id} at line {line}: {source}")]
    Ingest {
        game_id: String,
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid game clock '{0}': expected MM:SS")]
    InvalidClock(String),

    #[error("Unknown game: {0} (not in schedule)")]
    UnknownGame(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TimelineError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub window: WindowConfig,
    pub sentiment: SentimentConfig,
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory of per-game comment files (<game_id>.jsonl)
    pub comments_dir: String,
    /// Directory of per-game play-by-play files (<game_id>.jsonl)
    pub pbp_dir: String,
    /// JSON map of game id to tip-off unix seconds
    pub schedule_path: String,
    /// Directory for generated timeline files
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window length in seconds
    pub window_length: u64,
    /// Comments kept per window by score before sampling
    pub top_k_upvoted: usize,
    /// Extra comments sampled from the remainder
    pub sample_extra: usize,
    /// Character cap on concatenated window text
    pub max_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Scores above this label a comment positive
    pub pos_threshold: f64,
    /// Scores below this label a comment negative
    pub neg_threshold: f64,
    /// Fraction trimmed from each end of the sorted scores
    pub trim_fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Single-team points in a window that count as a run
    pub run_points: u32,
    /// Hard cap on description length in whitespace tokens
    pub max_tokens: usize,
    /// Word cap when falling back to a raw play description
    pub fallback_words: usize,
    /// Fan quotes appended per description
    pub max_quotes: usize,
    /// Character cap on a cleaned quote
    pub quote_max_chars: usize,
    /// Word cap on a cleaned quote
    pub quote_max_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                comments_dir: "data/comments".to_string(),
                pbp_dir: "data/pbp".to_string(),
                schedule_path: "data/schedule.json".to_string(),
                output_dir: "data/timelines".to_string(),
            },
            window: WindowConfig {
                window_length: 60,
                top_k_upvoted: 8,
                sample_extra: 12,
                max_chars: 3500,
            },
            sentiment: SentimentConfig {
                pos_threshold: 0.25,
                neg_threshold: -0.25,
                trim_fraction: 0.1,
            },
            summary: SummaryConfig {
                run_points: 8,
                max_tokens: 28,
                fallback_words: 20,
                max_quotes: 2,
                quote_max_chars: 40,
                quote_max_words: 8,
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TimelineError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| TimelineError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TimelineError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
