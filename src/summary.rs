//! Rule-based event summarization
//!
//! A fixed-priority table of detectors turns a window's scoring events into a
//! short description. Detectors are pure functions evaluated in order; the
//! first match wins, and a terminal fallback guarantees a non-empty result.
//! The highest-scoring fan comments are quoted after the fact, and the whole
//! description is hard-capped at a fixed token count.

use crate::window::{AlignedComment, AlignedEvent, Scoreline};
use crate::SummaryConfig;

/// Keywords that mark a play worth calling out on their own
const HIGHLIGHT_KEYWORDS: &[&str] = &[
    "block",
    "dunk",
    "steal",
    "alley-oop",
    "behind-the-back",
    "no-look",
];

/// Description used when a window has no events at all
const QUIET_WINDOW: &str = "Game action continues.";

/// Everything a detector may look at for one window
pub struct SummaryContext<'a> {
    pub events: &'a [AlignedEvent],
    pub score_before: &'a Scoreline,
    pub score_after: &'a Scoreline,
}

type Detector = fn(&SummaryContext, &SummaryConfig) -> Option<String>;

/// Priority-ordered description engine
pub struct Summarizer {
    config: SummaryConfig,
    rules: Vec<(&'static str, Detector)>,
}

impl Summarizer {
    pub fn new(config: SummaryConfig) -> Self {
        Summarizer {
            config,
            rules: vec![
                ("scoring-run", detect_scoring_run),
                ("lead-change", detect_lead_change),
                ("highlight", detect_highlight),
            ],
        }
    }

    /// Describe one window in at most `max_tokens` whitespace tokens.
    ///
    /// Every branch terminates in a non-empty string; quotes may be cut by
    /// the final truncation.
    pub fn summarize(&self, ctx: &SummaryContext, comments: &[AlignedComment]) -> String {
        let mut description = None;
        for (name, detect) in &self.rules {
            if let Some(matched) = detect(ctx, &self.config) {
                log::debug!("Window matched {} rule", name);
                description = Some(matched);
                break;
            }
        }
        let mut description =
            description.unwrap_or_else(|| fallback(ctx.events, self.config.fallback_words));

        self.append_quotes(&mut description, comments);
        truncate_tokens(&description, self.config.max_tokens)
    }

    /// Append up to `max_quotes` short fan quotes, best-scored first
    fn append_quotes(&self, description: &mut String, comments: &[AlignedComment]) {
        let mut ranked: Vec<&AlignedComment> = comments.iter().collect();
        ranked.sort_by(|a, b| b.comment.score.cmp(&a.comment.score));

        let mut added = 0;
        for comment in ranked {
            if added >= self.config.max_quotes {
                break;
            }
            let quote = clean_quote(&comment.comment.body);
            if quote.is_empty()
                || quote.chars().count() > self.config.quote_max_chars
                || quote.split_whitespace().count() > self.config.quote_max_words
            {
                continue;
            }
            description.push_str(" \"");
            description.push_str(&quote);
            description.push('"');
            added += 1;
        }
    }
}

/// A single team scoring `run_points` or more in one window
fn detect_scoring_run(ctx: &SummaryContext, config: &SummaryConfig) -> Option<String> {
    let mut totals: Vec<(&str, u32)> = Vec::new();
    for aligned in ctx.events {
        if !aligned.event.is_scoring_play() {
            continue;
        }
        match totals.iter_mut().find(|(team, _)| *team == aligned.event.team) {
            Some((_, points)) => *points += aligned.event.points,
            None => totals.push((aligned.event.team.as_str(), aligned.event.points)),
        }
    }

    totals
        .iter()
        .find(|(_, points)| *points >= config.run_points)
        .map(|(team, points)| {
            // Individual attribution is not in the event log, so the actor
            // stays a generic role word rather than an invented name.
            format!("{} {}-0 run as star scores {} straight.", team, points, points)
        })
}

/// The leading team changing between the window's entry and exit scores
fn detect_lead_change(ctx: &SummaryContext, _config: &SummaryConfig) -> Option<String> {
    let after = ctx.score_after.leader()?;
    if ctx.score_before.leader() == Some(after) {
        return None;
    }

    // The play that put them ahead: their last scoring play of the window
    let play = ctx
        .events
        .iter()
        .rev()
        .find(|e| e.event.team == after && e.event.is_scoring_play())?;
    Some(format!(
        "{} retake the lead on player {}.",
        after,
        shot_type(&play.event.description)
    ))
}

/// Any event description carrying a highlight keyword
fn detect_highlight(ctx: &SummaryContext, _config: &SummaryConfig) -> Option<String> {
    for aligned in ctx.events {
        let description = aligned.event.description.to_lowercase();
        for keyword in HIGHLIGHT_KEYWORDS {
            if description.contains(keyword) {
                return Some(format!("player emphatic {} fires up fans.", keyword));
            }
        }
    }
    None
}

/// Shot type inferred from the logged play description
fn shot_type(description: &str) -> &'static str {
    if description.contains("3PT") {
        "three-pointer"
    } else if description.contains("Free Throw") {
        "free throw"
    } else if description.contains("Dunk") {
        "dunk"
    } else if description.contains("Layup") {
        "layup"
    } else {
        "shot"
    }
}

/// Terminal default: the last play description, else a fixed phrase
fn fallback(events: &[AlignedEvent], max_words: usize) -> String {
    if let Some(last) = events.last() {
        if !last.event.description.is_empty() {
            let description = capitalize(&last.event.description);
            let words: Vec<&str> = description.split_whitespace().collect();
            if words.len() > max_words {
                return format!("{}...", words[..max_words].join(" "));
            }
            return description;
        }
    }
    QUIET_WINDOW.to_string()
}

/// First character uppercased, the rest lowercased
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Strip characters that are not word-like, keeping spaces, hyphens, and
/// apostrophes
fn clean_quote(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '\'' || *c == '_')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Hard cap on whitespace tokens, with an ellipsis glued to the last one
pub fn truncate_tokens(text: &str, max_tokens: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > max_tokens {
        format!("{}...", words[..max_tokens].join(" "))
    } else {
        text.to_string()
    }
}
