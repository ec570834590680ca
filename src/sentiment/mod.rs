//! Crowd sentiment analysis
//!
//! A lexicon/rule analyzer maps each comment body to a polarity score in
//! [-1, 1]; window aggregation takes a trimmed mean of the per-comment scores
//! so one loud voice cannot swing the label. The analyzer holds no mutable
//! state: build it once at startup and share it read-only.

mod lexicon;

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::window::AlignedComment;
use crate::{Sentiment, SentimentConfig};

/// Tokens of lookback when applying negations and boosters
const LOOKBACK: usize = 3;

/// Polarity scaling for a negated word
const NEGATION_FACTOR: f64 = -0.74;

/// Emphasis added per trailing exclamation mark
const EXCLAMATION_BOOST: f64 = 0.292;

/// Exclamation marks counted before emphasis saturates
const MAX_EXCLAMATIONS: usize = 4;

/// Emphasis added for an all-caps lexicon hit
const CAPS_BOOST: f64 = 0.733;

/// Lexicon/rule-based polarity analyzer
pub struct SentimentAnalyzer {
    lexicon: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
    pos_threshold: f64,
    neg_threshold: f64,
    trim_fraction: f64,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        SentimentAnalyzer {
            lexicon: lexicon::LEXICON.iter().copied().collect(),
            boosters: lexicon::BOOSTERS.iter().copied().collect(),
            negations: lexicon::NEGATIONS.iter().copied().collect(),
            pos_threshold: 0.25,
            neg_threshold: -0.25,
            trim_fraction: 0.1,
        }
    }

    pub fn from_config(config: &SentimentConfig) -> Self {
        let mut analyzer = Self::new();
        analyzer.pos_threshold = config.pos_threshold;
        analyzer.neg_threshold = config.neg_threshold;
        analyzer.trim_fraction = config.trim_fraction;
        analyzer
    }

    /// Polarity of a text in [-1, 1].
    ///
    /// Returns None when the text has no scoreable token at all — the caller
    /// excludes that comment from aggregation instead of counting it as
    /// neutral. Text with tokens but no lexicon hits scores 0.0.
    pub fn score(&self, text: &str) -> Option<f64> {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return None;
        }

        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let mut total = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&valence) = self.lexicon.get(lowered[i].as_str()) else {
                continue;
            };
            let mut v = valence;

            if is_all_caps(token) {
                v += CAPS_BOOST * v.signum();
            }

            // Scan the preceding few tokens for modifiers
            for j in i.saturating_sub(LOOKBACK)..i {
                let prev = lowered[j].as_str();
                if let Some(&boost) = self.boosters.get(prev) {
                    v += boost * v.signum();
                }
                if self.negations.contains(prev) || prev.ends_with("n't") {
                    v *= NEGATION_FACTOR;
                    break;
                }
            }

            total += v;
        }

        // Exclamation emphasis pushes an existing polarity, never creates one
        if total != 0.0 {
            let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
            total += exclamations as f64 * EXCLAMATION_BOOST * total.signum();
        }

        Some(normalize(total))
    }

    /// Classify a single polarity score
    pub fn label(&self, score: f64) -> Sentiment {
        if score > self.pos_threshold {
            Sentiment::Pos
        } else if score < self.neg_threshold {
            Sentiment::Neg
        } else {
            Sentiment::Mixed
        }
    }

    /// Aggregate a window's comments into one label.
    ///
    /// An empty comment set is Mixed by definition; a comment the analyzer
    /// cannot score is excluded rather than failing the window.
    pub fn aggregate(&self, comments: &[AlignedComment]) -> Sentiment {
        let scores: Vec<f64> = comments
            .iter()
            .filter_map(|c| self.score(&c.comment.body))
            .collect();
        self.aggregate_scores(scores)
    }

    /// Trimmed-mean aggregation over raw polarity scores.
    ///
    /// Scores are sorted by absolute magnitude and the extreme tail is
    /// dropped from both ends whenever enough scores remain to trim.
    pub fn aggregate_scores(&self, mut scores: Vec<f64>) -> Sentiment {
        if scores.is_empty() {
            return Sentiment::Mixed;
        }

        scores.sort_by(|a, b| {
            a.abs()
                .partial_cmp(&b.abs())
                .unwrap_or(Ordering::Equal)
        });
        let trim = ((scores.len() as f64 * self.trim_fraction) as usize).max(1);
        let kept: &[f64] = if scores.len() > 2 * trim {
            &scores[trim..scores.len() - trim]
        } else {
            &scores
        };

        let mean = kept.iter().sum::<f64>() / kept.len() as f64;
        self.label(mean)
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Map an unbounded valence sum into [-1, 1]
fn normalize(raw: f64) -> f64 {
    (raw / (raw * raw + 15.0).sqrt()).clamp(-1.0, 1.0)
}

fn is_all_caps(token: &str) -> bool {
    let mut letters = 0;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            letters += 1;
        }
    }
    letters >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Comment;

    fn make_comment(body: &str) -> AlignedComment {
        AlignedComment {
            comment: Comment {
                body: body.to_string(),
                created_at: 0,
                score: 0,
                author: "fan".to_string(),
            },
            elapsed: 0,
        }
    }

    #[test]
    fn test_positive_words_score_positive() {
        let analyzer = SentimentAnalyzer::new();
        let score = analyzer.score("what an amazing clutch shot").unwrap();
        assert!(score > 0.25, "score was {}", score);
    }

    #[test]
    fn test_negative_words_score_negative() {
        let analyzer = SentimentAnalyzer::new();
        let score = analyzer.score("this defense is trash, awful rotation").unwrap();
        assert!(score < -0.25, "score was {}", score);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let analyzer = SentimentAnalyzer::new();
        let plain = analyzer.score("that was good").unwrap();
        let negated = analyzer.score("that was not good").unwrap();
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_booster_amplifies() {
        let analyzer = SentimentAnalyzer::new();
        let plain = analyzer.score("he is good").unwrap();
        let boosted = analyzer.score("he is really good").unwrap();
        assert!(boosted > plain);
    }

    #[test]
    fn test_exclamations_amplify() {
        let analyzer = SentimentAnalyzer::new();
        let plain = analyzer.score("great play").unwrap();
        let excited = analyzer.score("great play!!!").unwrap();
        assert!(excited > plain);
    }

    #[test]
    fn test_caps_amplify() {
        let analyzer = SentimentAnalyzer::new();
        let plain = analyzer.score("clutch").unwrap();
        let shouted = analyzer.score("CLUTCH").unwrap();
        assert!(shouted > plain);
    }

    #[test]
    fn test_empty_text_is_unscoreable() {
        let analyzer = SentimentAnalyzer::new();
        assert!(analyzer.score("").is_none());
        assert!(analyzer.score("   ").is_none());
    }

    #[test]
    fn test_no_hits_scores_neutral() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.score("the ref called a timeout"), Some(0.0));
    }

    #[test]
    fn test_score_stays_bounded() {
        let analyzer = SentimentAnalyzer::new();
        let score = analyzer
            .score("AMAZING INCREDIBLE GOAT CLUTCH PERFECT!!!!")
            .unwrap();
        assert!((-1.0..=1.0).contains(&score));
    }

    #[test]
    fn test_trimmed_mean_drops_extremes() {
        let analyzer = SentimentAnalyzer::new();
        // Sorted by magnitude: [0.50, 0.55, 0.60]; one trimmed from each end
        // leaves [0.55]
        let label = analyzer.aggregate_scores(vec![0.50, 0.60, 0.55]);
        assert_eq!(label, Sentiment::Pos);
    }

    #[test]
    fn test_outlier_resistance() {
        let analyzer = SentimentAnalyzer::new();
        // One furious comment among mild ones should not flip the label
        let label = analyzer.aggregate_scores(vec![0.1, 0.05, -0.95]);
        assert_eq!(label, Sentiment::Mixed);
    }

    #[test]
    fn test_small_sets_kept_whole() {
        let analyzer = SentimentAnalyzer::new();
        // n = 2 is not more than 2 * trim, so nothing is trimmed
        let label = analyzer.aggregate_scores(vec![0.8, 0.7]);
        assert_eq!(label, Sentiment::Pos);
    }

    #[test]
    fn test_all_positive_window() {
        let analyzer = SentimentAnalyzer::new();
        let comments = vec![
            make_comment("amazing shot, love it"),
            make_comment("this team is so clutch"),
            make_comment("what a great comeback, incredible"),
            make_comment("awesome defense tonight"),
        ];
        assert_eq!(analyzer.aggregate(&comments), Sentiment::Pos);
    }

    #[test]
    fn test_all_negative_window() {
        let analyzer = SentimentAnalyzer::new();
        let comments = vec![
            make_comment("terrible rotation, awful"),
            make_comment("we are losing to these clowns"),
            make_comment("pathetic effort, embarrassing"),
            make_comment("this is a disaster"),
        ];
        assert_eq!(analyzer.aggregate(&comments), Sentiment::Neg);
    }

    #[test]
    fn test_empty_window_is_mixed() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(analyzer.aggregate(&[]), Sentiment::Mixed);
    }

    #[test]
    fn test_unscoreable_comments_excluded() {
        let analyzer = SentimentAnalyzer::new();
        // The empty body cannot be scored; the remaining comment decides
        let comments = vec![make_comment(""), make_comment("absolutely amazing win")];
        assert_eq!(analyzer.aggregate(&comments), Sentiment::Pos);
    }
}
