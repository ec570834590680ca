//! Word valence tables for the rule-based analyzer
//!
//! Valences are on a -4..4 scale before normalization. The general-purpose
//! entries follow the usual social-media lexicon values; the tail of the
//! table adds the slang that dominates live game threads.

/// (word, valence) pairs, lowercase
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // General positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("celebrate", 2.7),
    ("clean", 1.6),
    ("comeback", 1.8),
    ("confident", 2.2),
    ("dominant", 2.3),
    ("dominating", 2.4),
    ("easy", 1.4),
    ("electric", 2.4),
    ("elite", 2.5),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("fun", 2.3),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("hope", 1.9),
    ("huge", 1.6),
    ("improved", 1.8),
    ("incredible", 2.8),
    ("insane", 1.7),
    ("love", 3.2),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("proud", 2.5),
    ("ridiculous", 1.3),
    ("sweet", 2.0),
    ("unbelievable", 1.6),
    ("unreal", 1.6),
    ("unstoppable", 2.2),
    ("win", 2.8),
    ("winning", 2.4),
    ("wins", 2.7),
    ("wonderful", 2.7),
    ("wow", 2.1),
    ("yes", 1.7),
    // General negative
    ("angry", -2.3),
    ("awful", -2.0),
    ("bad", -2.5),
    ("blew", -1.8),
    ("blown", -1.6),
    ("boring", -1.3),
    ("brutal", -2.1),
    ("collapse", -1.9),
    ("cry", -1.9),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("disgrace", -2.5),
    ("disgusting", -2.4),
    ("dumb", -2.3),
    ("embarrassing", -2.2),
    ("fail", -2.5),
    ("fraud", -2.6),
    ("frustrating", -2.1),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("hurt", -2.0),
    ("lose", -2.5),
    ("loses", -2.4),
    ("losing", -2.4),
    ("loss", -1.3),
    ("lost", -1.4),
    ("mad", -2.2),
    ("mess", -1.5),
    ("miserable", -2.8),
    ("no", -1.2),
    ("pain", -2.3),
    ("painful", -2.4),
    ("pathetic", -2.5),
    ("poor", -1.9),
    ("sad", -2.1),
    ("scared", -1.9),
    ("stupid", -2.4),
    ("terrible", -2.1),
    ("tired", -1.4),
    ("ugly", -2.3),
    ("upset", -1.6),
    ("useless", -1.8),
    ("weak", -1.9),
    ("worried", -1.4),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
    // Game-thread slang
    ("ball", 0.8),
    ("beast", 2.0),
    ("bricking", -1.8),
    ("bricks", -1.5),
    ("buckets", 1.8),
    ("choke", -2.2),
    ("choked", -2.3),
    ("choking", -2.3),
    ("clamps", 1.5),
    ("clowns", -2.0),
    ("clutch", 2.4),
    ("cold", -1.2),
    ("cooked", -1.6),
    ("cooking", 1.9),
    ("dagger", 1.9),
    ("dominate", 2.2),
    ("fire", 1.9),
    ("garbage", -2.2),
    ("goat", 2.6),
    ("heartbreaking", -2.6),
    ("hot", 1.5),
    ("lights-out", 2.3),
    ("locked", 1.4),
    ("momentum", 1.2),
    ("poetry", 2.2),
    ("robbed", -2.0),
    ("rolling", 1.6),
    ("sloppy", -1.8),
    ("soft", -1.6),
    ("trash", -2.2),
    ("turnover", -1.1),
    ("turnovers", -1.3),
    ("washed", -1.9),
];

/// Words that flip the polarity of a nearby lexicon hit
pub(crate) const NEGATIONS: &[&str] = &[
    "ain't", "aint", "barely", "cannot", "can't", "cant", "don't", "dont", "hardly", "isn't",
    "isnt", "never", "no", "none", "nothing", "not", "rarely", "without", "won't", "wont",
];

/// Intensity modifiers and the magnitude they add to a nearby hit
pub(crate) const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293),
    ("completely", 0.293),
    ("extremely", 0.293),
    ("incredibly", 0.293),
    ("really", 0.267),
    ("so", 0.267),
    ("super", 0.267),
    ("totally", 0.267),
    ("very", 0.267),
    ("kinda", -0.267),
    ("kind", -0.267),
    ("slightly", -0.293),
    ("somewhat", -0.267),
];
