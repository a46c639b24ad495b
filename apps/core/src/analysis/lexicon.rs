//! Word tables shared by the sentiment scorer.
//!
//! Both tables are compiled into the binary and materialized once into
//! lookup structures on first use. They are never mutated afterwards.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// English stopwords removed before polarity scoring.
///
/// Negators ("no", "not") are deliberately absent: they carry polarity.
const STOPWORDS_EN: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "am", "an", "and", "another", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "came", "can", "cannot", "come", "could", "did", "do", "does", "doing", "during",
    "each", "few", "for", "from", "further", "get", "got", "has", "had", "he", "have", "her",
    "here", "him", "himself", "his", "how", "if", "in", "into", "is", "it", "its", "itself",
    "like", "make", "many", "me", "might", "more", "most", "much", "must", "my", "myself",
    "never", "now", "of", "on", "only", "or", "other", "our", "ours", "ourselves", "out", "over",
    "own", "said", "same", "see", "should", "since", "so", "some", "still", "such", "take",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
    "way", "we", "well", "were", "what", "where", "when", "which", "while", "who", "whom",
    "with", "would", "why", "you", "your", "yours", "yourself", "a", "b", "c", "d", "e", "f",
    "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s", "t", "u", "v", "w", "x",
    "y", "z", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "_",
];

/// Polarity lexicon on the AFINN scale (-5 .. +5).
///
/// Focused on vocabulary that shows up in journaling and support conversations.
const POLARITY: &[(&str, i32)] = &[
    // Negative
    ("abandon", -2),
    ("abandoned", -2),
    ("abuse", -3),
    ("abused", -3),
    ("afraid", -2),
    ("agony", -3),
    ("alone", -2),
    ("anger", -3),
    ("angry", -3),
    ("anguish", -3),
    ("annoyed", -2),
    ("anxiety", -2),
    ("anxious", -2),
    ("ashamed", -2),
    ("awful", -3),
    ("bad", -3),
    ("betrayed", -3),
    ("bitter", -2),
    ("broken", -1),
    ("burden", -2),
    ("catastrophic", -4),
    ("cry", -1),
    ("crying", -2),
    ("dead", -3),
    ("defeated", -2),
    ("depressed", -2),
    ("depressing", -2),
    ("depression", -2),
    ("desperate", -3),
    ("despair", -3),
    ("destroyed", -3),
    ("devastated", -2),
    ("die", -3),
    ("disappointed", -2),
    ("disaster", -2),
    ("disgusted", -3),
    ("dread", -2),
    ("exhausted", -2),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
    ("fear", -2),
    ("fearful", -2),
    ("frightened", -2),
    ("frustrated", -2),
    ("guilt", -3),
    ("guilty", -3),
    ("hate", -3),
    ("hated", -3),
    ("hopeless", -2),
    ("horrible", -3),
    ("hurt", -2),
    ("hurts", -2),
    ("idiot", -3),
    ("inadequate", -2),
    ("insecure", -2),
    ("irritated", -3),
    ("kill", -3),
    ("lonely", -2),
    ("loser", -3),
    ("lost", -3),
    ("miserable", -3),
    ("mess", -2),
    ("nervous", -2),
    ("no", -1),
    ("overwhelmed", -2),
    ("pain", -2),
    ("painful", -2),
    ("panic", -3),
    ("pathetic", -2),
    ("regret", -2),
    ("rejected", -1),
    ("sad", -2),
    ("scared", -2),
    ("shame", -2),
    ("sick", -2),
    ("sorrow", -2),
    ("stress", -1),
    ("stressed", -2),
    ("stupid", -2),
    ("suffer", -2),
    ("suffering", -2),
    ("suicide", -2),
    ("terrible", -3),
    ("terrified", -3),
    ("tired", -2),
    ("trapped", -2),
    ("ugly", -3),
    ("unhappy", -2),
    ("upset", -2),
    ("useless", -2),
    ("weak", -2),
    ("worried", -3),
    ("worry", -3),
    ("worse", -3),
    ("worst", -3),
    ("worthless", -2),
    ("wrong", -2),
    // Positive
    ("accomplished", 2),
    ("amazing", 4),
    ("appreciate", 2),
    ("better", 2),
    ("blessed", 3),
    ("calm", 2),
    ("cheerful", 2),
    ("comfort", 2),
    ("confident", 2),
    ("delighted", 3),
    ("enjoy", 2),
    ("enjoyed", 2),
    ("excellent", 3),
    ("excited", 3),
    ("fantastic", 4),
    ("fine", 2),
    ("glad", 3),
    ("good", 3),
    ("grateful", 3),
    ("great", 3),
    ("happy", 3),
    ("helpful", 2),
    ("hope", 2),
    ("hopeful", 2),
    ("improve", 2),
    ("improved", 2),
    ("joy", 3),
    ("kind", 2),
    ("love", 3),
    ("loved", 3),
    ("lucky", 3),
    ("nice", 3),
    ("optimistic", 2),
    ("peaceful", 2),
    ("proud", 2),
    ("relaxed", 2),
    ("relieved", 2),
    ("safe", 1),
    ("satisfied", 2),
    ("strong", 2),
    ("success", 2),
    ("successful", 3),
    ("supported", 2),
    ("thank", 2),
    ("thankful", 2),
    ("thanks", 2),
    ("wonderful", 4),
    ("yes", 1),
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS_EN.iter().copied().collect());

static POLARITY_INDEX: LazyLock<HashMap<&'static str, i32>> =
    LazyLock::new(|| POLARITY.iter().copied().collect());

/// The process-wide stopword set.
pub fn stopwords() -> &'static HashSet<&'static str> {
    &STOPWORDS
}

/// The process-wide polarity lexicon.
pub fn polarity_index() -> &'static HashMap<&'static str, i32> {
    &POLARITY_INDEX
}
