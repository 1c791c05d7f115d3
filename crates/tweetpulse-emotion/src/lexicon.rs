//! Word-level emotion lexicon and single-text classifier.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// The eight emotions, in tie-breaking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Fear,
    Anger,
    Surprise,
    Neutral,
    Disgust,
    Shame,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Fear,
        Emotion::Anger,
        Emotion::Surprise,
        Emotion::Neutral,
        Emotion::Disgust,
        Emotion::Shame,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Fear => "fear",
            Emotion::Anger => "anger",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
            Emotion::Disgust => "disgust",
            Emotion::Shame => "shame",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase cue words. Inflected forms are listed explicitly.
pub(crate) const LEXICON: &[(&str, Emotion)] = &[
    // Joy
    ("happy", Emotion::Joy),
    ("happiness", Emotion::Joy),
    ("joy", Emotion::Joy),
    ("love", Emotion::Joy),
    ("loved", Emotion::Joy),
    ("loving", Emotion::Joy),
    ("great", Emotion::Joy),
    ("awesome", Emotion::Joy),
    ("amazing", Emotion::Joy),
    ("excited", Emotion::Joy),
    ("glad", Emotion::Joy),
    ("delighted", Emotion::Joy),
    ("wonderful", Emotion::Joy),
    ("fun", Emotion::Joy),
    ("enjoy", Emotion::Joy),
    ("enjoying", Emotion::Joy),
    ("celebrate", Emotion::Joy),
    ("win", Emotion::Joy),
    // Sadness
    ("sad", Emotion::Sadness),
    ("sadly", Emotion::Sadness),
    ("unhappy", Emotion::Sadness),
    ("cry", Emotion::Sadness),
    ("crying", Emotion::Sadness),
    ("miss", Emotion::Sadness),
    ("missing", Emotion::Sadness),
    ("lonely", Emotion::Sadness),
    ("heartbroken", Emotion::Sadness),
    ("depressed", Emotion::Sadness),
    ("grief", Emotion::Sadness),
    ("loss", Emotion::Sadness),
    ("lost", Emotion::Sadness),
    ("sorrow", Emotion::Sadness),
    // Fear
    ("afraid", Emotion::Fear),
    ("scared", Emotion::Fear),
    ("fear", Emotion::Fear),
    ("terrified", Emotion::Fear),
    ("worried", Emotion::Fear),
    ("worry", Emotion::Fear),
    ("anxious", Emotion::Fear),
    ("panic", Emotion::Fear),
    ("nervous", Emotion::Fear),
    ("dread", Emotion::Fear),
    ("threat", Emotion::Fear),
    // Anger
    ("angry", Emotion::Anger),
    ("anger", Emotion::Anger),
    ("furious", Emotion::Anger),
    ("mad", Emotion::Anger),
    ("hate", Emotion::Anger),
    ("hated", Emotion::Anger),
    ("rage", Emotion::Anger),
    ("annoyed", Emotion::Anger),
    ("outraged", Emotion::Anger),
    ("pissed", Emotion::Anger),
    ("irritated", Emotion::Anger),
    // Surprise
    ("wow", Emotion::Surprise),
    ("surprised", Emotion::Surprise),
    ("surprise", Emotion::Surprise),
    ("shocked", Emotion::Surprise),
    ("shocking", Emotion::Surprise),
    ("unexpected", Emotion::Surprise),
    ("unbelievable", Emotion::Surprise),
    ("astonished", Emotion::Surprise),
    ("omg", Emotion::Surprise),
    // Disgust
    ("disgusting", Emotion::Disgust),
    ("disgusted", Emotion::Disgust),
    ("gross", Emotion::Disgust),
    ("nasty", Emotion::Disgust),
    ("vile", Emotion::Disgust),
    ("revolting", Emotion::Disgust),
    ("sickening", Emotion::Disgust),
    ("yuck", Emotion::Disgust),
    ("awful", Emotion::Disgust),
    // Shame
    ("ashamed", Emotion::Shame),
    ("shame", Emotion::Shame),
    ("shameful", Emotion::Shame),
    ("embarrassed", Emotion::Shame),
    ("embarrassing", Emotion::Shame),
    ("humiliated", Emotion::Shame),
    ("guilty", Emotion::Shame),
    ("regret", Emotion::Shame),
];

static NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-zA-Z]+").expect("valid regex"));

fn lookup(word: &str) -> Option<Emotion> {
    LEXICON
        .iter()
        .find(|&&(cue, _)| cue == word)
        .map(|&(_, emotion)| emotion)
}

/// Per-emotion cue counts for `text`, indexed by [`Emotion::ALL`] order.
pub(crate) fn cue_counts(text: &str) -> [usize; 8] {
    let mut counts = [0usize; 8];
    for word in NON_LETTERS.split(text).filter(|w| !w.is_empty()) {
        if let Some(emotion) = lookup(&word.to_ascii_lowercase()) {
            counts[emotion.index()] += 1;
        }
    }
    counts
}

/// Classify one text by its most frequent emotion cue.
///
/// Ties go to the emotion listed first in [`Emotion::ALL`]. Text without any
/// cue is [`Emotion::Neutral`].
#[must_use]
pub fn classify(text: &str) -> Emotion {
    let counts = cue_counts(text);
    let mut best = Emotion::Neutral;
    let mut best_count = 0;
    for emotion in Emotion::ALL {
        let count = counts[emotion.index()];
        if count > best_count {
            best = emotion;
            best_count = count;
        }
    }
    best
}
