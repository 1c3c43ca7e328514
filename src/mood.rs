//! Keyword based mood detection for free text chat input.
//!
//! Each mood owns a small set of word fragments. Moods are tested in the
//! fixed order of [`Mood::ALL`] and the first mood with a matching fragment
//! wins, so "happy but studying" resolves to `happy` even though it also
//! contains a focus keyword. Text that matches nothing falls back to `happy`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Mood;

const HAPPY: &[&str] = &["happy", "joy", "great", "excited", "good", "awesome"];
const SAD: &[&str] = &["sad", "upset", "depressed", "down", "lonely", "bad"];
const ENERGETIC: &[&str] = &["energetic", "hyper", "pumped", "workout", "party", "dance"];
const CALM: &[&str] = &["calm", "relax", "peaceful", "chill", "mellow", "quiet"];
const FOCUS: &[&str] = &["focus", "concentrate", "study", "work", "read", "code"];

static PATTERNS: Lazy<Vec<(Mood, Vec<Regex>)>> = Lazy::new(|| {
    Mood::ALL
        .into_iter()
        .map(|mood| {
            let patterns = keywords(mood)
                .iter()
                .map(|k| Regex::new(&regex::escape(k)).expect("keyword pattern is a literal"))
                .collect();
            (mood, patterns)
        })
        .collect()
});

/// Word fragments associated with a mood.
pub fn keywords(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Happy => HAPPY,
        Mood::Sad => SAD,
        Mood::Energetic => ENERGETIC,
        Mood::Calm => CALM,
        Mood::Focus => FOCUS,
    }
}

/// Maps free text to a mood. Never fails.
pub fn classify(text: &str) -> Mood {
    let lower = text.to_lowercase();

    PATTERNS
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(&lower)))
        .map(|(mood, _)| *mood)
        .unwrap_or(Mood::Happy)
}
