use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::data::{LrclibCandidate, VerificationOutcome};

/// Confidence above which a candidate is considered the same song
pub const MATCH_THRESHOLD: f64 = 0.8;

lazy_static! {
    /// Bracketed time tags like [00:12.34] (or any bracketed annotation)
    static ref BRACKET_TAG: Regex = Regex::new(r"\[[^\]]*\]").unwrap();
}

/// Normalize a lyric transcript for comparison
///
/// Lowercases, drops bracketed time tags, folds newlines into spaces,
/// strips punctuation and collapses repeated whitespace.
pub fn normalize_text(text: &str) -> String {
    let stripped = BRACKET_TAG.replace_all(text, "");

    let mut result = String::with_capacity(stripped.len());
    let mut last_was_space = true; // trims leading whitespace
    for c in stripped.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else if c.is_alphanumeric() || c == '_' {
            for lower in c.to_lowercase() {
                result.push(lower);
            }
            last_was_space = false;
        }
        // everything else is punctuation and gets dropped
    }

    if result.ends_with(' ') {
        result.pop();
    }
    result
}

/// Similarity between two transcripts in [0, 1]
///
/// 1 - levenshtein / max(len), computed over the normalized texts.
/// Either input empty scores 0 without computing a distance; both
/// normalized texts empty also scores 0, since a blank transcript
/// verifies nothing. The result is clamped to [0, 1].
pub fn lyrics_confidence(local: &str, remote: &str) -> f64 {
    if local.is_empty() || remote.is_empty() {
        return 0.0;
    }

    let normalized_local = normalize_text(local);
    let normalized_remote = normalize_text(remote);

    let max_length = normalized_local
        .chars()
        .count()
        .max(normalized_remote.chars().count());
    if max_length == 0 {
        return 0.0;
    }

    let distance = strsim::levenshtein(&normalized_local, &normalized_remote);
    let confidence = 1.0 - distance as f64 / max_length as f64;
    confidence.clamp(0.0, 1.0)
}

/// Score a local transcript against a remote candidate
pub fn compare_lyrics(local: &str, candidate: &LrclibCandidate) -> VerificationOutcome {
    let confidence = lyrics_confidence(local, candidate.plain_lyrics_text());
    debug!(
        "Scored candidate {} ('{}'): confidence {:.3}",
        candidate.id, candidate.track_name, confidence
    );

    VerificationOutcome {
        is_match: confidence > MATCH_THRESHOLD,
        confidence,
        lrclib_id: Some(candidate.id),
        lyrics: candidate.plain_lyrics.clone(),
        synced_lyrics: candidate.synced_lyrics.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(plain: &str) -> LrclibCandidate {
        LrclibCandidate {
            id: 1,
            track_name: "Song".to_string(),
            artist_name: "Wookiefoot".to_string(),
            album_name: "Album".to_string(),
            duration: 200.0,
            instrumental: false,
            plain_lyrics: Some(plain.to_string()),
            synced_lyrics: None,
        }
    }

    #[test]
    fn test_normalize_strips_tags_punctuation_and_case() {
        assert_eq!(
            normalize_text("[00:12.34] Hello,\nWORLD!  it's me"),
            "hello world its me"
        );
    }

    #[test]
    fn test_identical_strings_score_one() {
        let texts = ["Hello world", "a", "many\nlines\nof\nlyrics here"];
        for text in texts {
            let confidence = lyrics_confidence(text, text);
            assert_eq!(confidence, 1.0, "failed for {:?}", text);
        }
    }

    #[test]
    fn test_empty_side_scores_zero() {
        assert_eq!(lyrics_confidence("", "something"), 0.0);
        assert_eq!(lyrics_confidence("something", ""), 0.0);
        assert_eq!(lyrics_confidence("", ""), 0.0);
    }

    #[test]
    fn test_both_normalize_to_empty_scores_zero() {
        // Non-empty inputs that normalize away completely
        assert_eq!(lyrics_confidence("...", "!!!"), 0.0);
    }

    #[test]
    fn test_punctuation_and_case_insensitive_match() {
        let outcome = compare_lyrics("Hello world", &candidate("hello, world!"));
        assert_eq!(outcome.confidence, 1.0);
        assert!(outcome.is_match);
        assert_eq!(outcome.lrclib_id, Some(1));
    }

    #[test]
    fn test_dissimilar_texts_do_not_match() {
        let outcome = compare_lyrics(
            "completely different text entirely",
            &candidate("another distinct unrelated passage"),
        );
        assert!(outcome.confidence < MATCH_THRESHOLD);
        assert!(!outcome.is_match);
    }

    #[test]
    fn test_distance_symmetric_and_zero_on_self() {
        let pairs = [
            ("kitten", "sitting"),
            ("hello world", "world hello"),
            ("", "abc"),
        ];
        for (a, b) in pairs {
            assert_eq!(strsim::levenshtein(a, b), strsim::levenshtein(b, a));
        }
        for s in ["", "a", "lyrics go here"] {
            assert_eq!(strsim::levenshtein(s, s), 0);
        }
    }

    #[test]
    fn test_time_tags_ignored_in_scoring() {
        let synced = "[00:10.00] hello world\n[00:15.00] second line";
        let plain = "hello world\nsecond line";
        assert_eq!(lyrics_confidence(synced, plain), 1.0);
    }

    #[test]
    fn test_confidence_threshold_is_strict() {
        // distance 1 over length 5 scores exactly 0.8, which must not match
        let outcome = compare_lyrics("abcde", &candidate("abcdx"));
        assert_eq!(outcome.confidence, MATCH_THRESHOLD);
        assert!(!outcome.is_match);
    }
}
