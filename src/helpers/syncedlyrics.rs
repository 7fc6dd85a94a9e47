use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A timing tag at the start of a line, with one- or two-digit fields
    static ref TIMING_TAG: Regex =
        Regex::new(r"^\[(\d{1,2}):(\d{1,2})\.(\d{1,2})\]").unwrap();
    /// A timing tag plus the whitespace that follows it
    static ref TIMING_TAG_PREFIX: Regex =
        Regex::new(r"^\[\d{1,2}:\d{1,2}\.\d{1,2}\]\s*").unwrap();
}

/// Normalize timing tags to the canonical zero-padded [MM:SS.xx] form
///
/// Lines without a recognizable tag pass through unchanged. Applying the
/// pass twice yields the same result as applying it once.
pub fn format_synced_lyrics(lyrics: &str) -> String {
    lyrics
        .lines()
        .map(|line| match TIMING_TAG.captures(line) {
            Some(caps) => {
                // The pattern only admits 1-2 digit groups, so these parse
                let minutes: u32 = caps[1].parse().unwrap_or(0);
                let seconds: u32 = caps[2].parse().unwrap_or(0);
                let hundredths: u32 = caps[3].parse().unwrap_or(0);
                let text = &line[caps.get(0).map(|m| m.end()).unwrap_or(0)..];
                format!("[{:02}:{:02}.{:02}]{}", minutes, seconds, hundredths, text)
            }
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip the leading timing tag (plus following whitespace) from every line,
/// yielding the plain transcript
pub fn convert_synced_lyrics_to_plain(lyrics: &str) -> String {
    lyrics
        .lines()
        .map(|line| TIMING_TAG_PREFIX.replace(line, "").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpadded_tag_is_canonicalized() {
        assert_eq!(format_synced_lyrics("[1:2.3]text"), "[01:02.03]text");
    }

    #[test]
    fn test_already_canonical_tag_unchanged() {
        assert_eq!(
            format_synced_lyrics("[01:02.03] some words"),
            "[01:02.03] some words"
        );
    }

    #[test]
    fn test_non_matching_lines_pass_through() {
        let input = "no tag here\n[bad] still no timing tag\n\nplain line";
        assert_eq!(format_synced_lyrics(input), input);
    }

    #[test]
    fn test_format_is_idempotent() {
        let input = "[1:2.3]first\n[00:15.50] second\nuntagged\n[9:59.9]third";
        let once = format_synced_lyrics(input);
        let twice = format_synced_lyrics(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_convert_to_plain_strips_tags_and_whitespace() {
        let input = "[00:10.73] Alright\n[00:12.56]no space\nuntagged line";
        assert_eq!(
            convert_synced_lyrics_to_plain(input),
            "Alright\nno space\nuntagged line"
        );
    }

    #[test]
    fn test_reformat_after_strip_reintroduces_no_tags() {
        let input = "[00:10.73] Alright\n[01:02.03] Second line";
        let plain = convert_synced_lyrics_to_plain(input);
        let reformatted = format_synced_lyrics(&plain);
        assert_eq!(reformatted, plain);
        assert!(!reformatted.contains('['));
    }

    #[test]
    fn test_multi_line_formatting() {
        let input = "[0:5.0]one\n[1:15.7]two";
        assert_eq!(format_synced_lyrics(input), "[00:05.00]one\n[01:15.07]two");
    }
}
