//! Helpers for printing configuration errors from the firmware build script

/// Marker appended to shortened lines
pub const ELLIPSIS: &str = "...";

/// Prefix of `text` to print before [`ELLIPSIS`] in a `width`-character column
///
/// Returns `None` when `text` already fits. Widths count characters and
/// cuts land on character boundaries, so messages quoting non-ASCII text
/// from the config file (`µs`) are safe to shorten.
pub fn ellipsis_cut(text: &str, width: usize) -> Option<&str> {
    text.chars().nth(width)?;
    let keep = width.saturating_sub(ELLIPSIS.len());
    let end = text
        .char_indices()
        .nth(keep)
        .map_or(text.len(), |(i, _)| i);
    Some(&text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitting_text_is_kept() {
        assert_eq!(ellipsis_cut("settle_ms = 100", 62), None);
        assert_eq!(ellipsis_cut("abcde", 5), None);
    }

    #[test]
    fn test_long_text_leaves_room_for_ellipsis() {
        assert_eq!(ellipsis_cut("abcdefgh", 5), Some("ab"));
    }

    #[test]
    fn test_cut_respects_char_boundaries() {
        // 'µ' is two bytes; cutting "aµµ..." at byte 2 would split it
        let line = "a\u{b5}\u{b5}\u{b5}\u{b5}\u{b5}\u{b5}";
        assert_eq!(ellipsis_cut(line, 5), Some("a\u{b5}"));

        let wide = "\u{b5}\u{b5}\u{b5}\u{b5}\u{b5}\u{b5}\u{b5}\u{b5}";
        let head = ellipsis_cut(wide, 6).unwrap();
        assert_eq!(head.chars().count(), 3);
        assert_eq!(head.len(), 6);
    }
}
