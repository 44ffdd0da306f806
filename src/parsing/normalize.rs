//! Line normalization ahead of header matching.

/// Invisible directionality marks some exporters put around timestamps.
const DIRECTION_MARKS: &[char] = &['\u{200E}', '\u{200F}'];

/// Space variants that must compare equal to an ordinary space.
const SPACE_VARIANTS: &[char] = &['\u{00A0}', '\u{202F}'];

/// Normalizes one raw transcript line.
///
/// Removes left-to-right / right-to-left marks, turns no-break and narrow
/// no-break spaces into ordinary spaces, and trims the result. Total and
/// idempotent.
///
/// ```
/// use chatarchive::parsing::normalize_line;
///
/// assert_eq!(normalize_line("\u{200E}[05/03/2024 14:30:00]\u{00A0}Alice: hi "), "[05/03/2024 14:30:00] Alice: hi");
/// ```
pub fn normalize_line(raw: &str) -> String {
    raw.chars()
        .filter(|c| !DIRECTION_MARKS.contains(c))
        .map(|c| if SPACE_VARIANTS.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_direction_marks() {
        assert_eq!(normalize_line("\u{200E}image omitted"), "image omitted");
        assert_eq!(normalize_line("abc\u{200F}def"), "abcdef");
    }

    #[test]
    fn test_replaces_space_variants() {
        assert_eq!(normalize_line("2:30\u{202F}PM"), "2:30 PM");
        assert_eq!(normalize_line("a\u{00A0}b"), "a b");
    }

    #[test]
    fn test_trims_after_replacement() {
        assert_eq!(normalize_line("\u{00A0} hello \u{202F}"), "hello");
        assert_eq!(normalize_line("\u{200E}"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "  [1/2/24, 3:04:05\u{202F}PM] Bob: yo  ",
            "\u{200E}\u{00A0}",
            "plain",
            "",
        ];
        for raw in samples {
            let once = normalize_line(raw);
            assert_eq!(normalize_line(&once), once);
        }
    }

    #[test]
    fn test_keeps_other_invisible_characters() {
        // Zero-width joiners are part of emoji sequences and stay
        assert_eq!(normalize_line("👨\u{200D}👩"), "👨\u{200D}👩");
    }
}
