//! Message header recognition.
//!
//! Exporters write each message as a header line (timestamp, author, first
//! line of text) followed by zero or more continuation lines. Which header
//! layout a transcript uses depends on the platform and the device locale.
//!
//! Supported layouts, in match priority:
//! - `[05/03/2024 14:30:00] Alice: Hello` (bracketed, 24-hour)
//! - `[3/5/24, 2:30:00 PM] Alice: Hello` (bracketed, 12-hour)
//! - `05/03/2024, 14:30 - Alice: Hello` (dashed, 4-digit year)
//! - `05.03.24, 14:30 – Alice: Hello` (dashed, 2-digit year)
//! - `05-03-2024 14:30:00 Alice: Hello` (bare, seconds required)

use regex::Regex;

/// One header layout, tagged by how it delimits the timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderPattern {
    /// `[date[,] time] Author: body`
    BracketedTwentyFourHour,
    /// `[date[,] time AM|PM] Author: body`
    BracketedTwelveHour,
    /// `dd/mm/yyyy, time - Author: body` (hyphen, en-dash or em-dash)
    DashedLongYear,
    /// `dd/mm/yy, time - Author: body` (hyphen, en-dash or em-dash)
    DashedShortYear,
    /// `date hh:mm:ss Author: body`
    BareWithSeconds,
}

/// How a header separates the timestamp from the author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorSeparator {
    /// Closing square bracket
    Bracket,
    /// Hyphen, en-dash or em-dash
    Dash,
    /// Whitespace only
    Space,
}

impl HeaderPattern {
    /// Returns regex pattern for this header layout.
    ///
    /// Groups: 1 = date, 2 = time, 3 = author, 4 = body.
    pub fn pattern(self) -> &'static str {
        match self {
            HeaderPattern::BracketedTwentyFourHour => {
                r"^\[(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}),?\s+(\d{1,2}:\d{2}(?::\d{2})?)\]\s+([^:]+?)\s*:\s(.*)$"
            }
            HeaderPattern::BracketedTwelveHour => {
                r"^\[(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}),?\s+(\d{1,2}:\d{2}(?::\d{2})?\s*(?:AM|PM|am|pm))\]\s+([^:]+?)\s*:\s(.*)$"
            }
            HeaderPattern::DashedLongYear => {
                r"^(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{4}),\s*(\d{1,2}:\d{2}(?::\d{2})?(?:\s*(?:AM|PM|am|pm))?)\s*[–—-]\s*([^:]+?)\s*:\s(.*)$"
            }
            HeaderPattern::DashedShortYear => {
                r"^(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2}),\s*(\d{1,2}:\d{2}(?::\d{2})?(?:\s*(?:AM|PM|am|pm))?)\s*[–—-]\s*([^:]+?)\s*:\s(.*)$"
            }
            HeaderPattern::BareWithSeconds => {
                r"^(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4})\s+(\d{1,2}:\d{2}:\d{2})\s+([^:]+?)\s*:\s(.*)$"
            }
        }
    }

    /// Returns all layouts in match priority order.
    pub fn all() -> &'static [HeaderPattern] {
        &[
            HeaderPattern::BracketedTwentyFourHour,
            HeaderPattern::BracketedTwelveHour,
            HeaderPattern::DashedLongYear,
            HeaderPattern::DashedShortYear,
            HeaderPattern::BareWithSeconds,
        ]
    }

    /// Returns `true` if the timestamp is enclosed in square brackets.
    pub fn is_bracketed(self) -> bool {
        matches!(
            self,
            HeaderPattern::BracketedTwentyFourHour | HeaderPattern::BracketedTwelveHour
        )
    }

    /// Returns `true` if the layout requires an AM/PM suffix.
    pub fn requires_meridiem(self) -> bool {
        self == HeaderPattern::BracketedTwelveHour
    }

    /// Returns `true` if the layout requires seconds in the time.
    pub fn requires_seconds(self) -> bool {
        self == HeaderPattern::BareWithSeconds
    }

    /// Returns what separates the timestamp from the author.
    pub fn author_separator(self) -> AuthorSeparator {
        match self {
            HeaderPattern::BracketedTwentyFourHour | HeaderPattern::BracketedTwelveHour => {
                AuthorSeparator::Bracket
            }
            HeaderPattern::DashedLongYear | HeaderPattern::DashedShortYear => {
                AuthorSeparator::Dash
            }
            HeaderPattern::BareWithSeconds => AuthorSeparator::Space,
        }
    }
}

/// The pieces of a recognized header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Which layout matched
    pub pattern: HeaderPattern,
    /// Raw date text, e.g. `05/03/2024`
    pub date: &'a str,
    /// Raw time text, e.g. `2:30:00 PM`
    pub time: &'a str,
    /// Author name, trimmed
    pub author: &'a str,
    /// First line of the body, trimmed; may contain colons
    pub body: &'a str,
}

/// Matches normalized lines against every [`HeaderPattern`] in priority order.
///
/// Calendar values are not validated here; `32/13/2024` still matches and is
/// left to the timestamp resolver.
pub struct LineClassifier {
    patterns: Vec<(HeaderPattern, Regex)>,
}

impl LineClassifier {
    /// Compiles all header patterns.
    pub fn new() -> Self {
        let patterns = HeaderPattern::all()
            .iter()
            .map(|&p| (p, Regex::new(p.pattern()).expect("header pattern is valid")))
            .collect();
        Self { patterns }
    }

    /// Returns the first layout that matches `line`, or `None` for a
    /// continuation line.
    pub fn classify<'a>(&self, line: &'a str) -> Option<HeaderMatch<'a>> {
        self.patterns.iter().find_map(|(pattern, regex)| {
            let caps = regex.captures(line)?;
            Some(HeaderMatch {
                pattern: *pattern,
                date: caps.get(1).map_or("", |m| m.as_str()),
                time: caps.get(2).map_or("", |m| m.as_str()),
                author: caps.get(3).map_or("", |m| m.as_str().trim()),
                body: caps.get(4).map_or("", |m| m.as_str().trim()),
            })
        })
    }

    /// Returns `true` if `line` starts a new message.
    pub fn is_header(&self, line: &str) -> bool {
        self.patterns.iter().any(|(_, regex)| regex.is_match(line))
    }

    /// Returns every layout that matches `line`, in priority order.
    pub fn matching_patterns(&self, line: &str) -> Vec<HeaderPattern> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(line))
            .map(|(pattern, _)| *pattern)
            .collect()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
