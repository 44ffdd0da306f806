//! Timestamp resolution for header date/time pairs.
//!
//! A header only says `05/03/2024` and `2:30 PM`; whether that is the 5th of
//! March or the 3rd of May depends on the exporting device's locale. The
//! resolver tries a fixed sequence of [`CalendarFormat`] descriptors and keeps
//! the first one that yields a valid calendar value. Day-first wins when both
//! readings are valid.
//!
//! No timezone handling: results are naive local values.

use chrono::NaiveDateTime;

/// Order of day and month in the date part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateOrder {
    /// `dd/mm/yyyy`
    DayFirst,
    /// `mm/dd/yyyy`
    MonthFirst,
}

/// Number of year digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearWidth {
    /// Two digits, `69..=99` map to the 1900s, the rest to the 2000s
    Short,
    /// Four digits
    Long,
}

/// Hour convention of the time part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clock {
    /// `14:30`
    TwentyFourHour,
    /// `2:30 PM`
    TwelveHour,
}

/// One calendar layout the resolver knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarFormat {
    pub order: DateOrder,
    pub year: YearWidth,
    pub clock: Clock,
    pub seconds: bool,
}

const fn fmt(order: DateOrder, year: YearWidth, clock: Clock, seconds: bool) -> CalendarFormat {
    CalendarFormat {
        order,
        year,
        clock,
        seconds,
    }
}

use Clock::{TwelveHour, TwentyFourHour};
use DateOrder::{DayFirst, MonthFirst};
use YearWidth::{Long, Short};

/// Every supported layout, in resolution order.
pub const CALENDAR_FORMATS: [CalendarFormat; 16] = [
    fmt(DayFirst, Long, TwentyFourHour, true),
    fmt(DayFirst, Long, TwentyFourHour, false),
    fmt(DayFirst, Short, TwentyFourHour, true),
    fmt(DayFirst, Short, TwentyFourHour, false),
    fmt(MonthFirst, Long, TwentyFourHour, true),
    fmt(MonthFirst, Long, TwentyFourHour, false),
    fmt(MonthFirst, Short, TwentyFourHour, true),
    fmt(MonthFirst, Short, TwentyFourHour, false),
    fmt(DayFirst, Long, TwelveHour, true),
    fmt(DayFirst, Long, TwelveHour, false),
    fmt(DayFirst, Short, TwelveHour, true),
    fmt(DayFirst, Short, TwelveHour, false),
    fmt(MonthFirst, Long, TwelveHour, true),
    fmt(MonthFirst, Long, TwelveHour, false),
    fmt(MonthFirst, Short, TwelveHour, true),
    fmt(MonthFirst, Short, TwelveHour, false),
];

impl CalendarFormat {
    /// Returns the chrono format string for this layout.
    ///
    /// Dates are expected with `/` separators and a single space before the
    /// time (see [`resolve_timestamp`]).
    pub fn chrono_format(self) -> &'static str {
        match (self.order, self.year, self.clock, self.seconds) {
            (DayFirst, Long, TwentyFourHour, true) => "%d/%m/%Y %H:%M:%S",
            (DayFirst, Long, TwentyFourHour, false) => "%d/%m/%Y %H:%M",
            (DayFirst, Short, TwentyFourHour, true) => "%d/%m/%y %H:%M:%S",
            (DayFirst, Short, TwentyFourHour, false) => "%d/%m/%y %H:%M",
            (MonthFirst, Long, TwentyFourHour, true) => "%m/%d/%Y %H:%M:%S",
            (MonthFirst, Long, TwentyFourHour, false) => "%m/%d/%Y %H:%M",
            (MonthFirst, Short, TwentyFourHour, true) => "%m/%d/%y %H:%M:%S",
            (MonthFirst, Short, TwentyFourHour, false) => "%m/%d/%y %H:%M",
            (DayFirst, Long, TwelveHour, true) => "%d/%m/%Y %I:%M:%S %p",
            (DayFirst, Long, TwelveHour, false) => "%d/%m/%Y %I:%M %p",
            (DayFirst, Short, TwelveHour, true) => "%d/%m/%y %I:%M:%S %p",
            (DayFirst, Short, TwelveHour, false) => "%d/%m/%y %I:%M %p",
            (MonthFirst, Long, TwelveHour, true) => "%m/%d/%Y %I:%M:%S %p",
            (MonthFirst, Long, TwelveHour, false) => "%m/%d/%Y %I:%M %p",
            (MonthFirst, Short, TwelveHour, true) => "%m/%d/%y %I:%M:%S %p",
            (MonthFirst, Short, TwelveHour, false) => "%m/%d/%y %I:%M %p",
        }
    }

    /// Returns `true` if the year component of a normalized date has the
    /// width this layout expects.
    ///
    /// chrono's `%Y` happily reads `24` as the year 24 AD, so the width is
    /// checked before parsing.
    fn accepts_year(self, date: &str) -> bool {
        let digits = date.rsplit('/').next().map_or(0, str::len);
        match self.year {
            Short => digits == 2,
            Long => digits == 4,
        }
    }

    /// Parses a normalized date/time pair with this layout.
    pub fn parse(self, date: &str, time: &str) -> Option<NaiveDateTime> {
        if !self.accepts_year(date) {
            return None;
        }
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), self.chrono_format()).ok()
    }
}

fn normalize_spaces(s: &str) -> String {
    s.replace(['\u{00A0}', '\u{202F}'], " ").trim().to_string()
}

/// Resolves a header date/time pair, returning the layout that succeeded.
pub fn resolve_timestamp_with_format(
    date: &str,
    time: &str,
) -> Option<(NaiveDateTime, CalendarFormat)> {
    let date = normalize_spaces(&date.replace(['.', '-'], "/"));
    let time = normalize_spaces(time).to_uppercase();

    CALENDAR_FORMATS
        .iter()
        .find_map(|format| format.parse(&date, &time).map(|ts| (ts, *format)))
}

/// Resolves a header date/time pair to a naive local timestamp.
///
/// Returns `None` when no [`CalendarFormat`] produces a valid value.
///
/// ```
/// use chatarchive::parsing::resolve_timestamp;
///
/// let ts = resolve_timestamp("05/03/2024", "2:30 PM").unwrap();
/// assert_eq!(ts.to_string(), "2024-03-05 14:30:00");
///
/// assert!(resolve_timestamp("32/13/2024", "99:99").is_none());
/// ```
pub fn resolve_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    resolve_timestamp_with_format(date, time).map(|(ts, _)| ts)
}
