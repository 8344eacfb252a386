use chrono::{Datelike, Local, NaiveDate};

/// Days of data one graph page shows.
pub const WINDOW_DAYS: u32 = 42;

/// The sampling horizon: pages are planned up to the end of a fixed
/// 365-day year, never past it.
pub const YEAR_HORIZON_DAYS: u32 = 365;

/// Days one scroll press advances the window in the alternate 21-day
/// sampling strategy.
pub const ALT_PRESS_DAYS: u32 = 21;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// How many forward-paging steps a session will perform.
///
/// The widget never reports its total range, so the count is inferred from
/// calendar position alone: the days left in a fixed 365-day year divided
/// into 42-day pages, rounded up. This is an estimate, not a measurement —
/// it ignores the leap day and can be off by one page close to the end of
/// the year. It is recomputed fresh for every attempt and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPlan {
    pub pages: u32,
}

impl PaginationPlan {
    /// Plan derived from today's date.
    pub fn for_today() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// Plan derived from an arbitrary date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_day_of_year(date.ordinal())
    }

    /// Plan derived from an ordinal day of year (1–366).
    pub fn for_day_of_year(day_of_year: u32) -> Self {
        let remaining = YEAR_HORIZON_DAYS.saturating_sub(day_of_year);
        Self {
            pages: remaining.div_ceil(WINDOW_DAYS),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pages == 0
    }

    /// Whether `page` (0-based) is the last planned page.
    pub fn is_final(&self, page: u32) -> bool {
        page + 1 == self.pages
    }
}

/// 1-based month number for a short English month name.
pub fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

fn month_lengths(leap: bool) -> [u32; 12] {
    let mut lengths = MONTH_LENGTHS;
    if leap {
        lengths[1] = 29;
    }
    lengths
}

/// Ordinal day of year (1-based) for a month/day pair, `None` when the
/// pair is out of range.
pub fn day_of_year(month: u32, day: u32, leap: bool) -> Option<u32> {
    if month == 0 || month > 12 {
        return None;
    }
    let lengths = month_lengths(leap);
    if day == 0 || day > lengths[month as usize - 1] {
        return None;
    }
    let preceding: u32 = lengths[..month as usize - 1].iter().sum();
    Some(preceding + day)
}

/// Alternate sampling stride: derive a 21-day press count from a date label
/// as the widget renders it ("Mar 5, Wed"). Retained as an alternate
/// strategy; the primary path plans from today's ordinal instead.
pub fn alt_presses_from_label(label: &str, leap: bool) -> Option<u32> {
    let date_part = label.split(',').next()?.trim();
    let mut parts = date_part.split_whitespace();
    let month = month_number(parts.next()?)?;
    let day: u32 = parts.next()?.parse().ok()?;

    let zero_based = day_of_year(month, day, leap)? - 1;
    Some(
        YEAR_HORIZON_DAYS
            .saturating_sub(zero_based)
            .div_ceil(ALT_PRESS_DAYS),
    )
}
