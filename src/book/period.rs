use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum PeriodUnit {
    Day,
    Week,
    Month,
    Year,
}

/// Calendar-granularity span used to window balance queries and reports.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Period {
    pub every: u32,
    pub unit: PeriodUnit,
}

impl Period {
    pub fn new(every: u32, unit: PeriodUnit) -> Self {
        Self { every, unit }
    }

    /// First date no longer covered by this period when it starts at `start`.
    ///
    /// Month and year advancement clamps the day-of-month to the target
    /// month's length, so 2024-01-31 plus one month ends at 2024-02-29.
    pub fn end_date_exclusive(&self, start: NaiveDate) -> NaiveDate {
        match self.unit {
            PeriodUnit::Day => start + Duration::days(self.every as i64),
            PeriodUnit::Week => start + Duration::weeks(self.every as i64),
            PeriodUnit::Month => shift_month(start, self.every as i32),
            PeriodUnit::Year => shift_year(start, self.every as i32),
        }
    }

    /// Last date still covered by this period when it starts at `start`.
    pub fn end_date_inclusive(&self, start: NaiveDate) -> NaiveDate {
        self.end_date_exclusive(start) - Duration::days(1)
    }

    /// Counts how many whole `step` windows tile this period from `anchor`.
    ///
    /// Walks real date boundaries rather than dividing unit counts, since
    /// month and year lengths depend on the anchor. Truncates: a trailing
    /// remainder shorter than `step` is not counted. Returns 0 when a single
    /// `step` already overruns the period.
    pub fn divide_into(&self, anchor: NaiveDate, step: Period) -> u32 {
        let end = self.end_date_exclusive(anchor);
        let mut cursor = anchor;
        let mut count = 0;
        loop {
            let next = step.end_date_exclusive(cursor);
            if next <= cursor || next > end {
                break;
            }
            count += 1;
            cursor = next;
        }
        count
    }

    pub fn label(&self) -> String {
        match (self.every, &self.unit) {
            (1, PeriodUnit::Day) => "Daily".into(),
            (1, PeriodUnit::Week) => "Weekly".into(),
            (1, PeriodUnit::Month) => "Monthly".into(),
            (1, PeriodUnit::Year) => "Yearly".into(),
            (n, unit) => format!("Every {} {:?}{}", n, unit, if n > 1 { "s" } else { "" }),
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let mut day = date.day();
    let month = date.month();
    day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
