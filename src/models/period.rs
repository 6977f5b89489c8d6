//! Budget period representation
//!
//! A `PeriodKind` is the cadence stored on a budget record; a `BudgetPeriod`
//! is one concrete window of that cadence (a given ISO week, month, quarter
//! or year).

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cadence of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl PeriodKind {
    /// The window of this cadence containing `date`
    pub fn period_for(&self, date: NaiveDate) -> BudgetPeriod {
        match self {
            Self::Weekly => BudgetPeriod::weekly(date.iso_week().year(), date.iso_week().week()),
            Self::Monthly => BudgetPeriod::monthly(date.year(), date.month()),
            Self::Quarterly => BudgetPeriod::quarterly(date.year(), (date.month() - 1) / 3 + 1),
            Self::Yearly => BudgetPeriod::yearly(date.year()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PeriodKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "m" => Ok(Self::Monthly),
            "quarterly" | "quarter" | "q" => Ok(Self::Quarterly),
            "yearly" | "year" | "annual" | "y" => Ok(Self::Yearly),
            other => Err(format!("Unknown period kind: {}", other)),
        }
    }
}

/// A concrete budget window
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum BudgetPeriod {
    /// ISO week period (e.g., "2025-W03")
    Weekly { year: i32, week: u32 },

    /// Monthly period (e.g., "2025-01")
    Monthly { year: i32, month: u32 },

    /// Calendar quarter (e.g., "2025-Q1")
    Quarterly { year: i32, quarter: u32 },

    /// Calendar year (e.g., "2025")
    Yearly { year: i32 },
}

fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_else(|| first_of_year(year))
}

impl BudgetPeriod {
    pub fn weekly(year: i32, week: u32) -> Self {
        Self::Weekly { year, week }
    }

    pub fn monthly(year: i32, month: u32) -> Self {
        Self::Monthly { year, month }
    }

    pub fn quarterly(year: i32, quarter: u32) -> Self {
        Self::Quarterly { year, quarter }
    }

    pub fn yearly(year: i32) -> Self {
        Self::Yearly { year }
    }

    /// The cadence this window belongs to
    pub fn kind(&self) -> PeriodKind {
        match self {
            Self::Weekly { .. } => PeriodKind::Weekly,
            Self::Monthly { .. } => PeriodKind::Monthly,
            Self::Quarterly { .. } => PeriodKind::Quarterly,
            Self::Yearly { .. } => PeriodKind::Yearly,
        }
    }

    /// Get the start date of this period
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::Weekly { year, week } => NaiveDate::from_isoywd_opt(*year, *week, Weekday::Mon)
                .unwrap_or_else(|| first_of_year(*year)),
            Self::Monthly { year, month } => first_of_month(*year, *month),
            Self::Quarterly { year, quarter } => {
                first_of_month(*year, ((*quarter).clamp(1, 4) - 1) * 3 + 1)
            }
            Self::Yearly { year } => first_of_year(*year),
        }
    }

    /// Get the end date of this period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.next().start_date() - Duration::days(1)
    }

    /// Number of days in the window
    pub fn days(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days() + 1
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        match self {
            Self::Weekly { year, week } => {
                // ISO years have 52 or 53 weeks; Dec 28 is always in the last one
                let max_week = NaiveDate::from_ymd_opt(*year, 12, 28)
                    .map(|d| d.iso_week().week())
                    .unwrap_or(52);
                if *week >= max_week {
                    Self::weekly(*year + 1, 1)
                } else {
                    Self::weekly(*year, *week + 1)
                }
            }
            Self::Monthly { year, month } => {
                if *month >= 12 {
                    Self::monthly(*year + 1, 1)
                } else {
                    Self::monthly(*year, *month + 1)
                }
            }
            Self::Quarterly { year, quarter } => {
                if *quarter >= 4 {
                    Self::quarterly(*year + 1, 1)
                } else {
                    Self::quarterly(*year, *quarter + 1)
                }
            }
            Self::Yearly { year } => Self::yearly(*year + 1),
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        match self {
            Self::Weekly { year, week } => {
                if *week <= 1 {
                    let prev_year = *year - 1;
                    let max_week = NaiveDate::from_ymd_opt(prev_year, 12, 28)
                        .map(|d| d.iso_week().week())
                        .unwrap_or(52);
                    Self::weekly(prev_year, max_week)
                } else {
                    Self::weekly(*year, *week - 1)
                }
            }
            Self::Monthly { year, month } => {
                if *month <= 1 {
                    Self::monthly(*year - 1, 12)
                } else {
                    Self::monthly(*year, *month - 1)
                }
            }
            Self::Quarterly { year, quarter } => {
                if *quarter <= 1 {
                    Self::quarterly(*year - 1, 4)
                } else {
                    Self::quarterly(*year, *quarter - 1)
                }
            }
            Self::Yearly { year } => Self::yearly(*year - 1),
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Weekly: "2025-W03"
    /// - Monthly: "2025-01"
    /// - Quarterly: "2025-Q1"
    /// - Yearly: "2025"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        if let Some((year, week)) = s.split_once("-W") {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let week: u32 = week.parse().map_err(|_| invalid())?;
            if !(1..=53).contains(&week) {
                return Err(PeriodParseError::OutOfRange(s.to_string()));
            }
            return Ok(Self::weekly(year, week));
        }

        if let Some((year, quarter)) = s.split_once("-Q") {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let quarter: u32 = quarter.parse().map_err(|_| invalid())?;
            if !(1..=4).contains(&quarter) {
                return Err(PeriodParseError::OutOfRange(s.to_string()));
            }
            return Ok(Self::quarterly(year, quarter));
        }

        if let Some((year, month)) = s.split_once('-') {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            if !(1..=12).contains(&month) {
                return Err(PeriodParseError::OutOfRange(s.to_string()));
            }
            return Ok(Self::monthly(year, month));
        }

        if s.len() == 4 {
            let year: i32 = s.parse().map_err(|_| invalid())?;
            return Ok(Self::yearly(year));
        }

        Err(invalid())
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly { year, week } => write!(f, "{:04}-W{:02}", year, week),
            Self::Monthly { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Quarterly { year, quarter } => write!(f, "{:04}-Q{}", year, quarter),
            Self::Yearly { year } => write!(f, "{:04}", year),
        }
    }
}

impl Ord for BudgetPeriod {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_date()
            .cmp(&other.start_date())
            .then_with(|| self.end_date().cmp(&other.end_date()))
    }
}

impl PartialOrd for BudgetPeriod {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::OutOfRange(s) => write!(f, "Period out of range: {}", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_period() {
        let period = BudgetPeriod::monthly(2025, 2);
        assert_eq!(period.start_date(), date(2025, 2, 1));
        assert_eq!(period.end_date(), date(2025, 2, 28));
        assert_eq!(period.days(), 28);
    }

    #[test]
    fn test_december_end() {
        let period = BudgetPeriod::monthly(2024, 12);
        assert_eq!(period.end_date(), date(2024, 12, 31));
        assert_eq!(period.next(), BudgetPeriod::monthly(2025, 1));
    }

    #[test]
    fn test_quarterly_period() {
        let q2 = BudgetPeriod::quarterly(2025, 2);
        assert_eq!(q2.start_date(), date(2025, 4, 1));
        assert_eq!(q2.end_date(), date(2025, 6, 30));
        assert_eq!(BudgetPeriod::quarterly(2025, 4).next(), BudgetPeriod::quarterly(2026, 1));
        assert_eq!(BudgetPeriod::quarterly(2025, 1).prev(), BudgetPeriod::quarterly(2024, 4));
    }

    #[test]
    fn test_yearly_period() {
        let year = BudgetPeriod::yearly(2024);
        assert_eq!(year.days(), 366);
        assert!(year.contains(date(2024, 7, 4)));
    }

    #[test]
    fn test_weekly_period() {
        // ISO week 1 of 2025 starts on Monday December 30, 2024
        let period = BudgetPeriod::weekly(2025, 1);
        assert_eq!(period.start_date(), date(2024, 12, 30));
        assert_eq!(period.end_date(), date(2025, 1, 5));
        assert_eq!(BudgetPeriod::weekly(2020, 53).next(), BudgetPeriod::weekly(2021, 1));
    }

    #[test]
    fn test_period_for_date() {
        let d = date(2025, 5, 14);
        assert_eq!(PeriodKind::Monthly.period_for(d), BudgetPeriod::monthly(2025, 5));
        assert_eq!(PeriodKind::Quarterly.period_for(d), BudgetPeriod::quarterly(2025, 2));
        assert_eq!(PeriodKind::Yearly.period_for(d), BudgetPeriod::yearly(2025));
        assert!(PeriodKind::Weekly.period_for(d).contains(d));
    }

    #[test]
    fn test_parse() {
        assert_eq!(BudgetPeriod::parse("2025-01").unwrap(), BudgetPeriod::monthly(2025, 1));
        assert_eq!(BudgetPeriod::parse("2025-W03").unwrap(), BudgetPeriod::weekly(2025, 3));
        assert_eq!(BudgetPeriod::parse("2025-Q3").unwrap(), BudgetPeriod::quarterly(2025, 3));
        assert_eq!(BudgetPeriod::parse("2025").unwrap(), BudgetPeriod::yearly(2025));
        assert!(matches!(
            BudgetPeriod::parse("2025-13"),
            Err(PeriodParseError::OutOfRange(_))
        ));
        assert!(BudgetPeriod::parse("soon").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for period in [
            BudgetPeriod::weekly(2025, 3),
            BudgetPeriod::monthly(2025, 11),
            BudgetPeriod::quarterly(2026, 2),
            BudgetPeriod::yearly(2027),
        ] {
            assert_eq!(BudgetPeriod::parse(&period.to_string()).unwrap(), period);
        }
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Monthly".parse::<PeriodKind>().unwrap(), PeriodKind::Monthly);
        assert_eq!("q".parse::<PeriodKind>().unwrap(), PeriodKind::Quarterly);
        assert!("daily".parse::<PeriodKind>().is_err());
    }
}
