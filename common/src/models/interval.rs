use crate::Error;
use std::str::FromStr;

pub const INVALID_INTERVAL_MESSAGE: &str =
    "Interval not valid use either/all of these 1d,7d,30d,365d,ytd as accepted intervals";

/// Price-change windows the pricing API can report on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    OneDay,
    SevenDays,
    ThirtyDays,
    OneYear,
    YearToDate,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::OneDay,
        Interval::SevenDays,
        Interval::ThirtyDays,
        Interval::OneYear,
        Interval::YearToDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneDay => "1d",
            Interval::SevenDays => "7d",
            Interval::ThirtyDays => "30d",
            Interval::OneYear => "365d",
            Interval::YearToDate => "ytd",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| Error::Validation(INVALID_INTERVAL_MESSAGE.to_string()))
    }
}

/// Comma-joined list of intervals, in the order the caller gave them.
///
/// Defaults to every supported interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSet(Vec<Interval>);

impl IntervalSet {
    pub fn intervals(&self) -> &[Interval] {
        &self.0
    }
}

impl Default for IntervalSet {
    fn default() -> Self {
        Self(Interval::ALL.to_vec())
    }
}

impl FromStr for IntervalSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut intervals = Vec::new();
        for part in s.split(',') {
            let interval = part.parse::<Interval>()?;
            if !intervals.contains(&interval) {
                intervals.push(interval);
            }
        }
        Ok(Self(intervals))
    }
}

impl std::fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(Interval::as_str)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}
