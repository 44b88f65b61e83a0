//! Day-of-week repeat mask
//!
//! The device stores an alarm's repeat days as an 8-bit field where bit `n`
//! (1..=7) stands for ISO weekday `n`: bit 1 is Monday, bit 7 is Sunday.
//! Bit 0 is reserved. It is kept in the raw value but never decoded as a day.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::ApiError;

const DAY_NAMES: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Repeat-day bitmask as stored by the device (`daynm`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepeatMask(u8);

impl RepeatMask {
    /// No day bits: the alarm fires once
    pub const ONCE: RepeatMask = RepeatMask(0);
    /// Monday to Friday
    pub const WORKDAYS: RepeatMask = RepeatMask(62);
    /// Saturday and Sunday
    pub const WEEKEND: RepeatMask = RepeatMask(192);
    /// All seven days
    pub const EVERYDAY: RepeatMask = RepeatMask(254);

    const DAY_BITS: u8 = 0b1111_1110;

    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.number_from_monday()
    }

    /// Build a mask from a set of weekdays
    pub fn from_weekdays<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        Self(days.into_iter().fold(0, |mask, day| mask | Self::bit(day)))
    }

    /// Build a mask from one flag per day, Monday first
    pub fn from_days(mon: bool, tue: bool, wed: bool, thu: bool, fri: bool, sat: bool, sun: bool) -> Self {
        let flags = [mon, tue, wed, thu, fri, sat, sun];
        Self::from_weekdays(
            WEEK.iter()
                .zip(flags)
                .filter(|(_, set)| *set)
                .map(|(day, _)| *day),
        )
    }

    /// Whether the alarm repeats on `day`
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Decode the weekdays this mask fires on, Monday first
    pub fn weekdays(&self) -> Vec<Weekday> {
        WEEK.iter().copied().filter(|day| self.contains(*day)).collect()
    }

    /// Short lowercase day names (`"mon"`, `"tue"`, ...) for the set days
    pub fn day_names(&self) -> Vec<&'static str> {
        self.weekdays()
            .into_iter()
            .map(|day| DAY_NAMES[day.num_days_from_monday() as usize])
            .collect()
    }

    /// True when no day bit is set (bit 0 alone still counts as once)
    pub fn is_once(&self) -> bool {
        self.0 & Self::DAY_BITS == 0
    }

    pub fn is_workdays(&self) -> bool {
        *self == Self::WORKDAYS
    }

    pub fn is_weekend(&self) -> bool {
        *self == Self::WEEKEND
    }

    pub fn is_everyday(&self) -> bool {
        *self == Self::EVERYDAY
    }
}

impl From<u8> for RepeatMask {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl From<RepeatMask> for u8 {
    fn from(mask: RepeatMask) -> Self {
        mask.0
    }
}

impl fmt::Display for RepeatMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_once() {
            write!(f, "once")
        } else {
            write!(f, "{}", self.day_names().join(","))
        }
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Named repeat patterns offered by the device's app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekdayPattern {
    Workdays,
    Weekend,
    Everyday,
    /// Fire once at the next occurrence of the alarm time
    Once,
}

impl WeekdayPattern {
    pub fn mask(&self) -> RepeatMask {
        match self {
            WeekdayPattern::Workdays => RepeatMask::WORKDAYS,
            WeekdayPattern::Weekend => RepeatMask::WEEKEND,
            WeekdayPattern::Everyday => RepeatMask::EVERYDAY,
            WeekdayPattern::Once => RepeatMask::ONCE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeekdayPattern::Workdays => "workdays",
            WeekdayPattern::Weekend => "weekend",
            WeekdayPattern::Everyday => "everyday",
            WeekdayPattern::Once => "once",
        }
    }

    /// The pattern a mask corresponds to, if it is one of the named ones
    pub fn from_mask(mask: RepeatMask) -> Option<Self> {
        [Self::Workdays, Self::Weekend, Self::Everyday, Self::Once]
            .into_iter()
            .find(|pattern| pattern.mask() == mask)
    }
}

impl FromStr for WeekdayPattern {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "workdays" => Ok(WeekdayPattern::Workdays),
            "weekend" => Ok(WeekdayPattern::Weekend),
            "everyday" => Ok(WeekdayPattern::Everyday),
            // The host platform calls the one-shot pattern "tomorrow"
            "once" | "tomorrow" => Ok(WeekdayPattern::Once),
            _ => Err(ApiError::unknown("weekday pattern", s)),
        }
    }
}
