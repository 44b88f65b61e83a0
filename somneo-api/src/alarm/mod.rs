//! Alarm slots: identity, records, registry and scheduling
//!
//! The device keeps a fixed number of alarm slots. Their state arrives as
//! two parallel arrays (enabled flags from `wualm/aenvs`, hour/minute/days
//! from `wualm/aalms`) that are zipped into [`AlarmRecord`]s here.

mod repeat;
mod schedule;
mod update;

pub use repeat::{RepeatMask, WeekdayPattern};
pub use schedule::{next_alarm, next_firing};
pub use update::{AlarmQuery, AlarmUpdate, SnoozeUpdate};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{ApiError, Result};

/// Alarm time a slot is reset to when removed from the list
pub const DEFAULT_ALARM_HOUR: u8 = 7;
pub const DEFAULT_ALARM_MINUTE: u8 = 0;

/// Snooze time the device ships with, in minutes
pub const DEFAULT_SNOOZE_MINUTES: u8 = 9;

/// 1-based alarm slot number (`prfnr`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlarmId(u8);

impl AlarmId {
    pub const fn new(position: u8) -> Self {
        Self(position)
    }

    /// Slot for a 0-based array index
    pub fn from_index(index: usize) -> Result<Self> {
        u8::try_from(index.saturating_add(1))
            .map(Self)
            .map_err(|_| ApiError::DataIntegrity(format!("alarm index {} exceeds slot range", index)))
    }

    pub const fn position(&self) -> u8 {
        self.0
    }

    /// Name used by the host platform: `alarm0` for slot 1
    pub fn name(&self) -> String {
        format!("alarm{}", self.0.saturating_sub(1))
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alarm #{}", self.0)
    }
}

impl FromStr for AlarmId {
    type Err = ApiError;

    /// Accepts either a slot number (`"3"`) or a platform name (`"alarm2"`)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(index) = s.strip_prefix("alarm") {
            return index
                .parse::<usize>()
                .ok()
                .and_then(|i| AlarmId::from_index(i).ok())
                .ok_or_else(|| ApiError::unknown("alarm", s));
        }
        match s.parse::<u8>() {
            Ok(position) if position > 0 => Ok(AlarmId(position)),
            _ => Err(ApiError::unknown("alarm", s)),
        }
    }
}

/// One alarm slot as last read from the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmRecord {
    pub id: AlarmId,
    pub enabled: bool,
    /// Wall-clock time; seconds are always zero
    pub time: NaiveTime,
    pub repeat: RepeatMask,
}

impl AlarmRecord {
    pub fn new(id: AlarmId, enabled: bool, hour: u8, minute: u8, repeat: RepeatMask) -> Result<Self> {
        Ok(Self {
            id,
            enabled,
            time: alarm_time(hour, minute)?,
            repeat,
        })
    }

    pub fn hour(&self) -> u8 {
        self.time.hour() as u8
    }

    pub fn minute(&self) -> u8 {
        self.time.minute() as u8
    }

    /// Replace the hour and/or minute, keeping whichever is not given
    pub fn set_time(&mut self, hour: Option<u8>, minute: Option<u8>) -> Result<()> {
        self.time = alarm_time(hour.unwrap_or(self.hour()), minute.unwrap_or(self.minute()))?;
        Ok(())
    }

    /// The next instant strictly after `now` at which this alarm fires,
    /// regardless of whether it is enabled
    pub fn next_occurrence(&self, now: NaiveDateTime) -> NaiveDateTime {
        schedule::next_occurrence(self.time, self.repeat, now)
    }

    /// `HH:MM:SS` time and the short names of the repeat days
    pub fn settings(&self) -> (String, Vec<&'static str>) {
        (self.time.format("%H:%M:%S").to_string(), self.repeat.day_names())
    }
}

pub(crate) fn alarm_time(hour: u8, minute: u8) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour.into(), minute.into(), 0)
        .ok_or_else(|| ApiError::InvalidParameter(format!("invalid alarm time {:02}:{:02}", hour, minute)))
}

/// Response of `GET wualm/aenvs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmEnabledResponse {
    pub prfen: Vec<bool>,
}

/// Response of `GET wualm/aalms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmScheduleResponse {
    pub almhr: Vec<u8>,
    pub almmn: Vec<u8>,
    pub daynm: Vec<u8>,
}

/// Response of `GET wualm`; only the snooze time is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnoozeResponse {
    pub snztm: u8,
}

/// All alarm slots, ordered by position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmRegistry {
    alarms: Vec<AlarmRecord>,
}

impl AlarmRegistry {
    /// Zip the two per-slot responses into records
    ///
    /// All arrays must have the same length; anything else means the device
    /// answered the two requests from different states.
    pub fn from_responses(enabled: &AlarmEnabledResponse, schedule: &AlarmScheduleResponse) -> Result<Self> {
        let len = enabled.prfen.len();
        if schedule.almhr.len() != len || schedule.almmn.len() != len || schedule.daynm.len() != len {
            return Err(ApiError::DataIntegrity(format!(
                "alarm arrays differ in length: prfen={}, almhr={}, almmn={}, daynm={}",
                len,
                schedule.almhr.len(),
                schedule.almmn.len(),
                schedule.daynm.len()
            )));
        }

        let alarms = (0..len)
            .map(|i| {
                let id = AlarmId::from_index(i)?;
                AlarmRecord::new(
                    id,
                    enabled.prfen[i],
                    schedule.almhr[i],
                    schedule.almmn[i],
                    RepeatMask::new(schedule.daynm[i]),
                )
                .map_err(|e| ApiError::DataIntegrity(format!("{}: {}", id, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { alarms })
    }

    pub fn from_records(mut alarms: Vec<AlarmRecord>) -> Self {
        alarms.sort_by_key(|alarm| alarm.id);
        Self { alarms }
    }

    pub fn get(&self, id: AlarmId) -> Option<&AlarmRecord> {
        self.alarms.iter().find(|alarm| alarm.id == id)
    }

    pub fn get_mut(&mut self, id: AlarmId) -> Option<&mut AlarmRecord> {
        self.alarms.iter_mut().find(|alarm| alarm.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlarmRecord> {
        self.alarms.iter()
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    /// Enabled flag per slot
    pub fn enabled_states(&self) -> BTreeMap<AlarmId, bool> {
        self.alarms.iter().map(|alarm| (alarm.id, alarm.enabled)).collect()
    }

    /// Soonest firing instant among enabled alarms
    pub fn next_alarm(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        next_alarm(self.iter(), now)
    }
}
