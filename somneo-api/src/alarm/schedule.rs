//! Next-alarm computation
//!
//! All instants are local wall-clock times without a timezone, the same way
//! the device presents them.

use chrono::{Datelike, Days, NaiveDateTime, NaiveTime};

use super::{AlarmRecord, RepeatMask};

/// Next instant strictly after `now` matching `time` and `repeat`
///
/// A mask without day bits is a one-shot alarm: today if the time is still
/// ahead, otherwise tomorrow. Repeating alarms scan the coming week; when the
/// only matching day is today and its time has passed, the alarm falls on the
/// same weekday one week later.
pub(crate) fn next_occurrence(time: NaiveTime, repeat: RepeatMask, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date();
    let at = |offset: u64| (today + Days::new(offset)).and_time(time);

    if repeat.is_once() {
        let candidate = at(0);
        return if candidate > now { candidate } else { at(1) };
    }

    (0..7)
        .map(at)
        .find(|candidate| repeat.contains(candidate.weekday()) && *candidate > now)
        .unwrap_or_else(|| at(7))
}

/// The enabled alarm that fires first after `now`, with its firing instant
///
/// Ties are resolved in favour of the lower slot.
pub fn next_firing<'a, I>(alarms: I, now: NaiveDateTime) -> Option<(&'a AlarmRecord, NaiveDateTime)>
where
    I: IntoIterator<Item = &'a AlarmRecord>,
{
    alarms
        .into_iter()
        .filter(|alarm| alarm.enabled)
        .map(|alarm| (alarm, alarm.next_occurrence(now)))
        .min_by_key(|(alarm, at)| (*at, alarm.id))
}

/// Soonest firing instant among the enabled alarms, or `None` if none is enabled
pub fn next_alarm<'a, I>(alarms: I, now: NaiveDateTime) -> Option<NaiveDateTime>
where
    I: IntoIterator<Item = &'a AlarmRecord>,
{
    next_firing(alarms, now).map(|(_, at)| at)
}
